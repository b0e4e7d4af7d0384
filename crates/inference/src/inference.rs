use {
    crate::{InferError, MlpClassifier},
    candle_core::Device,
    std::path::Path,
};

/// Owns the compute device models are loaded onto.
#[derive(Debug, Clone)]
pub struct Inference {
    device: Device,
}

impl Inference {
    pub fn cpu() -> Self {
        log::info!("Inference device: CPU");
        Self {
            device: Device::Cpu,
        }
    }

    #[cfg(feature = "cuda")]
    pub fn cuda(ordinal: usize) -> Result<Self, InferError> {
        let device = Device::new_cuda(ordinal)?;
        if device.is_cuda() {
            log::info!("Inference device: CUDA (ordinal {})", ordinal);
        } else {
            log::warn!(
                "Inference device: requested CUDA ordinal {} but device reports non-CUDA",
                ordinal
            );
        }
        Ok(Self { device })
    }

    /// Load the steering classifier from a safetensors file.
    pub fn use_steering_classifier(
        &self,
        model_path: impl AsRef<Path>,
    ) -> Result<MlpClassifier, InferError> {
        MlpClassifier::load(model_path, &self.device)
    }
}
