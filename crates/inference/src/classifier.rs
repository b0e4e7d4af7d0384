use {
    crate::InferError,
    candle_core::{DType, Device, Tensor},
    candle_nn::{Linear, Module},
    std::{collections::HashMap, path::Path},
};

/// Dense feed-forward network scoring a flattened edge image, one score per
/// steering label.
///
/// Weights are read from safetensors entries `layers.<i>.weight` (`[out, in]`)
/// and `layers.<i>.bias` (`[out]`) for consecutive `i` starting at 0. Hidden
/// layers use ReLU, the last layer returns raw scores.
#[derive(Debug)]
pub struct MlpClassifier {
    layers: Vec<Linear>,
    input_len: usize,
    output_len: usize,
    device: Device,
}

impl MlpClassifier {
    pub(crate) fn load(model_path: impl AsRef<Path>, device: &Device) -> Result<Self, InferError> {
        let path = model_path.as_ref();
        if !path.exists() {
            return Err(InferError::Io(format!(
                "model file not found: {}",
                path.display()
            )));
        }
        let model = Self::from_tensors(candle_core::safetensors::load(path, device)?, device)?;
        log::info!(
            "Loaded steering classifier {} ({} layers, {} -> {})",
            path.display(),
            model.layers.len(),
            model.input_len,
            model.output_len
        );
        Ok(model)
    }

    /// Build the network from named tensors already in memory.
    pub fn from_tensors(
        mut tensors: HashMap<String, Tensor>,
        device: &Device,
    ) -> Result<Self, InferError> {
        let mut layers = Vec::new();
        let mut dims: Vec<(usize, usize)> = Vec::new();

        for i in 0.. {
            let Some(weight) = tensors.remove(&format!("layers.{i}.weight")) else {
                break;
            };
            let bias = tensors
                .remove(&format!("layers.{i}.bias"))
                .ok_or_else(|| InferError::Shape(format!("layers.{i}.bias is missing")))?;
            let weight = weight.to_dtype(DType::F32)?;
            let bias = bias.to_dtype(DType::F32)?;

            let (out_dim, in_dim) = weight.dims2()?;
            let bias_dim = bias.dims1()?;
            if bias_dim != out_dim {
                return Err(InferError::Shape(format!(
                    "layers.{i}: bias has {bias_dim} entries for {out_dim} outputs"
                )));
            }
            if let Some(&(prev_out, _)) = dims.last() {
                if prev_out != in_dim {
                    return Err(InferError::Shape(format!(
                        "layers.{i}: expects {in_dim} inputs, previous layer yields {prev_out}"
                    )));
                }
            }
            dims.push((out_dim, in_dim));
            layers.push(Linear::new(weight, Some(bias)));
        }

        let (Some(&(_, input_len)), Some(&(output_len, _))) = (dims.first(), dims.last()) else {
            return Err(InferError::Shape("no layers.0.weight tensor".to_string()));
        };

        Ok(Self {
            layers,
            input_len,
            output_len,
            device: device.clone(),
        })
    }

    /// Number of values `predict` expects.
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Number of scores `predict` returns.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Score one input vector.
    pub fn predict(&self, input: &[f32]) -> Result<Vec<f32>, InferError> {
        if input.len() != self.input_len {
            return Err(InferError::Shape(format!(
                "expected {} input values, got {}",
                self.input_len,
                input.len()
            )));
        }

        let mut x = Tensor::from_slice(input, (1, self.input_len), &self.device)?;
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            x = layer.forward(&x)?;
            if i < last {
                x = x.relu()?;
            }
        }
        Ok(x.squeeze(0)?.to_vec1::<f32>()?)
    }
}
