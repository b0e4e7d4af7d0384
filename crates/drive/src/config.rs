use {
    crate::{ConfigError, DetectorConfig, MotionTiming},
    serde::Deserialize,
    std::path::{Path, PathBuf},
    vision::PreprocessConfig,
};

/// Configuration of the rover control server.
///
/// Loaded from JSON; every field is optional.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoverConfig {
    listen: String,
    read_chunk: usize,
    max_buffer: Option<usize>,
    record_root: PathBuf,
    jpeg_quality: u8,
    preprocess: PreprocessConfig,
    detector: DetectorConfig,
    timing: MotionTiming,
    classifier: Option<PathBuf>,
    motor_device: Option<PathBuf>,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8000".to_string(),
            read_chunk: com::reader::DEFAULT_READ_CHUNK,
            max_buffer: None,
            record_root: PathBuf::from("frames"),
            jpeg_quality: 90,
            preprocess: PreprocessConfig::default(),
            detector: DetectorConfig::default(),
            timing: MotionTiming::default(),
            classifier: None,
            motor_device: None,
        }
    }
}

impl RoverConfig {
    /// Read and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preprocess.roi_height() == 0 {
            return Err(ConfigError::Invalid(format!(
                "empty region of interest: rows {}..{}",
                self.preprocess.roi_top, self.preprocess.roi_bottom
            )));
        }
        if !(self.preprocess.blur_sigma >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "blur_sigma {} must be a non-negative number",
                self.preprocess.blur_sigma
            )));
        }
        if !(0.0..=1.0).contains(&self.preprocess.canny_sigma) {
            return Err(ConfigError::Invalid(format!(
                "canny_sigma {} outside 0..=1",
                self.preprocess.canny_sigma
            )));
        }
        if self.read_chunk == 0 {
            return Err(ConfigError::Invalid("read_chunk must be positive".to_string()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "jpeg_quality {} outside 1..=100",
                self.jpeg_quality
            )));
        }
        if self.timing.stop <= self.timing.pause {
            return Err(ConfigError::Invalid(format!(
                "stop hold ({} ms) must exceed the steering pause ({} ms)",
                self.timing.stop, self.timing.pause
            )));
        }
        if self.detector.min_region > self.detector.max_region {
            return Err(ConfigError::Invalid(format!(
                "min_region {} exceeds max_region {}",
                self.detector.min_region, self.detector.max_region
            )));
        }
        Ok(())
    }

    pub fn with_listen(mut self, listen: impl Into<String>) -> Self {
        self.listen = listen.into();
        self
    }

    pub fn with_read_chunk(mut self, read_chunk: usize) -> Self {
        self.read_chunk = read_chunk;
        self
    }

    pub fn with_max_buffer(mut self, max_buffer: Option<usize>) -> Self {
        self.max_buffer = max_buffer;
        self
    }

    pub fn with_record_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.record_root = root.into();
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn with_preprocess(mut self, preprocess: PreprocessConfig) -> Self {
        self.preprocess = preprocess;
        self
    }

    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_timing(mut self, timing: MotionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_classifier(mut self, path: Option<PathBuf>) -> Self {
        self.classifier = path;
        self
    }

    pub fn with_motor_device(mut self, path: Option<PathBuf>) -> Self {
        self.motor_device = path;
        self
    }

    // Getters
    pub fn listen(&self) -> &str {
        &self.listen
    }

    pub fn read_chunk(&self) -> usize {
        self.read_chunk
    }

    pub fn max_buffer(&self) -> Option<usize> {
        self.max_buffer
    }

    pub fn record_root(&self) -> &Path {
        &self.record_root
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn preprocess(&self) -> &PreprocessConfig {
        &self.preprocess
    }

    pub fn detector(&self) -> &DetectorConfig {
        &self.detector
    }

    pub fn timing(&self) -> &MotionTiming {
        &self.timing
    }

    pub fn classifier(&self) -> Option<&Path> {
        self.classifier.as_deref()
    }

    pub fn motor_device(&self) -> Option<&Path> {
        self.motor_device.as_deref()
    }
}
