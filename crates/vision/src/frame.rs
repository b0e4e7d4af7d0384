use {
    crate::{VisionError, preprocess},
    crates_image::{DynamicImage, GrayImage},
    serde::Deserialize,
};

/// Geometry and filter parameters of the pre-processed view.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreprocessConfig {
    /// First grayscale row of the region the classifier looks at.
    pub roi_top: u32,
    /// Row after the last one of the region (exclusive).
    pub roi_bottom: u32,
    /// Gaussian blur sigma applied before edge detection, 0 disables it.
    pub blur_sigma: f32,
    /// Spread of the automatic Canny thresholds around the median intensity.
    pub canny_sigma: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        // lower half of a 320x240 camera frame
        Self {
            roi_top: 120,
            roi_bottom: 240,
            blur_sigma: 0.8,
            canny_sigma: 0.25,
        }
    }
}

impl PreprocessConfig {
    pub fn with_roi(mut self, top: u32, bottom: u32) -> Self {
        self.roi_top = top;
        self.roi_bottom = bottom;
        self
    }

    pub fn with_blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    pub fn with_canny_sigma(mut self, sigma: f32) -> Self {
        self.canny_sigma = sigma;
        self
    }

    pub fn roi_height(&self) -> u32 {
        self.roi_bottom.saturating_sub(self.roi_top)
    }
}

/// The views derived from one decoded video frame.
///
/// Built once per extracted byte span and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Frame {
    gray: GrayImage,
    edges: GrayImage,
}

impl Frame {
    /// Derive the grayscale and edge views of a decoded image.
    pub fn new(image: DynamicImage, config: &PreprocessConfig) -> Result<Self, VisionError> {
        let gray = image.to_luma8();
        let edges = preprocess::edges(&gray, config)?;
        Ok(Self { gray, edges })
    }

    /// Full-frame luma view, fed to the obstacle detector and recorded.
    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    /// Edge-filtered region of interest, fed to the classifier.
    pub fn edges(&self) -> &GrayImage {
        &self.edges
    }

    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    pub fn height(&self) -> u32 {
        self.gray.height()
    }
}
