use {
    crate::{PreprocessConfig, VisionError},
    crates_image::{GrayImage, imageops},
    imageproc::{edges::canny, filter::gaussian_blur_f32},
};

/// Cut the configured band of rows out of the grayscale view.
///
/// A band reaching past the bottom of the frame is clamped to it.
pub fn crop_roi(gray: &GrayImage, config: &PreprocessConfig) -> Result<GrayImage, VisionError> {
    let bottom = config.roi_bottom.min(gray.height());
    if gray.width() == 0 || config.roi_top >= bottom {
        return Err(VisionError::Geometry(format!(
            "rows {}..{} are outside a {}x{} frame",
            config.roi_top,
            config.roi_bottom,
            gray.width(),
            gray.height()
        )));
    }
    Ok(imageops::crop_imm(gray, 0, config.roi_top, gray.width(), bottom - config.roi_top).to_image())
}

/// Median pixel intensity, taken from the histogram (lower median for even counts).
pub fn median(gray: &GrayImage) -> u8 {
    let pixels = gray.as_raw();
    if pixels.is_empty() {
        return 0;
    }
    let mut histogram = [0usize; 256];
    for &p in pixels {
        histogram[p as usize] += 1;
    }
    let half = (pixels.len() + 1) / 2;
    let mut seen = 0;
    for (value, count) in histogram.iter().enumerate() {
        seen += count;
        if seen >= half {
            return value as u8;
        }
    }
    u8::MAX
}

/// Canny edge detection with thresholds placed around the median intensity.
///
/// `sigma` is clamped to `0.0..=1.0` so the lower threshold never exceeds the
/// upper one.
pub fn auto_canny(gray: &GrayImage, sigma: f32) -> GrayImage {
    let sigma = if sigma.is_nan() { 0.0 } else { sigma.clamp(0.0, 1.0) };
    let v = median(gray) as f32;
    let lower = ((1.0 - sigma) * v).max(0.0).trunc();
    let upper = ((1.0 + sigma) * v).min(255.0).trunc();
    canny(gray, lower, upper)
}

/// Region of interest, blurred, then edge filtered.
pub fn edges(gray: &GrayImage, config: &PreprocessConfig) -> Result<GrayImage, VisionError> {
    let roi = crop_roi(gray, config)?;
    let blurred = if config.blur_sigma > 0.0 {
        gaussian_blur_f32(&roi, config.blur_sigma)
    } else {
        roi
    };
    Ok(auto_canny(&blurred, config.canny_sigma))
}

/// Row-major pixels scaled to `0.0..=1.0`.
pub fn normalize(view: &GrayImage) -> Vec<f32> {
    view.as_raw().iter().map(|&p| p as f32 / 255.0).collect()
}
