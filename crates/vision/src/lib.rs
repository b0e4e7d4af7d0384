//! Frame decoding and pre-processing.
//!
//! Turns one JPEG byte span from the stream into a [`Frame`]: the grayscale
//! view of the decoded image and the edge-filtered region of interest the
//! steering classifier consumes.

pub mod annotate;
pub mod error;
pub mod frame;
pub mod preprocess;

pub use annotate::annotate;
pub use crates_image::GrayImage;
pub use error::VisionError;
pub use frame::{Frame, PreprocessConfig};
pub use preprocess::normalize;

use crates_image::ImageEncoder;

fn decode_frame_inner(data: &[u8], config: &PreprocessConfig) -> Result<Frame, VisionError> {
    let image = crates_image::load_from_memory(data)?;
    Frame::new(image, config)
}

fn encode_jpeg_inner(gray: &GrayImage, quality: u8) -> Result<Vec<u8>, VisionError> {
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            gray.as_raw(),
            gray.width(),
            gray.height(),
            crates_image::ExtendedColorType::L8,
        )
        .map_err(|e| VisionError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decodes one encoded frame and derives its views.
///
/// The CPU-bound work runs on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns `VisionError::Decode` if the bytes are not a valid image, and
/// `VisionError::Geometry` if the region of interest does not fit the frame.
pub async fn decode_frame(data: Vec<u8>, config: PreprocessConfig) -> Result<Frame, VisionError> {
    tokio::task::spawn_blocking(move || decode_frame_inner(&data, &config))
        .await
        .map_err(|e| VisionError::Decode(e.to_string()))?
}

/// Blocking variant of [`decode_frame`].
pub fn decode_frame_blocking(data: &[u8], config: &PreprocessConfig) -> Result<Frame, VisionError> {
    decode_frame_inner(data, config)
}

/// Encodes a grayscale image as JPEG bytes.
///
/// The `quality` parameter controls JPEG compression (1-100, higher = better quality).
pub async fn encode_jpeg(gray: GrayImage, quality: u8) -> Result<Vec<u8>, VisionError> {
    tokio::task::spawn_blocking(move || encode_jpeg_inner(&gray, quality))
        .await
        .map_err(|e| VisionError::Encode(e.to_string()))?
}

/// Blocking variant of [`encode_jpeg`].
pub fn encode_jpeg_blocking(gray: &GrayImage, quality: u8) -> Result<Vec<u8>, VisionError> {
    encode_jpeg_inner(gray, quality)
}
