use std::fmt;

#[derive(Debug)]
pub enum VisionError {
    Decode(String),
    Encode(String),
    Geometry(String),
}

impl fmt::Display for VisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionError::Decode(msg) => write!(f, "decode error: {msg}"),
            VisionError::Encode(msg) => write!(f, "encode error: {msg}"),
            VisionError::Geometry(msg) => write!(f, "geometry error: {msg}"),
        }
    }
}

impl std::error::Error for VisionError {}

impl From<crates_image::ImageError> for VisionError {
    fn from(err: crates_image::ImageError) -> Self {
        VisionError::Decode(err.to_string())
    }
}
