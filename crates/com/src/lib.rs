//! Byte-stream transport for JPEG video frames.
//!
//! The stream carries no application header: frames are recovered by scanning
//! for the JPEG start-of-image and end-of-image markers.

pub mod client;
pub mod error;
pub mod framing;
pub mod reader;
pub mod server;

pub use client::Client;
pub use error::ComError;
pub use framing::{END_MARKER, FrameExtractor, START_MARKER};
pub use reader::FrameReader;
pub use server::Server;
