use {
    crate::{ComError, FrameExtractor},
    std::collections::VecDeque,
    tokio::io::{AsyncRead, AsyncReadExt},
};

/// Read size used by the vehicle-side streamer.
pub const DEFAULT_READ_CHUNK: usize = 1024;

/// Pulls encoded frames out of an async byte stream.
pub struct FrameReader<R> {
    reader: R,
    extractor: FrameExtractor,
    pending: VecDeque<Vec<u8>>,
    chunk: Vec<u8>,
    bytes_read: u64,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            extractor: FrameExtractor::new(),
            pending: VecDeque::new(),
            chunk: vec![0u8; DEFAULT_READ_CHUNK],
            bytes_read: 0,
        }
    }

    /// Set the size of a single read from the stream.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk = vec![0u8; size.max(1)];
        self
    }

    /// Replace the extractor, e.g. with one carrying a buffer limit.
    pub fn with_extractor(mut self, extractor: FrameExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Return the next complete frame.
    ///
    /// The stream is only read again once every frame completed by earlier reads
    /// has been handed out, so a caller that finishes each frame before asking
    /// for the next never has a read in flight while it works.
    ///
    /// Cancel safe: dropping the future loses no bytes.
    ///
    /// Returns `ComError::ConnectionClosed` at end of stream. A partial frame
    /// left in the buffer at that point is discarded.
    pub async fn next_frame(&mut self) -> Result<Vec<u8>, ComError> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Ok(frame);
            }
            let n = self.reader.read(&mut self.chunk).await?;
            if n == 0 {
                return Err(ComError::ConnectionClosed);
            }
            self.bytes_read += n as u64;
            self.pending.extend(self.extractor.feed(&self.chunk[..n]));
        }
    }

    /// Frames already extracted but not yet returned.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Bytes buffered toward an incomplete frame.
    pub fn buffered(&self) -> usize {
        self.extractor.buffered()
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
