/// JPEG start-of-image marker, opens every frame.
pub const START_MARKER: [u8; 2] = [0xFF, 0xD8];

/// JPEG end-of-image marker, closes every frame.
pub const END_MARKER: [u8; 2] = [0xFF, 0xD9];

/// Accumulates stream bytes and cuts them into marker-delimited frames.
///
/// A frame is the span from a start marker through the first end marker that
/// follows it, both markers included. Bytes ahead of a start marker can never
/// become part of a frame and are dropped. Everything up to the end of an
/// emitted frame is released from the buffer.
///
/// The output only depends on the concatenated input, never on how it was
/// split across `feed` calls.
#[derive(Debug, Default)]
pub struct FrameExtractor {
    buffer: Vec<u8>,
    // where the end-marker search resumes when the buffer already starts with
    // a start marker, so a large frame arriving in small chunks is scanned once
    scan_from: usize,
    max_buffer: Option<usize>,
}

impl FrameExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the partial frame once more than `max` bytes are buffered.
    pub fn with_max_buffer(mut self, max: usize) -> Self {
        self.max_buffer = Some(max);
        self
    }

    /// Number of bytes held back waiting for a complete frame.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Append `chunk` and return every frame completed by it, in stream order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        let mut consumed = 0;
        loop {
            let pending = &self.buffer[consumed..];
            let Some(start) = find(pending, &START_MARKER, 0) else {
                // a trailing 0xFF may be the first half of a start marker
                let keep = usize::from(pending.last() == Some(&START_MARKER[0]));
                consumed = self.buffer.len() - keep;
                self.scan_from = 0;
                break;
            };

            let from = if start == 0 {
                self.scan_from.max(START_MARKER.len())
            } else {
                START_MARKER.len()
            };
            let frame = &pending[start..];
            match find(frame, &END_MARKER, from) {
                Some(end) => {
                    let len = end + END_MARKER.len();
                    frames.push(frame[..len].to_vec());
                    consumed += start + len;
                    self.scan_from = 0;
                }
                None => {
                    consumed += start;
                    // the last byte may be the first half of an end marker
                    self.scan_from = frame.len().saturating_sub(1).max(START_MARKER.len());
                    break;
                }
            }
        }
        self.buffer.drain(..consumed);

        if let Some(max) = self.max_buffer {
            if self.buffer.len() > max {
                log::warn!(
                    "Frame buffer exceeded {} bytes, dropping {} buffered bytes",
                    max,
                    self.buffer.len()
                );
                self.buffer.clear();
                self.scan_from = 0;
            }
        }

        frames
    }
}

fn find(haystack: &[u8], marker: &[u8; 2], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(marker.len())
        .position(|window| window == marker)
        .map(|position| position + from)
}
