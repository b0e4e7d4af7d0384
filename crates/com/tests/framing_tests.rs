use com::FrameExtractor;

fn frame(body: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8];
    bytes.extend_from_slice(body);
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}

fn two_frame_stream() -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let a = frame(b"bytesA");
    let b = frame(b"bytesB");
    let mut stream = b"...".to_vec();
    stream.extend_from_slice(&a);
    stream.extend_from_slice(b"...");
    stream.extend_from_slice(&b);
    stream.extend_from_slice(b"...");
    (stream, a, b)
}

#[test]
fn test_single_chunk_yields_both_frames() {
    let (stream, a, b) = two_frame_stream();
    let mut extractor = FrameExtractor::new();

    assert_eq!(extractor.feed(&stream), vec![a, b]);
    // trailing garbage without a start marker is not retained
    assert_eq!(extractor.buffered(), 0);
}

#[test]
fn test_every_split_point_yields_same_frames() {
    let (stream, a, b) = two_frame_stream();

    for split in 0..=stream.len() {
        let mut extractor = FrameExtractor::new();
        let mut frames = extractor.feed(&stream[..split]);
        frames.extend(extractor.feed(&stream[split..]));
        assert_eq!(frames, vec![a.clone(), b.clone()], "split at {split}");
    }
}

#[test]
fn test_byte_by_byte_feeding() {
    let (stream, a, b) = two_frame_stream();
    let mut extractor = FrameExtractor::new();

    let mut frames = Vec::new();
    for byte in &stream {
        frames.extend(extractor.feed(std::slice::from_ref(byte)));
    }
    assert_eq!(frames, vec![a, b]);
}

#[test]
fn test_chunk_sizes_do_not_change_output() {
    let mut stream = Vec::new();
    let mut expected = Vec::new();
    for i in 0..20u8 {
        stream.extend_from_slice(&[i, 0xFF, 0x00]);
        let f = frame(&[i; 37]);
        stream.extend_from_slice(&f);
        expected.push(f);
    }

    for size in [1, 2, 3, 7, 64, 1024] {
        let mut extractor = FrameExtractor::new();
        let frames: Vec<Vec<u8>> = stream
            .chunks(size)
            .flat_map(|chunk| extractor.feed(chunk))
            .collect();
        assert_eq!(frames, expected, "chunk size {size}");
    }
}

#[test]
fn test_start_without_end_waits() {
    let mut extractor = FrameExtractor::new();

    assert!(extractor.feed(&[0x00, 0xFF, 0xD8, 1, 2, 3]).is_empty());
    // leading garbage dropped, the open frame is kept
    assert_eq!(extractor.buffered(), 5);

    let frames = extractor.feed(&[4, 0xFF, 0xD9, 9]);
    assert_eq!(frames, vec![vec![0xFF, 0xD8, 1, 2, 3, 4, 0xFF, 0xD9]]);
    assert_eq!(extractor.buffered(), 0);
}

#[test]
fn test_empty_chunk_is_noop() {
    let mut extractor = FrameExtractor::new();
    assert!(extractor.feed(&[]).is_empty());
    assert_eq!(extractor.buffered(), 0);
}

#[test]
fn test_end_before_start_is_ignored() {
    let mut extractor = FrameExtractor::new();
    let mut stream = vec![0xFF, 0xD9, 0x11];
    stream.extend_from_slice(&frame(b"x"));

    assert_eq!(extractor.feed(&stream), vec![frame(b"x")]);
}

#[test]
fn test_markers_split_across_chunks() {
    let mut extractor = FrameExtractor::new();

    assert!(extractor.feed(&[0x42, 0xFF]).is_empty());
    assert!(extractor.feed(&[0xD8, 0x01, 0xFF]).is_empty());
    assert_eq!(extractor.feed(&[0xD9]), vec![vec![0xFF, 0xD8, 0x01, 0xFF, 0xD9]]);
}

#[test]
fn test_minimal_frame() {
    let mut extractor = FrameExtractor::new();
    assert_eq!(
        extractor.feed(&[0xFF, 0xD8, 0xFF, 0xD9]),
        vec![vec![0xFF, 0xD8, 0xFF, 0xD9]]
    );
}

#[test]
fn test_max_buffer_drops_oversized_frame() {
    let mut extractor = FrameExtractor::new().with_max_buffer(16);

    assert!(extractor.feed(&[0xFF, 0xD8]).is_empty());
    assert!(extractor.feed(&[0u8; 32]).is_empty());
    assert_eq!(extractor.buffered(), 0);

    // the stream recovers at the next start marker
    assert_eq!(extractor.feed(&frame(b"ok")), vec![frame(b"ok")]);
}
