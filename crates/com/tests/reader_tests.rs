use com::{ComError, FrameReader};
use tokio::io::AsyncWriteExt;

fn frame(body: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8];
    bytes.extend_from_slice(body);
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}

#[tokio::test]
async fn test_reads_frames_in_order() {
    let (mut writer, reader) = tokio::io::duplex(4096);
    let mut reader = FrameReader::new(reader).with_chunk_size(3);

    writer.write_all(&frame(b"one")).await.unwrap();
    writer.write_all(b"noise").await.unwrap();
    writer.write_all(&frame(b"two")).await.unwrap();
    drop(writer);

    assert_eq!(reader.next_frame().await.unwrap(), frame(b"one"));
    assert_eq!(reader.next_frame().await.unwrap(), frame(b"two"));
    match reader.next_frame().await {
        Err(ComError::ConnectionClosed) => {}
        other => panic!("Expected ConnectionClosed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hands_out_buffered_frames_before_reading() {
    let (mut writer, reader) = tokio::io::duplex(4096);
    let mut reader = FrameReader::new(reader);

    let mut chunk = frame(b"a");
    chunk.extend_from_slice(&frame(b"b"));
    writer.write_all(&chunk).await.unwrap();

    assert_eq!(reader.next_frame().await.unwrap(), frame(b"a"));
    assert_eq!(reader.pending(), 1);
    assert_eq!(reader.next_frame().await.unwrap(), frame(b"b"));
    assert_eq!(reader.bytes_read(), chunk.len() as u64);
}

#[tokio::test]
async fn test_partial_frame_at_eof_is_dropped() {
    let (mut writer, reader) = tokio::io::duplex(4096);
    let mut reader = FrameReader::new(reader);

    writer.write_all(&[0xFF, 0xD8, 1, 2, 3]).await.unwrap();
    drop(writer);

    assert!(matches!(
        reader.next_frame().await,
        Err(ComError::ConnectionClosed)
    ));
    assert_eq!(reader.buffered(), 5);
}
