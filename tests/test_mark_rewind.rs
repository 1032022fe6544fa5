use peekread::reader::{BufferedStreamReader, ReaderBuilder};
use peekread::stream::{FileStream, InMemoryStream, ReadStream};
use tempdir::TempDir;

const ALPHABET: &str = "0123456789abcdefghij";

fn capped_reader(input: &[u8], chunk_size: usize, max_buffer_size: usize) -> BufferedStreamReader<InMemoryStream> {
    ReaderBuilder::new(InMemoryStream::from_vec(input.to_vec()))
        .chunk_size(chunk_size)
        .max_buffer_size(max_buffer_size)
        .build()
        .unwrap()
}

// --- TESTS MARK ---
#[test]
fn test_capabilities() {
    let reader = capped_reader(b"", 4, 8);
    assert!(reader.can_mark());
    assert!(reader.can_rewind());
}

#[test]
fn test_mark_and_clear() {
    let mut reader = capped_reader(ALPHABET.as_bytes(), 4, 64);
    assert!(!reader.is_marked());
    assert!(!reader.clear_mark());

    assert!(reader.mark().unwrap());
    assert!(reader.is_marked());
    assert!(reader.clear_mark());
    assert!(!reader.is_marked());
}

#[test]
fn test_mark_overwrites_previous_mark() {
    let mut reader = capped_reader(ALPHABET.as_bytes(), 4, 64);
    reader.mark().unwrap();
    reader.read(3).unwrap();
    reader.mark().unwrap();
    reader.read(4).unwrap();

    assert!(reader.rewind().unwrap());
    assert_eq!(reader.position(), 3);
    assert_eq!(reader.read(2).unwrap(), b"34");
}

// --- TESTS REWIND TO MARK ---
#[test]
fn test_rewind_reproduces_consumed_bytes() {
    let mut reader = capped_reader(ALPHABET.as_bytes(), 4, 64);
    reader.read(2).unwrap();
    reader.mark().unwrap();

    let first = reader.read(5).unwrap();
    reader.skip(3).unwrap();
    let second = reader.read(4).unwrap();

    assert!(reader.rewind().unwrap());
    assert_eq!(reader.position(), 2);
    let again = reader.read(12).unwrap();

    let mut expected = first.clone();
    expected.extend_from_slice(b"789");
    expected.extend_from_slice(&second);
    assert_eq!(again, expected);
    assert_eq!(again, b"23456789abcd");
}

#[test]
fn test_rewind_keeps_mark() {
    let mut reader = capped_reader(ALPHABET.as_bytes(), 4, 64);
    reader.mark().unwrap();
    reader.read(5).unwrap();
    reader.rewind().unwrap();
    assert!(reader.is_marked());
    reader.read(7).unwrap();
    reader.rewind().unwrap();
    assert_eq!(reader.read(1).unwrap(), b"0");
}

#[test]
fn test_rewind_clears_eof() {
    let mut reader = capped_reader(b"abc", 4, 64);
    reader.mark().unwrap();
    assert_eq!(reader.read(10).unwrap(), b"abc");
    assert!(reader.is_eof().unwrap());

    assert!(reader.rewind().unwrap());
    assert!(!reader.is_eof().unwrap());
    assert_eq!(reader.read(3).unwrap(), b"abc");
}

#[test]
fn test_mark_survives_compaction_with_room() {
    let input = ALPHABET.repeat(3);
    let mut reader = capped_reader(input.as_bytes(), 8, 16);
    reader.read(12).unwrap();
    reader.mark().unwrap();

    // Needs compaction, but the 4 bytes since the mark still fit
    reader.read(4).unwrap();
    reader.read(4).unwrap();
    assert!(reader.is_marked());

    assert!(reader.rewind().unwrap());
    assert_eq!(reader.read(8).unwrap(), b"cdefghij");
}

// --- TESTS MARK INVALIDATION ---
#[test]
fn test_large_read_invalidates_mark() {
    let input: Vec<u8> = (0..40u8).collect();
    let mut reader = capped_reader(&input, 8, 16);
    assert!(reader.mark().unwrap());

    let got = reader.read(20).unwrap();
    assert_eq!(got, &input[..20]);
    assert!(!reader.is_marked());
}

#[test]
fn test_invalidated_mark_falls_back_to_stream_rewind() {
    let input: Vec<u8> = (0..40u8).collect();
    let mut reader = capped_reader(&input, 8, 16);
    reader.mark().unwrap();
    reader.read(20).unwrap();
    assert!(!reader.is_marked());

    assert!(reader.rewind().unwrap());
    assert_eq!(reader.position(), 0);
    assert_eq!(reader.available().unwrap(), 0);
    assert_eq!(reader.read(5).unwrap(), &input[..5]);
}

#[test]
fn test_large_peek_invalidates_mark() {
    let input = ALPHABET.repeat(2);
    let mut reader = capped_reader(input.as_bytes(), 8, 16);
    reader.read(10).unwrap();
    reader.mark().unwrap();
    reader.read(4).unwrap();

    // 16 bytes ahead cannot be held while keeping the 4 bytes since the mark
    assert_eq!(reader.peek(16).unwrap(), &input.as_bytes()[14..30]);
    assert!(!reader.is_marked());
}

// --- TESTS REWIND UNDERLYING STREAM ---
#[test]
fn test_rewind_without_mark_restarts_stream() {
    let mut reader = capped_reader(ALPHABET.as_bytes(), 4, 64);
    reader.read(7).unwrap();
    assert!(reader.rewind().unwrap());
    assert_eq!(reader.position(), 0);
    assert_eq!(reader.available().unwrap(), 0);
    assert_eq!(reader.read(3).unwrap(), b"012");
}

#[test]
fn test_rewind_unsupported_leaves_state() {
    let mut reader = ReaderBuilder::new(ReadStream::new(ALPHABET.as_bytes()))
        .chunk_size(4)
        .build()
        .unwrap();
    reader.read(6).unwrap();
    let available = reader.available().unwrap();

    assert!(!reader.rewind().unwrap());
    assert_eq!(reader.position(), 6);
    assert_eq!(reader.available().unwrap(), available);
    assert_eq!(reader.read(2).unwrap(), b"67");
}

#[test]
fn test_mark_rewind_on_unrewindable_stream() {
    let mut reader = ReaderBuilder::new(ReadStream::new(ALPHABET.as_bytes()))
        .chunk_size(4)
        .build()
        .unwrap();
    reader.read(1).unwrap();
    reader.mark().unwrap();
    reader.read(6).unwrap();
    assert!(reader.rewind().unwrap());
    assert_eq!(reader.read(6).unwrap(), b"123456");
}

#[test]
fn test_invalidated_mark_on_unrewindable_stream() {
    let input: Vec<u8> = (0..40u8).collect();
    let mut reader = ReaderBuilder::new(ReadStream::new(&input[..]))
        .chunk_size(8)
        .max_buffer_size(16)
        .build()
        .unwrap();
    reader.mark().unwrap();
    reader.read(20).unwrap();
    assert!(!reader.is_marked());
    let available = reader.available().unwrap();

    // No mark left and the stream cannot restart: nothing moves
    assert!(!reader.rewind().unwrap());
    assert!(!reader.is_marked());
    assert_eq!(reader.position(), 20);
    assert_eq!(reader.available().unwrap(), available);
    assert_eq!(reader.read(8).unwrap(), &input[20..28]);
}

#[test]
fn test_rewind_file_stream() {
    let dir = TempDir::new("peekread").unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, ALPHABET).unwrap();

    let mut reader = ReaderBuilder::new(FileStream::open(&path).unwrap())
        .chunk_size(8)
        .build()
        .unwrap();
    assert_eq!(reader.read(100).unwrap().len(), 20);
    assert!(reader.is_eof().unwrap());

    assert!(reader.rewind().unwrap());
    assert!(!reader.is_eof().unwrap());
    assert_eq!(reader.read(4).unwrap(), b"0123");
}
