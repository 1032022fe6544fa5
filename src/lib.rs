//! Peekread is a library for buffered, lookahead-capable reading of byte
//! streams.
//!
//! This crate offers a [BufferedStreamReader] that wraps any [ByteStream]
//! and lets parsers and tokenizers look ahead without managing raw reads.
//! Core functionality provided:
//! - Read: consume up to `n` bytes, blocking until available or end of stream.
//! - Peek: look at up to `n` upcoming bytes without consuming them.
//! - Skip: advance over up to `n` bytes without copying them.
//! - Mark/rewind: a single saved position to return to, or a rewind of the
//!   underlying stream when no mark is set.
//! - Bounded memory: the buffer never grows beyond a configured maximum.
//!   Already consumed bytes are discarded as needed, which may drop a mark
//!   if keeping it leaves too little room for a request.
//! - Streams: in-memory data, files, or any [Read](std::io::Read) implementor
//!   (see [crate::stream]).
//!
//! Limitations:
//! - Single mark slot, no mark stack
//! - Peeks see at most `max_buffer_size` bytes ahead
//! - Single-threaded, blocking I/O
//!
//! # Usage patterns
//! 1. [BufferedStreamReader::new] or the quick functions below for default
//!    sizes (8 KiB chunks, 256 KiB buffer cap).
//! 2. [ReaderBuilder](crate::reader::ReaderBuilder) for custom chunk and
//!    buffer sizes.
//!
//! ## Example Default Configuration
//!
//! ```
//! use peekread::open_bytes;
//!
//! let mut reader = open_bytes(b"%PDF-1.7\n%header".to_vec())?;
//! if reader.peek(5)? == b"%PDF-" {
//!     reader.skip(9)?;
//! }
//! assert_eq!(reader.read(7)?, b"%header");
//! # Ok::<(), peekread::reader::StreamError>(())
//! ```
//!
//! ## Example Reader Configuration
//!
//! ```no_run
//! use peekread::reader::ReaderBuilder;
//! use peekread::stream::FileStream;
//!
//! let mut reader = ReaderBuilder::new(FileStream::open("large.log")?)
//!     .chunk_size(64 * 1024)
//!     .max_buffer_size(1024 * 1024)
//!     .build()?;
//!
//! reader.mark()?;
//! let header = reader.read(512)?;
//! if !header.starts_with(b"LOG") {
//!     reader.rewind()?;
//! }
//! reader.close();
//! # Ok::<(), peekread::reader::StreamError>(())
//! ```

pub mod reader;
pub mod stream;

pub use crate::reader::{BufferedStreamReader, StreamError};
pub use crate::stream::ByteStream;

use crate::reader::Result;
use crate::stream::{FileStream, InMemoryStream};
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Opens a file for buffered reading using default settings.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Errors
/// Returns [StreamError::Io] if the file cannot be opened.
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<BufferedStreamReader<FileStream>> {
    BufferedStreamReader::new(FileStream::open(path)?)
}

/// Wraps owned bytes in a reader using default settings.
///
/// Mostly useful for tests and for data already loaded into memory.
pub fn open_bytes(bytes: Vec<u8>) -> Result<BufferedStreamReader<InMemoryStream>> {
    BufferedStreamReader::new(InMemoryStream::from_vec(bytes))
}
