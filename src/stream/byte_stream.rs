//! Byte stream abstraction consumed by the buffered reader.
//!
//! This module provides the [ByteStream] trait, the raw collaborator that a
//! [BufferedStreamReader](crate::reader::BufferedStreamReader) fills its
//! buffer from.

use std::io::{self, Read};

// =#========================================================================#=
// BYTE STREAM (Trait)
// =#========================================================================#=
/// Trait defining the interface of an underlying, readable byte stream.
///
/// This trait abstracts over different ways of obtaining raw bytes:
/// - Owned in-memory data ([InMemoryStream](crate::stream::InMemoryStream))
/// - Files on disk ([FileStream](crate::stream::FileStream))
/// - Any other [Read](std::io::Read) implementor
///   ([ReadStream](crate::stream::ReadStream))
///
/// A stream only has to support bounded reads into a caller buffer. Rewinding
/// to the beginning is optional and only used by the reader when no mark is
/// set.
pub trait ByteStream {
    /// Reads up to `buf.len()` bytes into `buf`.
    ///
    /// # Arguments
    /// * `buf` - Destination buffer, its length bounds the read
    ///
    /// # Returns
    /// * `Ok(n)` - Number of bytes written to `buf`, `0` once exhausted
    /// * `Err(io::Error)` - If the physical read failed or the stream is closed
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Resets the stream to its beginning.
    ///
    /// # Returns
    /// `true` if the stream was rewound, `false` if unsupported or failed
    fn rewind(&mut self) -> bool {
        false
    }

    /// Check if the stream has not been closed.
    fn is_open(&self) -> bool;

    /// Check if the stream was opened in a readable mode.
    fn is_readable(&self) -> bool;

    /// Check if the stream itself has reported its end.
    ///
    /// # Returns
    /// `true` while the latest read returned zero bytes or failed, `false`
    /// otherwise
    fn is_exhausted(&self) -> bool;

    /// Closes the stream and releases its resources.
    ///
    /// Closing an already closed stream has no effect.
    fn close(&mut self);
}

/// Error returned by stream implementations when reading after close.
pub(crate) fn closed_stream_error() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "stream is closed")
}

/// Reads from `reader`, retrying reads interrupted by a signal.
///
/// Any other error is handed back to the caller.
pub(crate) fn read_retrying<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}
