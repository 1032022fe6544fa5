//! In-memory implementation of a byte stream.

use crate::stream::byte_stream::{ByteStream, closed_stream_error};
use std::io;

// =#========================================================================#=
// IN MEMORY STREAM
// =#========================================================================$=
/// An in-memory byte stream that owns its data.
///
/// Always readable and rewindable, which makes it the natural stream for
/// tests and for data that is already fully loaded.
pub struct InMemoryStream {
    /// The owned byte data, dropped on close
    input: Option<Vec<u8>>,
    /// Current read position in `input`
    pos: usize,
    /// Set while the latest read returned no bytes
    exhausted: bool,
}

impl InMemoryStream {
    /// Creates a new in-memory stream from a Vec of bytes.
    ///
    /// # Arguments
    /// * `bytes` - The byte vector to stream
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: Some(bytes),
            pos: 0,
            exhausted: false,
        }
    }

    /// Creates a new in-memory stream from a string by copying its bytes.
    ///
    /// # Arguments
    /// * `input` - The string to stream
    pub fn for_str(input: &str) -> Self {
        Self::from_vec(input.as_bytes().to_vec())
    }

    /// Returns the number of bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.input
            .as_ref()
            .map_or(0, |input| input.len().saturating_sub(self.pos))
    }
}

impl ByteStream for InMemoryStream {
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let input = self.input.as_ref().ok_or_else(closed_stream_error)?;

        let end = (self.pos + buf.len()).min(input.len());
        let n = end - self.pos;
        buf[..n].copy_from_slice(&input[self.pos..end]);
        self.pos = end;

        if !buf.is_empty() {
            self.exhausted = n == 0;
        }
        Ok(n)
    }

    fn rewind(&mut self) -> bool {
        if self.input.is_none() {
            return false;
        }
        self.pos = 0;
        self.exhausted = false;
        true
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.input.is_some()
    }

    #[inline]
    fn is_readable(&self) -> bool {
        true
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn close(&mut self) {
        self.input = None;
    }
}
