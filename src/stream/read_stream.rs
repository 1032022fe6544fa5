//! Generic [Read] adapter implementing a byte stream.

use std::io::{self, Read};

use crate::stream::byte_stream::{ByteStream, closed_stream_error, read_retrying};

// =#========================================================================#=
// READ STREAM
// =#========================================================================$=
/// A byte stream over any [Read] implementor, e.g. stdin or a socket.
///
/// The wrapped reader cannot be rewound, so a
/// [BufferedStreamReader](crate::reader::BufferedStreamReader) over it only
/// supports rewinding to a mark.
pub struct ReadStream<R: Read> {
    reader: Option<R>,
    exhausted: bool,
}

impl<R: Read> ReadStream<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            exhausted: false,
        }
    }
}

impl<R: Read> ByteStream for ReadStream<R> {
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let reader = self.reader.as_mut().ok_or_else(closed_stream_error)?;
        let result = read_retrying(reader, buf);
        if !buf.is_empty() {
            self.exhausted = matches!(result, Ok(0) | Err(_));
        }
        result
    }

    fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    fn is_readable(&self) -> bool {
        true
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn close(&mut self) {
        self.reader = None;
    }
}
