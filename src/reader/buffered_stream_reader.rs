//! Buffered reader with lookahead and mark/rewind over a byte stream.
//!
//! This module provides [BufferedStreamReader], which wraps a [ByteStream]
//! in a bounded, lazily filled buffer. Callers can consume ([read](BufferedStreamReader::read)),
//! look ahead ([peek](BufferedStreamReader::peek)), skip, and return to a
//! single saved position ([mark](BufferedStreamReader::mark) /
//! [rewind](BufferedStreamReader::rewind)) without managing raw stream reads.
//!
//! # Buffer layout
//! ```text
//! 0 ........ mark ........ offset ........ buffer.len() <= max_buffer_size
//!   discardable  kept for    unconsumed,
//!                rewind      already fetched
//! ```
//! When a request needs more room than is left, already consumed bytes are
//! discarded from the front. A mark survives such a compaction only if
//! enough room can be freed while keeping everything from the mark onwards;
//! otherwise the mark is dropped and the request is served anyway.

use std::io::{self, Read};

use crate::reader::reader_builder::ReaderConfig;
use crate::reader::stream_error::{Result, StreamError};
use crate::stream::ByteStream;

// =#========================================================================#=
// BUFFERED STREAM READER
// =#========================================================================$=
/// A reader over a [ByteStream] supporting read, peek, skip and mark/rewind.
///
/// The reader takes ownership of the stream and closes it on
/// [close()](BufferedStreamReader::close). After closing, every operation
/// except `close`, `is_closed`, `is_marked`, `clear_mark` and the capability
/// queries fails with [StreamError::IllegalState].
///
/// Physical read errors of the stream are not reported as errors; they end
/// the current fill early, so the caller sees a short read.
///
/// # Example
/// ```
/// use peekread::reader::BufferedStreamReader;
/// use peekread::stream::InMemoryStream;
///
/// let mut reader = BufferedStreamReader::new(InMemoryStream::for_str("user=alice;"))?;
///
/// assert_eq!(reader.peek(5)?, b"user=");
/// reader.mark()?;
/// assert_eq!(reader.read(6)?, b"user=a");
/// assert!(reader.rewind()?);
/// assert_eq!(reader.position(), 0);
///
/// let (complete, skipped) = reader.skip(100)?;
/// assert!(!complete);
/// assert_eq!(skipped, 11);
/// assert!(reader.is_eof()?);
/// # Ok::<(), peekread::reader::StreamError>(())
/// ```
pub struct BufferedStreamReader<S: ByteStream> {
    /// Underlying stream, owned and closed by the reader
    stream: S,

    /// Chunk and buffer sizes
    config: ReaderConfig,

    /// Fetched bytes; `[offset, len)` unconsumed, `[mark, offset)` kept for rewind
    buffer: Vec<u8>,

    /// Cursor into `buffer`
    offset: usize,

    /// Saved cursor for [rewind](BufferedStreamReader::rewind)
    mark: Option<usize>,

    /// Logical number of consumed bytes
    position: u64,

    /// Set when a fill could not add any data, cleared when one does
    eof: bool,

    closed: bool,
}

impl<S: ByteStream> BufferedStreamReader<S> {
    /// Creates a reader with default chunk and buffer sizes.
    ///
    /// Use [ReaderBuilder](crate::reader::ReaderBuilder) for other sizes.
    ///
    /// # Arguments
    /// * `stream` - An open, readable stream; the reader takes ownership
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the stream is closed or was not
    /// opened for reading.
    pub fn new(stream: S) -> Result<Self> {
        Self::with_config(stream, ReaderConfig::default())
    }

    /// Creates a reader with the given, already validated configuration.
    pub(crate) fn with_config(stream: S, config: ReaderConfig) -> Result<Self> {
        if !stream.is_open() {
            return Err(StreamError::IllegalState("stream is not open".to_string()));
        }
        if !stream.is_readable() {
            return Err(StreamError::IllegalState(
                "stream is not opened for reading".to_string(),
            ));
        }

        log::trace!(
            "reader created (chunk_size={}, max_buffer_size={})",
            config.chunk_size,
            config.max_buffer_size
        );

        Ok(Self {
            stream,
            config,
            buffer: Vec::new(),
            offset: 0,
            mark: None,
            position: 0,
            eof: false,
            closed: false,
        })
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------
    /// Returns the configuration this reader was built with.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Returns the number of buffered bytes that can be served without a fill.
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn available(&self) -> Result<usize> {
        self.ensure_open("query available bytes")?;
        Ok(self.buffered())
    }

    /// Returns the number of bytes consumed so far.
    ///
    /// Rewinding to a mark moves the position back by the rewound distance;
    /// rewinding the underlying stream resets it to zero.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Check if the reader has been closed, by [close()](BufferedStreamReader::close)
    /// or because the underlying stream is no longer open.
    pub fn is_closed(&self) -> bool {
        self.closed || !self.stream.is_open()
    }

    /// Check if the end of the stream has been reached.
    ///
    /// Only true once a previous read, peek or skip came up short, no
    /// buffered bytes are left and the stream itself reports exhaustion.
    /// This does not probe the stream.
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn is_eof(&self) -> Result<bool> {
        self.ensure_open("check for end of stream")?;
        Ok(self.eof && self.buffered() == 0 && self.stream.is_exhausted())
    }

    // ------------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------------
    /// Consumes up to `count` bytes.
    ///
    /// Blocks on the stream until `count` bytes were obtained or the stream
    /// is exhausted (or fails).
    ///
    /// # Arguments
    /// * `count` - Maximum number of bytes to consume
    ///
    /// # Returns
    /// The consumed bytes; fewer than `count` at the end of the stream
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn read(&mut self, count: usize) -> Result<Vec<u8>> {
        self.ensure_open("read")?;
        let mut out = Vec::with_capacity(count.min(self.config.max_buffer_size));
        self.consume(count, Some(&mut out));
        Ok(out)
    }

    /// Returns up to `count` bytes without consuming them.
    ///
    /// Repeated calls return the same bytes as long as nothing is consumed in
    /// between. A peek can see at most `max_buffer_size` bytes ahead; larger
    /// requests are capped.
    ///
    /// # Arguments
    /// * `count` - Maximum number of bytes to look ahead
    ///
    /// # Returns
    /// The upcoming bytes; fewer than `count` at the end of the stream
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn peek(&mut self, count: usize) -> Result<Vec<u8>> {
        self.ensure_open("peek")?;

        let count = if count > self.config.max_buffer_size {
            log::debug!(
                "peek of {count} bytes capped to max_buffer_size {}",
                self.config.max_buffer_size
            );
            self.config.max_buffer_size
        } else {
            count
        };

        while self.buffered() < count {
            if self.fill(count) == 0 {
                self.eof = true;
                break;
            }
        }

        // A fill may have compacted the buffer, so slice from the current offset
        let end = self.offset + self.buffered().min(count);
        Ok(self.buffer[self.offset..end].to_vec())
    }

    /// Skips up to `count` bytes without returning them.
    ///
    /// # Arguments
    /// * `count` - Maximum number of bytes to skip
    ///
    /// # Returns
    /// * `(true, count)` - All requested bytes were skipped
    /// * `(false, n)` - The stream ended after `n` bytes
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn skip(&mut self, count: usize) -> Result<(bool, usize)> {
        self.ensure_open("skip")?;
        let skipped = self.consume(count, None);
        Ok((skipped == count, skipped))
    }

    /// Returns the next byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The next byte
    /// * `None` - If at end of stream
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        self.ensure_open("peek")?;
        if self.buffered() == 0 && self.fill(1) == 0 {
            self.eof = true;
        }
        Ok(self.buffer.get(self.offset).copied())
    }

    /// Consumes and returns the next byte.
    ///
    /// # Returns
    /// * `Some(u8)` - The consumed byte
    /// * `None` - If at end of stream
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.offset += 1;
            self.position += 1;
        }
        Ok(byte)
    }

    // ------------------------------------------------------------------------
    // Mark and rewind
    // ------------------------------------------------------------------------
    /// Always `true`: marking is supported.
    pub fn can_mark(&self) -> bool {
        true
    }

    /// Always `true`: rewinding is supported.
    pub fn can_rewind(&self) -> bool {
        true
    }

    /// Saves the current position for a later [rewind()](BufferedStreamReader::rewind).
    ///
    /// There is a single mark slot; marking again replaces the previous mark.
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn mark(&mut self) -> Result<bool> {
        self.ensure_open("mark")?;
        self.mark = Some(self.offset);
        Ok(true)
    }

    /// Removes the mark.
    ///
    /// # Returns
    /// `true` if a mark was set, `false` otherwise
    pub fn clear_mark(&mut self) -> bool {
        self.mark.take().is_some()
    }

    /// Check if a mark is set.
    ///
    /// A mark can disappear without [clear_mark()](BufferedStreamReader::clear_mark)
    /// when a large request forces a compaction that cannot keep it.
    pub fn is_marked(&self) -> bool {
        self.mark.is_some()
    }

    /// Rewinds to the mark, or to the start of the stream if no mark is set.
    ///
    /// With a mark, the cursor moves back to it and the end-of-stream flag is
    /// cleared; the mark stays set. Without a mark, the underlying stream is
    /// asked to rewind and on success the buffer is emptied and all
    /// bookkeeping reset.
    ///
    /// # Returns
    /// `true` on success, `false` if the stream could not be rewound (state unchanged)
    ///
    /// # Errors
    /// Returns [StreamError::IllegalState] if the reader is closed.
    pub fn rewind(&mut self) -> Result<bool> {
        self.ensure_open("rewind")?;

        if let Some(mark) = self.mark {
            let distance = self.offset - mark;
            self.offset = mark;
            self.position = self.position.saturating_sub(distance as u64);
            self.eof = false;
            return Ok(true);
        }

        if !self.stream.rewind() {
            log::debug!("underlying stream cannot be rewound");
            return Ok(false);
        }

        log::debug!("underlying stream rewound, dropping {} buffered bytes", self.buffer.len());
        self.buffer.clear();
        self.offset = 0;
        self.position = 0;
        self.eof = false;
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Closing
    // ------------------------------------------------------------------------
    /// Closes the reader and the underlying stream.
    ///
    /// # Returns
    /// `true` on the first call, `false` if already closed
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        if self.stream.is_open() {
            self.stream.close();
        }
        self.buffer = Vec::new();
        self.offset = 0;
        self.mark = None;
        true
    }

    /// Returns the underlying stream without closing it.
    ///
    /// Buffered but unconsumed bytes are lost.
    pub fn into_inner(self) -> S {
        self.stream
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------
    #[inline]
    fn buffered(&self) -> usize {
        self.buffer.len() - self.offset
    }

    fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.is_closed() {
            return Err(StreamError::closed(operation));
        }
        Ok(())
    }

    /// Advances over up to `count` bytes, copying them to `out` if given.
    ///
    /// Fills toward the whole outstanding request (capped to a full buffer)
    /// before taking bytes, so compaction sees the same request as a peek.
    ///
    /// Returns the number of bytes consumed.
    fn consume(&mut self, count: usize, mut out: Option<&mut Vec<u8>>) -> usize {
        let mut consumed = 0;
        let mut exhausted = false;
        while consumed < count && !exhausted {
            let request = (count - consumed).min(self.config.max_buffer_size);
            while self.buffered() < request {
                if self.fill(request) == 0 {
                    self.eof = true;
                    exhausted = true;
                    break;
                }
            }

            let take = self.buffered().min(count - consumed);
            if let Some(out) = out.as_mut() {
                out.extend_from_slice(&self.buffer[self.offset..self.offset + take]);
            }
            self.offset += take;
            consumed += take;
        }

        self.position += consumed as u64;
        consumed
    }

    /// Fetches data from the stream until `request` bytes are buffered past
    /// the cursor, at most one chunk per call.
    ///
    /// Compacts the buffer first if `request` does not fit into the remaining
    /// space, preferring to keep the mark and dropping it only when keeping it
    /// leaves too little room.
    ///
    /// # Returns
    /// Number of bytes added to the buffer, `0` if the stream had nothing more
    fn fill(&mut self, request: usize) -> usize {
        let mut available = self.buffered();
        if request <= available {
            return 0;
        }

        let mut space = self.config.max_buffer_size.saturating_sub(self.buffer.len());
        if space < request {
            let discard = match self.mark {
                Some(mark) if space + mark >= request => mark,
                Some(mark) => {
                    log::warn!(
                        "mark at {mark} invalidated: request of {request} bytes exceeds max_buffer_size {}",
                        self.config.max_buffer_size
                    );
                    self.mark = None;
                    self.offset
                }
                None => self.offset,
            };
            self.compact(discard);
            space += discard;
        }

        let mut remain = self.config.chunk_size.min(space);
        let mut added = 0;
        while available < request && remain > 0 {
            let start = self.buffer.len();
            self.buffer.resize(start + remain, 0);

            match self.stream.read_into(&mut self.buffer[start..]) {
                Ok(0) => {
                    self.buffer.truncate(start);
                    break;
                }
                Ok(n) => {
                    self.buffer.truncate(start + n);
                    available += n;
                    remain -= n;
                    added += n;
                    log::trace!("read {n} bytes from stream ({} buffered)", self.buffer.len());
                }
                Err(err) => {
                    self.buffer.truncate(start);
                    log::warn!("stream read failed, treating as short read: {err}");
                    break;
                }
            }
        }

        if added > 0 {
            self.eof = false;
        }
        added
    }

    /// Drops the first `discard` bytes and shifts cursor and mark accordingly.
    fn compact(&mut self, discard: usize) {
        if discard == 0 {
            return;
        }
        self.buffer.drain(..discard);
        self.offset -= discard;
        if let Some(mark) = self.mark {
            self.mark = Some(mark - discard);
        }
        log::debug!("compacted buffer, discarded {discard} bytes");
    }
}

// =#========================================================================#=
// IO READ
// =#========================================================================$=
impl<S: ByteStream> Read for BufferedStreamReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.ensure_open("read")?;
        if buf.is_empty() {
            return Ok(0);
        }
        if self.buffered() == 0 && self.fill(buf.len()) == 0 {
            self.eof = true;
            return Ok(0);
        }

        let n = self.buffered().min(buf.len());
        buf[..n].copy_from_slice(&self.buffer[self.offset..self.offset + n]);
        self.offset += n;
        self.position += n as u64;
        Ok(n)
    }
}
