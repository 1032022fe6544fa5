//! Configuration of a [BufferedStreamReader].
//!
//! This module provides [ReaderConfig], holding the tunable sizes, and
//! [ReaderBuilder], which validates them and creates the reader.

use crate::reader::buffered_stream_reader::BufferedStreamReader;
use crate::reader::stream_error::{Result, StreamError};
use crate::stream::ByteStream;

/// Default number of bytes requested per physical read.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Default ceiling on the number of bytes held in the buffer.
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 262_144;

// =#========================================================================#=
// READER CONFIG
// =#========================================================================€=
/// Buffer sizes of a [BufferedStreamReader].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Bytes requested per physical read from the stream
    pub chunk_size: usize,
    /// Hard cap on buffered bytes; exceeding it forces a compaction,
    /// which may invalidate an active mark
    pub max_buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
        }
    }
}

impl ReaderConfig {
    /// Checks that both sizes are positive.
    ///
    /// # Errors
    /// Returns [StreamError::InvalidArgument] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(StreamError::InvalidArgument(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.max_buffer_size == 0 {
            return Err(StreamError::InvalidArgument(
                "max_buffer_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// =#========================================================================#=
// READER BUILDER
// =#========================================================================$=
/// Builder for configuring and creating a [BufferedStreamReader].
///
/// Start with [`new()`](ReaderBuilder::new), adjust sizes, then call
/// [`build()`](ReaderBuilder::build):
/// - [`chunk_size()`](ReaderBuilder::chunk_size) — bytes per physical read
///   (default: [DEFAULT_CHUNK_SIZE])
/// - [`max_buffer_size()`](ReaderBuilder::max_buffer_size) — buffer cap
///   (default: [DEFAULT_MAX_BUFFER_SIZE])
///
/// # Example
/// ```
/// use peekread::reader::ReaderBuilder;
/// use peekread::stream::InMemoryStream;
///
/// let mut reader = ReaderBuilder::new(InMemoryStream::for_str("0123456789"))
///     .chunk_size(4)
///     .max_buffer_size(16)
///     .build()?;
///
/// assert_eq!(reader.read(3)?, b"012");
/// # Ok::<(), peekread::reader::StreamError>(())
/// ```
pub struct ReaderBuilder<S: ByteStream> {
    stream: S,
    config: ReaderConfig,
}

impl<S: ByteStream> ReaderBuilder<S> {
    /// Creates a builder around `stream` with default sizes.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            config: ReaderConfig::default(),
        }
    }

    /// Sets the number of bytes requested per physical read.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Sets the maximum number of buffered bytes.
    pub fn max_buffer_size(mut self, max_buffer_size: usize) -> Self {
        self.config.max_buffer_size = max_buffer_size;
        self
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration and creates the reader.
    ///
    /// # Errors
    /// * [StreamError::InvalidArgument] - If a size is zero
    /// * [StreamError::IllegalState] - If the stream is closed or not readable
    pub fn build(self) -> Result<BufferedStreamReader<S>> {
        self.config.validate()?;
        BufferedStreamReader::with_config(self.stream, self.config)
    }
}
