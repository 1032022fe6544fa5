//! Error type for the buffered stream reader.
//!
//! This module provides [StreamError] for reporting misuse of a reader
//! (closed reader, unreadable stream, bad configuration) and I/O failures
//! while opening streams.

use thiserror::Error;

/// Result alias used throughout the reader.
pub type Result<T> = std::result::Result<T, StreamError>;

// =#========================================================================#=
// STREAM ERROR
// =#========================================================================$=
/// Errors raised by a [BufferedStreamReader](crate::reader::BufferedStreamReader).
///
/// Physical read failures while filling the buffer are not errors: they show
/// up as short reads and, eventually, as `is_eof() == true`.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The reader was closed, or the stream was unusable at construction.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A configuration value is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamError {
    /// Convenience constructor for operations on a closed reader
    pub(crate) fn closed(operation: &str) -> Self {
        Self::IllegalState(format!("cannot {operation} on a closed reader"))
    }

    /// Check if this is an [IllegalState](StreamError::IllegalState) error.
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }

    /// Check if this is an [InvalidArgument](StreamError::InvalidArgument) error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<StreamError> for std::io::Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Io(inner) => inner,
            other => std::io::Error::other(other),
        }
    }
}
