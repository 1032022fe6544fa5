//! The buffered stream reader, its configuration and its error type.
pub mod buffered_stream_reader;
pub mod reader_builder;
pub mod stream_error;

pub use buffered_stream_reader::BufferedStreamReader;
pub use reader_builder::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_BUFFER_SIZE, ReaderBuilder, ReaderConfig};
pub use stream_error::{Result, StreamError};
