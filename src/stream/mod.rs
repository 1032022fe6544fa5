//! Underlying byte streams read by the [BufferedStreamReader](crate::reader::BufferedStreamReader).
//!
//! This module provides the [ByteStream] trait together with implementations
//! for owned byte vectors ([InMemoryStream]), files ([FileStream]) and
//! arbitrary [Read](std::io::Read) implementors ([ReadStream]).
pub mod byte_stream;
pub mod file_stream;
pub mod in_memory_stream;
pub mod read_stream;

pub use byte_stream::ByteStream;
pub use file_stream::FileStream;
pub use in_memory_stream::InMemoryStream;
pub use read_stream::ReadStream;
