//! File implementation of a byte stream.
//!
//! This module provides [FileStream], which reads directly from a [File].
//! Buffering is left to the [BufferedStreamReader](crate::reader::BufferedStreamReader)
//! sitting on top, so no [BufReader](std::io::BufReader) is involved.
//!

use std::fs::{File, OpenOptions};
use std::io::{self, Seek};
use std::path::Path;

use crate::stream::byte_stream::{ByteStream, closed_stream_error, read_retrying};

// =#========================================================================#=
// FILE STREAM
// =#========================================================================$=
/// A byte stream over a file on disk.
///
/// Remembers the mode it was opened with, so that a reader can reject
/// files that were not opened for reading. Rewinding seeks back to the start
/// of the file.
pub struct FileStream {
    /// Underlying file handle, dropped (closed) on close
    file: Option<File>,

    /// Whether the file was opened for reading
    readable: bool,

    /// Set while the latest read returned no bytes or failed
    exhausted: bool,
}

impl FileStream {
    /// Opens a file for reading.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<FileStream> {
        let file = File::open(path)?;
        Ok(Self::from_file(file, true))
    }

    /// Creates (or truncates) a file opened for writing only.
    ///
    /// The resulting stream is not readable and is rejected by
    /// [BufferedStreamReader::new](crate::reader::BufferedStreamReader::new).
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<FileStream> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::from_file(file, false))
    }

    /// Wraps an already opened file.
    ///
    /// # Arguments
    /// * `file` - The open file handle
    /// * `readable` - Whether `file` was opened with read access
    pub fn from_file(file: File, readable: bool) -> FileStream {
        Self {
            file: Some(file),
            readable,
            exhausted: false,
        }
    }
}

impl ByteStream for FileStream {
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let file = self.file.as_mut().ok_or_else(closed_stream_error)?;
        let result = read_retrying(file, buf);
        if !buf.is_empty() {
            self.exhausted = matches!(result, Ok(0) | Err(_));
        }
        result
    }

    fn rewind(&mut self) -> bool {
        let Some(file) = self.file.as_mut() else {
            return false;
        };
        match file.rewind() {
            Ok(()) => {
                self.exhausted = false;
                true
            }
            Err(err) => {
                log::debug!("file rewind failed: {err}");
                false
            }
        }
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn is_readable(&self) -> bool {
        self.readable
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn close(&mut self) {
        self.file = None;
    }
}

// =#========================================================================#=
// TESTS - FILE STREAM
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    #[test]
    fn test_open_read_and_rewind() {
        let dir = TempDir::new("peekread").unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"hello file").unwrap();

        let mut stream = FileStream::open(&path).unwrap();
        assert!(stream.is_open());
        assert!(stream.is_readable());

        let mut buf = [0u8; 32];
        assert_eq!(stream.read_into(&mut buf).unwrap(), 10);
        assert_eq!(&buf[..10], b"hello file");
        assert_eq!(stream.read_into(&mut buf).unwrap(), 0);
        assert!(stream.is_exhausted());

        assert!(stream.rewind());
        assert!(!stream.is_exhausted());
        assert_eq!(stream.read_into(&mut buf[..5]).unwrap(), 5);
        assert_eq!(&buf[..5], b"hello");
    }

    #[test]
    fn test_reads_whole_file_in_pieces() {
        let dir = TempDir::new("peekread").unwrap();
        let path = dir.path().join("data.bin");
        let content: Vec<u8> = (0..=255u8).collect();
        fs::write(&path, &content).unwrap();

        let mut stream = FileStream::open(&path).unwrap();
        let mut all = Vec::new();
        let mut buf = [0u8; 100];
        loop {
            let n = stream.read_into(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            assert!(!stream.is_exhausted());
            all.extend_from_slice(&buf[..n]);
        }
        assert_eq!(all, content);
        assert!(stream.is_exhausted());
    }

    #[test]
    fn test_created_file_is_not_readable() {
        let dir = TempDir::new("peekread").unwrap();
        let stream = FileStream::create(dir.path().join("out.bin")).unwrap();
        assert!(stream.is_open());
        assert!(!stream.is_readable());
    }

    #[test]
    fn test_close_drops_handle() {
        let dir = TempDir::new("peekread").unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"abc").unwrap();

        let mut stream = FileStream::open(&path).unwrap();
        stream.close();
        assert!(!stream.is_open());
        assert!(!stream.rewind());
        assert!(stream.read_into(&mut [0u8; 1]).is_err());
    }
}
