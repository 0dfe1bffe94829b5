//! Stream that caps the size of every read and write.

use std::cmp::min;
use std::io;
use std::io::{Read, Write};

/// Default cap in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Hands at most `CHUNK_SIZE` bytes to each `read` and `write` call of the inner stream. Useful to
/// model transports that deliver data in small pieces, such as a congested socket.
///
/// ## Examples
///
/// ```
/// use std::io::{Cursor, Read};
/// use wsframe::stream::chunked::IntoChunkedStream;
///
/// let mut stream = Cursor::new(b"hello world!").into_chunked_stream::<5>();
/// let mut buf = [0u8; 64];
/// assert_eq!(5, stream.read(&mut buf).unwrap());
/// assert_eq!(b"hello", &buf[..5]);
/// ```
#[derive(Debug)]
pub struct ChunkedStream<S, const CHUNK_SIZE: usize = DEFAULT_CHUNK_SIZE> {
    inner: S,
}

impl<S, const CHUNK_SIZE: usize> ChunkedStream<S, CHUNK_SIZE> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Read, const CHUNK_SIZE: usize> Read for ChunkedStream<S, CHUNK_SIZE> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let up_to = min(buf.len(), CHUNK_SIZE);
        self.inner.read(&mut buf[..up_to])
    }
}

impl<S: Write, const CHUNK_SIZE: usize> Write for ChunkedStream<S, CHUNK_SIZE> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let up_to = min(buf.len(), CHUNK_SIZE);
        self.inner.write(&buf[..up_to])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Trait to convert any stream into `ChunkedStream`.
pub trait IntoChunkedStream<S> {
    /// Convert into `ChunkedStream` and specify the cap.
    fn into_chunked_stream<const N: usize>(self) -> ChunkedStream<S, N>;

    /// Convert into `ChunkedStream` with the default cap.
    fn into_default_chunked_stream(self) -> ChunkedStream<S>
    where
        Self: Sized,
    {
        Self::into_chunked_stream(self)
    }
}

impl<T> IntoChunkedStream<T> for T {
    fn into_chunked_stream<const N: usize>(self) -> ChunkedStream<T, N> {
        ChunkedStream::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn should_cap_reads() {
        let mut stream = Cursor::new(b"hello world!").into_chunked_stream::<5>();
        let mut buf = [0u8; 64];
        assert_eq!(5, stream.read(&mut buf).unwrap());
        assert_eq!(b"hello", &buf[..5]);
        assert_eq!(5, stream.read(&mut buf).unwrap());
        assert_eq!(b" worl", &buf[..5]);
        assert_eq!(2, stream.read(&mut buf).unwrap());
        assert_eq!(b"d!", &buf[..2]);
        assert_eq!(0, stream.read(&mut buf).unwrap());
    }

    #[test]
    fn should_respect_smaller_caller_buffer() {
        let mut stream = Cursor::new(b"hello").into_default_chunked_stream();
        let mut buf = [0u8; 2];
        assert_eq!(2, stream.read(&mut buf).unwrap());
        assert_eq!(b"he", &buf);
    }

    #[test]
    fn should_cap_writes() {
        let mut stream = Vec::<u8>::new().into_chunked_stream::<3>();
        assert_eq!(3, stream.write(b"hello").unwrap());
        stream.write_all(b"lo world").unwrap();
        stream.flush().unwrap();
        assert_eq!(b"hello world", &stream.into_inner()[..]);
    }
}
