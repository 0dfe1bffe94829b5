//! Stream that captures all the bytes passing through it.

use std::fs::File;
use std::io;
use std::io::{BufWriter, Read, Write};

const DEFAULT_RECORDING_NAME: &str = "frames";

/// Destination of the captured inbound and outbound bytes.
pub struct Recorder {
    inbound: Box<dyn Write>,
    outbound: Box<dyn Write>,
}

impl Recorder {
    /// Captures into `<recording_name>_inbound.rec` and `<recording_name>_outbound.rec`.
    pub fn to_files(recording_name: impl AsRef<str>) -> io::Result<Self> {
        let file_in = format!("{}_inbound.rec", recording_name.as_ref());
        let file_out = format!("{}_outbound.rec", recording_name.as_ref());
        let inbound = BufWriter::new(File::create(file_in)?);
        let outbound = BufWriter::new(File::create(file_out)?);
        Ok(Self::new(inbound, outbound))
    }

    pub fn new(inbound: impl Write + 'static, outbound: impl Write + 'static) -> Self {
        Self {
            inbound: Box::new(inbound),
            outbound: Box::new(outbound),
        }
    }

    fn record_inbound(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inbound.write_all(buf)?;
        self.inbound.flush()
    }

    fn record_outbound(&mut self, buf: &[u8]) -> io::Result<()> {
        self.outbound.write_all(buf)?;
        self.outbound.flush()
    }
}

/// Tees every byte read from and written to the inner stream into a [`Recorder`]. Wrapping the
/// transport below a frame encoder or decoder captures the raw frames as they appear on the wire.
///
/// ## Examples
///
/// ```no_run
/// use std::net::TcpStream;
/// use wsframe::stream::record::IntoRecordedStream;
/// use wsframe::ws::{IntoFrameEncoder, Role};
///
/// let mut encoder = TcpStream::connect("127.0.0.1:9001")
///     .unwrap()
///     .into_default_recorded_stream()
///     .unwrap()
///     .into_frame_encoder(Role::Client);
/// ```
pub struct RecordedStream<S> {
    inner: S,
    recorder: Recorder,
}

impl<S> RecordedStream<S> {
    pub fn new(stream: S, recorder: Recorder) -> RecordedStream<S> {
        Self {
            inner: stream,
            recorder,
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Read> Read for RecordedStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.recorder.record_inbound(&buf[..read])?;
        Ok(read)
    }
}

impl<S: Write> Write for RecordedStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let wrote = self.inner.write(buf)?;
        self.recorder.record_outbound(&buf[..wrote])?;
        Ok(wrote)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Trait to convert any stream into `RecordedStream` backed by files.
pub trait IntoRecordedStream {
    fn into_recorded_stream(self, recording_name: impl AsRef<str>) -> io::Result<RecordedStream<Self>>
    where
        Self: Sized;

    fn into_default_recorded_stream(self) -> io::Result<RecordedStream<Self>>
    where
        Self: Sized,
    {
        self.into_recorded_stream(DEFAULT_RECORDING_NAME)
    }
}

impl<T> IntoRecordedStream for T
where
    T: Read + Write,
{
    fn into_recorded_stream(self, recording_name: impl AsRef<str>) -> io::Result<RecordedStream<Self>>
    where
        Self: Sized,
    {
        Ok(RecordedStream::new(self, Recorder::to_files(recording_name)?))
    }
}
