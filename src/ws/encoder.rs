use crate::ws::protocol::{DEFAULT_FRAME_SIZE, MAX_HEADER_SIZE};
use crate::ws::{Error, Role, protocol};
use log::{debug, trace};
use std::io;
use std::io::ErrorKind::Interrupted;
use std::io::{Read, Write};

/// Splits an outbound byte stream into binary frames and writes them to the sink.
///
/// In the [`Role::Client`] role every frame is marked final and masked with a key that is drawn
/// once when the encoder is created and reused for all frames it emits. In the [`Role::Server`]
/// role frames are sent unmasked and the FIN bit is never set.
///
/// ## Examples
///
/// ```
/// use wsframe::ws::{FrameEncoder, Role};
///
/// let mut encoder = FrameEncoder::new(Vec::new(), Role::Server);
/// encoder.encode_from(&mut &b"hello"[..]).unwrap();
/// assert_eq!(&[0x02, 0x05, b'h', b'e', b'l', b'l', b'o'], &encoder.into_inner()[..]);
/// ```
#[derive(Debug)]
pub struct FrameEncoder<W> {
    sink: W,
    role: Role,
    mask_key: [u8; 4],
    // header area followed by a single payload chunk
    buffer: Vec<u8>,
}

impl<W> FrameEncoder<W> {
    /// Creates encoder with the default max chunk size of [`DEFAULT_FRAME_SIZE`] bytes.
    pub fn new(sink: W, role: Role) -> Self {
        Self::create(sink, role, DEFAULT_FRAME_SIZE)
    }

    /// Creates encoder that carries at most `max_chunk_size` payload bytes per frame.
    /// Fails if `max_chunk_size` is zero or the scratch buffer would exceed `isize::MAX` bytes.
    pub fn with_max_chunk_size(sink: W, role: Role, max_chunk_size: usize) -> Result<Self, Error> {
        MAX_HEADER_SIZE
            .checked_add(max_chunk_size)
            .filter(|buffer_len| max_chunk_size > 0 && *buffer_len <= isize::MAX as usize)
            .ok_or(Error::InvalidChunkSize(max_chunk_size))?;
        Ok(Self::create(sink, role, max_chunk_size))
    }

    fn create(sink: W, role: Role, max_chunk_size: usize) -> Self {
        debug!("creating frame encoder: role={role:?}, max_chunk_size={max_chunk_size}");
        Self {
            sink,
            role,
            mask_key: rand::random::<u32>().to_le_bytes(),
            buffer: vec![0u8; MAX_HEADER_SIZE + max_chunk_size],
        }
    }

    /// Replaces the generated mask key. Only relevant in the masking role.
    pub fn with_mask_key(mut self, mask_key: [u8; 4]) -> Self {
        self.mask_key = mask_key;
        self
    }

    pub const fn role(&self) -> Role {
        self.role
    }

    pub const fn mask_key(&self) -> [u8; 4] {
        self.mask_key
    }

    pub fn max_chunk_size(&self) -> usize {
        self.buffer.len() - MAX_HEADER_SIZE
    }

    pub const fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> FrameEncoder<W> {
    /// Pulls bytes from `source` until it reports end of input and sends each chunk as a separate
    /// frame. Returns the number of payload bytes consumed.
    ///
    /// The first error raised by the source or the sink aborts the call and is returned as is. A
    /// frame that was partially written at that point is not rolled back.
    pub fn encode_from<R: Read + ?Sized>(&mut self, source: &mut R) -> io::Result<u64> {
        let mut consumed = 0u64;
        loop {
            let len = match source.read(&mut self.buffer[MAX_HEADER_SIZE..]) {
                Ok(0) => return Ok(consumed),
                Ok(len) => len,
                Err(err) if err.kind() == Interrupted => continue,
                Err(err) => return Err(err),
            };
            self.send_frame(len)?;
            consumed += len as u64;
        }
    }

    // The payload is already in place, the header is written right before it so that the whole
    // frame goes out with a single write.
    fn send_frame(&mut self, len: usize) -> io::Result<()> {
        let masked = self.role.masks_outbound();
        let fin = masked;
        let mask_key = masked.then_some(self.mask_key);

        let header_len = protocol::header_len(masked, len as u64);
        let start = MAX_HEADER_SIZE - header_len;
        protocol::write_header(&mut self.buffer[start..MAX_HEADER_SIZE], fin, mask_key, len as u64);

        let end = MAX_HEADER_SIZE + len;
        if let Some(key) = mask_key {
            protocol::mask(key, 0, &mut self.buffer[MAX_HEADER_SIZE..end]);
        }

        trace!("sending frame: payload_len={len}, fin={fin}, masked={masked}");
        self.sink.write_all(&self.buffer[start..end])
    }
}

impl<W: Write> Write for FrameEncoder<W> {
    /// Frames the whole of `buf`, using as many frames as the max chunk size requires.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut source = buf;
        self.encode_from(&mut source)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
