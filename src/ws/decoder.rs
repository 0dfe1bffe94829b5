use crate::ws::protocol::{EXTENDED_LENGTH_16, EXTENDED_LENGTH_64, MASK_KEY_SIZE, PAYLOAD_LENGTH_MASK};
use crate::ws::{Role, protocol};
use log::{debug, trace};
use std::io;
use std::io::ErrorKind::{Interrupted, UnexpectedEof};
use std::io::Read;

/// Exposes the payloads of consecutive binary frames as one continuous byte stream.
///
/// Headers are parsed lazily: the next one is read only once the payload of the current frame
/// has been fully consumed. Neither the FIN bit nor the opcode is inspected, so message
/// boundaries are not visible to the caller. In the [`Role::Server`] role every frame is
/// expected to carry a mask key and the payload is unmasked on the fly.
///
/// Header reads retry on [`io::ErrorKind::Interrupted`], payload reads hand it to the caller with
/// the decoder state left intact so the read can simply be repeated.
///
/// ## Examples
///
/// ```
/// use std::io::Read;
/// use wsframe::ws::{FrameDecoder, Role};
///
/// let wire = [0x02, 0x02, b'h', b'i', 0x82, 0x01, b'!'];
/// let mut decoder = FrameDecoder::new(&wire[..], Role::Client);
/// let mut text = String::new();
/// decoder.read_to_string(&mut text).unwrap();
/// assert_eq!("hi!", text);
/// ```
#[derive(Debug)]
pub struct FrameDecoder<R> {
    source: R,
    role: Role,
    // payload bytes left in the current frame, zero while awaiting a header
    remaining: u64,
    mask_key: [u8; 4],
    mask_offset: usize,
}

impl<R> FrameDecoder<R> {
    pub fn new(source: R, role: Role) -> Self {
        debug!("creating frame decoder: role={role:?}");
        Self {
            source,
            role,
            remaining: 0,
            mask_key: [0u8; 4],
            mask_offset: 0,
        }
    }

    pub const fn role(&self) -> Role {
        self.role
    }

    /// Payload bytes of the current frame that have not been read yet.
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    pub const fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> FrameDecoder<R> {
    /// Reads the next frame header. Returns `false` if the source ended cleanly on a frame
    /// boundary.
    fn next_header(&mut self) -> io::Result<bool> {
        let mut header = [0u8; 2];
        if !self.read_first(&mut header)? {
            return Ok(false);
        }

        self.remaining = match header[1] & PAYLOAD_LENGTH_MASK {
            EXTENDED_LENGTH_16 => {
                let mut len = [0u8; 2];
                self.source.read_exact(&mut len)?;
                u16::from_be_bytes(len) as u64
            }
            EXTENDED_LENGTH_64 => {
                let mut len = [0u8; 8];
                self.source.read_exact(&mut len)?;
                u64::from_be_bytes(len)
            }
            len => len as u64,
        };

        if self.role.unmasks_inbound() {
            let mut mask_key = [0u8; MASK_KEY_SIZE];
            self.source.read_exact(&mut mask_key)?;
            self.mask_key = mask_key;
            self.mask_offset = 0;
        }

        trace!("received frame header: payload_len={}, byte0={:#04x}", self.remaining, header[0]);
        Ok(true)
    }

    // Like `read_exact` but distinguishes end of input before the first byte.
    fn read_first(&mut self, buf: &mut [u8]) -> io::Result<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(false),
                Ok(0) => return Err(io::Error::new(UnexpectedEof, "truncated frame header")),
                Ok(n) => filled += n,
                Err(err) if err.kind() == Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(true)
    }
}

impl<R: Read> Read for FrameDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        // zero length frames are skipped as `Ok(0)` would signal end of stream
        while self.remaining == 0 {
            if !self.next_header()? {
                return Ok(0);
            }
        }

        let len = usize::try_from(self.remaining).map_or(buf.len(), |remaining| remaining.min(buf.len()));
        let read = match self.source.read(&mut buf[..len])? {
            0 => return Err(io::Error::new(UnexpectedEof, "truncated frame payload")),
            read => read,
        };

        if self.role.unmasks_inbound() {
            protocol::mask(self.mask_key, self.mask_offset, &mut buf[..read]);
            self.mask_offset = (self.mask_offset + read) % MASK_KEY_SIZE;
        }

        self.remaining -= read as u64;
        Ok(read)
    }
}
