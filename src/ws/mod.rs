//! Binary frame codec following the RFC 6455 frame layout.
//!
//! The codec only deals with framing. Handshake, control frames and extensions are left to the
//! surrounding protocol, and no validation of reserved bits or opcodes takes place.
//!
//! ## Examples
//!
//! Frame an outbound byte stream on the client side.
//! ```no_run
//! use std::fs::File;
//! use std::net::TcpStream;
//! use wsframe::ws::{IntoFrameEncoder, Role};
//!
//! let mut encoder = TcpStream::connect("127.0.0.1:9001").unwrap().into_frame_encoder(Role::Client);
//! encoder.encode_from(&mut File::open("payload.bin").unwrap()).unwrap();
//! ```
//!
//! Read the payloads of masked frames as a continuous stream on the server side.
//! ```no_run
//! use std::io::Read;
//! use std::net::TcpListener;
//! use wsframe::ws::{IntoFrameDecoder, Role};
//!
//! let (stream, _) = TcpListener::bind("127.0.0.1:9001").unwrap().accept().unwrap();
//! let mut decoder = stream.into_frame_decoder(Role::Server);
//! let mut payload = Vec::new();
//! decoder.read_to_end(&mut payload).unwrap();
//! ```

use std::io::{Read, Write};

// re-export
pub use crate::ws::decoder::FrameDecoder;
pub use crate::ws::encoder::FrameEncoder;
pub use crate::ws::error::Error;

mod decoder;
mod encoder;
mod error;
pub mod protocol;

/// Side of the connection an encoder or decoder acts for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    /// Masks outbound frames and marks them final, expects unmasked inbound frames.
    Client,
    /// Sends unmasked frames without the FIN bit and unmasks inbound frames.
    Server,
}

impl Role {
    /// Outbound frames are masked and marked final.
    pub const fn masks_outbound(&self) -> bool {
        matches!(self, Role::Client)
    }

    /// Inbound frames carry a mask key that has to be applied to the payload.
    pub const fn unmasks_inbound(&self) -> bool {
        matches!(self, Role::Server)
    }
}

/// Trait to wrap any sink into `FrameEncoder`.
pub trait IntoFrameEncoder {
    fn into_frame_encoder(self, role: Role) -> FrameEncoder<Self>
    where
        Self: Sized;
}

impl<T> IntoFrameEncoder for T
where
    T: Write,
{
    fn into_frame_encoder(self, role: Role) -> FrameEncoder<Self>
    where
        Self: Sized,
    {
        FrameEncoder::new(self, role)
    }
}

/// Trait to wrap any source into `FrameDecoder`.
pub trait IntoFrameDecoder {
    fn into_frame_decoder(self, role: Role) -> FrameDecoder<Self>
    where
        Self: Sized;
}

impl<T> IntoFrameDecoder for T
where
    T: Read,
{
    fn into_frame_decoder(self, role: Role) -> FrameDecoder<Self>
    where
        Self: Sized,
    {
        FrameDecoder::new(self, role)
    }
}
