//! Byte stream adapters to plug underneath a frame encoder or decoder.

pub mod chunked;
pub mod record;
