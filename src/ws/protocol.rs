//! Frame header layout shared by the encoder and the decoder.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
//! |N|V|V|V|       |S|             |   (if payload len==126/127)   |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
//! |     Extended payload length continued, if payload len == 127  |
//! + - - - - - - - - - - - - - - - +-------------------------------+
//! |                               |Masking-key, if MASK set to 1  |
//! +-------------------------------+-------------------------------+
//! | Masking-key (continued)       |          Payload Data         |
//! +-------------------------------- - - - - - - - - - - - - - - - +
//! ```

pub const FIN_MASK: u8 = 0b1000_0000;
pub const OP_CODE_MASK: u8 = 0b0000_1111;
pub const MASK_MASK: u8 = 0b1000_0000;
pub const PAYLOAD_LENGTH_MASK: u8 = 0b0111_1111;

/// Base length marker announcing a 16-bit extended length.
pub const EXTENDED_LENGTH_16: u8 = 126;
/// Base length marker announcing a 64-bit extended length.
pub const EXTENDED_LENGTH_64: u8 = 127;

pub const MASK_KEY_SIZE: usize = 4;
/// Fixed header, longest extended length and mask key.
pub const MAX_HEADER_SIZE: usize = 2 + 8 + MASK_KEY_SIZE;
/// Default upper bound of the payload carried by a single frame.
pub const DEFAULT_FRAME_SIZE: usize = 4096;

pub mod op {
    pub const BINARY_FRAME: u8 = 0x2;
}

/// Encoding used for the payload length of a frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LengthClass {
    /// Length fits the 7-bit base field.
    Inline(u8),
    /// Marker 126 followed by a big-endian `u16`.
    Extended16(u16),
    /// Marker 127 followed by a big-endian `u64`.
    Extended64(u64),
}

impl LengthClass {
    /// Picks the smallest field able to represent `len`.
    pub const fn of(len: u64) -> Self {
        match len {
            0..=125 => LengthClass::Inline(len as u8),
            126..=0xFFFF => LengthClass::Extended16(len as u16),
            _ => LengthClass::Extended64(len),
        }
    }

    /// Number of bytes following the base length byte.
    pub const fn extension_len(&self) -> usize {
        match self {
            LengthClass::Inline(_) => 0,
            LengthClass::Extended16(_) => 2,
            LengthClass::Extended64(_) => 8,
        }
    }

    const fn marker(&self) -> u8 {
        match self {
            LengthClass::Inline(len) => *len,
            LengthClass::Extended16(_) => EXTENDED_LENGTH_16,
            LengthClass::Extended64(_) => EXTENDED_LENGTH_64,
        }
    }
}

/// Writes the header of a binary frame carrying `payload_len` bytes into `buf` and returns the
/// number of bytes used. The mask key, when present, is appended after the length.
///
/// Panics if `buf` is shorter than the encoded header (at most [`MAX_HEADER_SIZE`]).
pub fn write_header(buf: &mut [u8], fin: bool, mask_key: Option<[u8; 4]>, payload_len: u64) -> usize {
    let length = LengthClass::of(payload_len);
    buf[0] = op::BINARY_FRAME;
    if fin {
        buf[0] |= FIN_MASK;
    }
    buf[1] = length.marker();
    if mask_key.is_some() {
        buf[1] |= MASK_MASK;
    }
    match length {
        LengthClass::Inline(_) => {}
        LengthClass::Extended16(len) => buf[2..4].copy_from_slice(&len.to_be_bytes()),
        LengthClass::Extended64(len) => buf[2..10].copy_from_slice(&len.to_be_bytes()),
    }
    let mut header_len = 2 + length.extension_len();
    if let Some(key) = mask_key {
        buf[header_len..header_len + MASK_KEY_SIZE].copy_from_slice(&key);
        header_len += MASK_KEY_SIZE;
    }
    header_len
}

/// Size of the header [`write_header`] produces for the given frame.
pub const fn header_len(masked: bool, payload_len: u64) -> usize {
    let mask_len = if masked { MASK_KEY_SIZE } else { 0 };
    2 + LengthClass::of(payload_len).extension_len() + mask_len
}

/// XORs every byte of `payload` with `key`, where `payload[0]` sits at position `offset` of the
/// frame. Applying it twice with the same key and offset restores the input.
#[inline]
pub fn mask(key: [u8; 4], offset: usize, payload: &mut [u8]) {
    for (i, b) in payload.iter_mut().enumerate() {
        *b ^= key[(i + offset) % MASK_KEY_SIZE];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(len: u64) -> ([u8; MAX_HEADER_SIZE], usize) {
        let mut buf = [0u8; MAX_HEADER_SIZE];
        let n = write_header(&mut buf, false, None, len);
        (buf, n)
    }

    #[test]
    fn should_select_inline_length() {
        for len in [0u64, 1, 125] {
            let (buf, n) = header(len);
            assert_eq!(2, n);
            assert_eq!(len as u8, buf[1]);
        }
    }

    #[test]
    fn should_select_16_bit_length() {
        for len in [126u64, 4096, 65535] {
            let (buf, n) = header(len);
            assert_eq!(4, n);
            assert_eq!(126, buf[1]);
            assert_eq!(len as u16, u16::from_be_bytes([buf[2], buf[3]]));
        }
    }

    #[test]
    fn should_select_64_bit_length() {
        for len in [65536u64, 200_000, u64::MAX] {
            let (buf, n) = header(len);
            assert_eq!(10, n);
            assert_eq!(127, buf[1]);
            assert_eq!(len, u64::from_be_bytes(buf[2..10].try_into().unwrap()));
        }
    }

    #[test]
    fn should_set_fin_mask_and_key() {
        let mut buf = [0u8; MAX_HEADER_SIZE];
        let n = write_header(&mut buf, true, Some([1, 2, 3, 4]), 300);
        assert_eq!(8, n);
        assert_eq!(header_len(true, 300), n);
        assert_eq!(FIN_MASK | op::BINARY_FRAME, buf[0]);
        assert_eq!(MASK_MASK | 126, buf[1]);
        assert_eq!([1, 44], [buf[2], buf[3]]);
        assert_eq!([1, 2, 3, 4], buf[4..8]);
    }

    #[test]
    fn should_leave_fin_and_mask_clear() {
        let (buf, _) = header(10);
        assert_eq!(op::BINARY_FRAME, buf[0]);
        assert_eq!(0, buf[0] & FIN_MASK);
        assert_eq!(0, buf[1] & MASK_MASK);
    }

    #[test]
    fn should_restore_payload_when_masked_twice() {
        let key = [0xde, 0xad, 0xbe, 0xef];
        let original = b"hello masked world!".to_vec();
        for offset in 0..4 {
            let mut payload = original.clone();
            mask(key, offset, &mut payload);
            assert_ne!(original, payload);
            mask(key, offset, &mut payload);
            assert_eq!(original, payload);
        }
    }

    #[test]
    fn should_honour_mask_offset() {
        let key = [1, 2, 3, 4];
        let mut whole = [0u8; 10];
        mask(key, 0, &mut whole);

        let mut split = [0u8; 10];
        let (head, tail) = split.split_at_mut(3);
        mask(key, 0, head);
        mask(key, 3, tail);

        assert_eq!(whole, split);
        assert_eq!([1, 2, 3, 4, 1, 2, 3, 4, 1, 2], whole);
    }
}
