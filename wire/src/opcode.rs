//! Mesh access opcodes.
//!
//! An opcode is 1, 2 or 3 bytes long and its length is announced by the two
//! high bits of the first byte:
//!
//! ```text
//! 0xxxxxxx                      1 byte  (0x7F reserved)
//! 10xxxxxx xxxxxxxx             2 bytes
//! 11xxxxxx cccccccc cccccccc    3 bytes (vendor, little-endian company id)
//! ```
//!
//! The opcode value is the big-endian integer of its bytes, so the bytes
//! `82 06` carry opcode `0x8206`.

use std::fmt;

use crate::error::{DecodeError, EncodeError, WireResult};

/// Maximum opcode length in bytes.
pub const MAX_OPCODE_LEN: usize = 3;

const RESERVED_OPCODE: u8 = 0x7F;

/// A validated Mesh access opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode(u32);

impl Opcode {
    /// Creates an opcode from its integer value, checking that it encodes.
    pub const fn new(raw: u32) -> Result<Self, EncodeError> {
        if encoded_len(raw).is_none() {
            return Err(EncodeError::InvalidOpcode { raw });
        }
        Ok(Self(raw))
    }

    /// Creates a vendor opcode from its 6-bit opcode and company identifier.
    pub const fn vendor(opcode: u8, company_id: u16) -> Result<Self, EncodeError> {
        if opcode > 0x3F {
            return Err(EncodeError::InvalidOpcode {
                raw: opcode as u32,
            });
        }
        let [lo, hi] = company_id.to_le_bytes();
        let raw = ((0xC0 | opcode as u32) << 16) | ((lo as u32) << 8) | hi as u32;
        Ok(Self(raw))
    }

    /// Returns the raw opcode value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the number of bytes the opcode occupies on the wire.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        match encoded_len(self.0) {
            Some(len) => len,
            None => MAX_OPCODE_LEN,
        }
    }

    /// Returns the company identifier of a vendor opcode.
    #[must_use]
    pub const fn company_id(self) -> Option<u16> {
        if self.len() != 3 {
            return None;
        }
        let lo = ((self.0 >> 8) & 0xFF) as u8;
        let hi = (self.0 & 0xFF) as u8;
        Some(u16::from_le_bytes([lo, hi]))
    }
}

impl TryFrom<u32> for Opcode {
    type Error = EncodeError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len() {
            1 => write!(f, "0x{:02X}", self.0),
            2 => write!(f, "0x{:04X}", self.0),
            _ => write!(f, "0x{:06X}", self.0),
        }
    }
}

const fn encoded_len(raw: u32) -> Option<usize> {
    match raw {
        0x00..=0x7E => Some(1),
        0x8000..=0xBFFF => Some(2),
        0x00C0_0000..=0x00FF_FFFF => Some(3),
        _ => None,
    }
}

/// Decodes the opcode at the start of `bytes`.
///
/// Returns the opcode and the number of bytes it consumed.
pub fn decode_opcode(bytes: &[u8]) -> WireResult<(Opcode, usize)> {
    let Some(&first) = bytes.first() else {
        return Err(DecodeError::EmptyMessage);
    };
    let len = match first {
        RESERVED_OPCODE => return Err(DecodeError::ReservedOpcode { byte: first }),
        0x00..=0x7E => 1,
        0x80..=0xBF => 2,
        _ => 3,
    };
    if bytes.len() < len {
        return Err(DecodeError::TruncatedOpcode {
            needed: len,
            available: bytes.len(),
        });
    }
    let raw = bytes[..len]
        .iter()
        .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));
    Ok((Opcode(raw), len))
}

/// Appends the wire form of `opcode` to `out`, returning the bytes written.
pub fn encode_opcode(opcode: Opcode, out: &mut Vec<u8>) -> usize {
    let len = opcode.len();
    let bytes = opcode.raw().to_be_bytes();
    out.extend_from_slice(&bytes[bytes.len() - len..]);
    len
}
