//! Field descriptor definitions.

use std::fmt;

use crate::error::{SchemaError, SchemaResult};

/// Byte order of a multi-byte field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ByteOrder {
    /// Mesh parameters are little-endian.
    #[default]
    Little,
    Big,
}

/// A fixed-width integer or float in struct-module notation.
///
/// `code` is one of `c b B h H i I l L q Q f d`; lower case is signed.
/// Codes outside that set are accepted here and rejected by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct FixedFormat {
    pub order: ByteOrder,
    pub code: u8,
}

impl FixedFormat {
    /// Little-endian format.
    #[must_use]
    pub const fn le(code: u8) -> Self {
        Self {
            order: ByteOrder::Little,
            code,
        }
    }

    /// Big-endian format.
    #[must_use]
    pub const fn be(code: u8) -> Self {
        Self {
            order: ByteOrder::Big,
            code,
        }
    }

    /// Parses `"<h"`, `">H"` or a bare code (little-endian).
    pub fn parse(format: &str) -> SchemaResult<Self> {
        let invalid = || SchemaError::InvalidFormatString {
            format: format.to_string(),
        };
        let (order, rest) = match format.as_bytes() {
            [b'<', rest @ ..] => (ByteOrder::Little, rest),
            [b'>', rest @ ..] => (ByteOrder::Big, rest),
            rest => (ByteOrder::Little, rest),
        };
        match rest {
            [code] if code.is_ascii_alphabetic() => Ok(Self { order, code: *code }),
            _ => Err(invalid()),
        }
    }

    /// Encoded width in bytes, `None` for an unsupported code.
    #[must_use]
    pub const fn byte_len(self) -> Option<usize> {
        match self.code {
            b'c' | b'b' | b'B' => Some(1),
            b'h' | b'H' => Some(2),
            b'i' | b'I' | b'l' | b'L' | b'f' => Some(4),
            b'q' | b'Q' | b'd' => Some(8),
            _ => None,
        }
    }

    /// Returns `true` for floating point codes.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self.code, b'f' | b'd')
    }

    /// Returns `true` for signed integer codes.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self.code, b'b' | b'h' | b'i' | b'l' | b'q')
    }
}

impl fmt::Display for FixedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.order {
            ByteOrder::Little => '<',
            ByteOrder::Big => '>',
        };
        write!(f, "{prefix}{}", char::from(self.code))
    }
}

impl TryFrom<String> for FixedFormat {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FixedFormat> for String {
    fn from(value: FixedFormat) -> Self {
        value.to_string()
    }
}

/// Wire representation of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldKind {
    /// Fixed-width integer or float.
    Fixed(FixedFormat),

    /// Integer of an arbitrary whole number of bytes.
    ByteInteger {
        len: u8,
        signed: bool,
        order: ByteOrder,
    },

    /// Unsigned integer of an arbitrary number of bits, packed MSB first.
    BitInteger { bits: u8 },
}

impl FieldKind {
    /// Encoded width in bits, `None` for an unsupported fixed format.
    #[must_use]
    pub const fn bit_len(self) -> Option<usize> {
        match self {
            Self::Fixed(format) => match format.byte_len() {
                Some(len) => Some(len * 8),
                None => None,
            },
            Self::ByteInteger { len, .. } => Some(len as usize * 8),
            Self::BitInteger { bits } => Some(bits as usize),
        }
    }

    /// Returns `true` if the field must start on a byte boundary.
    #[must_use]
    pub const fn is_byte_aligned(self) -> bool {
        !matches!(self, Self::BitInteger { .. })
    }
}

/// One structural field: an optional name and its wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    /// `None` for anonymous fields, which keep their wire slot but no name.
    pub name: Option<String>,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates a named field.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: Some(name.into()),
            kind,
        }
    }

    /// Creates an anonymous field.
    #[must_use]
    pub const fn anonymous(kind: FieldKind) -> Self {
        Self { name: None, kind }
    }

    /// Little-endian fixed format field.
    #[must_use]
    pub fn fixed(name: impl Into<String>, code: u8) -> Self {
        Self::new(name, FieldKind::Fixed(FixedFormat::le(code)))
    }

    #[must_use]
    pub fn u8(name: impl Into<String>) -> Self {
        Self::fixed(name, b'B')
    }

    #[must_use]
    pub fn i8(name: impl Into<String>) -> Self {
        Self::fixed(name, b'b')
    }

    #[must_use]
    pub fn u16(name: impl Into<String>) -> Self {
        Self::fixed(name, b'H')
    }

    #[must_use]
    pub fn i16(name: impl Into<String>) -> Self {
        Self::fixed(name, b'h')
    }

    #[must_use]
    pub fn u32(name: impl Into<String>) -> Self {
        Self::fixed(name, b'I')
    }

    #[must_use]
    pub fn i32(name: impl Into<String>) -> Self {
        Self::fixed(name, b'i')
    }

    /// Little-endian integer of `len` bytes.
    #[must_use]
    pub fn bytes_int(name: impl Into<String>, len: u8, signed: bool) -> Self {
        Self::new(
            name,
            FieldKind::ByteInteger {
                len,
                signed,
                order: ByteOrder::Little,
            },
        )
    }

    /// Bit-packed unsigned integer.
    #[must_use]
    pub fn bits(name: impl Into<String>, bits: u8) -> Self {
        Self::new(name, FieldKind::BitInteger { bits })
    }
}
