//! Mapping from wire representations to interchange primitives.

use crate::error::{SchemaError, SchemaResult, WidthUnit};
use crate::field::FieldKind;
use crate::primitive::PrimitiveType;

const MAX_BYTE_INTEGER_LEN: usize = 8;
const MAX_BIT_INTEGER_LEN: usize = 64;

/// Classifies any field kind.
pub fn classify(kind: FieldKind) -> SchemaResult<PrimitiveType> {
    match kind {
        FieldKind::Fixed(format) => classify_fixed_format(format.code),
        FieldKind::ByteInteger { len, .. } => classify_byte_integer(usize::from(len)),
        FieldKind::BitInteger { bits } => classify_bit_integer(usize::from(bits)),
    }
}

/// Classifies a struct-module format code.
pub fn classify_fixed_format(code: u8) -> SchemaResult<PrimitiveType> {
    let primitive = match code {
        b'c' | b'B' => PrimitiveType::UInt8,
        b'b' => PrimitiveType::Int8,
        b'h' => PrimitiveType::Int16,
        b'H' => PrimitiveType::UInt16,
        b'i' | b'l' => PrimitiveType::Int32,
        b'I' | b'L' => PrimitiveType::UInt32,
        b'q' => PrimitiveType::Int64,
        b'Q' => PrimitiveType::UInt64,
        b'f' => PrimitiveType::Float32,
        b'd' => PrimitiveType::Float64,
        _ => {
            return Err(SchemaError::UnsupportedFormat {
                code: char::from(code),
            })
        }
    };
    Ok(primitive)
}

/// Classifies a byte-length integer.
///
/// The result is always signed and rounded up to the next interchange width,
/// so a 3-byte integer becomes `Int32`.
pub fn classify_byte_integer(len: usize) -> SchemaResult<PrimitiveType> {
    match len {
        0 => Err(SchemaError::ZeroWidth {
            unit: WidthUnit::Bytes,
        }),
        1 => Ok(PrimitiveType::Int8),
        2 => Ok(PrimitiveType::Int16),
        3..=4 => Ok(PrimitiveType::Int32),
        5..=MAX_BYTE_INTEGER_LEN => Ok(PrimitiveType::Int64),
        _ => Err(SchemaError::WidthTooLarge {
            width: len,
            max: MAX_BYTE_INTEGER_LEN,
            unit: WidthUnit::Bytes,
        }),
    }
}

/// Classifies a bit-packed integer.
///
/// Bit-packed fields are always unsigned.
pub fn classify_bit_integer(bits: usize) -> SchemaResult<PrimitiveType> {
    match bits {
        0 => Err(SchemaError::ZeroWidth {
            unit: WidthUnit::Bits,
        }),
        1..=8 => Ok(PrimitiveType::UInt8),
        9..=16 => Ok(PrimitiveType::UInt16),
        17..=32 => Ok(PrimitiveType::UInt32),
        33..=MAX_BIT_INTEGER_LEN => Ok(PrimitiveType::UInt64),
        _ => Err(SchemaError::WidthTooLarge {
            width: bits,
            max: MAX_BIT_INTEGER_LEN,
            unit: WidthUnit::Bits,
        }),
    }
}
