//! Decoded field values and the per-field bit codec.

use std::fmt;

use bitstream::{BitReader, BitWriter};
use schema::{ByteOrder, FieldKind, LayoutField};

use crate::error::{CodecError, CodecResult, ValueReason};

/// A field value in decoded form.
///
/// Integers keep the signedness of their wire representation, so an unsigned
/// three-byte integer decodes to `UInt` even though it classifies as `Int32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    UInt(u64),
    SInt(i64),
    Float32(f32),
    Float64(f64),
}

impl FieldValue {
    /// Returns the value as `u64` if it is a non-negative integer.
    #[must_use]
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(v),
            Self::SInt(v) => u64::try_from(v).ok(),
            Self::Float32(_) | Self::Float64(_) => None,
        }
    }

    /// Returns the value as `i64` if it is an integer in range.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::UInt(v) => i64::try_from(v).ok(),
            Self::SInt(v) => Some(v),
            Self::Float32(_) | Self::Float64(_) => None,
        }
    }

    /// Returns the value widened to `f64`.
    ///
    /// Integers beyond 2^53 lose their low bits.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::UInt(v) => v as f64,
            Self::SInt(v) => v as f64,
            Self::Float32(v) => f64::from(v),
            Self::Float64(v) => v,
        }
    }

    pub(crate) const fn type_name(self) -> &'static str {
        match self {
            Self::UInt(_) => "uint",
            Self::SInt(_) => "sint",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(v) => write!(f, "{v}"),
            Self::SInt(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
        }
    }
}

/// How a field's bits map onto a value.
#[derive(Debug, Clone, Copy)]
enum Repr {
    Unsigned { bytes: usize, order: ByteOrder },
    Signed { bytes: usize, order: ByteOrder },
    Float32 { order: ByteOrder },
    Float64 { order: ByteOrder },
    Bits { bits: u8 },
}

impl Repr {
    fn of(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Fixed(format) => {
                let bytes = format.byte_len().unwrap_or(0);
                match format.code {
                    b'f' => Self::Float32 {
                        order: format.order,
                    },
                    b'd' => Self::Float64 {
                        order: format.order,
                    },
                    _ if format.is_signed() => Self::Signed {
                        bytes,
                        order: format.order,
                    },
                    _ => Self::Unsigned {
                        bytes,
                        order: format.order,
                    },
                }
            }
            FieldKind::ByteInteger { len, signed, order } => {
                let bytes = usize::from(len);
                if signed {
                    Self::Signed { bytes, order }
                } else {
                    Self::Unsigned { bytes, order }
                }
            }
            FieldKind::BitInteger { bits } => Self::Bits { bits },
        }
    }

    const fn expected_name(self) -> &'static str {
        match self {
            Self::Unsigned { .. } | Self::Bits { .. } => "uint",
            Self::Signed { .. } => "sint",
            Self::Float32 { .. } => "float32",
            Self::Float64 { .. } => "float64",
        }
    }
}

/// Reads one field value.
pub(crate) fn read_field_value(
    field: &LayoutField,
    reader: &mut BitReader<'_>,
) -> CodecResult<FieldValue> {
    let value = match Repr::of(field.kind) {
        Repr::Unsigned { bytes, order } => {
            FieldValue::UInt(read_uint(reader, bytes, order)?)
        }
        Repr::Signed { bytes, order } => {
            let raw = read_uint(reader, bytes, order)?;
            FieldValue::SInt(sign_extend(raw, bytes * 8))
        }
        Repr::Float32 { order } => {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(reader.read_bytes_aligned(4)?);
            let bits = match order {
                ByteOrder::Little => u32::from_le_bytes(raw),
                ByteOrder::Big => u32::from_be_bytes(raw),
            };
            FieldValue::Float32(f32::from_bits(bits))
        }
        Repr::Float64 { order } => {
            let raw = read_uint(reader, 8, order)?;
            FieldValue::Float64(f64::from_bits(raw))
        }
        Repr::Bits { bits } => FieldValue::UInt(reader.read_bits(bits)?),
    };
    Ok(value)
}

/// Writes one field value, checking its type and range.
pub(crate) fn write_field_value(
    field: &LayoutField,
    label: &str,
    value: FieldValue,
    writer: &mut BitWriter,
) -> CodecResult<()> {
    let repr = Repr::of(field.kind);
    let invalid = |reason| CodecError::InvalidValue {
        field: label.to_string(),
        reason,
    };
    match (repr, value) {
        (Repr::Unsigned { bytes, order }, FieldValue::UInt(v)) => {
            let bits = bytes * 8;
            if bits < 64 && v >> bits != 0 {
                return Err(invalid(ValueReason::UnsignedOutOfRange { bits, value: v }));
            }
            write_uint(writer, v, bytes, order)?;
        }
        (Repr::Signed { bytes, order }, FieldValue::SInt(v)) => {
            let bits = bytes * 8;
            if bits < 64 {
                let min = -(1i64 << (bits - 1));
                let max = (1i64 << (bits - 1)) - 1;
                if v < min || v > max {
                    return Err(invalid(ValueReason::SignedOutOfRange { bits, value: v }));
                }
            }
            write_uint(writer, truncate(twos_complement(v), bits), bytes, order)?;
        }
        (Repr::Float32 { order }, FieldValue::Float32(v)) => {
            write_uint(writer, u64::from(v.to_bits()), 4, order)?;
        }
        (Repr::Float64 { order }, FieldValue::Float64(v)) => {
            write_uint(writer, v.to_bits(), 8, order)?;
        }
        (Repr::Bits { bits }, FieldValue::UInt(v)) => {
            if bits < 64 && v >> bits != 0 {
                return Err(invalid(ValueReason::UnsignedOutOfRange {
                    bits: usize::from(bits),
                    value: v,
                }));
            }
            writer.write_bits(v, bits)?;
        }
        (repr, value) => {
            return Err(invalid(ValueReason::TypeMismatch {
                expected: repr.expected_name(),
                found: value.type_name(),
            }));
        }
    }
    Ok(())
}

fn read_uint(reader: &mut BitReader<'_>, bytes: usize, order: ByteOrder) -> CodecResult<u64> {
    let raw = reader.read_bytes_aligned(bytes)?;
    let fold = |acc: u64, byte: &u8| (acc << 8) | u64::from(*byte);
    let value = match order {
        ByteOrder::Little => raw.iter().rev().fold(0, fold),
        ByteOrder::Big => raw.iter().fold(0, fold),
    };
    Ok(value)
}

fn write_uint(
    writer: &mut BitWriter,
    value: u64,
    bytes: usize,
    order: ByteOrder,
) -> CodecResult<()> {
    let le = value.to_le_bytes();
    let mut buf = [0u8; 8];
    buf[..bytes].copy_from_slice(&le[..bytes]);
    if order == ByteOrder::Big {
        buf[..bytes].reverse();
    }
    writer.write_bytes_aligned(&buf[..bytes])?;
    Ok(())
}

/// Bit pattern of `value` as an unsigned integer.
#[allow(clippy::cast_sign_loss)]
const fn twos_complement(value: i64) -> u64 {
    value as u64
}

/// Interprets the low `bits` of `raw` as a two's complement integer.
#[allow(clippy::cast_possible_wrap)]
fn sign_extend(raw: u64, bits: usize) -> i64 {
    if bits == 0 || bits >= 64 {
        return raw as i64;
    }
    let shift = 64 - bits;
    ((raw << shift) as i64) >> shift
}

fn truncate(raw: u64, bits: usize) -> u64 {
    if bits >= 64 {
        raw
    } else {
        raw & ((1u64 << bits) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{classify, FieldDescriptor, FixedFormat};

    fn field(descriptor: FieldDescriptor) -> LayoutField {
        LayoutField {
            path: descriptor.name.clone().unwrap_or_default(),
            name: descriptor.name,
            kind: descriptor.kind,
            primitive: classify(descriptor.kind).unwrap(),
            bit_offset: 0,
        }
    }

    fn encode(field: &LayoutField, value: FieldValue) -> CodecResult<Vec<u8>> {
        let mut writer = BitWriter::new();
        write_field_value(field, &field.path, value, &mut writer)?;
        Ok(writer.finish())
    }

    fn decode(field: &LayoutField, bytes: &[u8]) -> FieldValue {
        let mut reader = BitReader::new(bytes);
        let value = read_field_value(field, &mut reader).unwrap();
        assert!(reader.is_empty());
        value
    }

    #[test]
    fn little_endian_signed() {
        let level = field(FieldDescriptor::i16("level"));
        assert_eq!(decode(&level, &[0x31, 0x32]), FieldValue::SInt(0x3231));
        assert_eq!(decode(&level, &[0x00, 0x80]), FieldValue::SInt(-32768));
        assert_eq!(
            encode(&level, FieldValue::SInt(-1)).unwrap(),
            vec![0xFF, 0xFF]
        );
    }

    #[test]
    fn big_endian_unsigned() {
        let value = field(FieldDescriptor::new(
            "value",
            FieldKind::Fixed(FixedFormat::be(b'H')),
        ));
        assert_eq!(decode(&value, &[0x12, 0x34]), FieldValue::UInt(0x1234));
        assert_eq!(
            encode(&value, FieldValue::UInt(0x1234)).unwrap(),
            vec![0x12, 0x34]
        );
    }

    #[test]
    fn three_byte_integers() {
        let unsigned = field(FieldDescriptor::bytes_int("u", 3, false));
        assert_eq!(
            decode(&unsigned, &[0x01, 0x02, 0xFF]),
            FieldValue::UInt(0xFF_0201)
        );

        let signed = field(FieldDescriptor::bytes_int("s", 3, true));
        assert_eq!(decode(&signed, &[0xFF, 0xFF, 0xFF]), FieldValue::SInt(-1));
        assert_eq!(
            encode(&signed, FieldValue::SInt(-2)).unwrap(),
            vec![0xFE, 0xFF, 0xFF]
        );
    }

    #[test]
    fn floats() {
        let f = field(FieldDescriptor::fixed("f", b'f'));
        let bytes = encode(&f, FieldValue::Float32(1.5)).unwrap();
        assert_eq!(bytes, 1.5f32.to_le_bytes().to_vec());
        assert_eq!(decode(&f, &bytes), FieldValue::Float32(1.5));

        let d = field(FieldDescriptor::fixed("d", b'd'));
        let bytes = encode(&d, FieldValue::Float64(-0.25)).unwrap();
        assert_eq!(decode(&d, &bytes), FieldValue::Float64(-0.25));
    }

    #[test]
    fn big_endian_float_and_signed_extremes() {
        let f = field(FieldDescriptor::new("f", FieldKind::Fixed(FixedFormat::be(b'f'))));
        let bytes = encode(&f, FieldValue::Float32(-2.5)).unwrap();
        assert_eq!(bytes, (-2.5f32).to_be_bytes().to_vec());
        assert_eq!(decode(&f, &bytes), FieldValue::Float32(-2.5));

        let q = field(FieldDescriptor::fixed("q", b'q'));
        for v in [i64::MIN, -1, i64::MAX] {
            let bytes = encode(&q, FieldValue::SInt(v)).unwrap();
            assert_eq!(bytes, v.to_le_bytes().to_vec());
            assert_eq!(decode(&q, &bytes), FieldValue::SInt(v));
        }
    }

    #[test]
    fn widen_to_f64() {
        assert_eq!(FieldValue::UInt(3).as_f64(), 3.0);
        assert_eq!(FieldValue::SInt(-3).as_f64(), -3.0);
        assert_eq!(FieldValue::Float32(0.5).as_f64(), 0.5);
    }

    #[test]
    fn bit_fields_pack_msb_first() {
        let resolution = field(FieldDescriptor::bits("step_resolution", 2));
        let steps = field(FieldDescriptor::bits("steps", 6));
        let mut writer = BitWriter::new();
        write_field_value(&resolution, "step_resolution", FieldValue::UInt(1), &mut writer)
            .unwrap();
        write_field_value(&steps, "steps", FieldValue::UInt(0x3C), &mut writer).unwrap();
        assert_eq!(writer.finish(), vec![0x7C]);

        let mut reader = BitReader::new(&[0x3C]);
        assert_eq!(
            read_field_value(&resolution, &mut reader).unwrap(),
            FieldValue::UInt(0)
        );
        assert_eq!(
            read_field_value(&steps, &mut reader).unwrap(),
            FieldValue::UInt(0x3C)
        );
    }

    #[test]
    fn rejects_out_of_range() {
        let tid = field(FieldDescriptor::u8("tid"));
        let err = encode(&tid, FieldValue::UInt(256)).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidValue {
                field: "tid".into(),
                reason: ValueReason::UnsignedOutOfRange {
                    bits: 8,
                    value: 256
                }
            }
        );

        let level = field(FieldDescriptor::i16("level"));
        assert!(matches!(
            encode(&level, FieldValue::SInt(40_000)),
            Err(CodecError::InvalidValue {
                reason: ValueReason::SignedOutOfRange { .. },
                ..
            })
        ));

        let steps = field(FieldDescriptor::bits("steps", 6));
        assert!(encode(&steps, FieldValue::UInt(64)).is_err());
    }

    #[test]
    fn rejects_type_mismatch() {
        let tid = field(FieldDescriptor::u8("tid"));
        let err = encode(&tid, FieldValue::SInt(1)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                reason: ValueReason::TypeMismatch {
                    expected: "uint",
                    found: "sint"
                },
                ..
            }
        ));
    }

    #[test]
    fn truncated_input_is_bitstream_error() {
        let level = field(FieldDescriptor::i16("level"));
        let mut reader = BitReader::new(&[0x01]);
        let err = read_field_value(&level, &mut reader).unwrap_err();
        assert!(matches!(err, CodecError::Bitstream(_)));
    }

    #[test]
    fn accessors() {
        assert_eq!(FieldValue::SInt(5).as_u64(), Some(5));
        assert_eq!(FieldValue::SInt(-5).as_u64(), None);
        assert_eq!(FieldValue::UInt(7).as_i64(), Some(7));
        assert_eq!(FieldValue::Float32(2.0).as_u64(), None);
        assert!((FieldValue::UInt(3).as_f64() - 3.0).abs() < f64::EPSILON);
        assert_eq!(FieldValue::SInt(-3).to_string(), "-3");
    }
}
