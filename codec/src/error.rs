//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding or encoding access messages.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Framing or opcode error on decode.
    Wire(wire::DecodeError),

    /// Framing or opcode error on encode.
    WireEncode(wire::EncodeError),

    /// Bitstream error.
    Bitstream(bitstream::BitError),

    /// No message in the catalog is bound to the opcode.
    UnknownOpcode { opcode: u32 },

    /// No layout for the opcode consumes the parameters exactly.
    NoVariantMatched {
        opcode: u32,
        /// Parameter length in bytes.
        actual: usize,
        /// Byte lengths of the layouts that were tried, in declared order.
        candidates: Vec<usize>,
    },

    /// The requested variant does not exist for the opcode.
    ///
    /// `variant` is `None` when the opcode has several variants and the
    /// caller did not name one.
    UnknownVariant {
        opcode: u32,
        variant: Option<String>,
    },

    /// Number of values differs from the number of layout fields.
    FieldCountMismatch { expected: usize, actual: usize },

    /// A value cannot be encoded into its field.
    InvalidValue { field: String, reason: ValueReason },
}

/// Details for invalid value errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReason {
    UnsignedOutOfRange {
        bits: usize,
        value: u64,
    },
    SignedOutOfRange {
        bits: usize,
        value: i64,
    },
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::WireEncode(e) => write!(f, "wire error: {e}"),
            Self::Bitstream(e) => write!(f, "bitstream error: {e}"),
            Self::UnknownOpcode { opcode } => write!(f, "unknown opcode 0x{opcode:X}"),
            Self::NoVariantMatched {
                opcode,
                actual,
                candidates,
            } => {
                write!(
                    f,
                    "no layout for opcode 0x{opcode:X} matches {actual} parameter bytes (expected one of {candidates:?})"
                )
            }
            Self::UnknownVariant {
                opcode,
                variant: Some(variant),
            } => {
                write!(f, "opcode 0x{opcode:X} has no variant {variant}")
            }
            Self::UnknownVariant {
                opcode,
                variant: None,
            } => {
                write!(f, "opcode 0x{opcode:X} requires a variant name")
            }
            Self::FieldCountMismatch { expected, actual } => {
                write!(f, "expected {expected} field values, got {actual}")
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "invalid value for {field}: {reason}")
            }
        }
    }
}

impl fmt::Display for ValueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsignedOutOfRange { bits, value } => {
                write!(f, "unsigned value {value} does not fit in {bits} bits")
            }
            Self::SignedOutOfRange { bits, value } => {
                write!(f, "signed value {value} does not fit in {bits} bits")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} but got {found}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::WireEncode(e) => Some(e),
            Self::Bitstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::WireEncode(err)
    }
}

impl From<bitstream::BitError> for CodecError {
    fn from(err: bitstream::BitError) -> Self {
        Self::Bitstream(err)
    }
}
