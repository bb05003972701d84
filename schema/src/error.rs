//! Schema validation errors.
//!
//! Every variant here is an authoring defect: it depends only on the layout
//! definitions, never on message bytes, and is reported by [`Catalog::new`].
//!
//! [`Catalog::new`]: crate::Catalog::new

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Unit of a field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthUnit {
    Bytes,
    Bits,
}

/// Errors that can occur when classifying fields or building a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Fixed format code outside the supported set.
    UnsupportedFormat { code: char },

    /// Format string is not `[<|>]code`.
    InvalidFormatString { format: String },

    /// Integer width exceeds the widest interchange integer.
    WidthTooLarge {
        width: usize,
        max: usize,
        unit: WidthUnit,
    },

    /// Byte or bit integer declared with zero width.
    ZeroWidth { unit: WidthUnit },

    /// A field failed classification.
    Field {
        layout: String,
        field: String,
        source: Box<SchemaError>,
    },

    /// Two layouts share a name.
    DuplicateLayout { name: String },

    /// Embedding refers to a layout that was never declared.
    UnknownLayout { name: String, referenced_by: String },

    /// A layout embeds itself, directly or transitively.
    EmbeddingCycle { path: Vec<String> },

    /// Two named entries at the same nesting level share a name.
    DuplicateFieldName { layout: String, name: String },

    /// A byte-aligned field or embedding starts mid-byte.
    MisalignedField {
        layout: String,
        field: String,
        bit_offset: usize,
    },

    /// Bit-packed fields leave the layout short of a whole byte.
    UnalignedLayout { layout: String, bits: usize },

    /// Two variant sets share a name.
    DuplicateVariantSet { name: String },

    /// A variant set declares no variants.
    EmptyVariantSet { name: String },

    /// Two variants in one set share a name.
    DuplicateVariant { set: String, name: String },

    /// Two variants in one set have the same encoded length.
    AmbiguousVariants {
        set: String,
        first: String,
        second: String,
        byte_len: usize,
    },

    /// Message parameters refer to an undeclared variant set.
    UnknownVariantSet { name: String, referenced_by: String },

    /// A message opcode has no Mesh encoding (reserved `0x7F` or out of
    /// the one, two and three byte ranges).
    InvalidOpcode { opcode: u32, message: String },

    /// Two messages claim the same opcode.
    DuplicateOpcode {
        opcode: u32,
        first: String,
        second: String,
    },
}

impl fmt::Display for WidthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bytes => "bytes",
            Self::Bits => "bits",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { code } => {
                write!(f, "unsupported fixed format code '{code}'")
            }
            Self::InvalidFormatString { format } => {
                write!(f, "invalid format string {format:?}")
            }
            Self::WidthTooLarge { width, max, unit } => {
                write!(f, "integer width {width} {unit} too large, maximum is {max}")
            }
            Self::ZeroWidth { unit } => write!(f, "integer width of zero {unit}"),
            Self::Field {
                layout,
                field,
                source,
            } => {
                write!(f, "field {layout}.{field}: {source}")
            }
            Self::DuplicateLayout { name } => write!(f, "duplicate layout {name}"),
            Self::UnknownLayout {
                name,
                referenced_by,
            } => {
                write!(f, "unknown layout {name} referenced by {referenced_by}")
            }
            Self::EmbeddingCycle { path } => {
                write!(f, "embedding cycle: {}", path.join(" -> "))
            }
            Self::DuplicateFieldName { layout, name } => {
                write!(f, "duplicate field {name} in layout {layout}")
            }
            Self::MisalignedField {
                layout,
                field,
                bit_offset,
            } => {
                write!(
                    f,
                    "field {layout}.{field} starts at bit {bit_offset}, not on a byte boundary"
                )
            }
            Self::UnalignedLayout { layout, bits } => {
                write!(f, "layout {layout} is {bits} bits, not a whole number of bytes")
            }
            Self::DuplicateVariantSet { name } => write!(f, "duplicate variant set {name}"),
            Self::EmptyVariantSet { name } => write!(f, "variant set {name} has no variants"),
            Self::DuplicateVariant { set, name } => {
                write!(f, "duplicate variant {name} in set {set}")
            }
            Self::AmbiguousVariants {
                set,
                first,
                second,
                byte_len,
            } => {
                write!(
                    f,
                    "variants {first} and {second} of {set} are both {byte_len} bytes"
                )
            }
            Self::UnknownVariantSet {
                name,
                referenced_by,
            } => {
                write!(f, "unknown variant set {name} referenced by {referenced_by}")
            }
            Self::InvalidOpcode { opcode, message } => {
                write!(f, "opcode 0x{opcode:X} of {message} is not a valid Mesh opcode")
            }
            Self::DuplicateOpcode {
                opcode,
                first,
                second,
            } => {
                write!(f, "opcode 0x{opcode:X} claimed by {first} and {second}")
            }
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
