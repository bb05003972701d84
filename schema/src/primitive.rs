//! Interchange primitive types.

use std::fmt;

/// Canonical primitive of the interchange schema.
///
/// Names follow Cap'n Proto built-in types; `Unknown` marks a field whose
/// interchange type could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Void,
    Bool,
    Data,
    Text,
    Unknown,
}

impl PrimitiveType {
    /// Every primitive, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::Void,
        Self::Bool,
        Self::Data,
        Self::Text,
        Self::Unknown,
    ];

    /// Returns the interchange spelling of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Void => "Void",
            Self::Bool => "Bool",
            Self::Data => "Data",
            Self::Text => "Text",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn spellings_are_unique() {
        let names: HashSet<_> = PrimitiveType::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names.len(), PrimitiveType::ALL.len());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(PrimitiveType::Int16.to_string(), "Int16");
        assert_eq!(PrimitiveType::Unknown.to_string(), "UNKNOWN");
    }
}
