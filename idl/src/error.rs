//! Error types for schema generation.

use std::fmt;

/// Result type for schema generation.
pub type IdlResult<T> = Result<T, IdlError>;

/// Errors that can occur while generating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdlError {
    /// Cap'n Proto file ids must have the top bit set.
    InvalidSchemaId { id: u64 },

    /// Two generated types map to the same interchange name.
    DuplicateTypeName { name: String },

    /// Two members of one generated type map to the same interchange name.
    DuplicateMemberName { scope: String, name: String },

    /// Writing the output failed.
    Fmt,
}

impl fmt::Display for IdlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSchemaId { id } => {
                write!(f, "schema id 0x{id:016x} does not have the top bit set")
            }
            Self::DuplicateTypeName { name } => {
                write!(f, "generated type name {name} is used twice")
            }
            Self::DuplicateMemberName { scope, name } => {
                write!(f, "member name {name} is used twice in {scope}")
            }
            Self::Fmt => write!(f, "failed to write schema text"),
        }
    }
}

impl std::error::Error for IdlError {}

impl From<fmt::Error> for IdlError {
    fn from(_: fmt::Error) -> Self {
        Self::Fmt
    }
}
