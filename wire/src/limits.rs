//! Configurable limits for bounded decoding.

/// Wire-level limits for access message framing.
///
/// Enforced on both decode and encode so that a message which would not fit
/// a Mesh access PDU never leaves or enters the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum access message size in bytes, opcode included.
    pub max_access_payload: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Largest segmented access payload with a 32-bit TransMIC
            max_access_payload: 380,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_access_payload: 32,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_access_payload: usize::MAX,
        }
    }
}
