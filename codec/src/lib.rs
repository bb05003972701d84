//! Access message encoding and decoding for meshcodec.
//!
//! This is the main codec crate that ties together bitstream, wire, and schema:
//! the opcode is read by `wire`, looked up in a [`schema::Catalog`], and the
//! parameters are decoded against the bound layout or variant set.
//!
//! # Features
//!
//! - Opcode dispatch across message families
//! - Exact-length variant selection for opcodes with several layouts
//! - Little- and big-endian fixed formats, byte-length and bit-packed integers
//! - Encoding with per-field type and range checks
//!
//! # Design Principles
//!
//! - **Correctness first** - All invariants are documented and tested.
//! - **No partial results** - A decode either yields every field or an error.
//! - **Deterministic** - Same inputs produce same outputs.

mod error;
mod layout;
mod message;
mod select;
mod value;

pub use error::{CodecError, CodecResult, ValueReason};
pub use layout::{decode_layout, encode_layout};
pub use message::{decode_message, decode_params, encode_decoded, encode_message, DecodedMessage};
pub use select::select_variant;
pub use value::FieldValue;
pub use wire::Limits as WireLimits;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = WireLimits::default();
        let _ = FieldValue::UInt(0);

        // Error types
        let _: CodecResult<()> = Ok(());
    }

    #[test]
    fn empty_catalog_knows_no_opcodes() {
        let catalog = schema::Catalog::builder().build().unwrap();
        let err = decode_message(&catalog, &[0x01], &WireLimits::default()).unwrap_err();
        assert_eq!(err, CodecError::UnknownOpcode { opcode: 0x01 });
    }
}
