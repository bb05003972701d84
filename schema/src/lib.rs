//! Field descriptors, message layouts and type classification for meshcodec.
//!
//! This crate defines how access-message parameters are described:
//! - Field descriptors (fixed formats, byte-length and bit-packed integers)
//! - Layouts that embed one another and flatten into a wire-ordered field list
//! - Variant sets for opcodes whose parameters come in several shapes
//! - Message families and the opcode dispatch table
//! - Classification of fields into interchange primitives
//! - Deterministic catalog hashing
//!
//! # Design Principles
//!
//! - **Declarative** - Layouts are data; nothing reflects on Rust types.
//! - **Validated once** - [`Catalog::new`] rejects authoring defects so the
//!   codec never sees an inconsistent layout.
//! - **Deterministic hashing** - The catalog hash is stable given the same definition.

mod catalog;
mod classify;
mod error;
mod field;
mod hash;
mod layout;
mod primitive;

pub use catalog::{
    Catalog, CatalogBuilder, CatalogDef, FamilyDef, MessageDef, MessageEntry, MessageFamily,
    Params, ParamsDef, Variant, VariantDef, VariantSet, VariantSetDef, VariantSetId,
};
pub use classify::{classify, classify_bit_integer, classify_byte_integer, classify_fixed_format};
pub use error::{SchemaError, SchemaResult, WidthUnit};
pub use field::{ByteOrder, FieldDescriptor, FieldKind, FixedFormat};
pub use hash::catalog_hash;
pub use layout::{Embed, Layout, LayoutDef, LayoutEntry, LayoutField, LayoutId, LayoutNode};
pub use primitive::PrimitiveType;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = FieldDescriptor::u8("tid");
        let _ = LayoutDef::new("Empty");
        let _ = Catalog::builder();
        let _ = PrimitiveType::Void;
        let _ = classify_fixed_format(b'B');
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = Catalog::new(CatalogDef::default()).unwrap();
        assert!(catalog.families().is_empty());
        assert!(catalog.dispatch(0x01).is_none());
        let _ = catalog_hash(&catalog);
    }
}
