//! Deterministic catalog hashing.

use blake3::Hasher;

use crate::catalog::{Catalog, Params};
use crate::field::{ByteOrder, FieldKind};
use crate::layout::LayoutNode;

/// Computes a deterministic hash over everything that affects the wire format
/// or the generated schema.
#[must_use]
pub fn catalog_hash(catalog: &Catalog) -> u64 {
    let mut hasher = Hasher::new();

    write_len(&mut hasher, catalog.layouts().len());
    for layout in catalog.layouts() {
        write_str(&mut hasher, &layout.name);
        write_len(&mut hasher, layout.fields.len());
        for field in &layout.fields {
            write_str(&mut hasher, &field.path);
            write_kind(&mut hasher, field.kind);
        }
        write_len(&mut hasher, layout.nodes.len());
        for node in &layout.nodes {
            match node {
                LayoutNode::Field(idx) => {
                    write_u8(&mut hasher, 0);
                    write_len(&mut hasher, *idx);
                }
                LayoutNode::Record { name, layout, .. } => {
                    write_u8(&mut hasher, 1);
                    write_str(&mut hasher, name);
                    write_len(&mut hasher, layout.index());
                }
            }
        }
    }

    write_len(&mut hasher, catalog.variant_sets().len());
    for set in catalog.variant_sets() {
        write_str(&mut hasher, &set.name);
        write_len(&mut hasher, set.variants.len());
        for variant in &set.variants {
            write_str(&mut hasher, &variant.name);
            write_len(&mut hasher, variant.layout.index());
        }
    }

    write_len(&mut hasher, catalog.families().len());
    for family in catalog.families() {
        write_str(&mut hasher, &family.name);
        write_len(&mut hasher, family.messages.len());
        for message in &family.messages {
            write_u32(&mut hasher, message.opcode);
            write_str(&mut hasher, &message.name);
            match message.params {
                Params::Layout(id) => {
                    write_u8(&mut hasher, 0);
                    write_len(&mut hasher, id.index());
                }
                Params::Variants(id) => {
                    write_u8(&mut hasher, 1);
                    write_len(&mut hasher, id.index());
                }
            }
        }
    }

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

fn write_kind(hasher: &mut Hasher, kind: FieldKind) {
    match kind {
        FieldKind::Fixed(format) => {
            write_u8(hasher, 0);
            write_order(hasher, format.order);
            write_u8(hasher, format.code);
        }
        FieldKind::ByteInteger { len, signed, order } => {
            write_u8(hasher, 1);
            write_u8(hasher, len);
            write_u8(hasher, u8::from(signed));
            write_order(hasher, order);
        }
        FieldKind::BitInteger { bits } => {
            write_u8(hasher, 2);
            write_u8(hasher, bits);
        }
    }
}

fn write_order(hasher: &mut Hasher, order: ByteOrder) {
    write_u8(
        hasher,
        match order {
            ByteOrder::Little => 0,
            ByteOrder::Big => 1,
        },
    );
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_len(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn write_len(hasher: &mut Hasher, value: usize) {
    write_u32(hasher, value as u32);
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}
