//! Exact-length variant selection.

use bitstream::BitReader;
use log::{debug, trace};
use schema::{Catalog, Variant, VariantSet};

use crate::error::{CodecError, CodecResult};
use crate::layout::decode_layout;
use crate::value::FieldValue;

/// Picks the first variant whose layout consumes `params` exactly.
///
/// Variants are tried in declared order. A variant that decodes but leaves
/// bytes behind is rejected, so a longer message never matches a shorter
/// layout by prefix.
pub fn select_variant<'c>(
    catalog: &'c Catalog,
    set: &'c VariantSet,
    opcode: u32,
    params: &[u8],
) -> CodecResult<(&'c Variant, Vec<FieldValue>)> {
    for variant in &set.variants {
        let layout = catalog.layout(variant.layout);
        if layout.byte_len != params.len() {
            trace!(
                "{}::{} wants {} bytes, have {}",
                set.name,
                variant.name,
                layout.byte_len,
                params.len()
            );
            continue;
        }

        let mut reader = BitReader::new(params);
        match decode_layout(layout, &mut reader) {
            Ok(values) if reader.is_empty() => {
                debug!(
                    "opcode 0x{opcode:X} matched variant {}::{}",
                    set.name, variant.name
                );
                return Ok((variant, values));
            }
            Ok(_) => {
                trace!(
                    "{}::{} left {} bits unread",
                    set.name,
                    variant.name,
                    reader.bits_remaining()
                );
            }
            Err(err) => {
                trace!("{}::{} rejected: {err}", set.name, variant.name);
            }
        }
    }

    debug!(
        "opcode 0x{opcode:X}: no variant of {} fits {} bytes",
        set.name,
        params.len()
    );
    Err(CodecError::NoVariantMatched {
        opcode,
        actual: params.len(),
        candidates: set
            .variants
            .iter()
            .map(|variant| catalog.layout(variant.layout).byte_len)
            .collect(),
    })
}
