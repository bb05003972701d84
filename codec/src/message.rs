//! Access message decoding and encoding.

use bitstream::{BitReader, BitWriter};
use log::debug;
use schema::{Catalog, Layout, LayoutField, MessageEntry, Params, Variant};
use wire::{decode_access, encode_access, Limits, Opcode};

use crate::error::{CodecError, CodecResult};
use crate::layout::{decode_layout, encode_layout};
use crate::select::select_variant;
use crate::value::FieldValue;

/// A decoded access message, borrowing its description from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage<'c> {
    pub opcode: Opcode,
    pub message: &'c MessageEntry,
    /// Selected variant, `None` for single-layout messages.
    pub variant: Option<&'c Variant>,
    pub layout: &'c Layout,
    /// One value per layout field, in wire order.
    pub fields: Vec<FieldValue>,
}

impl<'c> DecodedMessage<'c> {
    /// Message name from the catalog.
    #[must_use]
    pub fn name(&self) -> &'c str {
        &self.message.name
    }

    /// Selected variant name, if the opcode has variants.
    #[must_use]
    pub fn variant_name(&self) -> Option<&'c str> {
        self.variant.map(|variant| variant.name.as_str())
    }

    /// Looks a value up by dotted field path.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<FieldValue> {
        let idx = self.layout.field_index(path)?;
        self.fields.get(idx).copied()
    }

    /// Named fields paired with their values; anonymous fields are skipped.
    pub fn named_fields(&self) -> impl Iterator<Item = (&'c LayoutField, FieldValue)> + '_ {
        self.layout
            .fields
            .iter()
            .zip(self.fields.iter().copied())
            .filter(|(field, _)| !field.path.is_empty())
    }
}

/// Decodes an access message: opcode, dispatch, then parameters.
pub fn decode_message<'c>(
    catalog: &'c Catalog,
    bytes: &[u8],
    limits: &Limits,
) -> CodecResult<DecodedMessage<'c>> {
    let frame = decode_access(bytes, limits)?;
    decode_params(catalog, frame.opcode, frame.params)
}

/// Decodes the parameters of an already framed message.
pub fn decode_params<'c>(
    catalog: &'c Catalog,
    opcode: Opcode,
    params: &[u8],
) -> CodecResult<DecodedMessage<'c>> {
    let raw = opcode.raw();
    let message = catalog
        .dispatch(raw)
        .ok_or(CodecError::UnknownOpcode { opcode: raw })?;
    debug!("opcode {opcode} dispatched to {}", message.name);

    let (variant, layout, fields) = match message.params {
        Params::Layout(id) => {
            let layout = catalog.layout(id);
            if layout.byte_len != params.len() {
                return Err(CodecError::NoVariantMatched {
                    opcode: raw,
                    actual: params.len(),
                    candidates: vec![layout.byte_len],
                });
            }
            let mut reader = BitReader::new(params);
            let fields = decode_layout(layout, &mut reader)?;
            (None, layout, fields)
        }
        Params::Variants(id) => {
            let set = catalog.variant_set(id);
            let (variant, fields) = select_variant(catalog, set, raw, params)?;
            (Some(variant), catalog.layout(variant.layout), fields)
        }
    };

    Ok(DecodedMessage {
        opcode,
        message,
        variant,
        layout,
        fields,
    })
}

/// Encodes an access message.
///
/// `variant` names the layout for opcodes with several; it may be omitted
/// for single-layout messages and for variant sets with one member.
pub fn encode_message(
    catalog: &Catalog,
    opcode: u32,
    variant: Option<&str>,
    fields: &[FieldValue],
    limits: &Limits,
) -> CodecResult<Vec<u8>> {
    let op = Opcode::new(opcode)?;
    let message = catalog
        .dispatch(opcode)
        .ok_or(CodecError::UnknownOpcode { opcode })?;
    let unknown_variant = || CodecError::UnknownVariant {
        opcode,
        variant: variant.map(str::to_string),
    };

    let layout = match (message.params, variant) {
        (Params::Layout(id), None) => catalog.layout(id),
        (Params::Layout(_), Some(_)) => return Err(unknown_variant()),
        (Params::Variants(id), Some(name)) => {
            let set = catalog.variant_set(id);
            let chosen = set
                .variants
                .iter()
                .find(|candidate| candidate.name == name)
                .ok_or_else(unknown_variant)?;
            catalog.layout(chosen.layout)
        }
        (Params::Variants(id), None) => match catalog.variant_set(id).variants.as_slice() {
            [only] => catalog.layout(only.layout),
            _ => return Err(unknown_variant()),
        },
    };

    let mut writer = BitWriter::with_capacity(layout.byte_len);
    encode_layout(layout, fields, &mut writer)?;
    let params = writer.finish();

    let mut out = Vec::with_capacity(op.len() + params.len());
    encode_access(op, &params, limits, &mut out)?;
    Ok(out)
}

/// Re-encodes a decoded message with the same opcode and variant.
pub fn encode_decoded(decoded: &DecodedMessage<'_>, limits: &Limits) -> CodecResult<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(decoded.layout.byte_len);
    encode_layout(decoded.layout, &decoded.fields, &mut writer)?;
    let params = writer.finish();

    let mut out = Vec::new();
    encode_access(decoded.opcode, &params, limits, &mut out)?;
    Ok(out)
}
