//! Layout-level encoding and decoding.

use bitstream::{BitReader, BitWriter};
use schema::Layout;

use crate::error::{CodecError, CodecResult};
use crate::value::{read_field_value, write_field_value, FieldValue};

/// Decodes every field of `layout` in wire order.
///
/// Stops where the layout ends; the caller decides whether leftover input is
/// an error.
pub fn decode_layout(layout: &Layout, reader: &mut BitReader<'_>) -> CodecResult<Vec<FieldValue>> {
    let mut values = Vec::with_capacity(layout.fields.len());
    for field in &layout.fields {
        values.push(read_field_value(field, reader)?);
    }
    Ok(values)
}

/// Encodes one value per field of `layout`, anonymous fields included.
pub fn encode_layout(
    layout: &Layout,
    values: &[FieldValue],
    writer: &mut BitWriter,
) -> CodecResult<()> {
    if values.len() != layout.fields.len() {
        return Err(CodecError::FieldCountMismatch {
            expected: layout.fields.len(),
            actual: values.len(),
        });
    }
    for (idx, (field, value)) in layout.fields.iter().zip(values).enumerate() {
        let label = if field.path.is_empty() {
            format!("{}[{idx}]", layout.name)
        } else {
            field.path.clone()
        };
        write_field_value(field, &label, *value, writer)?;
    }
    Ok(())
}
