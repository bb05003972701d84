//! Schema generation and message inspection tools for meshcodec.
//!
//! This crate backs the `meshcodec-tools` binary:
//!
//! - Decode one access message into structured JSON or annotated text
//! - Summarize a catalog's families, opcodes and parameter layouts
//! - Load catalogs authored as JSON
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what the codec decoded.

use std::fmt::{self, Write};

use anyhow::{Context, Result};
use codec::{DecodedMessage, FieldValue};
use models::generics::TRANSITION_TIME;
use models::{StatusCode, TransitionTime};
use schema::{Catalog, CatalogDef, Layout, LayoutNode, Params};
use serde::Serialize;
use serde_json::{Map, Value};

/// Key spelling for decoded JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStyle {
    #[default]
    Snake,
    Camel,
}

impl KeyStyle {
    fn apply(self, name: &str) -> String {
        match self {
            Self::Snake => name.to_string(),
            Self::Camel => idl::case::to_camel_case(name),
        }
    }
}

/// JSON view of a decoded message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedJson {
    pub opcode: String,
    pub family: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Named fields, nested records as objects.
    pub fields: Map<String, Value>,
}

/// Parses a catalog authored as JSON and validates it.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let def: CatalogDef = serde_json::from_str(json).context("parse catalog json")?;
    Catalog::new(def).context("validate catalog")
}

/// Parses hex message bytes, ignoring whitespace and an optional `0x`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let digits: String = input.split_whitespace().collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    hex::decode(digits).with_context(|| format!("invalid hex message {input:?}"))
}

/// Converts a decoded message into its JSON view.
pub fn decode_message_json(decoded: &DecodedMessage<'_>, keys: KeyStyle) -> DecodedJson {
    let mut fields = Map::new();
    for (field, value) in decoded.named_fields() {
        let path: Vec<_> = field.path.split('.').map(|segment| keys.apply(segment)).collect();
        insert_path(&mut fields, &path, json_value(value));
    }

    DecodedJson {
        opcode: decoded.opcode.to_string(),
        family: decoded.message.family.clone(),
        message: decoded.name().to_string(),
        variant: decoded.variant_name().map(str::to_string),
        fields,
    }
}

fn insert_path(object: &mut Map<String, Value>, path: &[String], value: Value) {
    match path {
        [] => {}
        [last] => {
            object.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let entry = object
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}

fn json_value(value: FieldValue) -> Value {
    match value {
        FieldValue::UInt(v) => Value::from(v),
        FieldValue::SInt(v) => Value::from(v),
        FieldValue::Float32(v) => Value::from(f64::from(v)),
        FieldValue::Float64(v) => Value::from(v),
    }
}

/// Formats a decoded message as annotated text.
///
/// Transition time records are shown as durations and the status fields
/// listed in [`models::STATUS_FIELDS`] by their status code name.
pub fn format_decode_pretty(catalog: &Catalog, decoded: &DecodedMessage<'_>) -> Result<String> {
    let mut out = String::new();
    write_pretty(&mut out, catalog, decoded).context("format decoded message")?;
    Ok(out)
}

fn write_pretty(
    out: &mut String,
    catalog: &Catalog,
    decoded: &DecodedMessage<'_>,
) -> fmt::Result {
    write!(out, "{} {}", decoded.opcode, decoded.name())?;
    if let Some(variant) = decoded.variant_name() {
        write!(out, " ({variant})")?;
    }
    writeln!(out)?;
    writeln!(out, "family: {}", decoded.message.family)?;
    writeln!(
        out,
        "layout: {} ({} bytes)",
        decoded.layout.name, decoded.layout.byte_len
    )?;

    let width = decoded
        .named_fields()
        .map(|(field, _)| field.path.len())
        .max()
        .unwrap_or(0);
    for (field, value) in decoded.named_fields() {
        write!(out, "  {:<width$} = {value}", field.path)?;
        if is_status_field(&decoded.layout.name, &field.path) {
            match value.as_u64().and_then(|v| u8::try_from(v).ok()) {
                Some(raw) => match StatusCode::try_from(raw) {
                    Ok(code) => write!(out, " ({code})")?,
                    Err(_) => write!(out, " (unknown status)")?,
                },
                None => write!(out, " (unknown status)")?,
            }
        }
        writeln!(out)?;
    }

    for (name, time) in transition_times(catalog, decoded) {
        writeln!(out, "  {name}: {time} (0x{:02x})", time.to_raw())?;
    }
    Ok(())
}

fn is_status_field(layout: &str, path: &str) -> bool {
    models::STATUS_FIELDS
        .iter()
        .any(|&(status_layout, status_path)| status_layout == layout && status_path == path)
}

/// Top-level transition time records of the decoded layout.
fn transition_times<'d>(
    catalog: &Catalog,
    decoded: &'d DecodedMessage<'_>,
) -> Vec<(&'d str, TransitionTime)> {
    decoded
        .layout
        .nodes
        .iter()
        .filter_map(|node| {
            let LayoutNode::Record {
                name,
                layout,
                fields,
            } = node
            else {
                return None;
            };
            if catalog.layout(*layout).name != TRANSITION_TIME {
                return None;
            }
            let [resolution, steps] = decoded.fields.get(fields.clone())? else {
                return None;
            };
            let resolution = u8::try_from(resolution.as_u64()?).ok()?;
            let steps = u8::try_from(steps.as_u64()?).ok()?;
            Some((name.as_str(), TransitionTime::from_fields(resolution, steps)))
        })
        .collect()
}

/// Summary of one parameter layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub layout: String,
    pub byte_len: usize,
    pub fields: usize,
}

/// Summary of one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageReport {
    pub opcode: String,
    pub name: String,
    pub params: Vec<LayoutReport>,
}

/// Summary of one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyReport {
    pub name: String,
    pub messages: Vec<MessageReport>,
}

/// Summary of a whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogReport {
    pub hash: String,
    pub layouts: usize,
    pub variant_sets: usize,
    pub families: Vec<FamilyReport>,
}

/// Lists a catalog's families, opcodes, variants and layout sizes.
pub fn inspect_catalog(catalog: &Catalog) -> CatalogReport {
    let layout_report = |variant: Option<&str>, layout: &Layout| LayoutReport {
        variant: variant.map(str::to_string),
        layout: layout.name.clone(),
        byte_len: layout.byte_len,
        fields: layout.fields.len(),
    };

    let families = catalog
        .families()
        .iter()
        .map(|family| FamilyReport {
            name: family.name.clone(),
            messages: family
                .messages
                .iter()
                .map(|message| MessageReport {
                    opcode: opcode_label(message.opcode),
                    name: message.name.clone(),
                    params: match message.params {
                        Params::Layout(id) => vec![layout_report(None, catalog.layout(id))],
                        Params::Variants(id) => catalog
                            .variant_set(id)
                            .variants
                            .iter()
                            .map(|variant| {
                                layout_report(Some(&variant.name), catalog.layout(variant.layout))
                            })
                            .collect(),
                    },
                })
                .collect(),
        })
        .collect();

    CatalogReport {
        hash: format!("0x{:016x}", schema::catalog_hash(catalog)),
        layouts: catalog.layouts().len(),
        variant_sets: catalog.variant_sets().len(),
        families,
    }
}

fn opcode_label(opcode: u32) -> String {
    wire::Opcode::new(opcode).map_or_else(|_| format!("0x{opcode:X}"), |op| op.to_string())
}
