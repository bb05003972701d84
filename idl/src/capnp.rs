//! Cap'n Proto schema text generation.

use std::collections::BTreeSet;
use std::fmt::{self, Write};

use log::debug;
use schema::{catalog_hash, Catalog, Layout, LayoutId, LayoutNode, Params, VariantSetId};

use crate::case::{to_camel_case, to_type_name};
use crate::error::{IdlError, IdlResult};

const TOP_BIT: u64 = 1 << 63;
const ROOT_STRUCT: &str = "AccessMessage";

/// A Cap'n Proto file id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(u64);

impl SchemaId {
    /// Wraps a caller-chosen id, which must have the top bit set.
    pub const fn new(id: u64) -> IdlResult<Self> {
        if id & TOP_BIT == 0 {
            return Err(IdlError::InvalidSchemaId { id });
        }
        Ok(Self(id))
    }

    /// Derives a stable id from the catalog hash.
    #[must_use]
    pub fn derive(catalog: &Catalog) -> Self {
        Self(catalog_hash(catalog) | TOP_BIT)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@0x{:016x}", self.0)
    }
}

/// Generates Cap'n Proto schema text for every message in `catalog`.
///
/// Output depends only on the catalog and `id`, so repeated runs are
/// byte-identical.
pub fn generate(id: SchemaId, catalog: &Catalog) -> IdlResult<String> {
    let order = Reachable::collect(catalog);
    let mut names = BTreeSet::new();
    let mut out = String::new();

    writeln!(out, "{id};")?;
    writeln!(out, "# catalog hash 0x{:016x}", catalog_hash(catalog))?;

    for &layout_id in &order.layouts {
        let layout = catalog.layout(layout_id);
        let name = claim_type(&mut names, &layout.name)?;
        write_layout(&mut out, catalog, &name, layout)?;
    }

    for &set_id in &order.variant_sets {
        let set = catalog.variant_set(set_id);
        let name = claim_type(&mut names, &set.name)?;
        let members = set
            .variants
            .iter()
            .map(|variant| {
                (
                    variant.name.as_str(),
                    layout_type(catalog.layout(variant.layout)),
                )
            })
            .collect::<Vec<_>>();
        writeln!(out)?;
        writeln!(out, "struct {name} {{")?;
        write_union(&mut out, &name, None, 0, &members)?;
        writeln!(out, "}}")?;
    }

    let mut families = Vec::new();
    for family in catalog.families() {
        let name = claim_type(&mut names, &format!("{}Message", family.name))?;
        let members = family
            .messages
            .iter()
            .map(|message| (message.name.as_str(), params_type(catalog, message.params)))
            .collect::<Vec<_>>();
        writeln!(out)?;
        writeln!(out, "struct {name} {{")?;
        writeln!(out, "  opcode @0 :UInt32;")?;
        write_union(&mut out, &name, Some("params"), 1, &members)?;
        writeln!(out, "}}")?;
        families.push((family.name.as_str(), name));
    }

    if !families.is_empty() {
        let root = claim_type(&mut names, ROOT_STRUCT)?;
        let members = families
            .iter()
            .map(|(family, ty)| (*family, ty.clone()))
            .collect::<Vec<_>>();
        writeln!(out)?;
        writeln!(out, "struct {root} {{")?;
        write_union(&mut out, &root, None, 0, &members)?;
        writeln!(out, "}}")?;
    }

    debug!(
        "generated {} layout structs, {} variant structs, {} families",
        order.layouts.len(),
        order.variant_sets.len(),
        families.len()
    );
    Ok(out)
}

/// Layouts and variant sets reachable from messages, in first-use order.
struct Reachable {
    layouts: Vec<LayoutId>,
    variant_sets: Vec<VariantSetId>,
}

impl Reachable {
    fn collect(catalog: &Catalog) -> Self {
        let mut reachable = Self {
            layouts: Vec::new(),
            variant_sets: Vec::new(),
        };
        let mut seen_layouts = BTreeSet::new();
        let mut seen_sets = BTreeSet::new();
        for message in catalog.messages() {
            match message.params {
                Params::Layout(id) => reachable.visit(catalog, id, &mut seen_layouts),
                Params::Variants(id) => {
                    if seen_sets.insert(id) {
                        for variant in &catalog.variant_set(id).variants {
                            reachable.visit(catalog, variant.layout, &mut seen_layouts);
                        }
                        reachable.variant_sets.push(id);
                    }
                }
            }
        }
        reachable
    }

    fn visit(&mut self, catalog: &Catalog, id: LayoutId, seen: &mut BTreeSet<LayoutId>) {
        if !seen.insert(id) {
            return;
        }
        let layout = catalog.layout(id);
        for node in &layout.nodes {
            if let LayoutNode::Record { layout: child, .. } = node {
                self.visit(catalog, *child, seen);
            }
        }
        // Empty layouts are written as Void wherever they are referenced.
        if !layout.is_empty() {
            self.layouts.push(id);
        }
    }
}

fn write_layout(out: &mut String, catalog: &Catalog, name: &str, layout: &Layout) -> IdlResult<()> {
    let mut members = BTreeSet::new();
    let mut ordinal = 0usize;
    writeln!(out)?;
    writeln!(out, "struct {name} {{")?;
    for node in &layout.nodes {
        let (member, ty) = match node {
            LayoutNode::Field(idx) => {
                let field = &layout.fields[*idx];
                let Some(field_name) = &field.name else {
                    continue;
                };
                (field_name.as_str(), field.primitive.to_string())
            }
            LayoutNode::Record {
                name: record,
                layout: child,
                ..
            } => (record.as_str(), layout_type(catalog.layout(*child))),
        };
        let member = claim_member(&mut members, name, member)?;
        writeln!(out, "  {member} @{ordinal} :{ty};")?;
        ordinal += 1;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Writes a union, or a plain field when there is a single member since
/// Cap'n Proto unions need at least two.
fn write_union(
    out: &mut String,
    scope: &str,
    group: Option<&str>,
    first_ordinal: usize,
    members: &[(&str, String)],
) -> IdlResult<()> {
    let mut names = BTreeSet::new();
    if let [(member, ty)] = members {
        let member = match group {
            Some(group) => to_camel_case(group),
            None => claim_member(&mut names, scope, member)?,
        };
        writeln!(out, "  {member} @{first_ordinal} :{ty};")?;
        return Ok(());
    }

    match group {
        Some(group) => writeln!(out, "  {} :union {{", to_camel_case(group))?,
        None => writeln!(out, "  union {{")?,
    }
    for (offset, (member, ty)) in members.iter().enumerate() {
        let member = claim_member(&mut names, scope, member)?;
        writeln!(out, "    {member} @{} :{ty};", first_ordinal + offset)?;
    }
    writeln!(out, "  }}")?;
    Ok(())
}

fn layout_type(layout: &Layout) -> String {
    if layout.is_empty() {
        "Void".to_string()
    } else {
        to_type_name(&layout.name)
    }
}

fn params_type(catalog: &Catalog, params: Params) -> String {
    match params {
        Params::Layout(id) => layout_type(catalog.layout(id)),
        Params::Variants(id) => to_type_name(&catalog.variant_set(id).name),
    }
}

fn claim_type(names: &mut BTreeSet<String>, raw: &str) -> IdlResult<String> {
    let name = to_type_name(raw);
    if !names.insert(name.clone()) {
        return Err(IdlError::DuplicateTypeName { name });
    }
    Ok(name)
}

fn claim_member(names: &mut BTreeSet<String>, scope: &str, raw: &str) -> IdlResult<String> {
    let name = to_camel_case(raw);
    if !names.insert(name.clone()) {
        return Err(IdlError::DuplicateMemberName {
            scope: scope.to_string(),
            name,
        });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{FamilyDef, FieldDescriptor, FieldKind, LayoutDef, VariantSetDef};

    const ID: u64 = 0xabcd_ef01_2345_6789;

    fn catalog() -> Catalog {
        Catalog::builder()
            .layout(
                LayoutDef::new("TransitionTime")
                    .field(FieldDescriptor::bits("step_resolution", 2))
                    .field(FieldDescriptor::bits("steps", 6)),
            )
            .layout(
                LayoutDef::new("LevelSetMinimal")
                    .field(FieldDescriptor::i16("level"))
                    .field(FieldDescriptor::u8("tid")),
            )
            .layout(
                LayoutDef::new("LevelSetOptional")
                    .embed("LevelSetMinimal")
                    .nested("transition_time", "TransitionTime")
                    .field(FieldDescriptor::anonymous(FieldKind::BitInteger { bits: 8 }))
                    .field(FieldDescriptor::u8("delay")),
            )
            .layout(LayoutDef::new("Empty"))
            .variants(
                VariantSetDef::new("LevelSet")
                    .variant("optional", "LevelSetOptional")
                    .variant("minimal", "LevelSetMinimal"),
            )
            .family(
                FamilyDef::new("GenericLevel")
                    .message(0x8205, "GENERIC_LEVEL_GET", "Empty")
                    .message_variants(0x8206, "GENERIC_LEVEL_SET", "LevelSet"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn schema_id_requires_top_bit() {
        assert_eq!(
            SchemaId::new(0x1234).unwrap_err(),
            IdlError::InvalidSchemaId { id: 0x1234 }
        );
        assert_eq!(SchemaId::new(ID).unwrap().to_string(), "@0xabcdef0123456789");
    }

    #[test]
    fn derived_id_is_valid() {
        let id = SchemaId::derive(&catalog());
        assert!(SchemaId::new(id.raw()).is_ok());
        assert_eq!(id, SchemaId::derive(&catalog()));
    }

    #[test]
    fn generates_expected_text() {
        let catalog = catalog();
        let text = generate(SchemaId::new(ID).unwrap(), &catalog).unwrap();
        let hash = catalog_hash(&catalog);
        let expected = format!(
            "@0xabcdef0123456789;
# catalog hash 0x{hash:016x}

struct TransitionTime {{
  stepResolution @0 :UInt8;
  steps @1 :UInt8;
}}

struct LevelSetOptional {{
  level @0 :Int16;
  tid @1 :UInt8;
  transitionTime @2 :TransitionTime;
  delay @3 :UInt8;
}}

struct LevelSetMinimal {{
  level @0 :Int16;
  tid @1 :UInt8;
}}

struct LevelSet {{
  union {{
    optional @0 :LevelSetOptional;
    minimal @1 :LevelSetMinimal;
  }}
}}

struct GenericLevelMessage {{
  opcode @0 :UInt32;
  params :union {{
    genericLevelGet @1 :Void;
    genericLevelSet @2 :LevelSet;
  }}
}}

struct AccessMessage {{
  genericLevel @0 :GenericLevelMessage;
}}
"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn generation_is_deterministic() {
        let catalog = catalog();
        let id = SchemaId::derive(&catalog);
        assert_eq!(
            generate(id, &catalog).unwrap(),
            generate(id, &catalog).unwrap()
        );
    }

    #[test]
    fn unreachable_layouts_are_skipped() {
        let catalog = Catalog::builder()
            .layout(LayoutDef::new("Orphan").field(FieldDescriptor::u8("x")))
            .build()
            .unwrap();
        let text = generate(SchemaId::derive(&catalog), &catalog).unwrap();
        assert!(!text.contains("Orphan"));
        assert!(!text.contains("AccessMessage"));
    }

    #[test]
    fn colliding_type_names_rejected() {
        let catalog = Catalog::builder()
            .layout(LayoutDef::new("Thing").field(FieldDescriptor::u8("x")))
            .layout(LayoutDef::new("Other").field(FieldDescriptor::u16("y")))
            .variants(
                VariantSetDef::new("Thing")
                    .variant("a", "Thing")
                    .variant("b", "Other"),
            )
            .family(
                FamilyDef::new("F")
                    .message(0x01, "ONE", "Thing")
                    .message_variants(0x02, "TWO", "Thing"),
            )
            .build()
            .unwrap();
        let err = generate(SchemaId::derive(&catalog), &catalog).unwrap_err();
        assert_eq!(
            err,
            IdlError::DuplicateTypeName {
                name: "Thing".into()
            }
        );
    }

    #[test]
    fn colliding_member_names_rejected() {
        let catalog = Catalog::builder()
            .layout(
                LayoutDef::new("Clash")
                    .field(FieldDescriptor::u8("a_b"))
                    .field(FieldDescriptor::u8("aB")),
            )
            .family(FamilyDef::new("F").message(0x01, "ONE", "Clash"))
            .build()
            .unwrap();
        let err = generate(SchemaId::derive(&catalog), &catalog).unwrap_err();
        assert!(matches!(err, IdlError::DuplicateMemberName { .. }));
    }
}
