//! Message catalog definitions and validation.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{SchemaError, SchemaResult};
use crate::layout::{compile_layouts, Layout, LayoutDef, LayoutId};

/// Index of a variant set within its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariantSetId(usize);

impl VariantSetId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Authoring form of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantDef {
    pub name: String,
    pub layout: String,
}

/// Alternative layouts for one opcode, tried in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantSetDef {
    pub name: String,
    pub variants: Vec<VariantDef>,
}

impl VariantSetDef {
    /// Creates an empty variant set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Appends a variant.
    #[must_use]
    pub fn variant(mut self, name: impl Into<String>, layout: impl Into<String>) -> Self {
        self.variants.push(VariantDef {
            name: name.into(),
            layout: layout.into(),
        });
        self
    }
}

/// Parameters of a message as authored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParamsDef {
    Layout(String),
    Variants(String),
}

/// Authoring form of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageDef {
    pub opcode: u32,
    pub name: String,
    pub params: ParamsDef,
}

/// Authoring form of a message family.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FamilyDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub messages: Vec<MessageDef>,
}

impl FamilyDef {
    /// Creates an empty family.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// Adds a message with a single layout.
    #[must_use]
    pub fn message(
        mut self,
        opcode: u32,
        name: impl Into<String>,
        layout: impl Into<String>,
    ) -> Self {
        self.messages.push(MessageDef {
            opcode,
            name: name.into(),
            params: ParamsDef::Layout(layout.into()),
        });
        self
    }

    /// Adds a message whose parameters are one of a variant set.
    #[must_use]
    pub fn message_variants(
        mut self,
        opcode: u32,
        name: impl Into<String>,
        variants: impl Into<String>,
    ) -> Self {
        self.messages.push(MessageDef {
            opcode,
            name: name.into(),
            params: ParamsDef::Variants(variants.into()),
        });
        self
    }
}

/// Full authoring form of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogDef {
    #[cfg_attr(feature = "serde", serde(default))]
    pub layouts: Vec<LayoutDef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant_sets: Vec<VariantSetDef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub families: Vec<FamilyDef>,
}

/// A compiled variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub layout: LayoutId,
}

/// A compiled variant set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    pub id: VariantSetId,
    pub name: String,
    pub variants: Vec<Variant>,
}

/// Compiled message parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Params {
    Layout(LayoutId),
    Variants(VariantSetId),
}

/// A message bound to its opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub opcode: u32,
    pub name: String,
    pub family: String,
    pub params: Params,
}

/// Messages of one model, in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFamily {
    pub name: String,
    pub messages: Vec<MessageEntry>,
}

/// Validated, immutable set of layouts, variant sets and message families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    layouts: Vec<Layout>,
    variant_sets: Vec<VariantSet>,
    families: Vec<MessageFamily>,
    dispatch: BTreeMap<u32, (usize, usize)>,
}

impl Catalog {
    /// Compiles and validates a catalog definition.
    pub fn new(def: CatalogDef) -> SchemaResult<Self> {
        let layouts = compile_layouts(&def.layouts)?;
        let layout_ids: BTreeMap<&str, LayoutId> = layouts
            .iter()
            .map(|layout| (layout.name.as_str(), layout.id))
            .collect();

        let mut variant_sets = Vec::with_capacity(def.variant_sets.len());
        let mut set_ids = BTreeMap::new();
        for (idx, set_def) in def.variant_sets.iter().enumerate() {
            if set_ids.insert(set_def.name.as_str(), VariantSetId(idx)).is_some() {
                return Err(SchemaError::DuplicateVariantSet {
                    name: set_def.name.clone(),
                });
            }
            let set = compile_variant_set(VariantSetId(idx), set_def, &layout_ids, &layouts)?;
            variant_sets.push(set);
        }

        let mut families = Vec::with_capacity(def.families.len());
        let mut dispatch: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
        for (family_idx, family_def) in def.families.iter().enumerate() {
            let mut messages = Vec::with_capacity(family_def.messages.len());
            for (message_idx, message) in family_def.messages.iter().enumerate() {
                if !is_mesh_opcode(message.opcode) {
                    return Err(SchemaError::InvalidOpcode {
                        opcode: message.opcode,
                        message: message.name.clone(),
                    });
                }
                let params = match &message.params {
                    ParamsDef::Layout(name) => {
                        let id = layout_ids.get(name.as_str()).copied().ok_or_else(|| {
                            SchemaError::UnknownLayout {
                                name: name.clone(),
                                referenced_by: message.name.clone(),
                            }
                        })?;
                        Params::Layout(id)
                    }
                    ParamsDef::Variants(name) => {
                        let id = set_ids.get(name.as_str()).copied().ok_or_else(|| {
                            SchemaError::UnknownVariantSet {
                                name: name.clone(),
                                referenced_by: message.name.clone(),
                            }
                        })?;
                        Params::Variants(id)
                    }
                };

                if let Some(&(f, m)) = dispatch.get(&message.opcode) {
                    return Err(SchemaError::DuplicateOpcode {
                        opcode: message.opcode,
                        first: def.families[f].messages[m].name.clone(),
                        second: message.name.clone(),
                    });
                }
                dispatch.insert(message.opcode, (family_idx, message_idx));
                messages.push(MessageEntry {
                    opcode: message.opcode,
                    name: message.name.clone(),
                    family: family_def.name.clone(),
                    params,
                });
            }
            families.push(MessageFamily {
                name: family_def.name.clone(),
                messages,
            });
        }

        Ok(Self {
            layouts,
            variant_sets,
            families,
            dispatch,
        })
    }

    /// Creates a catalog builder.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Returns a compiled layout.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a different catalog.
    #[must_use]
    pub fn layout(&self, id: LayoutId) -> &Layout {
        &self.layouts[id.index()]
    }

    /// Looks a layout up by name.
    #[must_use]
    pub fn layout_by_name(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|layout| layout.name == name)
    }

    /// All layouts, in declared order.
    #[must_use]
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// Returns a compiled variant set.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a different catalog.
    #[must_use]
    pub fn variant_set(&self, id: VariantSetId) -> &VariantSet {
        &self.variant_sets[id.index()]
    }

    /// All variant sets, in declared order.
    #[must_use]
    pub fn variant_sets(&self) -> &[VariantSet] {
        &self.variant_sets
    }

    /// All message families, in declared order.
    #[must_use]
    pub fn families(&self) -> &[MessageFamily] {
        &self.families
    }

    /// Finds the message bound to an opcode.
    #[must_use]
    pub fn dispatch(&self, opcode: u32) -> Option<&MessageEntry> {
        let &(family, message) = self.dispatch.get(&opcode)?;
        Some(&self.families[family].messages[message])
    }

    /// Iterates every message across families in declared order.
    pub fn messages(&self) -> impl Iterator<Item = &MessageEntry> {
        self.families.iter().flat_map(|family| family.messages.iter())
    }
}

fn compile_variant_set(
    id: VariantSetId,
    def: &VariantSetDef,
    layout_ids: &BTreeMap<&str, LayoutId>,
    layouts: &[Layout],
) -> SchemaResult<VariantSet> {
    if def.variants.is_empty() {
        return Err(SchemaError::EmptyVariantSet {
            name: def.name.clone(),
        });
    }

    let mut names = BTreeSet::new();
    let mut lengths: BTreeMap<usize, &str> = BTreeMap::new();
    let mut variants = Vec::with_capacity(def.variants.len());
    for variant in &def.variants {
        if !names.insert(variant.name.as_str()) {
            return Err(SchemaError::DuplicateVariant {
                set: def.name.clone(),
                name: variant.name.clone(),
            });
        }
        let layout = layout_ids
            .get(variant.layout.as_str())
            .copied()
            .ok_or_else(|| SchemaError::UnknownLayout {
                name: variant.layout.clone(),
                referenced_by: def.name.clone(),
            })?;
        let byte_len = layouts[layout.index()].byte_len;
        if let Some(first) = lengths.insert(byte_len, &variant.name) {
            return Err(SchemaError::AmbiguousVariants {
                set: def.name.clone(),
                first: first.to_string(),
                second: variant.name.clone(),
                byte_len,
            });
        }
        variants.push(Variant {
            name: variant.name.clone(),
            layout,
        });
    }

    Ok(VariantSet {
        id,
        name: def.name.clone(),
        variants,
    })
}

/// Builder for `Catalog`.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    def: CatalogDef,
}

impl CatalogBuilder {
    /// Adds a layout definition.
    #[must_use]
    pub fn layout(mut self, layout: LayoutDef) -> Self {
        self.def.layouts.push(layout);
        self
    }

    /// Adds a variant set definition.
    #[must_use]
    pub fn variants(mut self, set: VariantSetDef) -> Self {
        self.def.variant_sets.push(set);
        self
    }

    /// Adds a message family.
    #[must_use]
    pub fn family(mut self, family: FamilyDef) -> Self {
        self.def.families.push(family);
        self
    }

    /// Returns the accumulated definition without compiling it.
    #[must_use]
    pub fn into_def(self) -> CatalogDef {
        self.def
    }

    /// Builds the catalog after validation.
    pub fn build(self) -> SchemaResult<Catalog> {
        Catalog::new(self.def)
    }
}

/// Opcode values with a one, two or three byte Mesh encoding.
const fn is_mesh_opcode(opcode: u32) -> bool {
    matches!(opcode, 0x00..=0x7E | 0x8000..=0xBFFF | 0x00C0_0000..=0x00FF_FFFF)
}
