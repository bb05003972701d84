//! Structural message layouts and their flattening.
//!
//! Layouts are authored as [`LayoutDef`]s that embed one another by name and
//! compiled once into [`Layout`]s: a flat, wire-ordered field list plus the
//! nesting view the schema generator needs.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use crate::classify::classify;
use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldDescriptor, FieldKind};
use crate::primitive::PrimitiveType;

/// Index of a compiled layout within its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayoutId(usize);

impl LayoutId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Reference to another layout, spliced at its position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Embed {
    /// `Some` exposes the embedded layout as a named nested record;
    /// `None` splices its entries into the parent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    pub layout: String,
}

/// One entry of a layout definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutEntry {
    Field(FieldDescriptor),
    Embed(Embed),
}

/// Authoring form of a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entries: Vec<LayoutEntry>,
}

impl LayoutDef {
    /// Creates an empty layout.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.entries.push(LayoutEntry::Field(field));
        self
    }

    /// Splices another layout's entries in place.
    #[must_use]
    pub fn embed(mut self, layout: impl Into<String>) -> Self {
        self.entries.push(LayoutEntry::Embed(Embed {
            name: None,
            layout: layout.into(),
        }));
        self
    }

    /// Embeds another layout as a named nested record.
    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, layout: impl Into<String>) -> Self {
        self.entries.push(LayoutEntry::Embed(Embed {
            name: Some(name.into()),
            layout: layout.into(),
        }));
        self
    }
}

/// A field of a compiled layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutField {
    /// Dotted path from the layout root (`remaining_time.steps`); empty for
    /// anonymous fields.
    pub path: String,
    /// Name at its own nesting level.
    pub name: Option<String>,
    pub kind: FieldKind,
    pub primitive: PrimitiveType,
    /// Offset from the start of the parameters.
    pub bit_offset: usize,
}

/// Top-level structure of a compiled layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutNode {
    /// Index into [`Layout::fields`].
    Field(usize),
    /// Named embedding of another layout, covering a range of fields.
    Record {
        name: String,
        layout: LayoutId,
        fields: Range<usize>,
    },
}

/// A compiled, fixed-size layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub id: LayoutId,
    pub name: String,
    /// All fields in wire order, embeddings flattened.
    pub fields: Vec<LayoutField>,
    pub nodes: Vec<LayoutNode>,
    pub byte_len: usize,
}

impl Layout {
    /// Finds a field by dotted path.
    #[must_use]
    pub fn field_index(&self, path: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.path == path)
    }

    /// Returns `true` if the layout has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Compiles layout definitions in declaration order.
pub(crate) fn compile_layouts(defs: &[LayoutDef]) -> SchemaResult<Vec<Layout>> {
    let mut by_name = BTreeMap::new();
    for (idx, def) in defs.iter().enumerate() {
        if by_name.insert(def.name.as_str(), idx).is_some() {
            return Err(SchemaError::DuplicateLayout {
                name: def.name.clone(),
            });
        }
    }

    let mut compiler = Compiler {
        defs,
        by_name,
        compiled: vec![None; defs.len()],
        stack: Vec::new(),
    };
    for idx in 0..defs.len() {
        compiler.compile(idx)?;
    }
    Ok(compiler.compiled.into_iter().flatten().collect())
}

struct Compiler<'d> {
    defs: &'d [LayoutDef],
    by_name: BTreeMap<&'d str, usize>,
    compiled: Vec<Option<Layout>>,
    stack: Vec<usize>,
}

impl Compiler<'_> {
    fn compile(&mut self, idx: usize) -> SchemaResult<()> {
        if self.compiled[idx].is_some() {
            return Ok(());
        }
        if let Some(pos) = self.stack.iter().position(|&open| open == idx) {
            let mut path: Vec<String> = self.stack[pos..]
                .iter()
                .map(|&open| self.defs[open].name.clone())
                .collect();
            path.push(self.defs[idx].name.clone());
            return Err(SchemaError::EmbeddingCycle { path });
        }

        self.stack.push(idx);
        let defs = self.defs;
        let def = &defs[idx];
        let mut out = Assembler::new(&def.name);
        for (position, entry) in def.entries.iter().enumerate() {
            match entry {
                LayoutEntry::Field(field) => out.push_field(field, position)?,
                LayoutEntry::Embed(embed) => {
                    let Some(&child_idx) = self.by_name.get(embed.layout.as_str()) else {
                        return Err(SchemaError::UnknownLayout {
                            name: embed.layout.clone(),
                            referenced_by: def.name.clone(),
                        });
                    };
                    self.compile(child_idx)?;
                    let Some(child) = self.compiled[child_idx].as_ref() else {
                        return Err(SchemaError::UnknownLayout {
                            name: embed.layout.clone(),
                            referenced_by: def.name.clone(),
                        });
                    };
                    out.push_embed(embed, child)?;
                }
            }
        }
        let layout = out.finish(LayoutId(idx))?;
        self.stack.pop();
        self.compiled[idx] = Some(layout);
        Ok(())
    }
}

struct Assembler<'a> {
    layout: &'a str,
    fields: Vec<LayoutField>,
    nodes: Vec<LayoutNode>,
    names: BTreeSet<String>,
    bit_len: usize,
}

impl<'a> Assembler<'a> {
    fn new(layout: &'a str) -> Self {
        Self {
            layout,
            fields: Vec::new(),
            nodes: Vec::new(),
            names: BTreeSet::new(),
            bit_len: 0,
        }
    }

    fn claim_name(&mut self, name: &str) -> SchemaResult<()> {
        if !self.names.insert(name.to_string()) {
            return Err(SchemaError::DuplicateFieldName {
                layout: self.layout.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_aligned(&self, what: &str) -> SchemaResult<()> {
        if self.bit_len % 8 != 0 {
            return Err(SchemaError::MisalignedField {
                layout: self.layout.to_string(),
                field: what.to_string(),
                bit_offset: self.bit_len,
            });
        }
        Ok(())
    }

    fn push_field(&mut self, field: &FieldDescriptor, position: usize) -> SchemaResult<()> {
        let label = field
            .name
            .clone()
            .unwrap_or_else(|| format!("<anonymous #{position}>"));
        let primitive = classify(field.kind).map_err(|err| SchemaError::Field {
            layout: self.layout.to_string(),
            field: label.clone(),
            source: Box::new(err),
        })?;
        if field.kind.is_byte_aligned() {
            self.ensure_aligned(&label)?;
        }
        if let Some(name) = &field.name {
            self.claim_name(name)?;
        }

        let width = field.kind.bit_len().unwrap_or(0);
        self.nodes.push(LayoutNode::Field(self.fields.len()));
        self.fields.push(LayoutField {
            path: field.name.clone().unwrap_or_default(),
            name: field.name.clone(),
            kind: field.kind,
            primitive,
            bit_offset: self.bit_len,
        });
        self.bit_len += width;
        Ok(())
    }

    fn push_embed(&mut self, embed: &Embed, child: &Layout) -> SchemaResult<()> {
        let label = embed.name.as_deref().unwrap_or(&embed.layout);
        self.ensure_aligned(label)?;

        let base_field = self.fields.len();
        let base_bits = self.bit_len;
        let prefix = embed.name.as_ref().map(|name| format!("{name}."));
        for field in &child.fields {
            let path = match (&prefix, field.path.is_empty()) {
                (Some(prefix), false) => format!("{prefix}{}", field.path),
                _ => field.path.clone(),
            };
            self.fields.push(LayoutField {
                path,
                bit_offset: base_bits + field.bit_offset,
                ..field.clone()
            });
        }

        match &embed.name {
            Some(name) => {
                self.claim_name(name)?;
                self.nodes.push(LayoutNode::Record {
                    name: name.clone(),
                    layout: child.id,
                    fields: base_field..self.fields.len(),
                });
            }
            None => {
                for node in &child.nodes {
                    match node {
                        LayoutNode::Field(idx) => {
                            if let Some(name) = &child.fields[*idx].name {
                                self.claim_name(name)?;
                            }
                            self.nodes.push(LayoutNode::Field(base_field + idx));
                        }
                        LayoutNode::Record {
                            name,
                            layout,
                            fields,
                        } => {
                            self.claim_name(name)?;
                            self.nodes.push(LayoutNode::Record {
                                name: name.clone(),
                                layout: *layout,
                                fields: base_field + fields.start..base_field + fields.end,
                            });
                        }
                    }
                }
            }
        }
        self.bit_len += child.byte_len * 8;
        Ok(())
    }

    fn finish(self, id: LayoutId) -> SchemaResult<Layout> {
        if self.bit_len % 8 != 0 {
            return Err(SchemaError::UnalignedLayout {
                layout: self.layout.to_string(),
                bits: self.bit_len,
            });
        }
        Ok(Layout {
            id,
            name: self.layout.to_string(),
            fields: self.fields,
            nodes: self.nodes,
            byte_len: self.bit_len / 8,
        })
    }
}
