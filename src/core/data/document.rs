use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Keyword, TypeDescriptor};

/// Documentation exposure level of an entity.
///
/// Ordered from least to most exposed so that merging two occurrences of the
/// same binding can keep the most public one with `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Protected,
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }

    /// Parse a visibility keyword name (`public`, `protected`, `private`).
    pub fn from_keyword(name: &str) -> Option<Self> {
        match name {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a documented entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Data,
    Computed,
    Method,
    Event,
    Slot,
}

/// Parts of a document that can be requested.
///
/// Unrequested features are not extracted at all; the corresponding
/// document field stays empty.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Name,
    Description,
    Data,
    Computed,
    Methods,
    Events,
    Slots,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Name,
        Feature::Description,
        Feature::Data,
        Feature::Computed,
        Feature::Methods,
        Feature::Events,
        Feature::Slots,
    ];

    /// The entity kind produced by this feature, if it produces entities.
    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Feature::Data => Some(EntityKind::Data),
            Feature::Computed => Some(EntityKind::Computed),
            Feature::Methods => Some(EntityKind::Method),
            Feature::Events => Some(EntityKind::Event),
            Feature::Slots => Some(EntityKind::Slot),
            Feature::Name | Feature::Description => None,
        }
    }
}

/// Character span of one identifier occurrence (0-based, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: usize,
    pub end: usize,
}

/// A documented method parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub description: Option<String>,
    pub optional: bool,
}

/// One documented entity: a data binding, computed value, method, event or slot.
///
/// Built by the assembler from every occurrence of one canonical binding and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntity {
    pub name: String,
    pub local_name: Option<String>,
    pub original_name: Option<String>,
    pub import_path: Option<String>,
    pub kind: EntityKind,
    pub visibility: Visibility,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub description: Option<String>,
    pub keywords: Vec<Keyword>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<SourceLocation>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<MethodParam>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

/// Extraction result for one component file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SvelteDocument {
    pub version: u8,
    pub name: Option<String>,
    pub description: Option<String>,
    pub data: Vec<DocumentEntity>,
    pub computed: Vec<DocumentEntity>,
    pub methods: Vec<DocumentEntity>,
    pub events: Vec<DocumentEntity>,
    pub slots: Vec<DocumentEntity>,
}

impl SvelteDocument {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            name: None,
            description: None,
            data: Vec::new(),
            computed: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Mutable access to the entity list holding `kind`.
    pub fn entities_mut(&mut self, kind: EntityKind) -> &mut Vec<DocumentEntity> {
        match kind {
            EntityKind::Data => &mut self.data,
            EntityKind::Computed => &mut self.computed,
            EntityKind::Method => &mut self.methods,
            EntityKind::Event => &mut self.events,
            EntityKind::Slot => &mut self.slots,
        }
    }
}
