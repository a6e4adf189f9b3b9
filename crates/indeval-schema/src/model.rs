use std::collections::BTreeMap;

use indeval_core::IndKind;
use serde::Serialize;

use crate::shape::RecordShape;

/// Categories of a schema object that carry dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    ImplicitReferences,
    ExplicitReferences,
    MaximalInclusionDependencies,
}

impl Category {
    /// Processing order. A later category overwrites an earlier entry with
    /// the same id.
    pub const ALL: [Category; 3] = [
        Category::ImplicitReferences,
        Category::ExplicitReferences,
        Category::MaximalInclusionDependencies,
    ];

    /// Key of the category inside the schema object.
    pub fn key(self) -> &'static str {
        self.kind().as_str()
    }

    pub fn kind(self) -> IndKind {
        match self {
            Self::ImplicitReferences => IndKind::ImplicitReference,
            Self::ExplicitReferences => IndKind::ExplicitReference,
            Self::MaximalInclusionDependencies => IndKind::Maximal,
        }
    }

    pub fn shape(self) -> RecordShape {
        match self {
            Self::ImplicitReferences | Self::ExplicitReferences => RecordShape::Reference,
            Self::MaximalInclusionDependencies => RecordShape::Maximal,
        }
    }
}

/// Keys that may appear in a schema object but are not read as dependencies.
pub const IGNORED_KEYS: [&str; 2] = ["primary_keys", "databases"];

/// Record counts observed while parsing a schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSummary {
    /// Records read per dependency category, keyed by category key.
    pub records: BTreeMap<String, usize>,
    /// Entries in `primary_keys`, when present as an array.
    pub primary_keys: Option<usize>,
    /// Entries in `databases`, when present as an array.
    pub databases: Option<usize>,
    /// Distinct dependency ids in the working set after parsing.
    pub inds: usize,
}

impl SchemaSummary {
    pub fn record_count(&self, category: Category) -> usize {
        self.records.get(category.key()).copied().unwrap_or(0)
    }
}
