use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One side of an inclusion dependency (`database.entity_type.[attributes]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    database: String,
    entity_type: String,
    attributes: Vec<String>,
}

impl EntityRef {
    /// Create an entity reference. The attribute list must be non-empty and is
    /// kept in the given order.
    pub fn new(
        database: impl Into<String>,
        entity_type: impl Into<String>,
        attributes: Vec<String>,
    ) -> Result<Self> {
        let database = database.into();
        let entity_type = entity_type.into();
        if attributes.is_empty() {
            return Err(Error::NoAttributes {
                database,
                entity_type,
            });
        }
        Ok(Self {
            database,
            entity_type,
            attributes,
        })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Returns the attribute when the reference covers exactly one.
    pub fn single_attribute(&self) -> Option<&str> {
        match self.attributes.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    fn with_single_attribute(&self, index: usize) -> Option<Self> {
        let attribute = self.attributes.get(index)?;
        Some(Self {
            database: self.database.clone(),
            entity_type: self.entity_type.clone(),
            attributes: vec![attribute.clone()],
        })
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.[{}]",
            self.database,
            self.entity_type,
            self.attributes.join(",")
        )
    }
}

/// Provenance of a dependency. Does not take part in identity or scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndKind {
    #[serde(rename = "implicite_refences")]
    ImplicitReference,
    #[serde(rename = "explicite_refences")]
    ExplicitReference,
    #[serde(rename = "maximal_inclusion_dependencies")]
    Maximal,
    #[serde(rename = "parsed_from_maximal_inclusion_dependencies")]
    SplitFromMaximal,
}

impl IndKind {
    /// Wire tag used by the extraction service for this provenance.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ImplicitReference => "implicite_refences",
            Self::ExplicitReference => "explicite_refences",
            Self::Maximal => "maximal_inclusion_dependencies",
            Self::SplitFromMaximal => "parsed_from_maximal_inclusion_dependencies",
        }
    }
}

impl fmt::Display for IndKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical id: `db.entity.[a1,a2]->db.entity.[b1,b2]`.
///
/// Delimiters inside names are not escaped, so names containing `.`, `,`,
/// `[`, `]` or `->` may collide.
pub fn canonical_id(left: &EntityRef, right: &EntityRef) -> String {
    format!("{left}->{right}")
}

/// Inclusion dependency `left ⊆ right`, identified by its canonical id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ind {
    id: String,
    left: EntityRef,
    right: EntityRef,
    kind: IndKind,
}

impl Ind {
    /// Build a dependency. Both sides must carry the same number of attributes.
    pub fn new(left: EntityRef, right: EntityRef, kind: IndKind) -> Result<Self> {
        let id = canonical_id(&left, &right);
        let (left_len, right_len) = (left.attributes.len(), right.attributes.len());
        if left_len != right_len {
            return Err(Error::ArityMismatch {
                id,
                left: left_len,
                right: right_len,
            });
        }
        Ok(Self {
            id,
            left,
            right,
            kind,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn left(&self) -> &EntityRef {
        &self.left
    }

    pub fn right(&self) -> &EntityRef {
        &self.right
    }

    pub fn kind(&self) -> IndKind {
        self.kind
    }

    /// Number of attribute pairs.
    pub fn arity(&self) -> usize {
        self.left.attributes.len()
    }

    pub fn is_atomic(&self) -> bool {
        self.left.attributes.len() == 1 && self.right.attributes.len() == 1
    }

    /// Atomic dependency pairing the attributes at `index` on both sides.
    pub fn atomic_at(&self, index: usize, kind: IndKind) -> Result<Self> {
        let (Some(left), Some(right)) = (
            self.left.with_single_attribute(index),
            self.right.with_single_attribute(index),
        ) else {
            return Err(Error::ArityMismatch {
                id: self.id.clone(),
                left: self.left.attributes.len(),
                right: self.right.attributes.len(),
            });
        };
        Self::new(left, right, kind)
    }
}
