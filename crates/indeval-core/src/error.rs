use thiserror::Error;

/// Core error type shared across indeval crates.
#[derive(Debug, Error)]
pub enum Error {
    /// An attribute list contained an element that is empty after trimming.
    #[error("empty attribute name in list {raw:?}")]
    EmptyAttribute { raw: String },
    /// An entity reference was built without any attribute.
    #[error("entity reference {database}.{entity_type} has no attributes")]
    NoAttributes {
        database: String,
        entity_type: String,
    },
    /// Left and right attribute lists cannot be paired positionally.
    #[error("attribute count mismatch in {id}: left has {left}, right has {right}")]
    ArityMismatch {
        id: String,
        left: usize,
        right: usize,
    },
}

/// Convenience alias for results returned by indeval crates.
pub type Result<T> = std::result::Result<T, Error>;
