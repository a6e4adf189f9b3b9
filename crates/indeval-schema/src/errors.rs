use thiserror::Error;

/// Errors raised while reading a schema document.
///
/// Any of these aborts the whole parse: a partially readable schema is not
/// scored.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top-level document is not a JSON object")]
    DocumentNotObject,
    #[error("missing `json_schema` array")]
    MissingSchemaArray,
    #[error("`json_schema` must contain one schema object, found none")]
    MissingSchemaObject,
    #[error("`json_schema` must contain one schema object, found {0}")]
    UnexpectedSchemaObjects(usize),
    #[error("`json_schema[0]` is not a JSON object")]
    SchemaObjectNotObject,
    #[error("schema object is empty")]
    EmptySchemaObject,
    #[error("category `{category}` is not an array")]
    CategoryNotArray { category: &'static str },
    #[error("{category}[{index}] is not a JSON object")]
    RecordNotObject { category: &'static str, index: usize },
    #[error("{category}[{index}] is missing field `{field}`")]
    MissingField {
        category: &'static str,
        index: usize,
        field: &'static str,
    },
    #[error("{category}[{index}].{field} is not a string")]
    FieldNotString {
        category: &'static str,
        index: usize,
        field: &'static str,
    },
    #[error("{category}[{index}] is not a valid dependency: {source}")]
    InvalidRecord {
        category: &'static str,
        index: usize,
        #[source]
        source: indeval_core::Error,
    },
}
