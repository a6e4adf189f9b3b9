//! Parser for schema documents produced by the extraction service.
//!
//! A document carries references and maximal inclusion dependencies in two
//! record shapes; both are materialized as canonical INDs in an [`IndSet`].

pub mod errors;
pub mod model;
pub mod parser;
pub mod shape;

pub use errors::ShapeError;
pub use model::{Category, SchemaSummary};
pub use parser::{parse_schema_document, parse_schema_reader};
pub use shape::{FieldNames, RecordShape};

pub use indeval_core::IndSet;
