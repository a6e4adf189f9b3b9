//! Core contracts for inclusion dependency evaluation.
//!
//! This crate defines the canonical IND model, attribute-list normalization,
//! the working set that parsers fill, and the splitter that expands maximal
//! multi-attribute dependencies into atomic ones.

pub mod attributes;
pub mod error;
pub mod ind_set;
pub mod model;
pub mod split;

pub use attributes::split_attributes;
pub use error::{Error, Result};
pub use ind_set::IndSet;
pub use model::{EntityRef, Ind, IndKind, canonical_id};
pub use split::{SplitStats, split_maximal};
