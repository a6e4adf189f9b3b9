//! Scoring of discovered inclusion dependencies against a reference list.

pub mod engine;
pub mod errors;
pub mod filter;
pub mod metrics;
pub mod reference;
pub mod report;

pub use engine::{Evaluation, evaluate};
pub use errors::EvalError;
pub use filter::{IGNORED_ATTRIBUTES, filter_scorable};
pub use metrics::{Counts, METRICS_VERSION, Metrics, MetricsDocument};
pub use reference::ReferenceSet;
pub use report::{render_found, render_report};
