//! Client for the remote schema extraction service.

pub mod errors;
pub mod options;
pub mod poll;
pub mod rest;
pub mod service;

pub use errors::{ClientError, ClientResult};
pub use options::PollOptions;
pub use poll::{fetch_schema, wait_for_job};
pub use rest::RestClient;
pub use service::{ExtractionService, JobId, JobStatus, ServerStatus};
