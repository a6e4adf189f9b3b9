use std::fmt;

use async_trait::async_trait;

use crate::errors::ClientResult;

/// Identifier of a submitted extraction job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Wrap a job id returned by the service. Empty ids are rejected.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server health as reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerStatus {
    Ready,
    NotReady(String),
}

impl ServerStatus {
    pub fn from_wire(status: &str) -> Self {
        if status == "running" {
            Self::Ready
        } else {
            Self::NotReady(status.to_string())
        }
    }
}

/// State of an extraction job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Finished,
    /// Any other terminal status, carrying the reported text.
    Failed(String),
}

impl JobStatus {
    pub fn from_wire(status: &str) -> Self {
        match status {
            "running" => Self::Running,
            "finished" => Self::Finished,
            other => Self::Failed(other.to_string()),
        }
    }
}

/// Operations offered by a schema extraction service.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Check whether the service accepts jobs.
    async fn check_status(&self) -> ClientResult<ServerStatus>;

    /// Submit an extraction config and return the job id.
    async fn submit_extraction(&self, config: Vec<u8>) -> ClientResult<JobId>;

    /// Fetch the current status of a job.
    async fn poll_job_status(&self, job: &JobId) -> ClientResult<JobStatus>;

    /// Download the schema document produced by a finished job.
    async fn fetch_result(&self, job: &JobId) -> ClientResult<Vec<u8>>;
}
