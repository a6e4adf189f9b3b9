use std::time::Duration;

/// Options that control how job completion is awaited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay between two status checks.
    pub interval: Duration,
    /// Give up after this long. `None` waits until the job ends.
    pub max_wait: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_wait: None,
        }
    }
}
