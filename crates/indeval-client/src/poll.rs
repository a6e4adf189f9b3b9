use crate::errors::{ClientError, ClientResult};
use crate::options::PollOptions;
use crate::service::{ExtractionService, JobId, JobStatus, ServerStatus};

/// Run a full extraction: check the server, submit `config`, wait for the job
/// and download its result.
///
/// Resolving `cancel` aborts the run with [`ClientError::Cancelled`].
pub async fn fetch_schema<S, C>(
    service: &S,
    config: Vec<u8>,
    options: &PollOptions,
    cancel: C,
) -> ClientResult<Vec<u8>>
where
    S: ExtractionService + ?Sized,
    C: Future<Output = ()>,
{
    tokio::select! {
        result = extract(service, config, options) => result,
        _ = cancel => {
            tracing::warn!(event = "extraction_cancelled");
            Err(ClientError::Cancelled)
        }
    }
}

async fn extract<S>(service: &S, config: Vec<u8>, options: &PollOptions) -> ClientResult<Vec<u8>>
where
    S: ExtractionService + ?Sized,
{
    if let ServerStatus::NotReady(status) = service.check_status().await? {
        return Err(ClientError::ServerNotReady(status));
    }

    let job = service.submit_extraction(config).await?;
    tracing::info!(event = "extraction_submitted", job_id = %job);

    wait_for_job(service, &job, options).await?;

    let result = service.fetch_result(&job).await?;
    tracing::info!(event = "extraction_result_fetched", job_id = %job, bytes = result.len());
    Ok(result)
}

/// Poll `job` until it finishes, fails, or `options.max_wait` elapses.
pub async fn wait_for_job<S>(service: &S, job: &JobId, options: &PollOptions) -> ClientResult<()>
where
    S: ExtractionService + ?Sized,
{
    match options.max_wait {
        Some(limit) => tokio::time::timeout(limit, poll_until_done(service, job, options))
            .await
            .map_err(|_| ClientError::Timeout(limit))?,
        None => poll_until_done(service, job, options).await,
    }
}

async fn poll_until_done<S>(service: &S, job: &JobId, options: &PollOptions) -> ClientResult<()>
where
    S: ExtractionService + ?Sized,
{
    let mut polls = 0u64;
    loop {
        polls += 1;
        match service.poll_job_status(job).await? {
            JobStatus::Finished => {
                tracing::info!(event = "job_finished", job_id = %job, polls = polls);
                return Ok(());
            }
            JobStatus::Failed(status) => {
                tracing::error!(event = "job_failed", job_id = %job, status = %status);
                return Err(ClientError::JobFailed(status));
            }
            JobStatus::Running => {
                tracing::debug!(event = "job_running", job_id = %job, polls = polls);
                tokio::time::sleep(options.interval).await;
            }
        }
    }
}
