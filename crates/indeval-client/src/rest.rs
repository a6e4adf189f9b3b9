use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::{ClientError, ClientResult};
use crate::service::{ExtractionService, JobId, JobStatus, ServerStatus};

#[derive(Deserialize)]
struct StatusResponse {
    status: String,
}

#[derive(Deserialize)]
struct ExtractResponse {
    job_id: String,
}

/// HTTP implementation of [`ExtractionService`].
///
/// Endpoints: `GET status`, `POST extract`, `GET jobs/<id>` and
/// `GET jobs/<id>/results`, all relative to the base url.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
}

impl RestClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Self::with_client(base_url, client)
    }

    /// Use a preconfigured HTTP client (proxy, TLS or timeout settings).
    pub fn with_client(base_url: &str, client: Client) -> ClientResult<Self> {
        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get(&self, path: &str) -> ClientResult<Response> {
        let url = self.endpoint(path)?;
        tracing::debug!(event = "http_request", method = "GET", url = %url);
        let response = self.client.get(url).send().await?;
        ensure_ok(path, response)
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> ClientResult<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }
}

fn normalize_base(base_url: &str) -> ClientResult<Url> {
    if base_url.ends_with('/') {
        Ok(Url::parse(base_url)?)
    } else {
        Ok(Url::parse(&format!("{base_url}/"))?)
    }
}

fn ensure_ok(path: &str, response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(response)
    } else {
        Err(ClientError::UnexpectedStatus {
            endpoint: path.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ExtractionService for RestClient {
    async fn check_status(&self) -> ClientResult<ServerStatus> {
        let path = "status";
        let response = self.get(path).await?;
        let body: StatusResponse = Self::decode(path, response).await?;
        Ok(ServerStatus::from_wire(&body.status))
    }

    async fn submit_extraction(&self, config: Vec<u8>) -> ClientResult<JobId> {
        let path = "extract";
        let url = self.endpoint(path)?;
        tracing::debug!(event = "http_request", method = "POST", url = %url);
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(config)
            .send()
            .await?;
        let response = ensure_ok(path, response)?;
        let body: ExtractResponse = Self::decode(path, response).await?;
        JobId::new(body.job_id).ok_or(ClientError::EmptyJobId)
    }

    async fn poll_job_status(&self, job: &JobId) -> ClientResult<JobStatus> {
        let path = format!("jobs/{job}");
        let response = self.get(&path).await?;
        let body: StatusResponse = Self::decode(&path, response).await?;
        Ok(JobStatus::from_wire(&body.status))
    }

    async fn fetch_result(&self, job: &JobId) -> ClientResult<Vec<u8>> {
        let path = format!("jobs/{job}/results");
        let response = self.get(&path).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::*;

    fn client(base: &str) -> RestClient {
        RestClient::new(base, Duration::from_secs(5)).unwrap()
    }

    fn local_client(base: &str) -> RestClient {
        let http = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        RestClient::with_client(base, http).unwrap()
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            concat!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n",
                "Content-Length: {}\r\nConnection: close\r\n\r\n{}"
            ),
            status,
            body.len(),
            body
        )
    }

    /// Serve one connection with `response` and hand back the raw request.
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });
        (base, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = buf.windows(4).position(|window| window == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn joins_endpoints_with_or_without_trailing_slash() {
        let with_slash = client("http://localhost:8001/");
        let without_slash = client("http://localhost:8001/api");

        assert_eq!(
            with_slash.endpoint("status").unwrap().as_str(),
            "http://localhost:8001/status"
        );
        assert_eq!(
            without_slash.endpoint("jobs/7/results").unwrap().as_str(),
            "http://localhost:8001/api/jobs/7/results"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = RestClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn reports_server_ready() {
        let (base, server) = serve_once(http_response("200 OK", r#"{"status": "running"}"#)).await;

        let status = local_client(&base).check_status().await.unwrap();
        assert_eq!(status, ServerStatus::Ready);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /status "));
    }

    #[tokio::test]
    async fn non_ok_status_is_an_error() {
        let (base, server) =
            serve_once(http_response("500 Internal Server Error", "{}")).await;

        let err = local_client(&base).check_status().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnexpectedStatus { ref endpoint, status: 500 } if endpoint == "status"
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn undecodable_body_is_an_error() {
        let (base, server) = serve_once(http_response("200 OK", "not json")).await;

        let err = local_client(&base).check_status().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { ref endpoint, .. } if endpoint == "status"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn submit_posts_config_as_json() {
        let (base, server) = serve_once(http_response("200 OK", r#"{"job_id": "abc"}"#)).await;

        let config = br#"{"entries":[]}"#.to_vec();
        let job = local_client(&base).submit_extraction(config).await.unwrap();
        assert_eq!(job.as_str(), "abc");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /extract "));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"entries":[]}"#));
    }

    #[tokio::test]
    async fn empty_job_id_is_rejected() {
        let (base, server) = serve_once(http_response("200 OK", r#"{"job_id": ""}"#)).await;

        let err = local_client(&base)
            .submit_extraction(b"{}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::EmptyJobId));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn polls_job_status_endpoint() {
        let (base, server) = serve_once(http_response("200 OK", r#"{"status": "failed"}"#)).await;

        let job = JobId::new("abc").unwrap();
        let status = local_client(&base).poll_job_status(&job).await.unwrap();
        assert_eq!(status, JobStatus::Failed("failed".to_string()));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /jobs/abc "));
    }

    #[tokio::test]
    async fn result_bytes_pass_through() {
        let body = r#"{"json_schema": [{"databases": []}]}"#;
        let (base, server) = serve_once(http_response("200 OK", body)).await;

        let job = JobId::new("abc").unwrap();
        let result = local_client(&base).fetch_result(&job).await.unwrap();
        assert_eq!(result, body.as_bytes());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /jobs/abc/results "));
    }
}
