//! HTTP client for the custody API.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::CustodyApi;

use async_trait::async_trait;
use custody_types::{
    AccessRequest, Decision, DecisionBody, EvidenceRecord, NewAccessRequest, NewEvidence,
    RequestId,
};
use reqwest::{IntoUrl, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// reqwest-backed [`CustodyApi`].
///
/// Every call sends `Content-Type: application/json` and maps non-2xx
/// responses to [`ApiError::Status`].
#[derive(Clone)]
pub struct HttpCustodyApi {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    /// Base URL without trailing slash, e.g. `http://localhost:4001`.
    base_url: String,
}

/// Error payload some endpoints return alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpCustodyApi {
    /// Create a client with default timeout settings.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeouts(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a client from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_timeouts(
            &config.api_base,
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    /// Create a client with custom timeouts.
    pub fn with_timeouts(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "api base must be an http(s) URL, got {base_url:?}"
            )));
        }
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        read_json(ensure_success(response).await?).await
    }

    /// `{base}/api/access-requests/{id}/{action}`, with `id` percent-encoded
    /// as a single path segment.
    fn decision_url(&self, id: &RequestId, decision: Decision) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::Config(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("api base cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "access-requests", id.as_str(), decision.action()]);
        Ok(url)
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        self.post_url(self.url(path), body).await
    }

    async fn post_url<U, B>(&self, url: U, body: &B) -> Result<reqwest::Response, ApiError>
    where
        U: IntoUrl + std::fmt::Display,
        B: serde::Serialize + ?Sized,
    {
        tracing::debug!(%url, "POST");
        // `.json()` sets the Content-Type header.
        let response = self.http_client.post(url).json(body).send().await?;
        ensure_success(response).await
    }
}

#[async_trait]
impl CustodyApi for HttpCustodyApi {
    async fn create_evidence(&self, evidence: &NewEvidence) -> Result<EvidenceRecord, ApiError> {
        read_json(self.post("/api/evidence", evidence).await?).await
    }

    async fn list_evidence(&self) -> Result<Vec<EvidenceRecord>, ApiError> {
        self.get_json("/api/evidence").await
    }

    async fn create_access_request(
        &self,
        request: &NewAccessRequest,
    ) -> Result<AccessRequest, ApiError> {
        read_json(self.post("/api/access-requests", request).await?).await
    }

    async fn list_access_requests(&self) -> Result<Vec<AccessRequest>, ApiError> {
        self.get_json("/api/access-requests").await
    }

    async fn decide_access_request(
        &self,
        id: &RequestId,
        decision: Decision,
        body: &DecisionBody,
    ) -> Result<(), ApiError> {
        let url = self.decision_url(id, decision)?;
        // Only the success signal matters; any body is ignored.
        self.post_url(url, body).await.map(|_| ())
    }
}

/// Pass 2xx responses through; turn anything else into [`ApiError::Status`].
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Server-provided `error` (or `message`) field, else the status reason text.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Err(ApiError::InvalidResponse("empty response body".into()));
    }
    serde_json::from_str(&text)
        .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {e}")))
}
