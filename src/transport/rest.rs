//! REST transport using reqwest.
//!
//! Every resource lives under the same base URL:
//!
//! | Operation    | Request                                                  |
//! |--------------|----------------------------------------------------------|
//! | `list`       | `GET /{resource}?page=&pageSize=&search=&sortField=&sortDirection=&status=` |
//! | `get`        | `GET /{resource}/{id}`                                   |
//! | `create`     | `POST /{resource}`                                       |
//! | `update`     | `PUT /{resource}/{id}`                                   |
//! | `delete`     | `DELETE /{resource}/{id}`                                |
//! | `set_status` | `PATCH /{resource}/{id}/activate` or `/deactivate`       |
//!
//! Only `list` and `get` are retried. Writes are sent once.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::Error;
use crate::config::RetryConfig;
use crate::error::ErrorKind;
use crate::forms::FieldErrors;
use crate::transport::traits::{ResourceTransport, Transport, TransportStats};
use crate::transport::CancelSignal;
use crate::types::{Page, QueryParams, Record, RecordId, RecordStatus};
use crate::user_agent;

// ============================================================================
// REST Transport
// ============================================================================

/// REST transport using reqwest.
///
/// One instance serves every resource type; it is cheap to clone and clones
/// share the connection pool, the auth token and the counters.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Arc<RwLock<Option<String>>>,
    retry_config: RetryConfig,
    stats: Arc<RwLock<TransportStats>>,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a new REST transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }

    /// Creates a new REST transport.
    pub fn new(base_url: Url, retry_config: RetryConfig, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            auth_token: Arc::new(RwLock::new(None)),
            retry_config,
            stats: Arc::new(RwLock::new(TransportStats {
                transport: Transport::Http,
                ..Default::default()
            })),
        })
    }

    /// Returns the base URL every resource path is joined to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sets the bearer token sent with every request.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        *self.auth_token.write() = Some(token.into());
    }

    /// Clears the bearer token.
    pub fn clear_auth_token(&self) {
        *self.auth_token.write() = None;
    }

    /// Returns the request counters.
    pub fn transport_stats(&self) -> TransportStats {
        *self.stats.read()
    }

    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(ref token) = *self.auth_token.read() {
            let auth_value = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|_| Error::new(ErrorKind::Unauthorized, "Invalid auth token format"))?,
            );
        }

        Ok(headers)
    }

    /// `{base}/{resource}`
    fn collection_url(&self, resource: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(resource)?)
    }

    /// `{base}/{resource}/{id}[/{action}]`
    fn record_url(&self, resource: &str, id: &RecordId, action: Option<&str>) -> Result<Url, Error> {
        let mut path = format!("{}/{}", resource, urlencoding::encode(id.as_str()));
        if let Some(action) = action {
            path.push('/');
            path.push_str(action);
        }
        Ok(self.base_url.join(&path)?)
    }

    /// `{base}/{resource}?page=..&pageSize=..`
    pub(crate) fn list_url(&self, resource: &str, query: &QueryParams) -> Result<Url, Error> {
        let mut url = self.collection_url(resource)?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        Ok(url)
    }

    async fn get_json<R>(&self, url: Url) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let headers = self.build_headers()?;

        let response = self
            .execute_with_retry(|| async {
                self.client
                    .get(url.clone())
                    .headers(headers.clone())
                    .send()
                    .await
            })
            .await?;

        self.handle_response(response).await
    }

    /// Executes a read, retrying transient failures per the retry config.
    async fn execute_with_retry<F, Fut>(&self, make_request: F) -> Result<reqwest::Response, Error>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let max_attempts = self.retry_config.max_retries + 1;
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.stats.write().requests_sent += 1;

            match make_request().await {
                Ok(response) => {
                    let status = response.status();
                    let retriable = status.as_u16() == 429 || status.is_server_error();

                    if !retriable || attempt >= max_attempts {
                        if !status.is_success() {
                            self.stats.write().requests_failed += 1;
                        }
                        return Ok(response);
                    }

                    let delay = retry_after(&response)
                        .unwrap_or_else(|| self.retry_config.delay_for_attempt(attempt));
                    tracing::debug!(
                        status = status.as_u16(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    let retriable = self.retry_config.retry_network_errors
                        && (e.is_timeout() || e.is_connect());

                    if !retriable || attempt >= max_attempts {
                        self.stats.write().requests_failed += 1;
                        return Err(map_reqwest_error(e));
                    }

                    tracing::debug!(attempt, error = %e, "retrying request");
                    tokio::time::sleep(self.retry_config.delay_for_attempt(attempt)).await;
                }
            }
        }
    }

    /// Sends a write exactly once. A write that may have reached the
    /// backend is never repeated.
    async fn send_once(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        self.stats.write().requests_sent += 1;

        match request.send().await {
            Ok(response) => {
                if !response.status().is_success() {
                    self.stats.write().requests_failed += 1;
                }
                Ok(response)
            }
            Err(e) => {
                self.stats.write().requests_failed += 1;
                Err(map_reqwest_error(e))
            }
        }
    }

    /// Handles a response and parses its JSON body.
    async fn handle_response<R>(&self, response: reqwest::Response) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.check_status(response).await?;

        response.json::<R>().await.map_err(|e| {
            Error::new(
                ErrorKind::InvalidResponse,
                format!("Failed to parse response: {}", e),
            )
        })
    }

    /// Turns a non-2xx response into an error, keeping the request id and
    /// `Retry-After` hint.
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = retry_after(&response);
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.unwrap_or_default();

        let mut error = map_status_error(status.as_u16(), &body);
        if let Some(delay) = retry_after {
            error = error.with_retry_after(delay);
        }
        if let Some(request_id) = request_id {
            error = error.with_request_id(request_id);
        }
        Err(error)
    }

    /// Parses a written record, or fetches it when the backend answers
    /// `204 No Content`.
    async fn record_or_refetch<T: Record>(
        &self,
        response: reqwest::Response,
        id: &RecordId,
    ) -> Result<T, Error> {
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return self.get_json(self.record_url(T::RESOURCE, id, None)?).await;
        }
        self.handle_response(response).await
    }
}

// ============================================================================
// REST Transport Builder
// ============================================================================

/// Builder for [`RestTransport`].
pub struct RestTransportBuilder {
    base_url: Option<Url>,
    retry_config: RetryConfig,
    timeout: Duration,
    auth_token: Option<String>,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            retry_config: RetryConfig::disabled(),
            timeout: Duration::from_secs(30),
            auth_token: None,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        self.base_url = Some(
            Url::parse(url.as_ref())
                .map_err(|e| Error::configuration(format!("Invalid base URL: {}", e)))?,
        );
        Ok(self)
    }

    /// Sets the retry policy for reads. Retries are disabled by default.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the bearer token.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Builds the REST transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("Base URL is required"))?;

        let transport = RestTransport::new(base_url, self.retry_config, self.timeout)?;
        if let Some(token) = self.auth_token {
            transport.set_auth_token(token);
        }
        Ok(transport)
    }
}

// ============================================================================
// ResourceTransport Implementation
// ============================================================================

#[async_trait::async_trait]
impl<T: Record> ResourceTransport<T> for RestTransport {
    async fn list(&self, query: &QueryParams, cancel: CancelSignal) -> Result<Page<T>, Error> {
        let url = self.list_url(T::RESOURCE, query)?;
        cancel.run(self.get_json::<Page<T>>(url)).await
    }

    async fn get(&self, id: &RecordId) -> Result<T, Error> {
        self.get_json(self.record_url(T::RESOURCE, id, None)?).await
    }

    async fn create(&self, record: T) -> Result<T, Error> {
        let url = self.collection_url(T::RESOURCE)?;
        let headers = self.build_headers()?;

        let response = self
            .send_once(self.client.post(url).headers(headers).json(&record))
            .await?;

        let response = self.check_status(response).await?;
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(record);
        }
        self.handle_response(response).await
    }

    async fn update(&self, id: &RecordId, record: T) -> Result<T, Error> {
        let url = self.record_url(T::RESOURCE, id, None)?;
        let headers = self.build_headers()?;

        let response = self
            .send_once(self.client.put(url).headers(headers).json(&record))
            .await?;

        let response = self.check_status(response).await?;
        self.record_or_refetch(response, id).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), Error> {
        let url = self.record_url(T::RESOURCE, id, None)?;
        let headers = self.build_headers()?;

        let response = self
            .send_once(self.client.delete(url).headers(headers))
            .await?;

        self.check_status(response).await.map(drop)
    }

    async fn set_status(&self, id: &RecordId, status: RecordStatus) -> Result<T, Error> {
        let action = if status.is_active() {
            "activate"
        } else {
            "deactivate"
        };
        let url = self.record_url(T::RESOURCE, id, Some(action))?;
        let headers = self.build_headers()?;

        let response = self
            .send_once(self.client.patch(url).headers(headers))
            .await?;

        let response = self.check_status(response).await?;
        self.record_or_refetch(response, id).await
    }

    fn transport_type(&self) -> Transport {
        Transport::Http
    }

    fn stats(&self) -> TransportStats {
        self.transport_stats()
    }
}

// ============================================================================
// Helpers
// ============================================================================

// `Url::join` replaces the last segment unless the base ends with a slash.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps reqwest errors to crate errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::connection(format!("Connection failed: {}", e))
    } else if e.is_request() {
        Error::invalid_argument(format!("Invalid request: {}", e))
    } else {
        Error::transport(format!("HTTP error: {}", e))
    }
}

/// Maps an HTTP error status and body to a crate error.
///
/// `400`/`422` bodies carrying `{"errors": {...}}` become validation errors
/// with the field map attached.
fn map_status_error(status: u16, body: &str) -> Error {
    if matches!(status, 400 | 422) {
        if let Some(errors) = FieldErrors::from_json(body) {
            return Error::validation(errors);
        }
    }

    let message = if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .or_else(|| value.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| body.to_string())
    };

    Error::new(ErrorKind::from_http_status(status), message)
}

// ============================================================================
// Tests
// ============================================================================
