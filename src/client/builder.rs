//! Client builder with typestate pattern.

use std::marker::PhantomData;
use std::time::Duration;

use super::inner::{Backend, ClientInner, InMemoryRegistry, WriteEpochs};
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::{
    Client, Error,
    config::{CacheConfig, ListConfig, RetryConfig},
};

/// Marker type: no backend chosen yet.
pub struct NoBackend;

/// Marker type: a backend has been chosen.
pub struct HasBackend;

enum BackendChoice {
    #[cfg(feature = "rest")]
    Url(String),
    InMemory,
}

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so a client cannot be built before a backend
/// is chosen: either a REST base URL with [`url`](ClientBuilder::url), or
/// in-process collections with [`in_memory`](ClientBuilder::in_memory).
///
/// ## Optional Configuration
///
/// - `timeout()`: per-request timeout (REST)
/// - `bearer_token()`: token sent with every request (REST)
/// - `retry_config()`: retry policy for transient read failures (REST, off by default)
/// - `list_config()`: how list views start
/// - `cache_config()`: page cache of list views
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use shopdesk::{Client, ListConfig};
///
/// let client = Client::builder()
///     .url("https://erp.example.com/api/")
///     .bearer_token("secret")
///     .timeout(Duration::from_secs(10))
///     .list_config(ListConfig::builder().default_page_size(20).build())
///     .build()
///     .unwrap();
/// assert!(client.transport().is_http());
/// ```
pub struct ClientBuilder<BackendState> {
    backend: Option<BackendChoice>,
    timeout: Option<Duration>,
    bearer_token: Option<String>,
    retry_config: RetryConfig,
    list_config: ListConfig,
    cache_config: CacheConfig,
    _backend_state: PhantomData<BackendState>,
}

impl ClientBuilder<NoBackend> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            backend: None,
            timeout: None,
            bearer_token: None,
            retry_config: RetryConfig::disabled(),
            list_config: ListConfig::default(),
            cache_config: CacheConfig::default(),
            _backend_state: PhantomData,
        }
    }

    /// Uses the REST backend at `url`.
    ///
    /// Resource paths are joined to it, so `https://host/api` and
    /// `https://host/api/` are equivalent.
    #[cfg(feature = "rest")]
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasBackend> {
        self.with_backend(BackendChoice::Url(url.into()))
    }

    /// Keeps every resource in process memory.
    ///
    /// Collections start empty; fill them with [`Client::seed`].
    pub fn in_memory(self) -> ClientBuilder<HasBackend> {
        self.with_backend(BackendChoice::InMemory)
    }

    fn with_backend(self, backend: BackendChoice) -> ClientBuilder<HasBackend> {
        ClientBuilder {
            backend: Some(backend),
            timeout: self.timeout,
            bearer_token: self.bearer_token,
            retry_config: self.retry_config,
            list_config: self.list_config,
            cache_config: self.cache_config,
            _backend_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> ClientBuilder<B> {
    /// Sets the per-request timeout. Defaults to 30 seconds.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets the retry configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopdesk::{Client, RetryConfig};
    ///
    /// let builder = Client::builder()
    ///     .in_memory()
    ///     .retry_config(RetryConfig::new().with_max_retries(5));
    /// ```
    #[must_use]
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets the configuration of list views created by this client.
    #[must_use]
    pub fn list_config(mut self, config: ListConfig) -> Self {
        self.list_config = config;
        self
    }

    /// Sets the page cache configuration of list views.
    #[must_use]
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }
}

impl ClientBuilder<HasBackend> {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the URL does not parse, is not
    /// http(s), or the HTTP client cannot be created.
    pub fn build(self) -> Result<Client, Error> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(30));
        let backend = match self.backend {
            #[cfg(feature = "rest")]
            Some(BackendChoice::Url(url)) => {
                let parsed = url::Url::parse(&url)
                    .map_err(|e| Error::configuration(format!("invalid URL: {}", e)))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(Error::configuration(format!(
                        "unsupported URL scheme: {}",
                        parsed.scheme()
                    )));
                }

                let mut builder = RestTransport::builder()
                    .base_url(parsed.as_str())?
                    .retry_config(self.retry_config.clone())
                    .timeout(timeout);
                if let Some(token) = self.bearer_token {
                    builder = builder.auth_token(token);
                }
                Backend::Rest(std::sync::Arc::new(builder.build()?))
            },
            Some(BackendChoice::InMemory) => Backend::InMemory(InMemoryRegistry::default()),
            None => return Err(Error::configuration("a backend is required")),
        };

        tracing::debug!(
            backend = %backend.transport(),
            page_size = self.list_config.default_page_size,
            cache = self.cache_config.is_active(),
            "client built"
        );

        Ok(Client::from_inner(ClientInner {
            backend,
            retry_config: self.retry_config,
            list_config: self.list_config,
            cache_config: self.cache_config,
            timeout,
            write_epochs: WriteEpochs::default(),
        }))
    }
}
