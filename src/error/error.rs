//! Main error type.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use super::{ErrorCategory, ErrorKind};
use crate::forms::FieldErrors;

/// The primary error type for shopdesk operations.
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── request_id: Option       (server-assigned correlation ID)
/// ├── retry_after: Option      (rate limit delay hint)
/// ├── field_errors: Option     (backend validation payload)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use shopdesk::{Error, ErrorCategory};
///
/// fn surface(err: &Error) -> Option<String> {
///     match err.kind().category() {
///         ErrorCategory::Cancelled => None,
///         ErrorCategory::Validation => err
///             .field_errors()
///             .and_then(|fields| fields.message.clone())
///             .or_else(|| Some(err.notification())),
///         _ => Some(err.notification()),
///     }
/// }
///
/// assert!(surface(&Error::cancelled()).is_none());
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    request_id: Option<String>,
    retry_after: Option<Duration>,
    field_errors: Option<Box<FieldErrors>>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopdesk::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::InvalidArgument, "page size must be positive");
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            request_id: None,
            retry_after: None,
            field_errors: None,
            source: None,
        }
    }

    /// Creates an error from a kind with a default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Validation => "validation failed",
            ErrorKind::Unauthorized => "authentication failed",
            ErrorKind::Forbidden => "permission denied",
            ErrorKind::NotFound => "record not found",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::RateLimited => "rate limit exceeded",
            ErrorKind::Unavailable => "service unavailable",
            ErrorKind::Timeout => "request timed out",
            ErrorKind::Internal => "internal server error",
            ErrorKind::Cancelled => "request cancelled",
            ErrorKind::Connection => "connection failed",
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Unknown => "unknown error",
            ErrorKind::Conflict => "conflicting record state",
            ErrorKind::Transport => "transport error",
            ErrorKind::InvalidResponse => "invalid response",
        };
        Self::new(kind, message)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the user-facing category of this error.
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns the human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the server-assigned request ID, if available.
    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the recommended retry delay for rate limit errors.
    #[inline]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Returns the per-field messages attached by the backend, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_deref()
    }

    /// Returns `true` if this error is generally safe to retry.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Returns `true` if the error must never reach the user.
    ///
    /// Only cancellations are silent: a superseded fetch is expected
    /// whenever parameters change faster than the backend answers.
    #[inline]
    pub fn is_silent(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }

    /// Returns the one-line notification text for this error.
    ///
    /// Validation errors prefer the backend's summary message.
    pub fn notification(&self) -> String {
        if let Some(summary) = self.field_errors().and_then(|f| f.message.as_deref()) {
            return summary.to_string();
        }
        match self.kind.category() {
            ErrorCategory::NotFound => format!("{} (it may have been deleted)", self.message),
            _ => self.message.to_string(),
        }
    }

    /// Sets the request ID for this error.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Sets the retry-after duration for this error.
    #[must_use]
    pub fn with_retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    /// Attaches backend field errors to this error.
    #[must_use]
    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.field_errors = Some(Box::new(errors));
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for common error types

    /// Creates a validation error carrying the backend's field map.
    pub fn validation(errors: FieldErrors) -> Self {
        let message = errors
            .message
            .clone()
            .map(Cow::Owned)
            .unwrap_or(Cow::Borrowed("validation failed"));
        Self::new(ErrorKind::Validation, message).with_field_errors(errors)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a not found error for a record identifier.
    pub fn record_not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::not_found(format!("{} {} not found", resource, id))
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Creates a rate limited error.
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        let mut err = Self::from_kind(ErrorKind::RateLimited);
        err.retry_after = retry_after;
        err
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Creates a cancelled error.
    pub fn cancelled() -> Self {
        Self::from_kind(ErrorKind::Cancelled)
    }

    /// Creates a cancelled error for a fetch that lost to a newer one.
    pub fn superseded() -> Self {
        Self::new(ErrorKind::Cancelled, "superseded by a newer request")
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a generic transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref request_id) = self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::validation(errors)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::InvalidResponse, format!("JSON error: {}", err)).with_source(err)
    }
}
