//! Error kind enumeration for categorizing failures.

/// Categorization of errors.
///
/// This enum provides a stable interface for matching on error types, enabling
/// different handling strategies for different failure modes.
///
/// ## Retriable vs Non-Retriable
///
/// | ErrorKind         | Retriable | Action                          |
/// |-------------------|-----------|---------------------------------|
/// | `Unavailable`     | Yes       | Retry with backoff              |
/// | `Timeout`         | Yes       | Retry with backoff              |
/// | `RateLimited`     | Yes       | Use `retry_after()` delay       |
/// | `Connection`      | Yes       | Retry with backoff              |
/// | `Validation`      | No        | Show field errors on the form   |
/// | `NotFound`        | No        | Record was deleted; close view  |
/// | `Cancelled`       | No        | Drop silently                   |
/// | `Unauthorized`    | No        | Sign in again                   |
/// | `Conflict`        | No        | Re-fetch and resubmit           |
/// | `InvalidArgument` | No        | Fix input                       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The backend rejected a payload with per-field messages.
    ///
    /// HTTP: 422 Unprocessable Entity, or 400 with an `errors` map
    #[error("validation failed")]
    Validation,

    /// Authentication failed (invalid or expired session).
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// Valid session but insufficient permissions.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// Requested record was not found, usually because it was deleted
    /// after the list was rendered.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Invalid request argument built on the client side.
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// Service temporarily unavailable.
    ///
    /// HTTP: 503 Service Unavailable
    #[error("service unavailable")]
    Unavailable,

    /// Request timed out.
    ///
    /// HTTP: 504 Gateway Timeout or client-side timeout
    #[error("timeout")]
    Timeout,

    /// Internal server error.
    ///
    /// HTTP: 500 Internal Server Error
    #[error("internal error")]
    Internal,

    /// The request was superseded by a newer one or aborted by the caller.
    ///
    /// Never shown to the user.
    #[error("cancelled")]
    Cancelled,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Configuration error (invalid URL, missing backend).
    #[error("configuration error")]
    Configuration,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,

    /// Conflict with existing resource state (duplicate code, stale update).
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// Transport layer error that fits no more specific category.
    #[error("transport error")]
    Transport,

    /// Response body could not be parsed.
    #[error("invalid response")]
    InvalidResponse,
}

/// The four ways a failure is surfaced to the person using the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Field-level messages routed back into the submitting form.
    Validation,
    /// Network or HTTP failure shown as a notification.
    Transport,
    /// Superseded or aborted request; dropped silently.
    Cancelled,
    /// Detail fetch for a record that no longer exists.
    NotFound,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopdesk::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_retriable());
    /// assert!(!ErrorKind::Validation.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::Connection
        )
    }

    /// Collapses this kind onto the user-facing category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::Validation | ErrorKind::InvalidArgument => ErrorCategory::Validation,
            ErrorKind::Cancelled => ErrorCategory::Cancelled,
            ErrorKind::NotFound => ErrorCategory::NotFound,
            _ => ErrorCategory::Transport,
        }
    }

    /// Returns the default HTTP status code for this error kind.
    #[inline]
    pub fn http_status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 422,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidArgument => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::RateLimited => 429,
            ErrorKind::Timeout => 504,
            ErrorKind::Unavailable => 503,
            ErrorKind::Internal => 500,
            ErrorKind::Cancelled => 499, // Client Closed Request
            ErrorKind::Connection | ErrorKind::Transport | ErrorKind::InvalidResponse => 502,
            ErrorKind::Configuration | ErrorKind::Unknown => 500,
        }
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::Validation,
            429 => ErrorKind::RateLimited,
            499 => ErrorKind::Cancelled,
            500 => ErrorKind::Internal,
            502 => ErrorKind::Transport,
            503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_is_retriable() {
        assert!(ErrorKind::Unavailable.is_retriable());
        assert!(ErrorKind::Timeout.is_retriable());
        assert!(ErrorKind::RateLimited.is_retriable());
        assert!(ErrorKind::Connection.is_retriable());

        assert!(!ErrorKind::Validation.is_retriable());
        assert!(!ErrorKind::NotFound.is_retriable());
        assert!(!ErrorKind::Cancelled.is_retriable());
        assert!(!ErrorKind::Conflict.is_retriable());
        assert!(!ErrorKind::Internal.is_retriable());
    }

    #[test_case(ErrorKind::Validation, ErrorCategory::Validation)]
    #[test_case(ErrorKind::InvalidArgument, ErrorCategory::Validation)]
    #[test_case(ErrorKind::Cancelled, ErrorCategory::Cancelled)]
    #[test_case(ErrorKind::NotFound, ErrorCategory::NotFound)]
    #[test_case(ErrorKind::Connection, ErrorCategory::Transport)]
    #[test_case(ErrorKind::Unavailable, ErrorCategory::Transport)]
    #[test_case(ErrorKind::Conflict, ErrorCategory::Transport)]
    #[test_case(ErrorKind::InvalidResponse, ErrorCategory::Transport)]
    fn test_category(kind: ErrorKind, expected: ErrorCategory) {
        assert_eq!(kind.category(), expected);
    }

    #[test_case(400, ErrorKind::InvalidArgument)]
    #[test_case(401, ErrorKind::Unauthorized)]
    #[test_case(403, ErrorKind::Forbidden)]
    #[test_case(404, ErrorKind::NotFound)]
    #[test_case(409, ErrorKind::Conflict)]
    #[test_case(422, ErrorKind::Validation)]
    #[test_case(429, ErrorKind::RateLimited)]
    #[test_case(500, ErrorKind::Internal)]
    #[test_case(502, ErrorKind::Transport)]
    #[test_case(503, ErrorKind::Unavailable)]
    #[test_case(504, ErrorKind::Timeout)]
    #[test_case(405, ErrorKind::InvalidArgument)]
    #[test_case(501, ErrorKind::Internal)]
    #[test_case(301, ErrorKind::Unknown)]
    fn test_from_http_status(status: u16, expected: ErrorKind) {
        assert_eq!(ErrorKind::from_http_status(status), expected);
    }

    #[test]
    fn test_http_status_round_trip_for_direct_mappings() {
        for kind in [
            ErrorKind::Validation,
            ErrorKind::Unauthorized,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::RateLimited,
            ErrorKind::Unavailable,
            ErrorKind::Timeout,
        ] {
            assert_eq!(ErrorKind::from_http_status(kind.http_status_code()), kind);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::Validation.to_string(), "validation failed");
        assert_eq!(ErrorKind::Cancelled.to_string(), "cancelled");
        assert_eq!(ErrorKind::NotFound.to_string(), "not found");
        assert_eq!(ErrorKind::Transport.to_string(), "transport error");
        assert_eq!(ErrorKind::Unavailable.to_string(), "service unavailable");
    }
}
