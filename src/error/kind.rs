//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// This enum provides a stable interface for matching on error types, so the
/// presentation layer can pick a message and severity per failure mode.
///
/// | ErrorKind         | Source                        | Typical handling            |
/// |-------------------|-------------------------------|-----------------------------|
/// | `Connection`      | network unreachable           | "try again" toast           |
/// | `Timeout`         | transport timeout             | "try again" toast           |
/// | `Unauthorized`    | HTTP 401                      | sign in again               |
/// | `Forbidden`       | HTTP 403                      | hide the action             |
/// | `NotFound`        | HTTP 404                      | refresh the list            |
/// | `Conflict`        | HTTP 409                      | explain the constraint      |
/// | `InvalidArgument` | HTTP 400 / 4xx                | show the server message     |
/// | `Unavailable`     | HTTP 5xx                      | "server unavailable" toast  |
/// | `InvalidResponse` | malformed success body        | report a bug                |
///
/// Nothing is retried automatically; the user re-triggers the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Authentication failed (missing, invalid or expired token).
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// The session is valid but lacks the role for this operation.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// Requested record was not found.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// The server rejected the request payload or parameters.
    ///
    /// HTTP: 400 Bad Request, and any other unmapped 4xx.
    #[error("invalid argument")]
    InvalidArgument,

    /// The mutation violates a server-side constraint.
    ///
    /// HTTP: 409 Conflict. Typical case: deleting a category that still
    /// has books, or a copy that is currently borrowed.
    #[error("conflict")]
    Conflict,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// The backend reported a server-side failure.
    ///
    /// HTTP: 5xx
    #[error("service unavailable")]
    Unavailable,

    /// Request timed out at the transport level.
    #[error("timeout")]
    Timeout,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Configuration error (invalid URL, insecure scheme, missing setting).
    #[error("configuration error")]
    Configuration,

    /// Transport layer error that fits no more specific category.
    #[error("transport error")]
    Transport,

    /// A success response whose body does not match the expected schema.
    #[error("invalid response")]
    InvalidResponse,

    /// Internal SDK error.
    #[error("internal error")]
    Internal,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if the failure happened before or outside the server
    /// (the request may never have been processed).
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::Connection | ErrorKind::Timeout | ErrorKind::Transport
        )
    }

    /// Returns `true` if the server explicitly rejected the request.
    #[inline]
    pub fn is_server_rejection(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unauthorized
                | ErrorKind::Forbidden
                | ErrorKind::NotFound
                | ErrorKind::InvalidArgument
                | ErrorKind::Conflict
                | ErrorKind::RateLimited
                | ErrorKind::Unavailable
        )
    }

    /// Returns the representative HTTP status code for this error kind.
    #[inline]
    pub fn http_status_code(&self) -> u16 {
        match self {
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidArgument => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::RateLimited => 429,
            ErrorKind::Timeout => 504,
            ErrorKind::Unavailable => 503,
            ErrorKind::Connection | ErrorKind::Transport | ErrorKind::InvalidResponse => 502,
            ErrorKind::Configuration | ErrorKind::Internal | ErrorKind::Unknown => 500,
        }
    }

    /// Creates an `ErrorKind` from an HTTP status code of a failed response.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if (500..600).contains(&status) => ErrorKind::Unavailable,
            _ => ErrorKind::Transport,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert_eq!(ErrorKind::from_http_status(400), ErrorKind::InvalidArgument);
        assert_eq!(ErrorKind::from_http_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_http_status(403), ErrorKind::Forbidden);
        assert_eq!(ErrorKind::from_http_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_http_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_http_status(429), ErrorKind::RateLimited);

        // 4xx range falls back to InvalidArgument
        assert_eq!(ErrorKind::from_http_status(405), ErrorKind::InvalidArgument);
        assert_eq!(ErrorKind::from_http_status(422), ErrorKind::InvalidArgument);

        // 5xx range is a server failure
        for status in [500u16, 502, 503, 504] {
            assert_eq!(ErrorKind::from_http_status(status), ErrorKind::Unavailable);
        }

        // Anything else is not an HTTP-level rejection
        assert_eq!(ErrorKind::from_http_status(301), ErrorKind::Transport);
    }

    #[test]
    fn test_http_status_code() {
        assert_eq!(ErrorKind::Unauthorized.http_status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.http_status_code(), 403);
        assert_eq!(ErrorKind::NotFound.http_status_code(), 404);
        assert_eq!(ErrorKind::InvalidArgument.http_status_code(), 400);
        assert_eq!(ErrorKind::Conflict.http_status_code(), 409);
        assert_eq!(ErrorKind::RateLimited.http_status_code(), 429);
        assert_eq!(ErrorKind::Timeout.http_status_code(), 504);
        assert_eq!(ErrorKind::Unavailable.http_status_code(), 503);
        assert_eq!(ErrorKind::InvalidResponse.http_status_code(), 502);
    }

    #[test]
    fn test_status_code_round_trip_for_rejections() {
        for kind in [
            ErrorKind::Unauthorized,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
            ErrorKind::InvalidArgument,
            ErrorKind::Conflict,
            ErrorKind::RateLimited,
            ErrorKind::Unavailable,
        ] {
            assert!(kind.is_server_rejection());
            assert_eq!(ErrorKind::from_http_status(kind.http_status_code()), kind);
        }
    }

    #[test]
    fn test_transport_classification() {
        assert!(ErrorKind::Connection.is_transport());
        assert!(ErrorKind::Timeout.is_transport());
        assert!(ErrorKind::Transport.is_transport());
        assert!(!ErrorKind::Conflict.is_transport());
        assert!(!ErrorKind::InvalidResponse.is_server_rejection());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorKind::Unauthorized), "unauthorized");
        assert_eq!(format!("{}", ErrorKind::Conflict), "conflict");
        assert_eq!(format!("{}", ErrorKind::Unavailable), "service unavailable");
        assert_eq!(format!("{}", ErrorKind::InvalidResponse), "invalid response");
        assert_eq!(format!("{}", ErrorKind::Configuration), "configuration error");
    }
}
