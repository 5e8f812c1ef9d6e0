//! Transport abstraction shared by the REST and mock transports.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::types::Query;
use crate::Error;

// ============================================================================
// Transport Type
// ============================================================================

/// Transport implementation in use by a client.
///
/// ## Example
///
/// ```rust
/// use shelfdesk::transport::Transport;
///
/// let transport = Transport::Http;
/// assert!(transport.is_http());
/// assert_eq!(transport.to_string(), "HTTP");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// REST over HTTP (default).
    #[default]
    Http,
    /// In-memory mock, for testing without network.
    Mock,
    /// A caller-supplied [`TransportClient`].
    Custom,
}

impl Transport {
    /// Returns `true` if this is HTTP/REST transport.
    pub fn is_http(&self) -> bool {
        matches!(self, Transport::Http)
    }

    /// Returns `true` if this is mock transport.
    pub fn is_mock(&self) -> bool {
        matches!(self, Transport::Mock)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Http => write!(f, "HTTP"),
            Transport::Mock => write!(f, "mock"),
            Transport::Custom => write!(f, "custom"),
        }
    }
}

// ============================================================================
// Requests and Responses
// ============================================================================

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the method name in upper case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request handed to a transport.
///
/// `path` is absolute from the API root (`/api/authors/search`). The
/// `authorization` value is the full header value (`Bearer ...`) and is
/// redacted from `Debug` output.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path below the base URL.
    pub path: String,
    /// Query parameters.
    pub query: Query,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
    /// `Authorization` header value, if a session is attached.
    pub authorization: Option<Arc<str>>,
}

impl ApiRequest {
    /// Creates a request without query parameters, body, or credentials.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: None,
            authorization: None,
        }
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the `Authorization` header value.
    #[must_use]
    pub fn with_authorization(mut self, value: impl Into<Arc<str>>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Returns `true` if this request targets `method` and `path`.
    pub fn is(&self, method: Method, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("authorization", &self.authorization.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// A raw response returned by a transport.
///
/// Transports do not interpret status codes; the client maps non-2xx
/// statuses to [`Error`] values in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
    /// Value of the `x-request-id` header, if present.
    pub request_id: Option<String>,
}

impl ApiResponse {
    /// Creates a response with the given status and body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            request_id: None,
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ============================================================================
// Transport Statistics
// ============================================================================

/// Counters kept by a transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Requests handed to the transport.
    pub requests_sent: u64,
    /// Requests that failed before a response arrived.
    pub requests_failed: u64,
}

// ============================================================================
// Transport Client Trait
// ============================================================================

/// A transport capable of delivering [`ApiRequest`]s.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status, and `Err` only when no response could be obtained (connection
/// refused, timeout, TLS failure).
#[async_trait::async_trait]
pub trait TransportClient: Send + Sync {
    /// Sends a request and returns the raw response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error>;

    /// Returns the transport type.
    fn transport_type(&self) -> Transport;

    /// Returns the transport counters.
    fn stats(&self) -> TransportStats {
        TransportStats::default()
    }
}
