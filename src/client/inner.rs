//! Internal client implementation.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use crate::auth::Session;
use crate::error::{Error, ErrorKind};
use crate::transport::{ApiRequest, ApiResponse, Method, TransportClient};
use crate::types::Query;

#[derive(Clone)]
pub(crate) struct ClientInner {
    /// The backend base URL.
    pub url: String,

    /// Session whose token is attached to every request.
    pub session: Option<Session>,

    /// Request timeout, applied on top of the transport's own.
    pub timeout: Duration,

    /// Transport used for all calls.
    pub transport: Arc<dyn TransportClient>,
}

impl ClientInner {
    /// Sends a request with the session's credentials attached.
    pub(crate) async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, Error> {
        if let Some(ref session) = self.session {
            request = request.with_authorization(session.authorization());
        }
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(%method, %path, query = %request.query.to_query_string(), "sending request");

        match tokio::time::timeout(self.timeout, self.transport.send(request)).await {
            Ok(Ok(response)) => {
                tracing::debug!(%method, %path, status = response.status, "response received");
                Ok(response)
            }
            Ok(Err(error)) => {
                tracing::warn!(%method, %path, error = %error, "request failed");
                Err(error)
            }
            Err(_) => {
                tracing::warn!(%method, %path, timeout = ?self.timeout, "request timed out");
                Err(Error::timeout(format!(
                    "{} {} timed out after {:?}",
                    method, path, self.timeout
                )))
            }
        }
    }

    /// Makes a GET request.
    pub(crate) async fn api_get<R>(&self, path: &str, query: Query) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Get, path).with_query(query);
        let response = self.send(request).await?;
        handle_response(response)
    }

    /// Makes a write request (`POST`/`PUT`) with an optional JSON body.
    ///
    /// Decoding is lenient: a successful response whose body is not an `R`
    /// (plain-text confirmations, empty bodies) yields `Ok(None)`.
    pub(crate) async fn api_write<T, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<Option<R>, Error>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_body(encode_body(body)?);
        }
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(map_status_error(&response));
        }
        match serde_json::from_slice(&response.body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::debug!(%method, %path, error = %e, "write response carried no record");
                Ok(None)
            }
        }
    }

    /// Makes a DELETE request.
    pub(crate) async fn api_delete(&self, path: &str) -> Result<(), Error> {
        let response = self.send(ApiRequest::new(Method::Delete, path)).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(map_status_error(&response))
        }
    }
}

fn encode_body<T: Serialize + ?Sized>(body: &T) -> Result<serde_json::Value, Error> {
    serde_json::to_value(body).map_err(|e| {
        Error::new(
            ErrorKind::InvalidArgument,
            format!("Failed to encode request body: {}", e),
        )
    })
}

/// Decodes a successful response, or maps a failed one to an error.
///
/// An empty body decodes as JSON `null`, so `()` and `Option<T>` targets
/// accept `204 No Content`.
pub(crate) fn handle_response<R>(response: ApiResponse) -> Result<R, Error>
where
    R: DeserializeOwned,
{
    if !response.is_success() {
        return Err(map_status_error(&response));
    }

    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };
    serde_json::from_slice(body).map_err(|e| {
        let error = Error::new(
            ErrorKind::InvalidResponse,
            format!("Failed to parse response: {}", e),
        );
        match response.request_id {
            Some(ref id) => error.with_request_id(id.clone()),
            None => error,
        }
    })
}

/// Maps a non-2xx response to an SDK error.
///
/// The message is taken from a JSON `message` or `error` field when present,
/// otherwise from the raw body.
pub(crate) fn map_status_error(response: &ApiResponse) -> Error {
    let body = response.text();
    let body = body.trim();
    let message = if body.is_empty() {
        format!("HTTP {}", response.status)
    } else if let Ok(error) = serde_json::from_str::<serde_json::Value>(body) {
        error
            .get("message")
            .or_else(|| error.get("error"))
            .and_then(|e| e.as_str())
            .unwrap_or(body)
            .to_string()
    } else {
        body.to_string()
    };

    let error = Error::new(ErrorKind::from_http_status(response.status), message);
    match response.request_id {
        Some(ref id) => error.with_request_id(id.clone()),
        None => error,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(status, body.to_string())
    }

    #[test]
    fn test_map_status_error_kinds() {
        let cases = [
            (400, ErrorKind::InvalidArgument),
            (401, ErrorKind::Unauthorized),
            (403, ErrorKind::Forbidden),
            (404, ErrorKind::NotFound),
            (409, ErrorKind::Conflict),
            (422, ErrorKind::InvalidArgument),
            (429, ErrorKind::RateLimited),
            (500, ErrorKind::Unavailable),
            (503, ErrorKind::Unavailable),
            (302, ErrorKind::Transport),
        ];
        for (status, kind) in cases {
            assert_eq!(map_status_error(&response(status, "")).kind(), kind, "status {status}");
        }
    }

    #[test]
    fn test_map_status_error_message_sources() {
        let json_message = response(400, r#"{"message":"Title is required"}"#);
        assert_eq!(map_status_error(&json_message).message(), "Title is required");

        let json_error = response(404, r#"{"error":"Book not found"}"#);
        assert_eq!(map_status_error(&json_error).message(), "Book not found");

        let plain = response(409, "Copy is on loan");
        assert_eq!(map_status_error(&plain).message(), "Copy is on loan");

        assert_eq!(map_status_error(&response(500, "  ")).message(), "HTTP 500");
    }

    #[test]
    fn test_map_status_error_keeps_request_id() {
        let mut failed = response(500, "boom");
        failed.request_id = Some("req-9".into());
        assert_eq!(map_status_error(&failed).request_id(), Some("req-9"));
    }

    #[test]
    fn test_handle_response_decodes_json() {
        let value: Vec<u32> = handle_response(response(200, "[1,2,3]")).unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_handle_response_empty_body_is_null() {
        handle_response::<()>(response(204, "")).unwrap();
        let value: Option<u32> = handle_response(response(200, "")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_handle_response_rejects_malformed_json() {
        let err = handle_response::<Vec<u32>>(response(200, "{not json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }
}
