//! REST transport implementation using reqwest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::config::{TlsConfig, DEFAULT_TIMEOUT};
use crate::error::ErrorKind;
use crate::transport::traits::{
    ApiRequest, ApiResponse, Method, Transport, TransportClient, TransportStats,
};
use crate::user_agent;
use crate::Error;

/// Header carrying the server-assigned request id.
const REQUEST_ID_HEADER: &str = "x-request-id";

// ============================================================================
// REST Transport
// ============================================================================

/// REST transport using reqwest.
///
/// Joins request paths onto the base URL, attaches JSON and credential
/// headers, and returns every response that arrives regardless of status.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
    stats: Arc<RestCounters>,
}

#[derive(Debug, Default)]
struct RestCounters {
    sent: AtomicU64,
    failed: AtomicU64,
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

    /// Creates a new REST transport with the given configuration.
    pub fn new(base_url: Url, tls_config: &TlsConfig, timeout: Duration) -> Result<Self, Error> {
        #[allow(unused_mut)]
        let mut client_builder = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent::user_agent());

        #[cfg(any(feature = "rustls", feature = "native-tls"))]
        {
            if tls_config.skip_verification {
                client_builder = client_builder.danger_accept_invalid_certs(true);
            }

            if let Some(ref ca_cert_file) = tls_config.ca_cert_file {
                let cert_pem = std::fs::read(ca_cert_file).map_err(|e| {
                    Error::new(
                        ErrorKind::Configuration,
                        format!("Failed to read certificate {:?}: {}", ca_cert_file, e),
                    )
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| {
                    Error::new(
                        ErrorKind::Configuration,
                        format!("Invalid certificate {:?}: {}", ca_cert_file, e),
                    )
                })?;
                client_builder = client_builder.add_root_certificate(cert);
            }

            if let Some(ref ca_cert_pem) = tls_config.ca_cert_pem {
                let cert = reqwest::Certificate::from_pem(ca_cert_pem.as_bytes()).map_err(|e| {
                    Error::new(
                        ErrorKind::Configuration,
                        format!("Invalid CA certificate PEM: {}", e),
                    )
                })?;
                client_builder = client_builder.add_root_certificate(cert);
            }
        }

        #[cfg(not(any(feature = "rustls", feature = "native-tls")))]
        if tls_config.skip_verification || tls_config.has_custom_ca() {
            return Err(Error::configuration(
                "TLS settings require the `rustls` or `native-tls` feature",
            ));
        }

        let client = client_builder.build().map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            base_url: normalize_base(base_url),
            stats: Arc::new(RestCounters::default()),
        })
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path and query against the base URL.
    ///
    /// Paths are treated as relative to the base, so a base of
    /// `https://host/library/` keeps its `/library` prefix.
    fn endpoint(&self, request: &ApiRequest) -> Result<Url, Error> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| Error::new(ErrorKind::Configuration, format!("Invalid URL path: {}", e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.pairs());
        }
        Ok(url)
    }

    /// Builds headers for a request.
    fn build_headers(&self, request: &ApiRequest) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if request.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if let Some(ref auth_value) = request.authorization {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(auth_value).map_err(|_| {
                    Error::new(ErrorKind::Unauthorized, "Invalid auth token format")
                })?,
            );
        }

        Ok(headers)
    }
}

/// Ensures the base path ends with `/` so relative joins append to it.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait::async_trait]
impl TransportClient for RestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let url = self.endpoint(&request)?;
        let headers = self.build_headers(&request)?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        }
        .headers(headers);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        self.stats.sent.fetch_add(1, Ordering::Relaxed);
        let response = builder.send().await.map_err(|e| {
            self.stats.failed.fetch_add(1, Ordering::Relaxed);
            map_reqwest_error(e)
        })?;

        let status = response.status().as_u16();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| {
            self.stats.failed.fetch_add(1, Ordering::Relaxed);
            map_reqwest_error(e)
        })?;

        Ok(ApiResponse {
            status,
            body,
            request_id,
        })
    }

    fn transport_type(&self) -> Transport {
        Transport::Http
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            requests_sent: self.stats.sent.load(Ordering::Relaxed),
            requests_failed: self.stats.failed.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// REST Transport Builder
// ============================================================================

/// Builder for REST transport.
pub struct RestTransportBuilder {
    base_url: Option<Url>,
    tls_config: TlsConfig,
    timeout: Duration,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            tls_config: TlsConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        self.base_url = Some(Url::parse(url.as_ref()).map_err(|e| {
            Error::new(ErrorKind::Configuration, format!("Invalid base URL: {}", e))
        })?);
        Ok(self)
    }

    /// Sets the TLS configuration.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the REST transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::new(ErrorKind::Configuration, "Base URL is required"))?;

        RestTransport::new(base_url, &self.tls_config, self.timeout)
    }
}

/// Maps reqwest errors to SDK errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::new(ErrorKind::Timeout, format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::new(ErrorKind::Connection, format!("Connection failed: {}", e))
    } else if e.is_request() {
        Error::new(ErrorKind::InvalidArgument, format!("Invalid request: {}", e))
    } else {
        Error::new(ErrorKind::Transport, format!("HTTP error: {}", e))
    }
}

// ============================================================================
// Tests
// ============================================================================
