//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::{
    auth::Session,
    config::{ClientConfig, TlsConfig, DEFAULT_TIMEOUT},
    transport::TransportClient,
    Client, Error,
};

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern to ensure the backend URL is provided at
/// compile time.
///
/// ## Optional Configuration
///
/// - `session()`: Bearer token and role claims attached to every request
/// - `tls_config()`: Custom TLS settings
/// - `insecure()`: Allow plain HTTP and unverified certificates
/// - `timeout()`: Request timeout
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use shelfdesk::{Client, Session};
///
/// let client = Client::builder()
///     .url("https://library.example.com")
///     .session(Session::new("eyJhbGciOi...").with_role("ADMIN"))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// assert!(client.session().is_some_and(|s| s.is_admin()));
/// # Ok::<(), shelfdesk::Error>(())
/// ```
pub struct ClientBuilder<UrlState> {
    url: Option<String>,
    session: Option<Session>,
    tls_config: TlsConfig,
    timeout: Option<Duration>,
    _url_state: PhantomData<UrlState>,
}

impl ClientBuilder<NoUrl> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            session: None,
            tls_config: TlsConfig::default(),
            timeout: None,
            _url_state: PhantomData,
        }
    }

    /// Sets the backend base URL.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let builder = Client::builder().url("https://library.example.com");
    /// ```
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasUrl> {
        ClientBuilder {
            url: Some(url.into()),
            session: self.session,
            tls_config: self.tls_config,
            timeout: self.timeout,
            _url_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ClientBuilder<U> {
    /// Sets the session whose token is sent as `Authorization: Bearer`.
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the TLS configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use shelfdesk::TlsConfig;
    ///
    /// let builder = builder.tls_config(
    ///     TlsConfig::builder().ca_cert_file("/path/to/ca.crt").build()
    /// );
    /// ```
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Disables TLS certificate verification and allows HTTP connections.
    ///
    /// **WARNING**: This is insecure and should only be used for local development.
    /// Never use this in production.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }
}

impl ClientBuilder<HasUrl> {
    /// Builds the client on top of a caller-supplied transport.
    ///
    /// The URL is still validated but no HTTP client is created; this is
    /// how tests inject a [`MockTransport`](crate::transport::MockTransport).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse.
    pub fn build_with_transport<T>(self, transport: Arc<T>) -> Result<Client, Error>
    where
        T: TransportClient + 'static,
    {
        let url = self.url.ok_or_else(|| Error::configuration("URL is required"))?;
        url::Url::parse(&url).map_err(|e| Error::configuration(format!("invalid URL: {}", e)))?;

        let inner = ClientInner {
            url,
            session: self.session,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            transport,
        };
        Ok(Client::from_inner(inner))
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is invalid
    /// - The URL is not HTTPS and `insecure()` was not set
    /// - The TLS configuration cannot be applied
    #[cfg(feature = "rest")]
    pub fn build(self) -> Result<Client, Error> {
        let url = self.url.clone().ok_or_else(|| Error::configuration("URL is required"))?;

        let parsed_url = url::Url::parse(&url)
            .map_err(|e| Error::configuration(format!("invalid URL: {}", e)))?;

        // Ensure HTTPS unless insecure mode is enabled
        if parsed_url.scheme() != "https" && !self.tls_config.skip_verification {
            return Err(Error::configuration(
                "HTTPS is required. Use .insecure() for development with HTTP.",
            ));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let transport = RestTransport::new(parsed_url, &self.tls_config, timeout)?;
        tracing::debug!(url = %url, "client built");

        let inner = ClientInner {
            url,
            session: self.session,
            timeout,
            transport: Arc::new(transport),
        };
        Ok(Client::from_inner(inner))
    }
}

impl ClientBuilder<HasUrl> {
    /// Creates a builder pre-populated from a [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Self {
        let mut builder = ClientBuilder::new().url(config.url).timeout(config.timeout);
        if let Some(session) = config.session {
            builder = builder.session(session);
        }
        if config.insecure {
            builder = builder.insecure();
        }
        builder
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::transport::{MockTransport, Transport};
    use crate::ErrorKind;

    #[test]
    fn test_build_invalid_url() {
        let result = ClientBuilder::new().url("not-a-valid-url").build();
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_build_requires_https() {
        let err = ClientBuilder::new().url("http://library.example.com").build().unwrap_err();
        assert!(err.to_string().contains("HTTPS"));
    }

    #[test]
    fn test_build_allows_http_when_insecure() {
        let client = ClientBuilder::new()
            .url("http://localhost:8080")
            .insecure()
            .build()
            .unwrap();
        assert_eq!(client.url(), "http://localhost:8080");
        assert_eq!(client.transport_type(), Transport::Http);
    }

    #[test]
    fn test_build_with_transport_skips_https_check() {
        let client = ClientBuilder::new()
            .url("http://localhost:8080")
            .session(Session::new("token"))
            .build_with_transport(Arc::new(MockTransport::new()))
            .unwrap();
        assert_eq!(client.transport_type(), Transport::Mock);
        assert_eq!(client.session().unwrap().token(), "token");
    }

    #[test]
    fn test_build_with_transport_still_parses_url() {
        let result = ClientBuilder::new()
            .url("::::")
            .build_with_transport(Arc::new(MockTransport::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config() {
        let mut config = ClientConfig::new("http://localhost:8080");
        config.insecure = true;
        config.timeout = Duration::from_secs(5);
        config.session = Some(Session::new("abc"));

        let builder = ClientBuilder::from_config(config);
        assert!(builder.tls_config.skip_verification);
        assert_eq!(builder.timeout, Some(Duration::from_secs(5)));
        assert!(builder.build().is_ok());
    }
}
