//! TLS configuration for the REST transport.

use std::path::PathBuf;

/// TLS settings for connections to the library backend.
///
/// By default the transport trusts the platform roots and validates server
/// certificates. Campus deployments often sit behind an internal CA, which
/// can be added here.
///
/// ## Example
///
/// ```rust
/// use shelfdesk::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/library/ca.crt")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Custom CA certificate file path.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Custom CA certificate PEM data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Whether to skip certificate verification and allow plain HTTP.
    ///
    /// **WARNING**: only for a backend running on the developer's machine.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates a config that skips verification and allows `http://` URLs.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if a custom CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = TlsConfig::default();
        assert!(config.ca_cert_file.is_none());
        assert!(!config.skip_verification);
        assert!(!config.has_custom_ca());
    }

    #[test]
    fn test_ca_cert_file() {
        let config = TlsConfig::builder().ca_cert_file("/path/to/ca.crt").build();
        assert!(config.has_custom_ca());
        assert_eq!(config.ca_cert_file, Some(PathBuf::from("/path/to/ca.crt")));
    }

    #[test]
    fn test_ca_cert_pem() {
        let config = TlsConfig::builder()
            .ca_cert_pem("-----BEGIN CERTIFICATE-----")
            .build();
        assert!(config.has_custom_ca());
    }

    #[test]
    fn test_insecure() {
        let config = TlsConfig::insecure();
        assert!(config.skip_verification);
    }
}
