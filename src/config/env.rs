//! Client configuration loaded from the environment.

use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use crate::auth::{Role, Session};
use crate::Error;

/// Prefix shared by every client environment variable.
pub const ENV_PREFIX: &str = "SHELFDESK";
/// Environment variable holding the backend base URL (required).
pub const ENV_API_URL: &str = "SHELFDESK_API_URL";
/// Environment variable holding a bearer token.
pub const ENV_API_TOKEN: &str = "SHELFDESK_API_TOKEN";
/// Environment variable holding the subject id that belongs to the token.
pub const ENV_SUBJECT_ID: &str = "SHELFDESK_SUBJECT_ID";
/// Environment variable holding comma-separated role claims.
pub const ENV_ROLES: &str = "SHELFDESK_ROLES";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "SHELFDESK_TIMEOUT_SECS";
/// Environment variable that allows plain HTTP when set to `1`, `true` or `yes`.
pub const ENV_INSECURE: &str = "SHELFDESK_INSECURE";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Flat client configuration, typically read from the environment.
///
/// ## Example
///
/// ```rust,ignore
/// use shelfdesk::{Client, ClientConfig};
///
/// let client = Client::from_config(ClientConfig::from_env()?)?;
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL.
    pub url: String,
    /// Session to attach to requests, if any.
    pub session: Option<Session>,
    /// Request timeout.
    pub timeout: Duration,
    /// Whether plain HTTP and unverified certificates are allowed.
    pub insecure: bool,
}

/// Raw settings as read from `SHELFDESK_*` variables.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvSettings {
    api_url: Option<String>,
    api_token: Option<String>,
    subject_id: Option<String>,
    roles: Option<Vec<String>>,
    timeout_secs: Option<u64>,
    insecure: Option<bool>,
}

impl ClientConfig {
    /// Creates a configuration for `url` with defaults.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            session: None,
            timeout: DEFAULT_TIMEOUT,
            insecure: false,
        }
    }

    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `SHELFDESK_API_URL` is missing or a
    /// variable does not parse.
    pub fn from_env() -> Result<Self, Error> {
        Self::load(environment())
    }

    /// Reads the configuration from an explicit set of variables instead of
    /// the process environment.
    ///
    /// Keys use the same `SHELFDESK_*` names as [`from_env`](Self::from_env).
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> =
            vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::load(environment().source(Some(vars)))
    }

    fn load(source: Environment) -> Result<Self, Error> {
        let settings: EnvSettings = Config::builder()
            .add_source(source)
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| {
                Error::configuration(format!("invalid client configuration: {}", e))
                    .with_source(e)
            })?;

        let url = settings
            .api_url
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration(format!("environment variable {} not set", ENV_API_URL))
            })?;

        let mut config = Self::new(url.trim());

        if let Some(token) = settings.api_token.filter(|v| !v.trim().is_empty()) {
            let mut session = Session::new(token.trim());
            if let Some(subject) = settings.subject_id.filter(|v| !v.trim().is_empty()) {
                session = session.with_subject_id(subject.trim());
            }
            for role in settings.roles.unwrap_or_default() {
                if !role.trim().is_empty() {
                    session = session.with_role(Role::parse(&role));
                }
            }
            config.session = Some(session);
        }

        if let Some(secs) = settings.timeout_secs {
            config.timeout = Duration::from_secs(secs.max(1));
        }
        config.insecure = settings.insecure.unwrap_or(false);

        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .try_parsing(true)
        .ignore_empty(true)
        .list_separator(",")
        .with_list_parse_key("roles")
}
