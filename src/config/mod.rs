//! Configuration types for the shelfdesk SDK.
//!
//! This module provides configuration options for:
//! - [`ClientConfig`]: Flat client settings, loadable from the environment
//! - [`ListConfig`]: Page size and notification behavior of a list controller
//! - [`TlsConfig`]: TLS/SSL settings

mod env;
mod list;
mod tls;

pub use env::{
    ClientConfig, DEFAULT_TIMEOUT, ENV_API_TOKEN, ENV_API_URL, ENV_INSECURE, ENV_PREFIX, ENV_ROLES,
    ENV_SUBJECT_ID, ENV_TIMEOUT_SECS,
};
pub use list::{DEFAULT_PAGE_SIZE, ListConfig, SELECTION_PAGE_SIZE};
pub use tls::TlsConfig;
