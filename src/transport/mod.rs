//! Transport layer for backend communication.
//!
//! This module provides the underlying transport implementations:
//!
//! - REST transport (via reqwest) - default
//! - Mock transport - for testing without network
//!
//! Most callers never touch a transport directly; they go through
//! [`Client`](crate::Client). Tests and embedders can hand any
//! [`TransportClient`] to
//! [`ClientBuilder::build_with_transport`](crate::ClientBuilder::build_with_transport).
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable REST transport

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

pub(crate) mod mock;

pub use mock::{HeldRequest, MockResponse, MockTransport};
pub use traits::{ApiRequest, ApiResponse, Method, Transport, TransportClient, TransportStats};

#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};
