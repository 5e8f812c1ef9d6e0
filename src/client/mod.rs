//! Client types for the library backend.
//!
//! The client is layered:
//! - [`Client`]: connection, session and transport, cheap to clone
//! - [`ResourceClient`]: stateless calls against one resource
//! - [`ResourceListController`]: a paginated, filtered list view of one resource
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shelfdesk::prelude::*;
//!
//! let client = Client::builder()
//!     .url("https://library.example.com")
//!     .session(Session::new(token).with_role(Role::Admin))
//!     .build()?;
//!
//! let authors = client.list::<Authors>(TracingNotifier);
//! authors.fetch().await?;
//! println!("{} authors", authors.snapshot().total_elements);
//! ```

mod account;
mod builder;
pub(crate) mod inner;
mod resource;

pub use builder::{ClientBuilder, HasUrl, NoUrl};
pub use resource::ResourceClient;

use std::sync::Arc;

use crate::auth::Session;
use crate::config::ListConfig;
use crate::list::ResourceListController;
use crate::notify::Notifier;
use crate::resources::Resource;
use crate::statistics::StatisticsClient;
use crate::transport::{Transport, TransportStats};

/// The shelfdesk client.
///
/// Entry point of the crate. Create one with [`Client::builder()`] or
/// [`Client::from_config`], then open resource clients and list
/// controllers from it.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share the same transport and
/// connection pool.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    ///
    /// The builder uses the typestate pattern so that a client without a
    /// URL cannot be built.
    pub fn builder() -> ClientBuilder<NoUrl> {
        ClientBuilder::new()
    }

    /// Builds an HTTP client from flat configuration.
    ///
    /// # Errors
    ///
    /// Fails when the URL is invalid, or not HTTPS without `insecure`.
    #[cfg(feature = "rest")]
    pub fn from_config(config: crate::config::ClientConfig) -> Result<Self, crate::Error> {
        ClientBuilder::from_config(config).build()
    }

    /// Returns the base URL of the client.
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Returns the session attached to requests, if any.
    pub fn session(&self) -> Option<&Session> {
        self.inner.session.as_ref()
    }

    /// Returns a client sharing this one's transport but acting under
    /// another session.
    #[must_use]
    pub fn with_session(&self, session: Session) -> Self {
        let mut inner = (*self.inner).clone();
        inner.session = Some(session);
        Self::from_inner(inner)
    }

    /// Returns the kind of transport in use.
    pub fn transport_type(&self) -> Transport {
        self.inner.transport.transport_type()
    }

    /// Returns request counters of the transport.
    pub fn transport_stats(&self) -> TransportStats {
        self.inner.transport.stats()
    }

    /// Returns a stateless client for one resource.
    ///
    /// ```rust,ignore
    /// let cards = client.resource::<LibraryCards>();
    /// cards.review(&card_id, CardAction::Approve).await?;
    /// ```
    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(self.clone())
    }

    /// Opens a list controller with the default [`ListConfig`].
    pub fn list<R: Resource>(&self, notifier: impl Notifier + 'static) -> ResourceListController<R> {
        self.list_with_config(notifier, ListConfig::default())
    }

    /// Opens a list controller with explicit configuration.
    pub fn list_with_config<R: Resource>(
        &self,
        notifier: impl Notifier + 'static,
        config: ListConfig,
    ) -> ResourceListController<R> {
        ResourceListController::new(self.resource::<R>(), Arc::new(notifier), config)
    }

    /// Returns the dashboard statistics client.
    pub fn statistics(&self) -> StatisticsClient {
        StatisticsClient::new(self.clone())
    }

    /// Creates a client from the inner implementation.
    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns a reference to the inner client.
    pub(crate) fn inner(&self) -> &inner::ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.inner.url)
            .field("transport", &self.transport_type())
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}
