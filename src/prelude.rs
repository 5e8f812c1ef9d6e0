//! Prelude module for convenient imports.
//!
//! ```rust
//! use shelfdesk::prelude::*;
//! ```
//!
//! Brings in the client, the list controller and its results, every
//! resource descriptor, the notification sinks and the error types.

pub use crate::{
    auth::{Credentials, Registration, Role, Session},
    client::{Client, ClientBuilder, ResourceClient},
    config::{ClientConfig, ListConfig, TlsConfig},
    error::{Error, ErrorKind, Result},
    list::{FetchStatus, LastError, ListSnapshot, MutationOutcome, ResourceListController},
    notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier},
    resources::*,
    statistics::StatisticsClient,
    types::{FilterSet, FilterValue, PageRequest, PagedResult, Query},
    validation::ValidationReport,
};
