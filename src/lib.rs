//! # shelfdesk
//!
//! Client SDK for a library-management backend: the state and transport
//! layer behind an admin console and a member-facing catalog.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shelfdesk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), shelfdesk::Error> {
//!     let client = Client::builder()
//!         .url("https://library.example.com")
//!         .session(Session::new(token).with_role(Role::Admin))
//!         .build()?;
//!
//!     let books = client.list::<Books>(TracingNotifier);
//!     books.set_filter("title", "Dune");
//!     books.apply_filters().await?;
//!
//!     for book in books.snapshot().items.iter() {
//!         println!("{} ({} available)", book.title, book.available_quantity.unwrap_or(0));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Resources**: zero-sized descriptors (`Books`, `Members`, ...) naming a
//!   record type, a payload type, endpoints and validation rules
//! - **List controllers**: one per on-screen list; last request wins, and
//!   mutations re-fetch instead of patching locally
//! - **Validation before transport**: invalid payloads never reach the
//!   network and come back as [`MutationOutcome::Invalid`]
//! - **Pages**: 1-based in this API, 0-based on the wire
//!
//! ## Features
//!
//! - `rest` (default): REST transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod list;
pub mod notify;
pub mod resources;
pub mod statistics;
pub mod types;
pub mod validation;

// Transport layer
pub mod transport;

// Testing utilities
pub mod testing;

mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder, ResourceClient};
pub use error::{Error, ErrorKind, Result};
pub use list::{FetchStatus, LastError, ListFuture, ListSnapshot, MutationOutcome, ResourceListController};
pub use statistics::StatisticsClient;
pub use types::{FilterSet, FilterValue, PageRequest, PagedResult, Query};
pub use validation::ValidationReport;

// Re-export auth and config types
pub use auth::{Credentials, Registration, Role, Session};
pub use config::{ClientConfig, ListConfig, TlsConfig};

// Re-export notification sinks
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};

// Re-export resource descriptors
pub use resources::{
    Author, AuthorPayload, Authors, Book, BookCopies, BookCopy, BookCopyPayload, BookPayload,
    Books, BorrowPayload, BorrowRecord, BorrowRecords, CardAction, Categories, Category,
    CategoryPayload, Feedback, FeedbackPayload, Feedbacks, Identified, LibraryCard,
    LibraryCardPayload, LibraryCards, Member, MemberPayload, Members, NotificationPayload,
    NotificationRecord, Notifications, Publisher, PublisherPayload, Publishers, RecordId,
    Reservation, ReservationPayload, Reservations, Resource, Violation, ViolationPayload,
    Violations,
};
