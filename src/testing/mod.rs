//! Testing utilities for shelfdesk.
//!
//! This module provides tools for testing code that uses the SDK without a
//! running backend:
//!
//! - [`mock_client`]: a [`Client`] wired to a [`MockTransport`]
//! - [`mock_client_with_session`]: the same, acting under a given session
//! - record fixtures in the backend's JSON shape
//!
//! ## Quick Start
//!
//! ```rust
//! use shelfdesk::testing::{author, mock_client};
//! use shelfdesk::transport::{Method, MockResponse};
//! use shelfdesk::{Authors, RecordingNotifier};
//!
//! let (client, mock) = mock_client();
//! mock.on(
//!     Method::Get,
//!     "/api/authors",
//!     MockResponse::page(serde_json::json!([author(1, "Ursula K. Le Guin")]), 1, 1),
//! );
//!
//! let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! let list = client.list::<Authors>(RecordingNotifier::new());
//! rt.block_on(list.fetch()).unwrap();
//! assert_eq!(list.snapshot().items.len(), 1);
//! ```
//!
//! To control the order in which responses arrive, switch the transport to
//! hold mode with [`MockTransport::hold_requests`] and answer each
//! [`HeldRequest`](crate::transport::HeldRequest) by hand.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::auth::{Role, Session};
use crate::transport::MockTransport;
use crate::Client;

/// Base URL reported by mock clients.
pub const MOCK_URL: &str = "http://mock.shelfdesk.local";

/// Token of the default mock session.
pub const MOCK_TOKEN: &str = "test-token";

/// Creates a client backed by a fresh [`MockTransport`], acting as an
/// admin with [`MOCK_TOKEN`].
pub fn mock_client() -> (Client, Arc<MockTransport>) {
    mock_client_with_session(Session::new(MOCK_TOKEN).with_subject_id("1").with_role(Role::Admin))
}

/// Creates a mock-backed client acting under `session`.
pub fn mock_client_with_session(session: Session) -> (Client, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = Client::from_inner(crate::client::inner::ClientInner {
        url: MOCK_URL.to_string(),
        session: Some(session),
        timeout: crate::config::DEFAULT_TIMEOUT,
        transport: transport.clone(),
    });
    (client, transport)
}

/// An author record.
pub fn author(id: i64, name: &str) -> Value {
    json!({
        "authorId": id,
        "name": name,
        "biography": format!("{} wrote a number of well-loved books.", name),
        "birth_date": "1950-01-01",
    })
}

/// A category record.
pub fn category(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("Everything filed under {}.", name),
    })
}

/// A book copy record with the given status.
pub fn book_copy(copy_id: i64, book_title: &str, status: &str) -> Value {
    json!({
        "copy_id": copy_id,
        "book_title": book_title,
        "condition": "GOOD",
        "status": status,
    })
}

/// A reservation record with the given status.
pub fn reservation(id: i64, book_id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "user_name": "Member",
        "email": "member@example.com",
        "book_id": book_id,
        "book_title": "Reserved Title",
        "reservation_date": "2025-03-01",
        "status": status,
    })
}
