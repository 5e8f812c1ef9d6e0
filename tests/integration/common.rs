//! Common test harness for shelfdesk integration tests.

use std::sync::Once;

use serde_json::{json, Value};
use shelfdesk::{Client, Role, Session};
use wiremock::MockServer;

/// Token sent by REST test clients.
pub const TOKEN: &str = "integration-token";

static TRACING: Once = Once::new();

/// Installs a `tracing` subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Builds a REST client pointed at `server`.
pub fn rest_client(server: &MockServer) -> Client {
    init_tracing();
    Client::builder()
        .url(server.uri())
        .insecure()
        .session(Session::new(TOKEN).with_subject_id("1").with_role(Role::Admin))
        .build()
        .expect("client should build against a local mock server")
}

/// Builds a REST client pointed at `server` with no session attached.
pub fn anonymous_client(server: &MockServer) -> Client {
    init_tracing();
    Client::builder()
        .url(server.uri())
        .insecure()
        .build()
        .expect("client should build against a local mock server")
}

/// A search page in the backend's wire shape.
pub fn page(content: Vec<Value>, page_index: u32, total_pages: u32, total_elements: u64) -> Value {
    json!({
        "content": content,
        "totalPages": total_pages,
        "totalElements": total_elements,
        "number": page_index,
        "last": page_index + 1 >= total_pages,
    })
}

/// Author records with consecutive ids starting at `first`.
pub fn authors(first: i64, count: i64) -> Vec<Value> {
    (first..first + count)
        .map(|id| shelfdesk::testing::author(id, &format!("Author Number {}", id)))
        .collect()
}
