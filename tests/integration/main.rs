//! Integration tests for shelfdesk.
//!
//! Two harnesses, neither needing a running backend:
//!
//! - `controller_tests`: list controllers over the in-memory mock transport,
//!   using hold mode to decide the order in which responses arrive
//! - `rest_tests`: the full REST stack against a `wiremock` server
//! - `account_tests`: sign-in and registration against a `wiremock` server
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With request logging
//! RUST_LOG=shelfdesk=debug cargo test --test integration -- --nocapture
//! ```

mod account_tests;
mod common;
mod controller_tests;
mod rest_tests;
