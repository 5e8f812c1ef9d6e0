//! Paginated, filtered resource lists.
//!
//! A [`ResourceListController`] owns "what should be on screen right now"
//! for one list: working and applied filters, a 1-based page cursor, the
//! last committed page of records, a loading flag, the last surfaced
//! error, and per-row pending flags.
//!
//! ## Fetch cycle
//!
//! ```text
//! IDLE --trigger--> FETCHING --latest response--> IDLE (committed or failed)
//!                      |
//!                      +--newer trigger--> stale response discarded
//! ```
//!
//! Only `loading` is exposed. Page numbers are 1-based here and 0-based on
//! the wire.

mod controller;
mod outcome;
mod pending;
mod state;

pub use controller::{ListFuture, ResourceListController};
pub use outcome::{FetchStatus, LastError, MutationOutcome};
pub use state::ListSnapshot;
