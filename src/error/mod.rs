//! Error types for the shelfdesk SDK.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//!
//! ## Key Invariant
//!
//! Local validation failures are **not** errors. A create or update whose
//! payload fails its rule table resolves to
//! [`MutationOutcome::Invalid`](crate::list::MutationOutcome::Invalid) and
//! never reaches the network. Likewise a superseded fetch resolves to
//! [`FetchStatus::Superseded`](crate::list::FetchStatus::Superseded).
//!
//! ```rust,ignore
//! match authors.delete(42).await {
//!     Ok(_) => {}
//!     Err(err) if err.kind() == ErrorKind::Conflict => {
//!         // the author still has books; the row stays visible
//!     }
//!     Err(err) => return Err(err),
//! }
//! ```

mod core;
mod kind;

pub use core::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for shelfdesk operations.
pub type Result<T> = std::result::Result<T, Error>;
