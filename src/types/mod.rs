//! Core data types for the shelfdesk SDK.
//!
//! - [`PagedResult`]: one page of a search response
//! - [`FilterSet`] / [`FilterValue`]: named optional search filters
//! - [`Query`] / [`PageRequest`]: outgoing search parameters

mod filter;
mod page;
mod query;

pub use filter::{FilterSet, FilterValue};
pub use page::PagedResult;
pub use query::{PageRequest, Query};
