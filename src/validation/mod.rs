//! Client-side payload validation.
//!
//! Each [`Resource`](crate::Resource) carries a [`RuleSet`]; list controllers
//! run it before any create or update request leaves the process. Validation
//! is pure: it reads the payload, never mutates it, and returns the same
//! [`ValidationReport`] for the same input.

mod report;
mod rule;

pub use report::ValidationReport;
pub use rule::{Check, Limit, RuleSet};
