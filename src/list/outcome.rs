//! Results of list operations.

use std::fmt;

use crate::error::{Error, ErrorKind};
use crate::validation::ValidationReport;

/// How a fetch settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStatus {
    /// The response replaced the collection.
    Committed,
    /// A newer fetch was issued before this one resolved; the response was
    /// discarded.
    Superseded,
    /// The controller was dropped before the response arrived.
    Detached,
    /// The requested page was outside `1..=total_pages`; nothing was sent.
    OutOfRange,
}

impl FetchStatus {
    /// Returns `true` if the collection now reflects this fetch.
    pub fn is_committed(&self) -> bool {
        matches!(self, FetchStatus::Committed)
    }
}

/// The last failure a controller surfaced.
///
/// A cloneable summary of an [`Error`], kept in the snapshot until the next
/// committed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    /// Error category.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl From<&Error> for LastError {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.message().to_string(),
        }
    }
}

impl fmt::Display for LastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Result of a create, update, delete, or workflow action.
///
/// Server and transport failures are reported through the surrounding
/// `Result`; this type covers the two ways a mutation can settle without
/// one.
#[derive(Debug)]
#[must_use]
pub enum MutationOutcome<T> {
    /// The payload failed local validation. No request was sent.
    Invalid(ValidationReport),
    /// The server accepted the mutation.
    Applied {
        /// What the server returned, if anything.
        value: T,
        /// How the follow-up re-fetch settled.
        refresh: Result<FetchStatus, LastError>,
    },
}

impl<T> MutationOutcome<T> {
    /// Returns `true` if the server accepted the mutation.
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }

    /// Returns `true` if validation blocked the mutation.
    pub fn is_invalid(&self) -> bool {
        matches!(self, MutationOutcome::Invalid(_))
    }

    /// Returns the validation report of a blocked mutation.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            MutationOutcome::Invalid(report) => Some(report),
            MutationOutcome::Applied { .. } => None,
        }
    }

    /// Returns the server's value of an applied mutation.
    pub fn value(&self) -> Option<&T> {
        match self {
            MutationOutcome::Applied { value, .. } => Some(value),
            MutationOutcome::Invalid(_) => None,
        }
    }

    /// Consumes the outcome, returning the server's value.
    pub fn into_value(self) -> Option<T> {
        match self {
            MutationOutcome::Applied { value, .. } => Some(value),
            MutationOutcome::Invalid(_) => None,
        }
    }

    /// Returns how the follow-up re-fetch settled.
    pub fn refresh(&self) -> Option<&Result<FetchStatus, LastError>> {
        match self {
            MutationOutcome::Applied { refresh, .. } => Some(refresh),
            MutationOutcome::Invalid(_) => None,
        }
    }
}
