//! Resource descriptors for the library backend.
//!
//! A [`Resource`] names a record type, the payload used to create or update
//! it, the endpoints that serve it and the rules its payload must satisfy.
//! Descriptors are zero-sized marker types: `client.list::<Authors>(..)`.
//!
//! | Descriptor        | Collection               | Search                       |
//! |-------------------|--------------------------|------------------------------|
//! | [`Authors`]       | `/api/authors`           | `/api/authors`               |
//! | [`Publishers`]    | `/api/publishers`        | `/api/publishers`            |
//! | [`Categories`]    | `/api/book-categories`   | `/api/book-categories`       |
//! | [`Books`]         | `/api/books`             | `/api/books/search`          |
//! | [`BookCopies`]    | `/api/book-copies`       | `/api/book-copies/search`    |
//! | [`Members`]       | `/api/users`             | `/api/users/search`          |
//! | [`LibraryCards`]  | `/api/library-cards`     | `/api/library-cards`         |
//! | [`BorrowRecords`] | `/api/borrow-records`    | `/api/borrow-records/search` |
//! | [`Reservations`]  | `/api/reservations`      | `/api/reservations`          |
//! | [`Violations`]    | `/api/violations`        | `/api/violations`            |
//! | [`Notifications`] | `/api/notifications`     | `/api/notifications/search`  |
//! | [`Feedbacks`]     | `/api/feedbacks`         | `/api/feedbacks/search`      |

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::{de::DeserializeOwned, Serialize};

use crate::validation::{RuleSet, ValidationReport};

mod authors;
mod books;
mod borrows;
mod cards;
mod categories;
mod copies;
mod feedbacks;
mod members;
mod notifications;
mod publishers;
mod reservations;
mod violations;

pub use authors::{Author, AuthorPayload, Authors};
pub use books::{Book, BookPayload, Books};
pub use borrows::{BorrowPayload, BorrowRecord, BorrowRecords};
pub use cards::{CardAction, LibraryCard, LibraryCardPayload, LibraryCards};
pub use categories::{Categories, Category, CategoryPayload};
pub use copies::{BookCopies, BookCopy, BookCopyPayload};
pub use feedbacks::{Feedback, FeedbackPayload, Feedbacks};
pub use members::{Member, MemberPayload, Members};
pub use notifications::{NotificationPayload, NotificationRecord, Notifications};
pub use publishers::{Publisher, PublisherPayload, Publishers};
pub use reservations::{Reservation, ReservationPayload, Reservations};
pub use violations::{Violation, ViolationPayload, Violations};

/// A record with a stable identifier.
pub trait Identified {
    /// Identifier type.
    type Id: Clone + Eq + Hash + Display + Debug + Send + Sync + 'static;

    /// Returns the record's identifier.
    fn id(&self) -> Self::Id;
}

/// A backend resource served through a paginated search endpoint.
pub trait Resource: Send + Sync + 'static {
    /// The record returned by search and get.
    type Record: Identified + DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    /// The body sent on create and update.
    type Payload: Serialize + Debug + Send + Sync + 'static;

    /// Singular name used in messages (`"author"`).
    const NAME: &'static str;

    /// Plural name used in messages (`"authors"`).
    const PLURAL: &'static str;

    /// Collection path; records live at `{COLLECTION}/{id}`.
    const COLLECTION: &'static str;

    /// Paginated search path.
    const SEARCH: &'static str;

    /// Filter keys the search endpoint understands.
    const FILTERS: &'static [&'static str] = &[];

    /// Returns the payload rules.
    fn rules() -> &'static RuleSet {
        static NO_RULES: RuleSet = RuleSet::new();
        &NO_RULES
    }

    /// Validates a payload against [`rules`](Self::rules).
    fn validate(payload: &Self::Payload) -> ValidationReport {
        Self::rules().validate(payload)
    }

    /// Returns the path of one record.
    fn record_path(id: &RecordId<Self>) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }
}

/// Identifier type of a resource's records.
pub type RecordId<R> = <<R as Resource>::Record as Identified>::Id;
