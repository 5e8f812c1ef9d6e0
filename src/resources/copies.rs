use serde::{Deserialize, Serialize};

use super::{Identified, Resource};

/// Physical copies of catalog titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookCopies;

/// A single physical copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookCopy {
    /// Identifier.
    pub copy_id: i64,
    /// Title of the book this copy belongs to.
    #[serde(default)]
    pub book_title: Option<String>,
    /// Cover image file name of the book.
    #[serde(default)]
    pub book_image: Option<String>,
    /// Physical condition (`NEW`, `GOOD`, `DAMAGED`, ...).
    #[serde(default)]
    pub condition: Option<String>,
    /// Circulation status (`AVAILABLE`, `BORROWED`, ...).
    #[serde(default)]
    pub status: Option<String>,
}

impl BookCopy {
    /// Status value of a copy that can be handed out.
    pub const AVAILABLE: &'static str = "AVAILABLE";

    /// Returns `true` if the copy is on the shelf.
    pub fn is_available(&self) -> bool {
        self.status.as_deref() == Some(Self::AVAILABLE)
    }
}

impl Identified for BookCopy {
    type Id = i64;

    fn id(&self) -> i64 {
        self.copy_id
    }
}

/// Body for creating or updating a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookCopyPayload {
    /// Book identifier.
    pub book_id: Option<i64>,
    /// Condition.
    pub condition: String,
    /// Status.
    pub status: String,
}

impl Resource for BookCopies {
    type Record = BookCopy;
    type Payload = BookCopyPayload;

    const NAME: &'static str = "book copy";
    const PLURAL: &'static str = "book copies";
    const COLLECTION: &'static str = "/api/book-copies";
    const SEARCH: &'static str = "/api/book-copies/search";
    const FILTERS: &'static [&'static str] = &["bookId", "copyId", "condition", "status"];
}
