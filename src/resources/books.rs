use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Identified, Resource};
use crate::validation::{Check, Limit, RuleSet};

/// Catalog titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Books;

/// A book record as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Author names.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Category name.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Publisher name.
    #[serde(default)]
    pub publisher_name: Option<String>,
    /// Year of publication.
    #[serde(default)]
    pub publication_year: Option<i32>,
    /// Number of copies owned.
    #[serde(default)]
    pub total_quantity: Option<i64>,
    /// Number of copies on the shelf.
    #[serde(default)]
    pub available_quantity: Option<i64>,
    /// Cover image file name.
    #[serde(default)]
    pub image: Option<String>,
    /// Summary.
    #[serde(default)]
    pub book_summary: Option<String>,
}

impl Book {
    /// Returns the API path of the cover image, if any.
    pub fn image_path(&self) -> Option<String> {
        self.image
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| format!("/api/images/{}", name))
    }

    /// Returns `true` if at least one copy can be borrowed.
    pub fn is_available(&self) -> bool {
        self.available_quantity.is_some_and(|n| n > 0)
    }
}

impl Identified for Book {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body for creating or updating a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookPayload {
    /// Title. Required.
    pub title: String,
    /// Publisher.
    pub publisher_id: Option<i64>,
    /// Category.
    pub category_id: Option<i64>,
    /// Summary.
    pub book_summary: String,
    /// Year of publication, between 1000 and the current year.
    pub publication_year: Option<i32>,
    /// Number of copies owned. Not negative.
    pub total_quantity: i64,
    /// Authors.
    pub author_ids: Vec<i64>,
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .rule("title", Check::Required, "Title is required.")
        .rule(
            "publication_year",
            Check::Range {
                min: Some(Limit::Fixed(1000)),
                max: Some(Limit::CurrentYear),
            },
            "Publication year must fall between 1000 and the current year.",
        )
        .rule(
            "total_quantity",
            Check::Range {
                min: Some(Limit::Fixed(0)),
                max: None,
            },
            "Quantity must not be negative.",
        )
});

impl Resource for Books {
    type Record = Book;
    type Payload = BookPayload;

    const NAME: &'static str = "book";
    const PLURAL: &'static str = "books";
    const COLLECTION: &'static str = "/api/books";
    const SEARCH: &'static str = "/api/books/search";
    const FILTERS: &'static [&'static str] =
        &["title", "categoryId", "authorName", "publicationYear"];

    fn rules() -> &'static RuleSet {
        &RULES
    }
}
