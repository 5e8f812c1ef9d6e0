use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Identified, Resource};
use crate::validation::{Check, Limit, RuleSet};

/// Book authors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authors;

/// An author record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Author {
    /// Identifier.
    #[serde(rename = "authorId")]
    pub author_id: i64,
    /// Full name.
    pub name: String,
    /// Short biography.
    #[serde(default)]
    pub biography: Option<String>,
    /// Date of birth.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl Identified for Author {
    type Id = i64;

    fn id(&self) -> i64 {
        self.author_id
    }
}

/// Body for creating or updating an author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorPayload {
    /// Full name. At least 8 characters.
    pub name: String,
    /// Biography. At least 20 characters.
    pub biography: String,
    /// Date of birth, between 1800 and the current year.
    pub birth_date: Option<NaiveDate>,
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .rule("name", Check::MinLength(8), "Author name must be at least 8 characters.")
        .rule("biography", Check::MinLength(20), "Biography must be at least 20 characters.")
        .rule("birth_date", Check::Required, "Date of birth is required.")
        .rule(
            "birth_date",
            Check::YearBetween {
                min: Limit::Fixed(1800),
                max: Limit::CurrentYear,
            },
            "Date of birth must fall between 1800 and the current year.",
        )
});

impl Resource for Authors {
    type Record = Author;
    type Payload = AuthorPayload;

    const NAME: &'static str = "author";
    const PLURAL: &'static str = "authors";
    const COLLECTION: &'static str = "/api/authors";
    const SEARCH: &'static str = "/api/authors";

    fn rules() -> &'static RuleSet {
        &RULES
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn payload() -> AuthorPayload {
        AuthorPayload {
            name: "Ursula K. Le Guin".into(),
            biography: "American author of speculative fiction.".into(),
            birth_date: NaiveDate::from_ymd_opt(1929, 10, 21),
        }
    }

    #[test]
    fn test_valid_author() {
        assert!(RULES.validate_on(&payload(), today()).is_valid());
    }

    #[test]
    fn test_short_name_and_biography() {
        let report = RULES.validate_on(
            &AuthorPayload {
                name: "  Homer  ".into(),
                biography: "Poet.".into(),
                ..payload()
            },
            today(),
        );
        assert!(report.error("name").is_some());
        assert!(report.error("biography").is_some());
        assert!(report.error("birth_date").is_none());
    }

    #[test]
    fn test_birth_date_bounds() {
        let missing = AuthorPayload { birth_date: None, ..payload() };
        assert_eq!(
            RULES.validate_on(&missing, today()).error("birth_date"),
            Some("Date of birth is required.")
        );

        let too_early = AuthorPayload { birth_date: NaiveDate::from_ymd_opt(1799, 12, 31), ..payload() };
        assert!(RULES.validate_on(&too_early, today()).error("birth_date").is_some());

        let next_year = AuthorPayload { birth_date: NaiveDate::from_ymd_opt(2026, 1, 1), ..payload() };
        assert!(RULES.validate_on(&next_year, today()).error("birth_date").is_some());
    }

    #[test]
    fn test_record_decodes_from_backend_shape() {
        let author: Author = serde_json::from_str(
            r#"{"authorId":4,"name":"Nguyen Nhat Anh","biography":"Novelist","birth_date":"1955-05-07"}"#,
        )
        .unwrap();
        assert_eq!(author.id(), 4);
        assert_eq!(Authors::record_path(&author.id()), "/api/authors/4");
    }
}
