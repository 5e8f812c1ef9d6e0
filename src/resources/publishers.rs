use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Identified, Resource};
use crate::validation::{Check, RuleSet};

/// Book publishers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Publishers;

/// A publisher record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Publisher {
    /// Identifier.
    #[serde(rename = "publisherId")]
    pub publisher_id: i64,
    /// Publisher name.
    pub name: String,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub contact_info: Option<String>,
}

impl Identified for Publisher {
    type Id = i64;

    fn id(&self) -> i64 {
        self.publisher_id
    }
}

/// Body for creating or updating a publisher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublisherPayload {
    /// Publisher name. At least 10 characters.
    pub name: String,
    /// Postal address. At least 10 characters.
    pub address: String,
    /// Phone number. Exactly 10 digits.
    pub contact_info: String,
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .rule("name", Check::MinLength(10), "Publisher name must be at least 10 characters.")
        .rule("address", Check::MinLength(10), "Address must be at least 10 characters.")
        .rule(
            "contact_info",
            Check::matches(r"^\d{10}$"),
            "Phone number must be exactly 10 digits.",
        )
});

impl Resource for Publishers {
    type Record = Publisher;
    type Payload = PublisherPayload;

    const NAME: &'static str = "publisher";
    const PLURAL: &'static str = "publishers";
    const COLLECTION: &'static str = "/api/publishers";
    const SEARCH: &'static str = "/api/publishers";

    fn rules() -> &'static RuleSet {
        &RULES
    }
}
