use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Identified, Resource};
use crate::client::ResourceClient;
use crate::types::Query;
use crate::validation::{Check, RuleSet};
use crate::Error;

/// Book categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Categories;

/// A category record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    /// Identifier.
    pub id: i64,
    /// Category name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Identified for Category {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body for creating or updating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    /// Category name. At least 5 characters, no digits.
    pub name: String,
    /// Description. At least 25 characters.
    pub description: String,
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .rule("name", Check::MinLength(5), "Category name must be at least 5 characters.")
        .rule("name", Check::forbids(r"\d"), "Category name must not contain digits.")
        .rule(
            "description",
            Check::MinLength(25),
            "Description must be at least 25 characters.",
        )
});

impl Resource for Categories {
    type Record = Category;
    type Payload = CategoryPayload;

    const NAME: &'static str = "category";
    const PLURAL: &'static str = "categories";
    const COLLECTION: &'static str = "/api/book-categories";
    const SEARCH: &'static str = "/api/book-categories";

    fn rules() -> &'static RuleSet {
        &RULES
    }
}

impl ResourceClient<Categories> {
    /// Lists every category through the unauthenticated catalog endpoint.
    ///
    /// Used to fill category pickers; not paginated.
    pub async fn public(&self) -> Result<Vec<Category>, Error> {
        self.client()
            .inner()
            .api_get("/api/book-categories/public", Query::new())
            .await
    }
}
