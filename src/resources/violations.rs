use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Identified, Resource};
use crate::validation::{Check, RuleSet};

/// Rule violations recorded against members.
#[derive(Debug, Clone, Copy, Default)]
pub struct Violations;

/// A recorded violation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Identifier.
    pub id: i64,
    /// Offending member's email.
    #[serde(default)]
    pub email: Option<String>,
    /// What happened.
    #[serde(default)]
    pub description: Option<String>,
    /// When it happened.
    #[serde(default)]
    pub violation_date: Option<String>,
    /// Violation category (`LATE_RETURN`, `DAMAGED_BOOK`, ...).
    #[serde(default)]
    pub violation_type: Option<String>,
    /// Whether the violation has been settled.
    #[serde(default)]
    pub resolved: bool,
    /// When it was settled.
    #[serde(default)]
    pub resolve_at: Option<String>,
}

impl Identified for Violation {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body for recording or editing a violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViolationPayload {
    /// Offending member. Required.
    pub user_id: Option<i64>,
    /// What happened. At least 20 characters.
    pub description: String,
    /// When it happened. Required, not in the future.
    pub violation_date: Option<NaiveDate>,
    /// Violation category. Required.
    pub violation_type: String,
    /// Whether the violation has been settled.
    pub resolved: bool,
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .rule("user_id", Check::Required, "Member is required.")
        .rule(
            "description",
            Check::MinLength(20),
            "Description must be at least 20 characters.",
        )
        .rule("violation_date", Check::Required, "Violation date is required.")
        .rule(
            "violation_date",
            Check::NotAfterToday,
            "Violation date cannot be in the future.",
        )
        .rule("violation_type", Check::Required, "Violation type is required.")
});

impl Resource for Violations {
    type Record = Violation;
    type Payload = ViolationPayload;

    const NAME: &'static str = "violation";
    const PLURAL: &'static str = "violations";
    const COLLECTION: &'static str = "/api/violations";
    const SEARCH: &'static str = "/api/violations";
    const FILTERS: &'static [&'static str] = &["resolved", "violationType", "startDate", "endDate"];

    fn rules() -> &'static RuleSet {
        &RULES
    }
}

impl Violations {
    /// Returns the paged violation history of one member.
    pub fn member_history_path(user_id: i64) -> String {
        format!("{}/user/{}", Self::COLLECTION, user_id)
    }
}
