use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Identified, RecordId, Resource};
use crate::client::ResourceClient;
use crate::transport::Method;
use crate::validation::{Check, RuleSet};
use crate::Error;

/// Library members and staff accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Members;

/// A member account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Member {
    /// Identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Role name (`ADMIN`, `USER`).
    #[serde(default, rename = "roleName")]
    pub role_name: Option<String>,
    /// Account status: `1` active, `0` locked.
    #[serde(default)]
    pub status: Option<i32>,
}

impl Member {
    /// Returns `true` if the account is locked.
    pub fn is_locked(&self) -> bool {
        self.status == Some(0)
    }
}

impl Identified for Member {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body for creating or updating a member.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberPayload {
    /// Full name. At least 10 characters.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password. At least 6 characters.
    pub password: String,
    /// Phone number. Exactly 10 digits.
    pub phone_number: String,
    /// Role name. Required.
    pub role: String,
}

impl std::fmt::Debug for MemberPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .finish()
    }
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .rule("name", Check::MinLength(10), "Name must be at least 10 characters.")
        .rule(
            "email",
            Check::matches(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
            "Email address is not valid.",
        )
        .rule("password", Check::MinLength(6), "Password must be at least 6 characters.")
        .rule(
            "phone_number",
            Check::matches(r"^\d{10}$"),
            "Phone number must be exactly 10 digits.",
        )
        .rule("role", Check::Required, "Role is required.")
});

impl Resource for Members {
    type Record = Member;
    type Payload = MemberPayload;

    const NAME: &'static str = "member";
    const PLURAL: &'static str = "members";
    const COLLECTION: &'static str = "/api/users";
    const SEARCH: &'static str = "/api/users/search";
    const FILTERS: &'static [&'static str] = &["name", "email"];

    fn rules() -> &'static RuleSet {
        &RULES
    }
}

impl ResourceClient<Members> {
    /// Locks a member account.
    pub async fn lock(&self, id: &RecordId<Members>) -> Result<(), Error> {
        let path = format!("{}/lock", Members::record_path(id));
        self.command(Method::Put, &path, Some(&serde_json::json!({ "status": 0 })))
            .await
    }

    /// Unlocks a member account.
    pub async fn unlock(&self, id: &RecordId<Members>) -> Result<(), Error> {
        let path = format!("{}/unlock", Members::record_path(id));
        self.command(Method::Put, &path, Some(&serde_json::json!({ "status": 1 })))
            .await
    }
}
