//! Sign-in and self-registration payloads.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::validation::{Check, RuleSet, ValidationReport};

/// Endpoint exchanging credentials for a bearer token.
pub const SIGN_IN_PATH: &str = "/api/auth/login";
/// Endpoint creating a member account and returning its bearer token.
pub const REGISTER_PATH: &str = "/api/auth/register";

const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";

/// Email and password of an existing account.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password. At least 6 characters.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the fields a sign-in form requires.
    pub fn validate(&self) -> ValidationReport {
        SIGN_IN_RULES.validate(self)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A self-service member sign-up.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Full name. More than 10 characters.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Phone number. Exactly 10 digits.
    pub phone_number: String,
    /// Account password. At least 6 characters.
    pub password: String,
}

impl Registration {
    /// Checks the fields a sign-up form requires.
    pub fn validate(&self) -> ValidationReport {
        REGISTER_RULES.validate(self)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn account_rules() -> RuleSet {
    RuleSet::new()
        .rule("email", Check::Required, "Email is required.")
        .rule("email", Check::matches(EMAIL_PATTERN), "Email address is not valid.")
        .rule("password", Check::Required, "Password is required.")
        .rule("password", Check::MinLength(6), "Password must be at least 6 characters.")
}

static SIGN_IN_RULES: LazyLock<RuleSet> = LazyLock::new(account_rules);

static REGISTER_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    account_rules()
        .rule("name", Check::Required, "Full name is required.")
        .rule("name", Check::MinLength(11), "Full name must be longer than 10 characters.")
        .rule("phone_number", Check::Required, "Phone number is required.")
        .rule(
            "phone_number",
            Check::matches(r"^\d{10}$"),
            "Phone number must be exactly 10 digits.",
        )
});
