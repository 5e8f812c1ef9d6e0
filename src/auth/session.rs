//! Session types carrying the bearer token and its claims.

use std::fmt;
use std::sync::Arc;

/// A role claim carried by the session.
///
/// The backend issues lowercase role names (`"admin"`, `"user"`). Unknown
/// names are preserved so route guards can still match on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Library staff with access to the admin console.
    Admin,
    /// A library member using the catalog and borrowing portal.
    User,
    /// Any other role name issued by the backend.
    Other(String),
}

impl Role {
    /// Parses a role claim, case-insensitively.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Other(name.trim().to_string()),
        }
    }

    /// Returns the claim string for this role.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Role::parse(name)
    }
}

/// An authenticated session.
///
/// A session is created by the sign-in collaborator and passed explicitly to
/// [`ClientBuilder::session`](crate::ClientBuilder::session). The SDK never
/// decodes the token; the subject id and roles are supplied alongside it.
///
/// ## Example
///
/// ```rust
/// use shelfdesk::{Role, Session};
///
/// let session = Session::new("eyJhbGciOi...")
///     .with_subject_id("17")
///     .with_role(Role::Admin);
///
/// assert!(session.is_admin());
/// assert_eq!(session.subject_id(), Some("17"));
/// ```
#[derive(Clone)]
pub struct Session {
    token: Arc<str>,
    subject_id: Option<String>,
    roles: Vec<Role>,
}

impl Session {
    /// Creates a session from a bearer token with no claims.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
            subject_id: None,
            roles: Vec::new(),
        }
    }

    /// Sets the subject (user) id.
    #[must_use]
    pub fn with_subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    /// Adds a role claim.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        let role = role.into();
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Returns the bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the subject id, if the session carries one.
    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    /// Returns the role claims.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns `true` if the session carries `role`.
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Returns `true` if the session carries any of `allowed`.
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        allowed.iter().any(|role| self.has_role(role))
    }

    /// Returns `true` for staff sessions.
    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    /// Returns the `Authorization` header value.
    pub(crate) fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("subject_id", &self.subject_id)
            .field("roles", &self.roles)
            .finish()
    }
}
