use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Identified, Resource};
use crate::validation::{Check, RuleSet};

/// Notices sent to members.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifications;

/// A notice delivered to a member.
///
/// Not to be confused with [`crate::Notification`], the local outcome
/// message emitted by list controllers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationRecord {
    /// Identifier.
    pub notification_id: i64,
    /// Member name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Member email.
    #[serde(default)]
    pub email: Option<String>,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Message.
    #[serde(default)]
    pub message: Option<String>,
    /// Notification type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Sent at.
    #[serde(default)]
    pub sent_at: Option<String>,
}

impl Identified for NotificationRecord {
    type Id = i64;

    fn id(&self) -> i64 {
        self.notification_id
    }
}

/// Body for sending a notice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    /// Member identifier.
    pub user_id: Option<i64>,
    /// Title.
    pub title: String,
    /// Notification type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Message.
    pub message: String,
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .rule("user_id", Check::Required, "Recipient is required.")
        .rule("title", Check::Required, "Title is required.")
        .rule("type", Check::Required, "Notification type is required.")
        .rule("message", Check::Required, "Message is required.")
});

impl Resource for Notifications {
    type Record = NotificationRecord;
    type Payload = NotificationPayload;

    const NAME: &'static str = "notification";
    const PLURAL: &'static str = "notifications";
    const COLLECTION: &'static str = "/api/notifications";
    const SEARCH: &'static str = "/api/notifications/search";
    const FILTERS: &'static [&'static str] =
        &["userName", "email", "startDate", "endDate", "notificationType"];

    fn rules() -> &'static RuleSet {
        &RULES
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_use_wire_names() {
        let report = Notifications::validate(&NotificationPayload {
            user_id: Some(1),
            title: "Overdue".into(),
            kind: String::new(),
            message: "Please return your book.".into(),
        });
        assert_eq!(report.error("type"), Some("Notification type is required."));
        assert_eq!(report.field_errors().len(), 1);
    }

    #[test]
    fn test_record_type_field() {
        let record: NotificationRecord = serde_json::from_str(
            r#"{"notification_id":5,"title":"Overdue","type":"REMINDER","sent_at":"2025-04-01T08:00:00"}"#,
        )
        .unwrap();
        assert_eq!(record.kind.as_deref(), Some("REMINDER"));
    }
}
