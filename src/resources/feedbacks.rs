use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Identified, RecordId, Resource};
use crate::client::ResourceClient;
use crate::transport::Method;
use crate::types::Query;
use crate::validation::{Check, RuleSet};
use crate::Error;

/// Member feedback and staff replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Feedbacks;

/// A feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Feedback {
    /// Identifier.
    pub id: i64,
    /// Member email.
    #[serde(default)]
    pub email: Option<String>,
    /// Message.
    #[serde(default)]
    pub message: Option<String>,
    /// Staff reply, once given.
    #[serde(default)]
    pub response: Option<String>,
    /// Whether staff has replied.
    #[serde(default)]
    pub is_response: bool,
    /// Submitted at.
    #[serde(default)]
    pub submitted_at: Option<String>,
}

impl Identified for Feedback {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body for submitting feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackPayload {
    /// Member identifier.
    pub user_id: Option<i64>,
    /// Required.
    pub message: String,
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new().rule("message", Check::Required, "Message is required.")
});

impl Resource for Feedbacks {
    type Record = Feedback;
    type Payload = FeedbackPayload;

    const NAME: &'static str = "feedback";
    const PLURAL: &'static str = "feedbacks";
    const COLLECTION: &'static str = "/api/feedbacks";
    const SEARCH: &'static str = "/api/feedbacks/search";
    const FILTERS: &'static [&'static str] = &["email", "isResponse", "startDate", "endDate"];

    fn rules() -> &'static RuleSet {
        &RULES
    }
}

impl ResourceClient<Feedbacks> {
    /// Stores a staff reply on a feedback message.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without contacting the server when the
    /// reply is blank.
    pub async fn reply(&self, id: &RecordId<Feedbacks>, response: &str) -> Result<(), Error> {
        if response.trim().is_empty() {
            return Err(Error::invalid_argument("Reply must not be empty"));
        }
        let body = serde_json::json!({ "response": response });
        self.command(Method::Put, &Feedbacks::record_path(id), Some(&body)).await
    }

    /// Lists every feedback message one member has sent. Not paginated.
    pub async fn for_member(&self, user_id: i64) -> Result<Vec<Feedback>, Error> {
        let path = format!("{}/user/{}", Feedbacks::COLLECTION, user_id);
        self.client().inner().api_get(&path, Query::new()).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::mock_client;
    use crate::transport::MockResponse;

    #[tokio::test]
    async fn test_reply() {
        let (client, mock) = mock_client();
        mock.on(Method::Put, "/api/feedbacks/6", MockResponse::status(200));

        let feedbacks = client.resource::<Feedbacks>();
        feedbacks.reply(&6, "Thanks, fixed.").await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().body,
            Some(serde_json::json!({ "response": "Thanks, fixed." }))
        );

        let err = feedbacks.reply(&6, "  ").await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_for_member() {
        let (client, mock) = mock_client();
        mock.on(
            Method::Get,
            "/api/feedbacks/user/2",
            MockResponse::json(serde_json::json!([
                { "id": 1, "message": "Great app", "is_response": false },
                { "id": 2, "message": "Slow search", "response": "Looking into it", "is_response": true }
            ])),
        );

        let list = client.resource::<Feedbacks>().for_member(2).await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[1].is_response);
    }
}
