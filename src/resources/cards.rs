use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Identified, RecordId, Resource};
use crate::client::ResourceClient;
use crate::transport::Method;
use crate::Error;

/// Library cards issued to members.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryCards;

/// A library card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LibraryCard {
    /// Identifier.
    pub card_id: i64,
    /// Holder's name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Holder's email.
    #[serde(default)]
    pub email: Option<String>,
    /// Issue date.
    #[serde(default)]
    pub issue_date: Option<String>,
    /// Expiry date.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Card status (`PENDING`, `ACTIVE`, `LOCKED`, ...).
    #[serde(default)]
    pub status: Option<String>,
}

impl Identified for LibraryCard {
    type Id = i64;

    fn id(&self) -> i64 {
        self.card_id
    }
}

/// Body for editing a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryCardPayload {
    /// Issue date.
    pub issue_date: Option<String>,
    /// Expiry date.
    pub expiry_date: Option<String>,
    /// Status.
    pub status: String,
}

/// A review decision on a library card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardAction {
    /// Approve a pending request.
    Approve,
    /// Reject a pending request.
    Reject,
    /// Lock an active card.
    Lock,
    /// Unlock a locked card.
    Unlock,
}

impl CardAction {
    /// Returns the path segment of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardAction::Approve => "approve",
            CardAction::Reject => "reject",
            CardAction::Lock => "lock",
            CardAction::Unlock => "unlock",
        }
    }
}

impl fmt::Display for CardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Resource for LibraryCards {
    type Record = LibraryCard;
    type Payload = LibraryCardPayload;

    const NAME: &'static str = "library card";
    const PLURAL: &'static str = "library cards";
    const COLLECTION: &'static str = "/api/library-cards";
    const SEARCH: &'static str = "/api/library-cards";
    const FILTERS: &'static [&'static str] = &["userName", "email", "status"];
}

impl ResourceClient<LibraryCards> {
    /// Applies a review decision to a card.
    pub async fn review(&self, id: &RecordId<LibraryCards>, action: CardAction) -> Result<(), Error> {
        let path = format!("{}/{}", LibraryCards::record_path(id), action);
        self.command(Method::Put, &path, Some(&serde_json::json!({}))).await
    }

    /// Files a card request on behalf of a member.
    pub async fn request(&self, user_id: i64) -> Result<(), Error> {
        let path = format!("{}/request", LibraryCards::COLLECTION);
        self.command(Method::Post, &path, Some(&serde_json::json!({ "user_id": user_id })))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::mock_client;
    use crate::transport::MockResponse;
    use test_case::test_case;

    #[test_case(CardAction::Approve, "/api/library-cards/5/approve")]
    #[test_case(CardAction::Reject, "/api/library-cards/5/reject")]
    #[test_case(CardAction::Lock, "/api/library-cards/5/lock")]
    #[test_case(CardAction::Unlock, "/api/library-cards/5/unlock")]
    fn test_review_path(action: CardAction, path: &str) {
        let (client, mock) = mock_client();
        mock.on(Method::Put, path, MockResponse::status(204));

        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(client.resource::<LibraryCards>().review(&5, action)).unwrap();

        let request = mock.last_request().unwrap();
        assert!(request.is(Method::Put, path));
        assert_eq!(request.body, Some(serde_json::json!({})));
    }

    #[tokio::test]
    async fn test_request_card() {
        let (client, mock) = mock_client();
        mock.on(Method::Post, "/api/library-cards/request", MockResponse::json(serde_json::json!({
            "card_id": 9,
            "status": "PENDING"
        })));

        client.resource::<LibraryCards>().request(42).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().body,
            Some(serde_json::json!({ "user_id": 42 }))
        );
    }
}
