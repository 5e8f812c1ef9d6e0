use serde::{Deserialize, Serialize};

use super::{Identified, RecordId, Resource};
use crate::client::ResourceClient;
use crate::transport::Method;
use crate::Error;

/// Borrowing history.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorrowRecords;

/// One loan of one copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BorrowRecord {
    /// Identifier.
    pub record_id: i64,
    /// Member name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Member email.
    #[serde(default)]
    pub email: Option<String>,
    /// Copy identifier.
    #[serde(default)]
    pub copy_id: Option<i64>,
    /// Book title.
    #[serde(default)]
    pub book_title: Option<String>,
    /// Borrow date.
    #[serde(default)]
    pub borrow_date: Option<String>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<String>,
    /// `None` while the copy is still out.
    #[serde(default)]
    pub return_date: Option<String>,
    /// Book condition.
    #[serde(default)]
    pub book_condition: Option<String>,
    /// Status.
    #[serde(default)]
    pub status: Option<String>,
}

impl BorrowRecord {
    /// Returns `true` once the copy has been handed back.
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }
}

impl Identified for BorrowRecord {
    type Id = i64;

    fn id(&self) -> i64 {
        self.record_id
    }
}

/// Body for recording a loan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BorrowPayload {
    /// Member identifier.
    pub user_id: Option<i64>,
    /// Copy identifier.
    pub copy_id: Option<i64>,
    /// Borrow date.
    pub borrow_date: Option<String>,
    /// Due date.
    pub due_date: Option<String>,
}

impl Resource for BorrowRecords {
    type Record = BorrowRecord;
    type Payload = BorrowPayload;

    const NAME: &'static str = "borrow record";
    const PLURAL: &'static str = "borrow records";
    const COLLECTION: &'static str = "/api/borrow-records";
    const SEARCH: &'static str = "/api/borrow-records/search";
    const FILTERS: &'static [&'static str] =
        &["userName", "email", "copyId", "startDate", "endDate", "status", "userId"];
}

impl ResourceClient<BorrowRecords> {
    /// Marks a loan as returned.
    pub async fn mark_returned(&self, id: &RecordId<BorrowRecords>) -> Result<(), Error> {
        let path = format!("{}/return", BorrowRecords::record_path(id));
        self.command(Method::Put, &path, None::<&()>).await
    }
}
