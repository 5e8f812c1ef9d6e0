//! Dashboard statistics.
//!
//! Thin typed wrappers over the backend's aggregate endpoints. Counters are
//! plain JSON numbers; aggregates are small arrays.

use serde::{Deserialize, Serialize};

use crate::types::Query;
use crate::{Client, Error};

/// Borrowings in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MonthlyBorrowCount {
    /// Month number, 1 to 12.
    pub month: u32,
    /// Number of loans.
    pub count: u64,
}

/// Share of one violation type.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViolationTypeShare {
    /// Violation type.
    pub name: String,
    /// Number (or weight) of violations of this type.
    pub value: f64,
}

/// A frequently borrowed title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBorrowedBook {
    /// Book identifier.
    pub book_id: i64,
    /// Title.
    pub title: String,
    /// Cover image file name.
    #[serde(default)]
    pub book_image: Option<String>,
    /// Author names. The backend sends `null` for titles without authors.
    #[serde(default)]
    pub authors: Option<Vec<String>>,
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Registered members.
    pub members: u64,
    /// Catalog titles.
    pub books: u64,
    /// Physical copies.
    pub copies: u64,
    /// Loans ever recorded.
    pub borrows: u64,
    /// Loans not yet returned.
    pub unreturned: u64,
    /// Violations recorded.
    pub violations: u64,
    /// Loans per month.
    pub borrowed_by_month: Vec<MonthlyBorrowCount>,
    /// Violation type breakdown.
    pub violation_types: Vec<ViolationTypeShare>,
    /// Most borrowed titles.
    pub top_borrowed: Vec<TopBorrowedBook>,
}

/// Read-only access to the statistics endpoints.
///
/// Obtained from [`Client::statistics`].
#[derive(Debug, Clone)]
pub struct StatisticsClient {
    client: Client,
}

impl StatisticsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.client.inner().api_get(path, Query::new()).await
    }

    /// Number of registered members.
    pub async fn member_count(&self) -> Result<u64, Error> {
        self.get("/api/users/count").await
    }

    /// Number of catalog titles.
    pub async fn book_count(&self) -> Result<u64, Error> {
        self.get("/api/books/count").await
    }

    /// Number of physical copies.
    pub async fn copy_count(&self) -> Result<u64, Error> {
        self.get("/api/book-copies/count").await
    }

    /// Number of loans ever recorded.
    pub async fn borrow_count(&self) -> Result<u64, Error> {
        self.get("/api/borrow-records/count").await
    }

    /// Number of loans not yet returned.
    pub async fn unreturned_count(&self) -> Result<u64, Error> {
        self.get("/api/borrow-records/total-unreturned").await
    }

    /// Number of violations recorded.
    pub async fn violation_count(&self) -> Result<u64, Error> {
        self.get("/api/violations/count").await
    }

    /// Loans per month.
    pub async fn borrowed_by_month(&self) -> Result<Vec<MonthlyBorrowCount>, Error> {
        self.get("/api/borrow-records/borrowed-by-month").await
    }

    /// Violation type breakdown.
    pub async fn violation_type_ratio(&self) -> Result<Vec<ViolationTypeShare>, Error> {
        self.get("/api/violations/type-ratio").await
    }

    /// Most borrowed titles.
    pub async fn top_borrowed(&self) -> Result<Vec<TopBorrowedBook>, Error> {
        self.get("/api/borrow-records/top-borrowed").await
    }

    /// Fetches every statistic concurrently.
    ///
    /// # Errors
    ///
    /// Fails as a whole with the first error; partial dashboards are never
    /// returned.
    pub async fn dashboard(&self) -> Result<Dashboard, Error> {
        let (
            members,
            books,
            copies,
            borrows,
            unreturned,
            violations,
            borrowed_by_month,
            violation_types,
            top_borrowed,
        ) = futures::try_join!(
            self.member_count(),
            self.book_count(),
            self.copy_count(),
            self.borrow_count(),
            self.unreturned_count(),
            self.violation_count(),
            self.borrowed_by_month(),
            self.violation_type_ratio(),
            self.top_borrowed(),
        )?;
        tracing::debug!(members, books, copies, "dashboard loaded");

        Ok(Dashboard {
            members,
            books,
            copies,
            borrows,
            unreturned,
            violations,
            borrowed_by_month,
            violation_types,
            top_borrowed,
        })
    }
}
