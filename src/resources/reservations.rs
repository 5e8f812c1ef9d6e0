use serde::{Deserialize, Serialize};

use super::{Identified, RecordId, Resource};
use crate::client::ResourceClient;
use crate::transport::Method;
use crate::Error;

/// Reservations of catalog titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reservations;

/// A reservation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reservation {
    /// Identifier.
    pub id: i64,
    /// Member name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Member email.
    #[serde(default)]
    pub email: Option<String>,
    /// Book identifier.
    #[serde(default)]
    pub book_id: Option<i64>,
    /// Book title.
    #[serde(default)]
    pub book_title: Option<String>,
    /// Reservation date.
    #[serde(default)]
    pub reservation_date: Option<String>,
    /// `PENDING`, `FULFILLED`, `CANCELLED`, ...
    #[serde(default)]
    pub status: Option<String>,
    /// Copy handed out when the reservation was fulfilled.
    #[serde(default)]
    pub approved_copy_id: Option<i64>,
}

impl Reservation {
    /// Status of an open reservation.
    pub const PENDING: &'static str = "PENDING";
    /// Status of a reservation served with a copy.
    pub const FULFILLED: &'static str = "FULFILLED";

    /// Returns `true` while the reservation awaits a copy.
    pub fn is_pending(&self) -> bool {
        self.status.as_deref() == Some(Self::PENDING)
    }
}

impl Identified for Reservation {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body for placing a reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReservationPayload {
    /// Member identifier.
    pub user_id: Option<i64>,
    /// Book identifier.
    pub book_id: Option<i64>,
    /// Reservation date.
    pub reservation_date: Option<String>,
}

impl Resource for Reservations {
    type Record = Reservation;
    type Payload = ReservationPayload;

    const NAME: &'static str = "reservation";
    const PLURAL: &'static str = "reservations";
    const COLLECTION: &'static str = "/api/reservations";
    const SEARCH: &'static str = "/api/reservations";
    const FILTERS: &'static [&'static str] = &["status", "startDate", "endDate"];
}

impl Reservations {
    /// Returns the paged reservation history of one member.
    ///
    /// Pass it to [`ListConfig::with_search_path`](crate::ListConfig::with_search_path).
    pub fn member_history_path(user_id: i64) -> String {
        format!("{}/user/{}", Self::COLLECTION, user_id)
    }
}

impl ResourceClient<Reservations> {
    /// Cancels a reservation.
    pub async fn cancel(&self, id: &RecordId<Reservations>) -> Result<(), Error> {
        let path = format!("{}/cancel", Reservations::record_path(id));
        self.command(Method::Put, &path, None::<&()>).await
    }

    /// Fulfils a reservation with the chosen copy.
    pub async fn approve(&self, id: &RecordId<Reservations>, copy_id: i64) -> Result<(), Error> {
        let body = serde_json::json!({
            "status": Reservation::FULFILLED,
            "approved_copy_id": copy_id,
        });
        self.command(Method::Put, &Reservations::record_path(id), Some(&body))
            .await
    }
}
