//! Reservation models: the booking itself plus its owned player and
//! equipment line records.

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;

// ============================================================================
// Enums
// ============================================================================

/// Lifecycle status of a reservation
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl diesel::query_builder::QueryId for ReservationStatus {
    type QueryId = ReservationStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for ReservationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for ReservationStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "completed" => Ok(ReservationStatus::Completed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Unrecognized reservation status: {}", s).into()),
        }
    }
}

impl ReservationStatus {
    /// Allowed lifecycle transitions:
    /// pending -> confirmed | cancelled, confirmed -> completed | cancelled.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Confirmed)
                | (ReservationStatus::Pending, ReservationStatus::Cancelled)
                | (ReservationStatus::Confirmed, ReservationStatus::Completed)
                | (ReservationStatus::Confirmed, ReservationStatus::Cancelled)
        )
    }

    /// Statuses that occupy the court and therefore block other bookings.
    /// Overlap queries filter on this set.
    pub fn blocking() -> [ReservationStatus; 1] {
        [ReservationStatus::Confirmed]
    }
}

// ============================================================================
// Models
// ============================================================================

/// Reservation model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Reservation {
    pub id: i32,
    pub court_id: i32,
    pub user_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: ReservationStatus,
    pub amount: BigDecimal,
    pub card_last_four: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewReservation model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::reservations)]
pub struct NewReservation {
    pub court_id: i32,
    pub user_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: ReservationStatus,
    pub amount: BigDecimal,
    pub card_last_four: Option<String>,
}

/// Player registered on a reservation, owned by exactly one reservation.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::reservation_players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReservationPlayer {
    pub id: i32,
    pub reservation_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub rut: String,
    pub age: i32,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::reservation_players)]
pub struct NewReservationPlayer {
    pub reservation_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub rut: String,
    pub age: i32,
}

/// Equipment line (rented or purchased product) attached to a reservation.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::reservation_equipment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReservationEquipment {
    pub id: i32,
    pub reservation_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::reservation_equipment)]
pub struct NewReservationEquipment {
    pub reservation_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use ReservationStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_only_confirmed_blocks_court() {
        use ReservationStatus::*;

        let blocking = ReservationStatus::blocking();
        assert!(blocking.contains(&Confirmed));
        assert!(!blocking.contains(&Pending));
        assert!(!blocking.contains(&Completed));
        assert!(!blocking.contains(&Cancelled));
    }
}
