//! Court models for database operations.

use chrono::NaiveDateTime;
use bigdecimal::BigDecimal;
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

/// Operational status of a court
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
pub enum CourtStatus {
    Available,
    Occupied,
    Maintenance,
}

impl diesel::query_builder::QueryId for CourtStatus {
    type QueryId = CourtStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for CourtStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            CourtStatus::Available => "available",
            CourtStatus::Occupied => "occupied",
            CourtStatus::Maintenance => "maintenance",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for CourtStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "available" => Ok(CourtStatus::Available),
            "occupied" => Ok(CourtStatus::Occupied),
            "maintenance" => Ok(CourtStatus::Maintenance),
            _ => Err(format!("Unrecognized court status: {}", s).into()),
        }
    }
}

/// Sport played on a court
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
pub enum CourtType {
    Tennis,
    Padel,
    Football,
    Basketball,
}

impl diesel::query_builder::QueryId for CourtType {
    type QueryId = CourtType;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for CourtType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            CourtType::Tennis => "tennis",
            CourtType::Padel => "padel",
            CourtType::Football => "football",
            CourtType::Basketball => "basketball",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for CourtType {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "tennis" => Ok(CourtType::Tennis),
            "padel" => Ok(CourtType::Padel),
            "football" => Ok(CourtType::Football),
            "basketball" => Ok(CourtType::Basketball),
            _ => Err(format!("Unrecognized court type: {}", s).into()),
        }
    }
}

// ============================================================================
// Models
// ============================================================================

/// Court model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::courts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Court {
    pub id: i32,
    pub name: String,
    pub court_type: CourtType,
    pub capacity: i32,
    pub price_per_hour: BigDecimal,
    pub status: CourtStatus,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewCourt model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::courts)]
pub struct NewCourt {
    pub name: String,
    pub court_type: CourtType,
    pub capacity: i32,
    pub price_per_hour: BigDecimal,
    pub status: CourtStatus,
    pub image_url: Option<String>,
}

/// UpdateCourt model for partial updates
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::courts)]
pub struct UpdateCourt {
    pub name: Option<String>,
    pub court_type: Option<CourtType>,
    pub capacity: Option<i32>,
    pub price_per_hour: Option<BigDecimal>,
    pub status: Option<CourtStatus>,
    pub image_url: Option<String>,
}
