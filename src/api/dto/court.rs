//! Court-related Data Transfer Objects

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::models::{Court, CourtStatus, CourtType, NewCourt, UpdateCourt};
use crate::services::Slot;

/// Create court request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCourtRequest {
    /// Court name (unique)
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Center Court", min_length = 1, max_length = 100)]
    pub name: String,
    /// Sport played on the court
    pub court_type: CourtType,
    /// Maximum number of players
    #[validate(range(min = 1, max = 50, message = "Capacity must be between 1 and 50"))]
    #[schema(example = 4, minimum = 1, maximum = 50)]
    pub capacity: i32,
    /// Hourly rate
    #[validate(custom(function = validate_non_negative_price))]
    #[schema(value_type = String, example = "25000.00")]
    pub price_per_hour: BigDecimal,
    /// Initial status; defaults to available
    pub status: Option<CourtStatus>,
    /// Optional image URL
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

impl CreateCourtRequest {
    pub fn into_new_court(self) -> NewCourt {
        NewCourt {
            name: self.name,
            court_type: self.court_type,
            capacity: self.capacity,
            price_per_hour: self.price_per_hour,
            status: self.status.unwrap_or(CourtStatus::Available),
            image_url: self.image_url,
        }
    }
}

/// Update court request payload; omitted fields are left unchanged
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCourtRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(min_length = 1, max_length = 100)]
    pub name: Option<String>,
    pub court_type: Option<CourtType>,
    #[validate(range(min = 1, max = 50, message = "Capacity must be between 1 and 50"))]
    #[schema(minimum = 1, maximum = 50)]
    pub capacity: Option<i32>,
    #[validate(custom(function = validate_optional_price))]
    #[schema(value_type = Option<String>)]
    pub price_per_hour: Option<BigDecimal>,
    pub status: Option<CourtStatus>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

impl UpdateCourtRequest {
    pub fn into_update_court(self) -> UpdateCourt {
        UpdateCourt {
            name: self.name,
            court_type: self.court_type,
            capacity: self.capacity,
            price_per_hour: self.price_per_hour,
            status: self.status,
            image_url: self.image_url,
        }
    }
}

/// Court representation
#[derive(Debug, Serialize, ToSchema)]
pub struct CourtResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Center Court")]
    pub name: String,
    pub court_type: CourtType,
    #[schema(example = 4)]
    pub capacity: i32,
    #[schema(value_type = String, example = "25000.00")]
    pub price_per_hour: BigDecimal,
    pub status: CourtStatus,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<Court> for CourtResponse {
    fn from(court: Court) -> Self {
        Self {
            id: court.id,
            name: court.name,
            court_type: court.court_type,
            capacity: court.capacity,
            price_per_hour: court.price_per_hour,
            status: court.status,
            image_url: court.image_url,
            created_at: court.created_at,
        }
    }
}

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct AvailabilityQuery {
    /// Calendar day to inspect
    #[param(example = "2026-03-14")]
    pub date: NaiveDate,
}

/// One slot on the daily availability grid
#[derive(Debug, Serialize, ToSchema)]
pub struct SlotResponse {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Whether the slot can still be booked
    pub available: bool,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            start_time: slot.start_time,
            end_time: slot.end_time,
            available: slot.available,
        }
    }
}

/// Availability response for one court and day
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    #[schema(example = 1)]
    pub court_id: i32,
    pub date: NaiveDate,
    pub slots: Vec<SlotResponse>,
}

fn validate_non_negative_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if *price < BigDecimal::from(0) {
        return Err(ValidationError::new("price").with_message("Price cannot be negative".into()));
    }
    Ok(())
}

fn validate_optional_price(price: &BigDecimal) -> Result<(), ValidationError> {
    validate_non_negative_price(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_negative_price_rejected() {
        let request = CreateCourtRequest {
            name: "Court 1".to_string(),
            court_type: CourtType::Tennis,
            capacity: 4,
            price_per_hour: BigDecimal::from_str("-10").unwrap(),
            status: None,
            image_url: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_request_passes() {
        let request = CreateCourtRequest {
            name: "Court 1".to_string(),
            court_type: CourtType::Padel,
            capacity: 4,
            price_per_hour: BigDecimal::from_str("25000.00").unwrap(),
            status: None,
            image_url: Some("https://example.com/court.jpg".to_string()),
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.into_new_court().status, CourtStatus::Available);
    }
}
