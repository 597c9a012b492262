//! Reservation-related Data Transfer Objects

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{
    Reservation, ReservationEquipment, ReservationPlayer, ReservationStatus,
};
use crate::repositories::{PlayerSpec, ReservationDetail};
use crate::services::{CreateReservationInput, EquipmentRequest};

/// One player on a booking request
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct PlayerRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    #[schema(example = "Maria")]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    #[schema(example = "Gonzalez")]
    pub last_name: String,
    /// Chilean national ID with check digit, e.g. "12.345.678-5"
    #[validate(length(min = 3, max = 15, message = "RUT must be between 3 and 15 characters"))]
    #[schema(example = "12.345.678-5")]
    pub rut: String,
    #[validate(range(min = 0, max = 120, message = "Age must be between 0 and 120"))]
    #[schema(example = 28, minimum = 0, maximum = 120)]
    pub age: i32,
}

/// One equipment line on a booking request
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct EquipmentLineRequest {
    #[schema(example = 3)]
    pub product_id: i32,
    #[validate(range(min = 1, max = 100, message = "Quantity must be between 1 and 100"))]
    #[schema(example = 2, minimum = 1, maximum = 100)]
    pub quantity: i32,
}

/// Create reservation request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateReservationRequest {
    #[schema(example = 1)]
    pub court_id: i32,
    /// Booking window start
    pub start_time: NaiveDateTime,
    /// Booking window end, same calendar day as the start
    pub end_time: NaiveDateTime,
    /// Players occupying the court, at most the court capacity
    #[validate(length(min = 1, message = "At least one player is required"), nested)]
    pub players: Vec<PlayerRequest>,
    /// Rented or purchased products
    #[serde(default)]
    #[validate(nested)]
    pub equipment: Vec<EquipmentLineRequest>,
    /// Optional payment card number; only the last four digits are stored
    #[schema(example = "4539578763621486", format = "password")]
    pub card_number: Option<String>,
}

impl CreateReservationRequest {
    pub fn into_input(self) -> CreateReservationInput {
        CreateReservationInput {
            court_id: self.court_id,
            start_time: self.start_time,
            end_time: self.end_time,
            players: self
                .players
                .into_iter()
                .map(|p| PlayerSpec {
                    first_name: p.first_name,
                    last_name: p.last_name,
                    rut: p.rut,
                    age: p.age,
                })
                .collect(),
            equipment: self
                .equipment
                .into_iter()
                .map(|e| EquipmentRequest {
                    product_id: e.product_id,
                    quantity: e.quantity,
                })
                .collect(),
            card_number: self.card_number,
        }
    }
}

/// Status change request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateReservationStatusRequest {
    /// Target lifecycle status
    pub status: ReservationStatus,
}

/// Reservation summary
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub court_id: i32,
    #[schema(example = 1)]
    pub user_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: ReservationStatus,
    #[schema(value_type = String, example = "30000.00")]
    pub amount: BigDecimal,
    /// Last four digits of the payment card, when one was used
    #[schema(example = "1486")]
    pub card_last_four: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            court_id: reservation.court_id,
            user_id: reservation.user_id,
            start_time: reservation.start_time,
            end_time: reservation.end_time,
            status: reservation.status,
            amount: reservation.amount,
            card_last_four: reservation.card_last_four,
            created_at: reservation.created_at,
        }
    }
}

/// Player on a stored reservation
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerResponse {
    pub first_name: String,
    pub last_name: String,
    pub rut: String,
    pub age: i32,
}

impl From<ReservationPlayer> for PlayerResponse {
    fn from(player: ReservationPlayer) -> Self {
        Self {
            first_name: player.first_name,
            last_name: player.last_name,
            rut: player.rut,
            age: player.age,
        }
    }
}

/// Equipment line on a stored reservation
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentLineResponse {
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price captured at booking time
    #[schema(value_type = String, example = "5000.00")]
    pub unit_price: BigDecimal,
}

impl From<ReservationEquipment> for EquipmentLineResponse {
    fn from(line: ReservationEquipment) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Reservation with its players and equipment lines
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDetailResponse {
    #[serde(flatten)]
    pub reservation: ReservationResponse,
    pub players: Vec<PlayerResponse>,
    pub equipment: Vec<EquipmentLineResponse>,
}

impl From<ReservationDetail> for ReservationDetailResponse {
    fn from(detail: ReservationDetail) -> Self {
        Self {
            reservation: ReservationResponse::from(detail.reservation),
            players: detail.players.into_iter().map(PlayerResponse::from).collect(),
            equipment: detail
                .equipment
                .into_iter()
                .map(EquipmentLineResponse::from)
                .collect(),
        }
    }
}
