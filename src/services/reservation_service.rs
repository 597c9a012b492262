//! Reservation service: slot availability and booking lifecycle.
//!
//! The slot calculation is a pure function over the facility's opening hours
//! and the day's confirmed bookings; everything touching the database goes
//! through the repository layer, with the overlap-sensitive writes running
//! inside transactions there.

use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::info;

use crate::config::FacilityConfig;
use crate::error::{AppError, AppResult};
use crate::models::{CourtStatus, NewReservation, Reservation, ReservationStatus};
use crate::repositories::{
    CourtRepository, EquipmentSpec, PlayerSpec, ProductRepository, ReservationDetail,
    ReservationRepository,
};
use crate::utils::card;
use crate::utils::rut;

/// One bookable time slot on a court's daily grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub available: bool,
}

/// Equipment requested at booking time; the price is looked up server-side.
#[derive(Debug, Clone)]
pub struct EquipmentRequest {
    pub product_id: i32,
    pub quantity: i32,
}

/// Everything needed to book a court, minus the authenticated user.
#[derive(Debug, Clone)]
pub struct CreateReservationInput {
    pub court_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub players: Vec<PlayerSpec>,
    pub equipment: Vec<EquipmentRequest>,
    pub card_number: Option<String>,
}

/// Generates the 60-minute slot grid for one calendar day and marks each slot
/// unavailable iff it intersects a busy interval.
///
/// Intervals are half-open: a slot and a booking touching only at their
/// endpoints do not conflict.
pub fn compute_slots(
    date: NaiveDate,
    opening_hour: u32,
    closing_hour: u32,
    busy: &[(NaiveDateTime, NaiveDateTime)],
) -> Vec<Slot> {
    let midnight = date.and_time(NaiveTime::MIN);
    (opening_hour..closing_hour)
        .map(|hour| {
            let start = midnight + Duration::hours(i64::from(hour));
            let end = start + Duration::hours(1);
            let taken = busy
                .iter()
                .any(|&(busy_start, busy_end)| start < busy_end && end > busy_start);
            Slot {
                start_time: start,
                end_time: end,
                available: !taken,
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepository,
    courts: CourtRepository,
    products: ProductRepository,
    facility: FacilityConfig,
}

impl ReservationService {
    pub fn new(
        reservations: ReservationRepository,
        courts: CourtRepository,
        products: ProductRepository,
        facility: FacilityConfig,
    ) -> Self {
        Self {
            reservations,
            courts,
            products,
            facility,
        }
    }

    /// Slot availability for a court on a calendar day.
    pub async fn availability(&self, court_id: i32, date: NaiveDate) -> AppResult<Vec<Slot>> {
        self.courts
            .find_by_id(court_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "court".to_string(),
                field: "id".to_string(),
                value: court_id.to_string(),
            })?;

        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        let confirmed = self
            .reservations
            .confirmed_for_court_between(court_id, day_start, day_end)
            .await?;
        let busy: Vec<(NaiveDateTime, NaiveDateTime)> = confirmed
            .iter()
            .map(|r| (r.start_time, r.end_time))
            .collect();

        Ok(compute_slots(
            date,
            self.facility.opening_hour,
            self.facility.closing_hour,
            &busy,
        ))
    }

    /// Books a court for a user.
    ///
    /// Validates the time window, players, card and equipment, prices the
    /// booking, then hands the whole write to the repository's transaction.
    /// A booking paid by card starts confirmed; without a card it stays
    /// pending until confirmed through the status endpoint.
    pub async fn create_reservation(
        &self,
        user_id: i32,
        input: CreateReservationInput,
    ) -> AppResult<ReservationDetail> {
        let court = self
            .courts
            .find_by_id(input.court_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "court".to_string(),
                field: "id".to_string(),
                value: input.court_id.to_string(),
            })?;
        if court.status == CourtStatus::Maintenance {
            return Err(AppError::Conflict {
                message: format!("Court {} is under maintenance", court.id),
            });
        }

        self.validate_window(input.start_time, input.end_time)?;
        self.validate_players(&input.players, court.capacity)?;

        let card_last_four = match input.card_number.as_deref() {
            Some(number) => {
                if !card::is_valid_card_number(number) {
                    return Err(AppError::Validation {
                        field: "card_number".to_string(),
                        reason: "Card number fails the checksum".to_string(),
                    });
                }
                card::card_last_four(number)
            }
            None => None,
        };

        let mut equipment = Vec::with_capacity(input.equipment.len());
        let mut equipment_total = BigDecimal::from(0);
        for line in &input.equipment {
            if line.quantity < 1 {
                return Err(AppError::Validation {
                    field: "equipment.quantity".to_string(),
                    reason: "Quantity must be at least 1".to_string(),
                });
            }
            let product = self
                .products
                .find_by_id(line.product_id)
                .await?
                .ok_or(AppError::NotFound {
                    entity: "product".to_string(),
                    field: "id".to_string(),
                    value: line.product_id.to_string(),
                })?;
            if !product.is_orderable() || product.stock < line.quantity {
                return Err(AppError::Conflict {
                    message: format!("Product {} is not available in that quantity", product.id),
                });
            }
            equipment_total += product.price.clone() * BigDecimal::from(line.quantity);
            equipment.push(EquipmentSpec {
                product_id: product.id,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }

        let minutes = (input.end_time - input.start_time).num_minutes();
        let duration_hours = BigDecimal::from(minutes) / BigDecimal::from(60);
        let amount = court.price_per_hour.clone() * duration_hours + equipment_total;

        let status = if card_last_four.is_some() {
            ReservationStatus::Confirmed
        } else {
            ReservationStatus::Pending
        };

        let detail = self
            .reservations
            .create_with_details(
                NewReservation {
                    court_id: court.id,
                    user_id,
                    start_time: input.start_time,
                    end_time: input.end_time,
                    status,
                    amount,
                    card_last_four,
                },
                input.players,
                equipment,
            )
            .await?;

        info!(
            reservation_id = detail.reservation.id,
            court_id = court.id,
            user_id,
            status = ?detail.reservation.status,
            "reservation created"
        );
        Ok(detail)
    }

    /// Gets a reservation summary without its owned records.
    pub async fn get_reservation(&self, id: i32) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "reservation".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    /// Gets a reservation with its players and equipment lines.
    pub async fn get_detail(&self, id: i32) -> AppResult<ReservationDetail> {
        self.reservations
            .find_detail(id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "reservation".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    /// Lists reservations, optionally scoped to one user.
    pub async fn list_reservations(
        &self,
        offset: i64,
        limit: i64,
        owner_id: Option<i32>,
    ) -> AppResult<(Vec<Reservation>, i64)> {
        self.reservations.list(offset, limit, owner_id).await
    }

    /// Moves a reservation to the requested status.
    ///
    /// Transitions outside the lifecycle matrix are rejected as
    /// unprocessable. Confirming re-checks for overlap and cancelling
    /// restores equipment stock, both transactionally.
    pub async fn change_status(
        &self,
        id: i32,
        next: ReservationStatus,
    ) -> AppResult<Reservation> {
        let current = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "reservation".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::UnprocessableContent {
                message: format!(
                    "Cannot move a {:?} reservation to {:?}",
                    current.status, next
                ),
            });
        }

        let updated = match next {
            ReservationStatus::Confirmed => self.reservations.confirm(id).await?,
            ReservationStatus::Cancelled => self.reservations.cancel_and_restock(id).await?,
            _ => self.reservations.set_status(id, next).await?,
        };

        info!(
            reservation_id = id,
            from = ?current.status,
            to = ?updated.status,
            "reservation status changed"
        );
        Ok(updated)
    }

    /// Reservations starting today. Feeds the dashboard.
    pub async fn count_today(&self) -> AppResult<i64> {
        let day_start = Utc::now().date_naive().and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        self.reservations
            .count_starting_between(day_start, day_end)
            .await
    }

    /// All reservations ever made. Feeds the dashboard.
    pub async fn count_reservations(&self) -> AppResult<i64> {
        self.reservations.count().await
    }

    /// Confirmed plus completed revenue for bookings starting in the window.
    pub async fn revenue_between(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> AppResult<BigDecimal> {
        Ok(self
            .reservations
            .revenue_between(window_start, window_end)
            .await?
            .unwrap_or_else(|| BigDecimal::from(0)))
    }

    fn validate_window(&self, start: NaiveDateTime, end: NaiveDateTime) -> AppResult<()> {
        if start >= end {
            return Err(AppError::Validation {
                field: "start_time".to_string(),
                reason: "Start time must be before end time".to_string(),
            });
        }
        if start.date() != end.date() {
            return Err(AppError::Validation {
                field: "end_time".to_string(),
                reason: "A reservation cannot span multiple days".to_string(),
            });
        }

        let midnight = start.date().and_time(NaiveTime::MIN);
        let opens = midnight + Duration::hours(i64::from(self.facility.opening_hour));
        let closes = midnight + Duration::hours(i64::from(self.facility.closing_hour));
        if start < opens || end > closes {
            return Err(AppError::Validation {
                field: "start_time".to_string(),
                reason: format!(
                    "Reservations must fall between {:02}:00 and {:02}:00",
                    self.facility.opening_hour, self.facility.closing_hour
                ),
            });
        }
        Ok(())
    }

    fn validate_players(&self, players: &[PlayerSpec], capacity: i32) -> AppResult<()> {
        if players.is_empty() {
            return Err(AppError::Validation {
                field: "players".to_string(),
                reason: "At least one player is required".to_string(),
            });
        }
        if players.len() as i64 > i64::from(capacity) {
            return Err(AppError::Validation {
                field: "players".to_string(),
                reason: format!("Player count exceeds the court capacity of {}", capacity),
            });
        }
        for player in players {
            if player.age < 0 {
                return Err(AppError::Validation {
                    field: "players.age".to_string(),
                    reason: "Age cannot be negative".to_string(),
                });
            }
            if !rut::is_valid_rut(&player.rut) {
                return Err(AppError::Validation {
                    field: "players.rut".to_string(),
                    reason: format!("Invalid RUT: {}", player.rut),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn dt(hour: u32, minute: u32) -> NaiveDateTime {
        date().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_full_day_grid_when_no_bookings() {
        let slots = compute_slots(date(), 8, 22, &[]);
        assert_eq!(slots.len(), 14);
        assert!(slots.iter().all(|s| s.available));
        assert_eq!(slots[0].start_time, dt(8, 0));
        assert_eq!(slots[13].end_time, dt(22, 0));
    }

    #[test]
    fn test_booking_blocks_exactly_its_slot() {
        let slots = compute_slots(date(), 8, 22, &[(dt(10, 0), dt(11, 0))]);
        for slot in &slots {
            assert_eq!(slot.available, slot.start_time != dt(10, 0));
        }
    }

    #[test]
    fn test_touching_endpoints_do_not_conflict() {
        // A booking ending exactly at 10:00 leaves the 10:00 slot free.
        let slots = compute_slots(date(), 8, 22, &[(dt(9, 0), dt(10, 0))]);
        let ten = slots.iter().find(|s| s.start_time == dt(10, 0)).unwrap();
        assert!(ten.available);
    }

    #[test]
    fn test_partial_overlap_blocks_both_slots() {
        let slots = compute_slots(date(), 8, 22, &[(dt(10, 30), dt(11, 30))]);
        let blocked: Vec<_> = slots.iter().filter(|s| !s.available).collect();
        assert_eq!(blocked.len(), 2);
        assert_eq!(blocked[0].start_time, dt(10, 0));
        assert_eq!(blocked[1].start_time, dt(11, 0));
    }

    #[test]
    fn test_multi_hour_booking_blocks_each_hour() {
        let slots = compute_slots(date(), 8, 22, &[(dt(14, 0), dt(17, 0))]);
        let blocked: Vec<_> = slots.iter().filter(|s| !s.available).collect();
        assert_eq!(blocked.len(), 3);
    }

    proptest! {
        /// Every slot is marked unavailable iff it truly intersects a busy
        /// interval, for arbitrary bookings inside the day.
        #[test]
        fn prop_slot_matches_interval_intersection(
            start_min in 0u32..1380,
            len_min in 1u32..240,
        ) {
            let busy_start = date().and_time(NaiveTime::MIN)
                + Duration::minutes(i64::from(start_min));
            let busy_end = busy_start + Duration::minutes(i64::from(len_min));
            let slots = compute_slots(date(), 8, 22, &[(busy_start, busy_end)]);

            prop_assert_eq!(slots.len(), 14);
            for slot in slots {
                let intersects =
                    slot.start_time < busy_end && slot.end_time > busy_start;
                prop_assert_eq!(slot.available, !intersects);
            }
        }
    }
}
