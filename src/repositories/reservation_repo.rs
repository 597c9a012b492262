//! Reservation repository for async database operations.
//!
//! Booking creation and status changes run inside database transactions so
//! the overlap check, the inserts and the stock adjustments either all land
//! or none do.

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{
    NewReservation, NewReservationEquipment, NewReservationPlayer, Reservation,
    ReservationEquipment, ReservationPlayer, ReservationStatus,
};

/// Player details supplied at booking time, before a reservation ID exists.
#[derive(Debug, Clone)]
pub struct PlayerSpec {
    pub first_name: String,
    pub last_name: String,
    pub rut: String,
    pub age: i32,
}

/// Equipment line supplied at booking time. The unit price is captured here
/// so later product price changes do not rewrite past bookings.
#[derive(Debug, Clone)]
pub struct EquipmentSpec {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// A reservation together with its owned player and equipment records.
#[derive(Debug, Clone)]
pub struct ReservationDetail {
    pub reservation: Reservation,
    pub players: Vec<ReservationPlayer>,
    pub equipment: Vec<ReservationEquipment>,
}

#[derive(Clone)]
pub struct ReservationRepository {
    pool: AsyncDbPool,
}

impl ReservationRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a reservation with its players and equipment lines in a single
    /// transaction.
    ///
    /// The overlap check against confirmed bookings and the stock decrements
    /// run inside the same transaction as the inserts, so two concurrent
    /// requests for the same slot cannot both succeed.
    pub async fn create_with_details(
        &self,
        new_reservation: NewReservation,
        players: Vec<PlayerSpec>,
        equipment: Vec<EquipmentSpec>,
    ) -> Result<ReservationDetail, AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<ReservationDetail, AppError, _>(|conn| {
            async move {
                let blocking: i64 = {
                    use crate::schema::reservations::dsl::*;
                    reservations
                        .filter(court_id.eq(new_reservation.court_id))
                        .filter(status.eq_any(ReservationStatus::blocking()))
                        .filter(start_time.lt(new_reservation.end_time))
                        .filter(end_time.gt(new_reservation.start_time))
                        .count()
                        .get_result(conn)
                        .await?
                };
                if blocking > 0 {
                    return Err(AppError::Conflict {
                        message: "The requested time slot is already booked".to_string(),
                    });
                }

                let reservation: Reservation = {
                    use crate::schema::reservations::dsl::*;
                    diesel::insert_into(reservations)
                        .values(&new_reservation)
                        .returning(Reservation::as_returning())
                        .get_result(conn)
                        .await?
                };

                let player_rows: Vec<NewReservationPlayer> = players
                    .into_iter()
                    .map(|p| NewReservationPlayer {
                        reservation_id: reservation.id,
                        first_name: p.first_name,
                        last_name: p.last_name,
                        rut: p.rut,
                        age: p.age,
                    })
                    .collect();
                let inserted_players: Vec<ReservationPlayer> = {
                    use crate::schema::reservation_players::dsl::*;
                    diesel::insert_into(reservation_players)
                        .values(&player_rows)
                        .returning(ReservationPlayer::as_returning())
                        .get_results(conn)
                        .await?
                };

                let mut inserted_equipment = Vec::with_capacity(equipment.len());
                for line in equipment {
                    // Guarded decrement: zero affected rows means the stock
                    // ran out between validation and commit.
                    let affected = {
                        use crate::schema::products::dsl::*;
                        diesel::update(
                            products
                                .filter(id.eq(line.product_id))
                                .filter(stock.ge(line.quantity)),
                        )
                        .set(stock.eq(stock - line.quantity))
                        .execute(conn)
                        .await?
                    };
                    if affected == 0 {
                        return Err(AppError::Conflict {
                            message: format!(
                                "Insufficient stock for product {}",
                                line.product_id
                            ),
                        });
                    }

                    let row: ReservationEquipment = {
                        use crate::schema::reservation_equipment::dsl::*;
                        diesel::insert_into(reservation_equipment)
                            .values(&NewReservationEquipment {
                                reservation_id: reservation.id,
                                product_id: line.product_id,
                                quantity: line.quantity,
                                unit_price: line.unit_price,
                            })
                            .returning(ReservationEquipment::as_returning())
                            .get_result(conn)
                            .await?
                    };
                    inserted_equipment.push(row);
                }

                Ok(ReservationDetail {
                    reservation,
                    players: inserted_players,
                    equipment: inserted_equipment,
                })
            }
            .scope_boxed()
        })
        .await
    }

    /// Finds a reservation by its ID.
    pub async fn find_by_id(&self, reservation_id: i32) -> Result<Option<Reservation>, AppError> {
        use crate::schema::reservations::dsl::*;
        let mut conn = self.pool.get().await?;

        reservations
            .filter(id.eq(reservation_id))
            .select(Reservation::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Loads a reservation with its players and equipment lines.
    pub async fn find_detail(
        &self,
        reservation_id: i32,
    ) -> Result<Option<ReservationDetail>, AppError> {
        let mut conn = self.pool.get().await?;

        let reservation: Option<Reservation> = {
            use crate::schema::reservations::dsl::*;
            reservations
                .filter(id.eq(reservation_id))
                .select(Reservation::as_select())
                .first(&mut conn)
                .await
                .optional()?
        };
        let Some(reservation) = reservation else {
            return Ok(None);
        };

        let players = {
            use crate::schema::reservation_players;
            reservation_players::table
                .filter(reservation_players::reservation_id.eq(reservation.id))
                .order(reservation_players::id.asc())
                .select(ReservationPlayer::as_select())
                .load(&mut conn)
                .await?
        };
        let equipment = {
            use crate::schema::reservation_equipment;
            reservation_equipment::table
                .filter(reservation_equipment::reservation_id.eq(reservation.id))
                .order(reservation_equipment::id.asc())
                .select(ReservationEquipment::as_select())
                .load(&mut conn)
                .await?
        };

        Ok(Some(ReservationDetail {
            reservation,
            players,
            equipment,
        }))
    }

    /// Lists reservations ordered by start time descending, optionally scoped
    /// to a single user.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        owner_id: Option<i32>,
    ) -> Result<(Vec<Reservation>, i64), AppError> {
        use crate::schema::reservations::dsl::*;
        let mut conn = self.pool.get().await?;

        let mut count_query = reservations.into_boxed();
        let mut rows_query = reservations.into_boxed();
        if let Some(owner) = owner_id {
            count_query = count_query.filter(user_id.eq(owner));
            rows_query = rows_query.filter(user_id.eq(owner));
        }

        let total: i64 = count_query.count().get_result(&mut conn).await?;
        let rows = rows_query
            .order(start_time.desc())
            .offset(offset)
            .limit(limit)
            .select(Reservation::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    /// Blocking reservations for a court that overlap the given window.
    /// Feeds the slot availability calculation.
    pub async fn confirmed_for_court_between(
        &self,
        for_court: i32,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<Reservation>, AppError> {
        use crate::schema::reservations::dsl::*;
        let mut conn = self.pool.get().await?;

        reservations
            .filter(court_id.eq(for_court))
            .filter(status.eq_any(ReservationStatus::blocking()))
            .filter(start_time.lt(window_end))
            .filter(end_time.gt(window_start))
            .order(start_time.asc())
            .select(Reservation::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Confirms a pending reservation.
    ///
    /// Re-checks for overlapping confirmed bookings inside the transaction,
    /// since the slot may have been taken while this one sat pending.
    pub async fn confirm(&self, reservation_id: i32) -> Result<Reservation, AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<Reservation, AppError, _>(|conn| {
            async move {
                use crate::schema::reservations::dsl::*;

                let current: Reservation = reservations
                    .filter(id.eq(reservation_id))
                    .select(Reservation::as_select())
                    .first(conn)
                    .await?;

                let blocking: i64 = reservations
                    .filter(court_id.eq(current.court_id))
                    .filter(id.ne(current.id))
                    .filter(status.eq_any(ReservationStatus::blocking()))
                    .filter(start_time.lt(current.end_time))
                    .filter(end_time.gt(current.start_time))
                    .count()
                    .get_result(conn)
                    .await?;
                if blocking > 0 {
                    return Err(AppError::Conflict {
                        message: "The time slot was booked while this reservation was pending"
                            .to_string(),
                    });
                }

                diesel::update(reservations.filter(id.eq(reservation_id)))
                    .set((
                        status.eq(ReservationStatus::Confirmed),
                        updated_at.eq(diesel::dsl::now),
                    ))
                    .returning(Reservation::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(AppError::from)
            }
            .scope_boxed()
        })
        .await
    }

    /// Cancels a reservation and returns its equipment quantities to stock
    /// in the same transaction.
    pub async fn cancel_and_restock(&self, reservation_id: i32) -> Result<Reservation, AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<Reservation, AppError, _>(|conn| {
            async move {
                let cancelled: Reservation = {
                    use crate::schema::reservations::dsl::*;
                    diesel::update(reservations.filter(id.eq(reservation_id)))
                        .set((
                            status.eq(ReservationStatus::Cancelled),
                            updated_at.eq(diesel::dsl::now),
                        ))
                        .returning(Reservation::as_returning())
                        .get_result(conn)
                        .await?
                };

                let lines: Vec<ReservationEquipment> = {
                    use crate::schema::reservation_equipment;
                    reservation_equipment::table
                        .filter(reservation_equipment::reservation_id.eq(cancelled.id))
                        .select(ReservationEquipment::as_select())
                        .load(conn)
                        .await?
                };
                for line in lines {
                    use crate::schema::products::dsl::*;
                    diesel::update(products.filter(id.eq(line.product_id)))
                        .set(stock.eq(stock + line.quantity))
                        .execute(conn)
                        .await?;
                }

                Ok(cancelled)
            }
            .scope_boxed()
        })
        .await
    }

    /// Sets a reservation's status without any side effects. Used for the
    /// transitions that need no overlap check or restock.
    pub async fn set_status(
        &self,
        reservation_id: i32,
        new_status: ReservationStatus,
    ) -> Result<Reservation, AppError> {
        use crate::schema::reservations::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(reservations.filter(id.eq(reservation_id)))
            .set((status.eq(new_status), updated_at.eq(diesel::dsl::now)))
            .returning(Reservation::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts all reservations regardless of status.
    pub async fn count(&self) -> Result<i64, AppError> {
        use crate::schema::reservations::dsl::*;
        let mut conn = self.pool.get().await?;

        reservations
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts reservations whose start time falls in the given window.
    pub async fn count_starting_between(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<i64, AppError> {
        use crate::schema::reservations::dsl::*;
        let mut conn = self.pool.get().await?;

        reservations
            .filter(start_time.ge(window_start))
            .filter(start_time.lt(window_end))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Sums the amounts of confirmed and completed reservations starting in
    /// the given window. `None` when no rows match.
    pub async fn revenue_between(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Option<BigDecimal>, AppError> {
        use crate::schema::reservations::dsl::*;
        let mut conn = self.pool.get().await?;

        reservations
            .filter(status.eq_any([
                ReservationStatus::Confirmed,
                ReservationStatus::Completed,
            ]))
            .filter(start_time.ge(window_start))
            .filter(start_time.lt(window_end))
            .select(diesel::dsl::sum(amount))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
