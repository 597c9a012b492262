//! Court repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Court, CourtStatus, NewCourt, UpdateCourt};

#[derive(Clone)]
pub struct CourtRepository {
    pool: AsyncDbPool,
}

impl CourtRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new court.
    pub async fn create(&self, new_court: NewCourt) -> Result<Court, AppError> {
        use crate::schema::courts::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(courts)
            .values(&new_court)
            .returning(Court::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a court by its ID.
    pub async fn find_by_id(&self, court_id: i32) -> Result<Option<Court>, AppError> {
        use crate::schema::courts::dsl::*;
        let mut conn = self.pool.get().await?;

        courts
            .filter(id.eq(court_id))
            .select(Court::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists courts ordered by ID with offset pagination; also returns the
    /// total row count so callers can build paged responses.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<Court>, i64), AppError> {
        use crate::schema::courts::dsl::*;
        let mut conn = self.pool.get().await?;

        let total: i64 = courts.count().get_result(&mut conn).await?;
        let rows = courts
            .order(id.asc())
            .offset(offset)
            .limit(limit)
            .select(Court::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    /// Updates a court's data.
    pub async fn update(
        &self,
        court_id: i32,
        update_data: UpdateCourt,
    ) -> Result<Court, AppError> {
        use crate::schema::courts::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(courts.filter(id.eq(court_id)))
            .set((&update_data, updated_at.eq(diesel::dsl::now)))
            .returning(Court::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a court, returning the number of affected rows.
    pub async fn delete(&self, court_id: i32) -> Result<usize, AppError> {
        use crate::schema::courts::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(courts.filter(id.eq(court_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts courts grouped by status.
    pub async fn count_by_status(&self) -> Result<Vec<(CourtStatus, i64)>, AppError> {
        use crate::schema::courts::dsl::*;
        let mut conn = self.pool.get().await?;

        courts
            .group_by(status)
            .select((status, diesel::dsl::count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
