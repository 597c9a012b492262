//! Court service for business logic operations.

use crate::error::{AppError, AppResult};
use crate::models::{Court, CourtStatus, NewCourt, UpdateCourt};
use crate::repositories::CourtRepository;

#[derive(Clone)]
pub struct CourtService {
    repo: CourtRepository,
}

impl CourtService {
    pub fn new(repo: CourtRepository) -> Self {
        Self { repo }
    }

    /// Creates a new court.
    pub async fn create_court(&self, new_court: NewCourt) -> AppResult<Court> {
        self.repo.create(new_court).await
    }

    /// Gets a court by its ID, or `NotFound`.
    pub async fn get_court(&self, id: i32) -> AppResult<Court> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound {
            entity: "court".to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        })
    }

    /// Lists courts with pagination, returning the rows and the total count.
    pub async fn list_courts(&self, offset: i64, limit: i64) -> AppResult<(Vec<Court>, i64)> {
        self.repo.list(offset, limit).await
    }

    /// Applies a partial update to a court.
    pub async fn update_court(&self, id: i32, update: UpdateCourt) -> AppResult<Court> {
        // Surface NotFound instead of diesel's empty-update error.
        self.get_court(id).await?;
        self.repo.update(id, update).await
    }

    /// Deletes a court, or `NotFound` when no row matched.
    pub async fn delete_court(&self, id: i32) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound {
                entity: "court".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            });
        }
        Ok(())
    }

    /// Court counts grouped by status. Feeds the dashboard.
    pub async fn count_by_status(&self) -> AppResult<Vec<(CourtStatus, i64)>> {
        self.repo.count_by_status().await
    }
}
