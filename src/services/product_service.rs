//! Product service for business logic operations.

use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, UpdateProduct};
use crate::repositories::ProductRepository;

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    /// Creates a new product.
    pub async fn create_product(&self, new_product: NewProduct) -> AppResult<Product> {
        self.repo.create(new_product).await
    }

    /// Gets a product by its ID, or `NotFound`.
    pub async fn get_product(&self, id: i32) -> AppResult<Product> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound {
            entity: "product".to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        })
    }

    /// Lists products with pagination and an optional category filter.
    pub async fn list_products(
        &self,
        offset: i64,
        limit: i64,
        category: Option<&str>,
        available: Option<bool>,
    ) -> AppResult<(Vec<Product>, i64)> {
        self.repo.list(offset, limit, category, available).await
    }

    /// Applies a partial update to a product.
    pub async fn update_product(&self, id: i32, update: UpdateProduct) -> AppResult<Product> {
        self.get_product(id).await?;
        self.repo.update(id, update).await
    }

    /// Deletes a product, or `NotFound` when no row matched.
    pub async fn delete_product(&self, id: i32) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound {
                entity: "product".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            });
        }
        Ok(())
    }

    /// Total product count. Feeds the dashboard.
    pub async fn count_products(&self) -> AppResult<i64> {
        self.repo.count().await
    }

    /// Products with stock strictly below the threshold. Feeds the dashboard.
    pub async fn count_low_stock(&self, threshold: i32) -> AppResult<i64> {
        self.repo.count_low_stock(threshold).await
    }
}
