//! Product repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewProduct, Product, UpdateProduct};

#[derive(Clone)]
pub struct ProductRepository {
    pool: AsyncDbPool,
}

impl ProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new product.
    pub async fn create(&self, new_product: NewProduct) -> Result<Product, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(products)
            .values(&new_product)
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a product by its ID.
    pub async fn find_by_id(&self, product_id: i32) -> Result<Option<Product>, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        products
            .filter(id.eq(product_id))
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists products with offset pagination and optional category and
    /// availability filters.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        filter_category: Option<&str>,
        filter_available: Option<bool>,
    ) -> Result<(Vec<Product>, i64), AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        let mut count_query = products.into_boxed();
        let mut rows_query = products.into_boxed();
        if let Some(cat) = filter_category {
            count_query = count_query.filter(category.eq(cat));
            rows_query = rows_query.filter(category.eq(cat));
        }
        if let Some(av) = filter_available {
            count_query = count_query.filter(available.eq(av));
            rows_query = rows_query.filter(available.eq(av));
        }

        let total: i64 = count_query.count().get_result(&mut conn).await?;
        let rows = rows_query
            .order(id.asc())
            .offset(offset)
            .limit(limit)
            .select(Product::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    /// Updates a product's data.
    pub async fn update(
        &self,
        product_id: i32,
        update_data: UpdateProduct,
    ) -> Result<Product, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(products.filter(id.eq(product_id)))
            .set((&update_data, updated_at.eq(diesel::dsl::now)))
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a product, returning the number of affected rows.
    pub async fn delete(&self, product_id: i32) -> Result<usize, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(products.filter(id.eq(product_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts all products.
    pub async fn count(&self) -> Result<i64, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        products
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts products whose stock is strictly below the given threshold.
    pub async fn count_low_stock(&self, threshold: i32) -> Result<i64, AppError> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        products
            .filter(stock.lt(threshold))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
