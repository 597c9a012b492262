//! Product-related Data Transfer Objects

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::models::{NewProduct, Product, UpdateProduct};

/// Create product request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    /// Product name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Padel racket", min_length = 1, max_length = 100)]
    pub name: String,
    /// Optional longer description
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    /// Price per unit per booking
    #[validate(custom(function = validate_non_negative_price))]
    #[schema(value_type = String, example = "5000.00")]
    pub price: BigDecimal,
    /// Units in stock
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 10, minimum = 0)]
    pub stock: i32,
    /// Free-form category, e.g. "rackets" or "balls"
    #[validate(length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"))]
    #[schema(example = "rackets", min_length = 1, max_length = 50)]
    pub category: String,
    /// Whether the product can currently be ordered
    #[serde(default = "default_available")]
    pub available: bool,
    /// Optional image URL
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            available: self.available,
            image_url: self.image_url,
        }
    }
}

/// Update product request payload; omitted fields are left unchanged
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = validate_optional_price))]
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(minimum = 0)]
    pub stock: Option<i32>,
    #[validate(length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"))]
    pub category: Option<String>,
    pub available: Option<bool>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

impl UpdateProductRequest {
    pub fn into_update_product(self) -> UpdateProduct {
        UpdateProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            available: self.available,
            image_url: self.image_url,
        }
    }
}

/// Query parameters for the product list
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct ProductListParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: u32,
    /// Number of items per page (max 100)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 20)]
    pub page_size: u32,
    /// Restrict the list to one category
    pub category: Option<String>,
    /// Restrict the list by the ordering flag
    pub available: Option<bool>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl ProductListParams {
    /// Widened to u64 so large page numbers cannot overflow the multiply.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// Product representation
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Padel racket")]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "5000.00")]
    pub price: BigDecimal,
    #[schema(example = 10)]
    pub stock: i32,
    #[schema(example = "rackets")]
    pub category: String,
    /// False when the product is disabled or out of stock
    pub available: bool,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        // A product with zero stock is reported unavailable regardless of
        // its flag.
        let available = product.is_orderable();
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            available,
            image_url: product.image_url,
            created_at: product.created_at,
        }
    }
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
    use chrono::Utc;

    #[test]
    fn test_zero_stock_reported_unavailable() {
        let now = Utc::now().naive_utc();
        let product = Product {
            id: 1,
            name: "Balls".to_string(),
            description: None,
            price: BigDecimal::from(1000),
            stock: 0,
            category: "balls".to_string(),
            available: true,
            image_url: None,
            created_at: now,
            updated_at: now,
        };
        let response = ProductResponse::from(product);
        assert!(!response.available);
    }
}
