//! Product models for the equipment shop and rental inventory.

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Product model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub available: bool,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// A product can only be handed out while it is flagged available and
    /// stock remains.
    pub fn is_orderable(&self) -> bool {
        self.available && self.stock > 0
    }
}

/// NewProduct model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub available: bool,
    pub image_url: Option<String>,
}

/// UpdateProduct model for partial updates
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::Utc;

    fn product(stock: i32, available: bool) -> Product {
        Product {
            id: 1,
            name: "Racket".to_string(),
            description: None,
            price: BigDecimal::from(10),
            stock,
            category: "rental".to_string(),
            available,
            image_url: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_orderable_requires_stock_and_flag() {
        assert!(product(3, true).is_orderable());
        assert!(!product(0, true).is_orderable());
        assert!(!product(3, false).is_orderable());
    }
}
