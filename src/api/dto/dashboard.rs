//! Dashboard Data Transfer Objects

use bigdecimal::BigDecimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::DashboardStats;

/// Facility-wide statistics snapshot
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsResponse {
    #[schema(example = 6)]
    pub total_courts: i64,
    #[schema(example = 4)]
    pub available_courts: i64,
    #[schema(example = 1)]
    pub occupied_courts: i64,
    #[schema(example = 1)]
    pub maintenance_courts: i64,
    #[schema(example = 12)]
    pub reservations_today: i64,
    #[schema(example = 340)]
    pub total_reservations: i64,
    /// Confirmed plus completed revenue for the current month
    #[schema(value_type = String, example = "1250000.00")]
    pub monthly_revenue: BigDecimal,
    #[schema(example = 25)]
    pub total_products: i64,
    /// Products with fewer than five units left
    #[schema(example = 3)]
    pub low_stock_products: i64,
    #[schema(example = 150)]
    pub total_users: i64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_courts: stats.total_courts,
            available_courts: stats.available_courts,
            occupied_courts: stats.occupied_courts,
            maintenance_courts: stats.maintenance_courts,
            reservations_today: stats.reservations_today,
            total_reservations: stats.total_reservations,
            monthly_revenue: stats.monthly_revenue,
            total_products: stats.total_products,
            low_stock_products: stats.low_stock_products,
            total_users: stats.total_users,
        }
    }
}
