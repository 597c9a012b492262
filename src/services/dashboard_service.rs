//! Dashboard service: read-only aggregate statistics for administrators.

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::AppResult;
use crate::models::CourtStatus;
use crate::services::{CourtService, ProductService, ReservationService, UserService};

/// Stock level below which a product counts as low on the dashboard.
const LOW_STOCK_THRESHOLD: i32 = 5;

/// Point-in-time statistics across the whole facility.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub total_courts: i64,
    pub available_courts: i64,
    pub occupied_courts: i64,
    pub maintenance_courts: i64,
    pub reservations_today: i64,
    pub total_reservations: i64,
    pub monthly_revenue: BigDecimal,
    pub total_products: i64,
    pub low_stock_products: i64,
    pub total_users: i64,
}

#[derive(Clone)]
pub struct DashboardService {
    users: UserService,
    courts: CourtService,
    products: ProductService,
    reservations: ReservationService,
}

impl DashboardService {
    pub fn new(
        users: UserService,
        courts: CourtService,
        products: ProductService,
        reservations: ReservationService,
    ) -> Self {
        Self {
            users,
            courts,
            products,
            reservations,
        }
    }

    /// Collects the full statistics snapshot.
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let by_status = self.courts.count_by_status().await?;
        let count_for = |wanted: CourtStatus| {
            by_status
                .iter()
                .find(|(status, _)| *status == wanted)
                .map(|&(_, count)| count)
                .unwrap_or(0)
        };
        let available_courts = count_for(CourtStatus::Available);
        let occupied_courts = count_for(CourtStatus::Occupied);
        let maintenance_courts = count_for(CourtStatus::Maintenance);

        let (month_start, month_end) = month_bounds(Utc::now().date_naive());

        Ok(DashboardStats {
            total_courts: available_courts + occupied_courts + maintenance_courts,
            available_courts,
            occupied_courts,
            maintenance_courts,
            reservations_today: self.reservations.count_today().await?,
            total_reservations: self.reservations.count_reservations().await?,
            monthly_revenue: self
                .reservations
                .revenue_between(month_start, month_end)
                .await?,
            total_products: self.products.count_products().await?,
            low_stock_products: self.products.count_low_stock(LOW_STOCK_THRESHOLD).await?,
            total_users: self.users.count_users().await?,
        })
    }
}

/// Half-open window covering the calendar month containing `today`.
fn month_bounds(today: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    let next = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    }
    .unwrap_or(start);

    (start.and_time(NaiveTime::MIN), next.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds_mid_year() {
        let (start, end) = month_bounds(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
    }

    #[test]
    fn test_month_bounds_december_rolls_over() {
        let (start, end) = month_bounds(NaiveDate::from_ymd_opt(2026, 12, 15).unwrap());
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }
}
