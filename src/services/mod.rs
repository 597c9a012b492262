//! Service layer: business rules on top of the repositories.

pub mod court_service;
pub mod dashboard_service;
pub mod product_service;
pub mod reservation_service;
pub mod user_service;

pub use court_service::CourtService;
pub use dashboard_service::{DashboardService, DashboardStats};
pub use product_service::ProductService;
pub use reservation_service::{
    compute_slots, CreateReservationInput, EquipmentRequest, ReservationService, Slot,
};
pub use user_service::{AuthenticatedUser, UserService};

use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::repositories::{
    CourtRepository, PasswordResetRepository, ProductRepository, ReservationRepository,
    UserRepository,
};

/// All services wired together over one connection pool.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub courts: CourtService,
    pub products: ProductService,
    pub reservations: ReservationService,
    pub dashboard: DashboardService,
}

impl Services {
    /// Builds the full service graph from the pool and settings.
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let users = UserService::new(
            UserRepository::new(pool.clone()),
            PasswordResetRepository::new(pool.clone()),
            settings.jwt.clone(),
            settings.facility.clone(),
        );
        let courts = CourtService::new(CourtRepository::new(pool.clone()));
        let products = ProductService::new(ProductRepository::new(pool.clone()));
        let reservations = ReservationService::new(
            ReservationRepository::new(pool.clone()),
            CourtRepository::new(pool.clone()),
            ProductRepository::new(pool),
            settings.facility.clone(),
        );
        let dashboard = DashboardService::new(
            users.clone(),
            courts.clone(),
            products.clone(),
            reservations.clone(),
        );

        Self {
            users,
            courts,
            products,
            reservations,
            dashboard,
        }
    }
}
