//! Repository layer: async database access over the bb8 connection pool.

pub mod court_repo;
pub mod password_reset_repo;
pub mod product_repo;
pub mod reservation_repo;
pub mod user_repo;

pub use court_repo::CourtRepository;
pub use password_reset_repo::PasswordResetRepository;
pub use product_repo::ProductRepository;
pub use reservation_repo::{
    EquipmentSpec, PlayerSpec, ReservationDetail, ReservationRepository,
};
pub use user_repo::UserRepository;
