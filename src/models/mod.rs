mod court;
mod password_reset;
mod product;
mod reservation;
mod user;

pub use court::{Court, CourtStatus, CourtType, NewCourt, UpdateCourt};
pub use password_reset::{NewPasswordResetCode, PasswordResetCode};
pub use product::{NewProduct, Product, UpdateProduct};
pub use reservation::{
    NewReservation, NewReservationEquipment, NewReservationPlayer, Reservation,
    ReservationEquipment, ReservationPlayer, ReservationStatus,
};
pub use user::{NewUser, UpdateUser, User};
