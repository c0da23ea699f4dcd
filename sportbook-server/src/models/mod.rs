//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod user;
pub mod facility;
pub mod reservation;
pub mod temporal;

pub use validation::ValidationError;
pub use user::{Email, NewUser, Role, UserFilter, UserPatch, UserUpdate};
pub use facility::{FacilityFilter, FacilityPatch, NewFacility};
pub use reservation::{NewReservation, ReservationFilter, ReservationSlot, ReservationStatus};
