//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows a caller-owned connection (may be a transaction)
//! - Binds every value; column names come from fixed lists only
//! - Relies on DB constraints for uniqueness and foreign keys

pub mod users;
pub mod facilities;
pub mod reservations;

pub use super::DbError;
pub use users::{User, UserRepo};
pub use facilities::{Facility, FacilityRepo};
pub use reservations::{Reservation, ReservationRepo};
