//! Route handlers organized by resource

pub mod common;
pub mod health;
pub mod users;
pub mod facilities;
pub mod reservations;
