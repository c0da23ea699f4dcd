//! Database layer - connection provider, schema and repositories
//!
//! # Design Principles
//!
//! - One connection per unit of work, no pool
//! - Repositories take a connection; `Database` scopes its lifetime
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod connection;
pub mod error;
pub mod repos;
pub mod schema;

pub use connection::Database;
pub use error::DbError;
pub use repos::*;
