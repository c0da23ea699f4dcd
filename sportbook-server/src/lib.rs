//! sportbook-server: booking backend for users, facilities and reservations
//!
//! Exposes the three resources over a JSON REST API backed by PostgreSQL.
//! The `sportbook` binary in `sportbook-cli` drives this crate from the
//! command line and from an interactive menu.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DbConfig, Mode, ServerSettings, Settings};
pub use db::{Database, DbError};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
