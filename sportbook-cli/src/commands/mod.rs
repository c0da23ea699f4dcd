//! Command implementations for the sportbook CLI

pub mod init_db;
pub mod menu;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use init_db::run_init_db;
pub use menu::run_menu;
pub use serve::run_serve;
