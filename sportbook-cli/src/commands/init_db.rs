//! Schema bootstrap command

use anyhow::{Context, Result};

use sportbook_server::db::schema;
use sportbook_server::Database;

/// Create any missing tables in the configured database
pub async fn run_init_db(db: &Database) -> Result<()> {
    db.with_connection(|conn| Box::pin(async move { schema::apply(conn).await }))
        .await
        .with_context(|| format!("Failed to initialize database '{}'", db.name()))?;

    println!("Database '{}' is ready", db.name());
    Ok(())
}
