//! Connection provider
//!
//! One connection per unit of work, no pool. `with_connection` and
//! `with_transaction` close the connection on every exit path.

use futures::future::BoxFuture;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use super::DbError;
use crate::config::{ConfigError, DbConfig, Mode};

/// Marker a database name must contain in testing mode
const TEST_MARKER: &str = "test";

/// Configured connection factory
#[derive(Debug, Clone)]
pub struct Database {
    options: PgConnectOptions,
    name: String,
}

impl Database {
    /// Build a provider for `config`.
    ///
    /// # Errors
    ///
    /// In [`Mode::Testing`] a database name without the `test` marker is
    /// rejected before any connection is attempted.
    pub fn new(config: &DbConfig, mode: Mode) -> Result<Self, ConfigError> {
        if mode == Mode::Testing && !config.database.to_lowercase().contains(TEST_MARKER) {
            return Err(ConfigError::NotATestDatabase {
                database: config.database.clone(),
            });
        }

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        Ok(Self {
            options,
            name: config.database.clone(),
        })
    }

    /// Name of the target database.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open a new connection. Single attempt, no retry.
    ///
    /// The caller owns the returned connection.
    pub async fn connect(&self) -> Result<PgConnection, DbError> {
        match PgConnection::connect_with(&self.options).await {
            Ok(conn) => {
                tracing::debug!(database = %self.name, "database connection opened");
                Ok(conn)
            }
            Err(source) => {
                tracing::error!(database = %self.name, error = %source, "database connection failed");
                Err(DbError::Connection {
                    database: self.name.clone(),
                    source,
                })
            }
        }
    }

    /// Run `f` on a fresh connection, then close it.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let user = db
    ///     .with_connection(|conn| Box::pin(async move { UserRepo::new(conn).get(1).await }))
    ///     .await?;
    /// ```
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T, DbError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DbError>> + Send,
    {
        let mut conn = self.connect().await?;
        let result = f(&mut conn).await;
        self.close(conn).await;
        result
    }

    /// Run `f` inside a transaction on a fresh connection.
    ///
    /// Commits on `Ok`, rolls back on `Err`, closes the connection either way.
    pub async fn with_transaction<T, F>(&self, f: F) -> Result<T, DbError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DbError>> + Send,
    {
        let mut conn = self.connect().await?;
        let result: Result<T, DbError> = async {
            let mut tx = conn.begin().await?;
            match f(&mut *tx).await {
                Ok(value) => {
                    tx.commit().await?;
                    Ok(value)
                }
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        tracing::warn!(error = %rollback_err, "transaction rollback failed");
                    }
                    Err(err)
                }
            }
        }
        .await;
        self.close(conn).await;
        result
    }

    async fn close(&self, conn: PgConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!(database = %self.name, error = %e, "failed to close database connection");
        }
    }
}
