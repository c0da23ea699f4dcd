//! Table definitions
//!
//! Applied idempotently at startup. Deleting a user or a facility cascades
//! to its reservations.

use sqlx::PgConnection;

use super::DbError;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    username VARCHAR(50) NOT NULL,
    email VARCHAR(100) NOT NULL UNIQUE,
    password VARCHAR(100) NOT NULL,
    role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('admin', 'user')),
    created_at TIMESTAMP(0) NOT NULL DEFAULT LOCALTIMESTAMP
)
"#;

const CREATE_FACILITIES: &str = r#"
CREATE TABLE IF NOT EXISTS facilities (
    id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    name VARCHAR(100) NOT NULL CHECK (name <> ''),
    location VARCHAR(100),
    description TEXT NOT NULL DEFAULT '',
    available BOOLEAN NOT NULL DEFAULT TRUE
)
"#;

const CREATE_RESERVATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS reservations (
    id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    facility_id INTEGER NOT NULL REFERENCES facilities(id) ON DELETE CASCADE,
    "date" DATE NOT NULL,
    start_time TIME(0) NOT NULL,
    end_time TIME(0) NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'confirmed', 'cancelled')),
    created_at TIMESTAMP(0) NOT NULL DEFAULT LOCALTIMESTAMP,
    CHECK (end_time > start_time)
)
"#;

/// Create any missing tables.
pub async fn apply(conn: &mut PgConnection) -> Result<(), DbError> {
    tracing::info!("Applying sportbook schema...");

    for ddl in [CREATE_USERS, CREATE_FACILITIES, CREATE_RESERVATIONS] {
        sqlx::query(ddl).execute(&mut *conn).await?;
    }

    tracing::info!("Schema ready");
    Ok(())
}

/// Empty every table and restart identities. Test fixtures only.
pub async fn truncate_all(conn: &mut PgConnection) -> Result<(), DbError> {
    sqlx::query("TRUNCATE TABLE reservations, facilities, users RESTART IDENTITY CASCADE")
        .execute(&mut *conn)
        .await?;
    Ok(())
}
