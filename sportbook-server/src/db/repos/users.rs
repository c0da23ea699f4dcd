//! User repository
//!
//! - list: exact-match filters, ordered by id
//! - patch: SET clause from the fixed user column list
//! - delete: cascades to reservations in storage

use chrono::NaiveDateTime;
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{NewUser, Role, UserFilter, UserPatch, UserUpdate, ValidationError};

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: NaiveDateTime,
}

/// User repository over a caller-owned connection
pub struct UserRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> UserRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// List users matching every non-empty filter field.
    pub async fn list(&mut self, filter: &UserFilter) -> Result<Vec<User>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, username, email, password, role, created_at FROM users WHERE TRUE",
        );

        if let Some(username) = filter.username.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND username = ").push_bind(username);
        }
        if let Some(email) = filter.email.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND email = ").push_bind(email);
        }
        if let Some(role) = filter.role {
            qb.push(" AND role = ").push_bind(role.as_str());
        }
        qb.push(" ORDER BY id");

        let users = qb.build_query_as::<User>().fetch_all(&mut *self.conn).await?;
        Ok(users)
    }

    /// Get a single user, `None` if the id is unknown.
    pub async fn get(&mut self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    /// Insert a user and return its id.
    ///
    /// A duplicate e-mail surfaces as [`DbError::Integrity`].
    pub async fn add(&mut self, user: &NewUser) -> Result<i32, DbError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(user.email.as_str())
        .bind(&user.password)
        .bind(user.role.as_str())
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::debug!(user_id = id, "user added");
        Ok(id)
    }

    /// Insert a batch of users. Run inside a transaction for all-or-nothing.
    pub async fn add_many(&mut self, users: &[NewUser]) -> Result<Vec<i32>, DbError> {
        let mut ids = Vec::with_capacity(users.len());
        for user in users {
            ids.push(self.add(user).await?);
        }
        Ok(ids)
    }

    /// Overwrite username, e-mail and password.
    pub async fn update(&mut self, id: i32, update: &UserUpdate) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $1, email = $2, password = $3
            WHERE id = $4
            "#,
        )
        .bind(&update.username)
        .bind(update.email.as_str())
        .bind(&update.password)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("user", id));
        }
        Ok(())
    }

    /// Write only the fields present in `patch`.
    pub async fn patch(&mut self, id: i32, patch: &UserPatch) -> Result<(), DbError> {
        if patch.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(username) = &patch.username {
                set.push("username = ").push_bind_unseparated(username.as_str());
            }
            if let Some(email) = &patch.email {
                set.push("email = ").push_bind_unseparated(email.as_str());
            }
            if let Some(password) = &patch.password {
                set.push("password = ").push_bind_unseparated(password.as_str());
            }
            if let Some(role) = patch.role {
                set.push("role = ").push_bind_unseparated(role.as_str());
            }
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&mut *self.conn).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("user", id));
        }
        Ok(())
    }

    pub async fn update_password(&mut self, id: i32, password: &str) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(password)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("user", id));
        }
        Ok(())
    }

    /// Delete a user. Returns whether a row was removed.
    pub async fn delete(&mut self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
