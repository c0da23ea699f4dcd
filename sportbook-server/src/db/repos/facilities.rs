//! Facility repository

use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{FacilityFilter, FacilityPatch, NewFacility, ValidationError};

/// Facility record from database
#[derive(Debug, Clone, FromRow)]
pub struct Facility {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub description: String,
    pub available: bool,
}

/// Facility repository over a caller-owned connection
pub struct FacilityRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> FacilityRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&mut self, filter: &FacilityFilter) -> Result<Vec<Facility>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, name, location, description, available FROM facilities WHERE TRUE",
        );

        if let Some(name) = filter.name.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND name = ").push_bind(name);
        }
        qb.push(" ORDER BY id");

        let facilities = qb
            .build_query_as::<Facility>()
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(facilities)
    }

    pub async fn get(&mut self, id: i32) -> Result<Option<Facility>, DbError> {
        let facility = sqlx::query_as::<_, Facility>(
            "SELECT id, name, location, description, available FROM facilities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(facility)
    }

    pub async fn add(&mut self, facility: &NewFacility) -> Result<i32, DbError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO facilities (name, location, description, available)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&facility.name)
        .bind(facility.location.as_deref())
        .bind(&facility.description)
        .bind(facility.available)
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::debug!(facility_id = id, "facility added");
        Ok(id)
    }

    /// Overwrite every mutable field; an absent location becomes NULL.
    pub async fn update(&mut self, id: i32, facility: &NewFacility) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE facilities
            SET name = $1, location = $2, description = $3, available = $4
            WHERE id = $5
            "#,
        )
        .bind(&facility.name)
        .bind(facility.location.as_deref())
        .bind(&facility.description)
        .bind(facility.available)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("facility", id));
        }
        Ok(())
    }

    pub async fn patch(&mut self, id: i32, patch: &FacilityPatch) -> Result<(), DbError> {
        if patch.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE facilities SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.as_str());
            }
            if let Some(location) = &patch.location {
                set.push("location = ").push_bind_unseparated(location.as_deref());
            }
            if let Some(description) = &patch.description {
                set.push("description = ").push_bind_unseparated(description.as_str());
            }
            if let Some(available) = patch.available {
                set.push("available = ").push_bind_unseparated(available);
            }
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&mut *self.conn).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("facility", id));
        }
        Ok(())
    }

    pub async fn set_availability(&mut self, id: i32, available: bool) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE facilities SET available = $1 WHERE id = $2")
            .bind(available)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("facility", id));
        }
        Ok(())
    }

    /// Delete a facility. Returns whether a row was removed.
    pub async fn delete(&mut self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM facilities WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
