//! Reservation repository
//!
//! Slots arrive pre-validated; storage re-checks `end_time > start_time`
//! and both foreign keys.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{NewReservation, ReservationFilter, ReservationStatus};

/// Reservation record from database
#[derive(Debug, Clone, FromRow)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub facility_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[sqlx(try_from = "String")]
    pub status: ReservationStatus,
    pub created_at: NaiveDateTime,
}

/// Reservation repository over a caller-owned connection
pub struct ReservationRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> ReservationRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&mut self, filter: &ReservationFilter) -> Result<Vec<Reservation>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"SELECT id, user_id, facility_id, "date", start_time, end_time, status, created_at FROM reservations WHERE TRUE"#,
        );

        if let Some(user_id) = filter.user_id {
            qb.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(facility_id) = filter.facility_id {
            qb.push(" AND facility_id = ").push_bind(facility_id);
        }
        if let Some(date) = filter.date {
            qb.push(r#" AND "date" = "#).push_bind(date);
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        qb.push(" ORDER BY id");

        let reservations = qb
            .build_query_as::<Reservation>()
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(reservations)
    }

    pub async fn get(&mut self, id: i32) -> Result<Option<Reservation>, DbError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, user_id, facility_id, "date", start_time, end_time, status, created_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(reservation)
    }

    /// Insert a reservation and return its id.
    ///
    /// Unknown user or facility ids surface as [`DbError::Integrity`].
    pub async fn add(&mut self, reservation: &NewReservation) -> Result<i32, DbError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO reservations (user_id, facility_id, "date", start_time, end_time, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(reservation.user_id)
        .bind(reservation.facility_id)
        .bind(reservation.slot.date())
        .bind(reservation.slot.start_time())
        .bind(reservation.slot.end_time())
        .bind(reservation.status.as_str())
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::debug!(reservation_id = id, "reservation added");
        Ok(id)
    }

    /// Change the status, leaving every other field untouched.
    pub async fn set_status(&mut self, id: i32, status: ReservationStatus) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE reservations SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("reservation", id));
        }
        Ok(())
    }

    /// Delete a reservation. Returns whether a row was removed.
    pub async fn delete(&mut self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
