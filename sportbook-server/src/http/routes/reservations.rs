//! Reservation endpoints
//!
//! `/reservations` is canonical for every verb. The singular `/reservation`
//! read paths are kept as aliases for older clients.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::common::{parse_id_param, present, MessageResponse};
use crate::db::repos::{Reservation, ReservationRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{EntityId, JsonBody};
use crate::http::server::AppState;
use crate::models::reservation::parse_date;
use crate::models::temporal::{serialize_date, serialize_time, serialize_timestamp};
use crate::models::validation::required;
use crate::models::{
    NewReservation, ReservationFilter, ReservationSlot, ReservationStatus, ValidationError,
};

/// Create reservation request
#[derive(Debug, Default, Deserialize)]
pub struct CreateReservationRequest {
    pub user_id: Option<i32>,
    pub facility_id: Option<i32>,
    /// e.g. "2025-07-01"
    pub date: Option<String>,
    /// e.g. "14:00:00"
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
}

/// Status change request
#[derive(Debug, Default, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

/// List filters
#[derive(Debug, Default, Deserialize)]
pub struct ReservationQuery {
    pub user_id: Option<String>,
    pub facility_id: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

/// Reservation response
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: i32,
    pub user_id: i32,
    pub facility_id: i32,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_time")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "serialize_time")]
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            facility_id: r.facility_id,
            date: r.date,
            start_time: r.start_time,
            end_time: r.end_time,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

impl TryFrom<CreateReservationRequest> for NewReservation {
    type Error = ValidationError;

    fn try_from(req: CreateReservationRequest) -> Result<Self, Self::Error> {
        let user_id = req.user_id.ok_or(ValidationError::Missing { field: "user_id" })?;
        let facility_id = req
            .facility_id
            .ok_or(ValidationError::Missing { field: "facility_id" })?;
        let date = required(&req.date, "date")?;
        let start_time = required(&req.start_time, "start_time")?;
        let end_time = required(&req.end_time, "end_time")?;

        let slot = ReservationSlot::compose(date, start_time, end_time)?;
        let status = req
            .status
            .as_deref()
            .map(str::parse::<ReservationStatus>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            user_id,
            facility_id,
            slot,
            status,
        })
    }
}

impl TryFrom<ReservationQuery> for ReservationFilter {
    type Error = ValidationError;

    fn try_from(q: ReservationQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_id_param(q.user_id, "user_id")?,
            facility_id: parse_id_param(q.facility_id, "facility_id")?,
            date: present(q.date).map(|d| parse_date(&d)).transpose()?,
            status: present(q.status)
                .map(|s| s.parse::<ReservationStatus>())
                .transpose()?,
        })
    }
}

/// GET /reservations - list reservations, filtered by exact match
async fn list_reservations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReservationQuery>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let filter = ReservationFilter::try_from(params)?;
    let reservations = state
        .db
        .with_connection(|conn| {
            Box::pin(async move { ReservationRepo::new(conn).list(&filter).await })
        })
        .await?;

    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// GET /reservations/{id} - get a single reservation
async fn get_reservation(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = state
        .db
        .with_connection(|conn| Box::pin(async move { ReservationRepo::new(conn).get(id).await }))
        .await?
        .ok_or_else(|| ApiError::not_found("reservation", id))?;

    Ok(Json(ReservationResponse::from(reservation)))
}

/// POST /reservations - create a reservation from a date and two times
async fn create_reservation(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateReservationRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let reservation = NewReservation::try_from(req)?;
    let id = state
        .db
        .with_connection(|conn| {
            Box::pin(async move { ReservationRepo::new(conn).add(&reservation).await })
        })
        .await?;

    tracing::info!(reservation_id = id, "reservation created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created("Reservation", id)),
    ))
}

/// PATCH /reservations/{id} - change the status only
async fn update_status(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<StatusRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status: ReservationStatus = required(&req.status, "status")?.parse()?;
    state
        .db
        .with_connection(|conn| {
            Box::pin(async move { ReservationRepo::new(conn).set_status(id, status).await })
        })
        .await?;

    tracing::info!(reservation_id = id, %status, "reservation status changed");
    Ok(Json(MessageResponse::updated("Reservation", id)))
}

/// DELETE /reservations/{id} - delete a reservation
async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .db
        .with_connection(|conn| {
            Box::pin(async move { ReservationRepo::new(conn).delete(id).await })
        })
        .await?;

    if !removed {
        tracing::debug!(reservation_id = id, "delete of unknown reservation");
    }
    Ok(Json(MessageResponse::deleted("Reservation", id)))
}

/// Reservation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(get_reservation)
                .patch(update_status)
                .delete(delete_reservation),
        )
        .route("/reservation", get(list_reservations))
        .route("/reservation/{id}", get(get_reservation))
}
