//! Facility endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::common::{nullable, present, MessageResponse};
use crate::db::repos::{Facility, FacilityRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{EntityId, JsonBody};
use crate::http::server::AppState;
use crate::models::facility::{check_description, check_location, check_name};
use crate::models::validation::required;
use crate::models::{FacilityFilter, FacilityPatch, NewFacility, ValidationError};

/// Create / replace / patch facility request
#[derive(Debug, Default, Deserialize)]
pub struct FacilityRequest {
    pub name: Option<String>,
    /// Absent, `null`, or a value; PATCH with `null` clears the location
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// List filters
#[derive(Debug, Default, Deserialize)]
pub struct FacilityQuery {
    pub name: Option<String>,
}

/// Facility response
#[derive(Debug, Serialize)]
pub struct FacilityResponse {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub description: String,
    pub available: bool,
}

impl From<Facility> for FacilityResponse {
    fn from(f: Facility) -> Self {
        Self {
            id: f.id,
            name: f.name,
            location: f.location,
            description: f.description,
            available: f.available,
        }
    }
}

impl TryFrom<FacilityRequest> for NewFacility {
    type Error = ValidationError;

    /// `name` and `description` are required; `available` defaults to true.
    fn try_from(req: FacilityRequest) -> Result<Self, Self::Error> {
        let name = required(&req.name, "name")?;
        let description = req
            .description
            .as_deref()
            .ok_or(ValidationError::Missing { field: "description" })?;

        NewFacility::new(
            name,
            req.location.as_ref().and_then(Option::as_deref),
            description,
            req.available.unwrap_or(true),
        )
    }
}

impl TryFrom<FacilityRequest> for FacilityPatch {
    type Error = ValidationError;

    fn try_from(req: FacilityRequest) -> Result<Self, Self::Error> {
        if let Some(name) = &req.name {
            check_name(name)?;
        }
        if let Some(Some(location)) = &req.location {
            check_location(location)?;
        }
        if let Some(description) = &req.description {
            check_description(description)?;
        }

        Ok(Self {
            name: req.name.map(|n| n.trim().to_owned()),
            location: req.location,
            description: req.description,
            available: req.available,
        })
    }
}

/// GET /facilities - list facilities, filtered by exact name
async fn list_facilities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FacilityQuery>,
) -> Result<Json<Vec<FacilityResponse>>, ApiError> {
    let filter = FacilityFilter {
        name: present(params.name),
    };
    let facilities = state
        .db
        .with_connection(|conn| {
            Box::pin(async move { FacilityRepo::new(conn).list(&filter).await })
        })
        .await?;

    Ok(Json(facilities.into_iter().map(FacilityResponse::from).collect()))
}

/// GET /facilities/{id} - get a single facility
async fn get_facility(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<FacilityResponse>, ApiError> {
    let facility = state
        .db
        .with_connection(|conn| Box::pin(async move { FacilityRepo::new(conn).get(id).await }))
        .await?
        .ok_or_else(|| ApiError::not_found("facility", id))?;

    Ok(Json(FacilityResponse::from(facility)))
}

/// POST /facilities - create a facility
async fn create_facility(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<FacilityRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let facility = NewFacility::try_from(req)?;
    let id = state
        .db
        .with_connection(|conn| {
            Box::pin(async move { FacilityRepo::new(conn).add(&facility).await })
        })
        .await?;

    tracing::info!(facility_id = id, "facility created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created("Facility", id)),
    ))
}

/// PUT /facilities/{id} - replace every mutable field
async fn update_facility(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<FacilityRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let facility = NewFacility::try_from(req)?;
    state
        .db
        .with_connection(|conn| {
            Box::pin(async move { FacilityRepo::new(conn).update(id, &facility).await })
        })
        .await?;

    Ok(Json(MessageResponse::updated("Facility", id)))
}

/// PATCH /facilities/{id} - update only the supplied fields
async fn patch_facility(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<FacilityRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let patch = FacilityPatch::try_from(req)?;
    if patch.is_empty() {
        return Err(ValidationError::NothingToUpdate.into());
    }

    state
        .db
        .with_connection(|conn| {
            Box::pin(async move { FacilityRepo::new(conn).patch(id, &patch).await })
        })
        .await?;

    Ok(Json(MessageResponse::updated("Facility", id)))
}

/// DELETE /facilities/{id} - delete a facility and its reservations
async fn delete_facility(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .db
        .with_connection(|conn| Box::pin(async move { FacilityRepo::new(conn).delete(id).await }))
        .await?;

    if !removed {
        tracing::debug!(facility_id = id, "delete of unknown facility");
    }
    Ok(Json(MessageResponse::deleted("Facility", id)))
}

/// Facility routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/facilities", get(list_facilities).post(create_facility))
        .route(
            "/facilities/{id}",
            get(get_facility)
                .put(update_facility)
                .patch(patch_facility)
                .delete(delete_facility),
        )
}
