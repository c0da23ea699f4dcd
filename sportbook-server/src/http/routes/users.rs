//! User endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::{present, MessageResponse};
use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{EntityId, JsonBody};
use crate::http::server::AppState;
use crate::models::temporal::serialize_timestamp;
use crate::models::user::{check_password, check_username};
use crate::models::validation::required;
use crate::models::{Email, NewUser, Role, UserFilter, UserPatch, UserUpdate, ValidationError};

/// Create / replace user request; presence is checked during conversion
#[derive(Debug, Default, Deserialize)]
pub struct UserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// List filters, unrecognized parameters are ignored
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// User response, password is never serialized
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

impl TryFrom<UserRequest> for NewUser {
    type Error = ValidationError;

    fn try_from(req: UserRequest) -> Result<Self, Self::Error> {
        let username = required(&req.username, "username")?;
        check_username(username)?;
        let email = Email::new(required(&req.email, "email")?)?;
        let password = required(&req.password, "password")?;
        check_password(password)?;
        let role = req
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            username: username.trim().to_owned(),
            email,
            password: password.to_owned(),
            role,
        })
    }
}

impl TryFrom<UserRequest> for UserUpdate {
    type Error = ValidationError;

    fn try_from(req: UserRequest) -> Result<Self, Self::Error> {
        let username = required(&req.username, "username")?;
        check_username(username)?;
        let email = Email::new(required(&req.email, "email")?)?;
        let password = required(&req.password, "password")?;
        check_password(password)?;

        Ok(Self {
            username: username.trim().to_owned(),
            email,
            password: password.to_owned(),
        })
    }
}

impl TryFrom<UserRequest> for UserPatch {
    type Error = ValidationError;

    fn try_from(req: UserRequest) -> Result<Self, Self::Error> {
        if let Some(username) = &req.username {
            check_username(username)?;
        }
        if let Some(password) = &req.password {
            check_password(password)?;
        }

        Ok(Self {
            username: req.username.map(|u| u.trim().to_owned()),
            email: req.email.as_deref().map(Email::new).transpose()?,
            password: req.password,
            role: req.role.as_deref().map(str::parse::<Role>).transpose()?,
        })
    }
}

impl TryFrom<UserQuery> for UserFilter {
    type Error = ValidationError;

    fn try_from(q: UserQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            username: present(q.username),
            email: present(q.email),
            role: present(q.role).map(|r| r.parse::<Role>()).transpose()?,
        })
    }
}

/// GET /users - list users, filtered by exact match
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let filter = UserFilter::try_from(params)?;
    let users = state
        .db
        .with_connection(|conn| Box::pin(async move { UserRepo::new(conn).list(&filter).await }))
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .db
        .with_connection(|conn| Box::pin(async move { UserRepo::new(conn).get(id).await }))
        .await?
        .ok_or_else(|| ApiError::not_found("user", id))?;

    Ok(Json(UserResponse::from(user)))
}

/// POST /users - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<UserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let user = NewUser::try_from(req)?;
    let id = state
        .db
        .with_connection(|conn| Box::pin(async move { UserRepo::new(conn).add(&user).await }))
        .await?;

    tracing::info!(user_id = id, "user created");
    Ok((StatusCode::CREATED, Json(MessageResponse::created("User", id))))
}

/// PUT /users/{id} - replace username, e-mail and password
async fn update_user(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<UserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let update = UserUpdate::try_from(req)?;
    state
        .db
        .with_connection(|conn| {
            Box::pin(async move { UserRepo::new(conn).update(id, &update).await })
        })
        .await?;

    Ok(Json(MessageResponse::updated("User", id)))
}

/// PATCH /users/{id} - update only the supplied fields
async fn patch_user(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<UserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let patch = UserPatch::try_from(req)?;
    if patch.is_empty() {
        return Err(ValidationError::NothingToUpdate.into());
    }

    state
        .db
        .with_connection(|conn| Box::pin(async move { UserRepo::new(conn).patch(id, &patch).await }))
        .await?;

    Ok(Json(MessageResponse::updated("User", id)))
}

/// DELETE /users/{id} - delete a user and, by cascade, their reservations
async fn delete_user(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .db
        .with_connection(|conn| Box::pin(async move { UserRepo::new(conn).delete(id).await }))
        .await?;

    if !removed {
        tracing::debug!(user_id = id, "delete of unknown user");
    }
    Ok(Json(MessageResponse::deleted("User", id)))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user)
                .put(update_user)
                .patch(patch_user)
                .delete(delete_user),
        )
}
