//! Custom Axum extractors
//!
//! Both reject with [`ApiError`] so malformed input still gets a JSON
//! error body instead of axum's plain-text rejection.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract an integer entity id from path
pub struct EntityId(pub i32);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Missing { field: "id" }))?;

        let wide = raw.parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
        })?;

        // Ids are SERIAL; an integer outside that range names no row
        let id = i32::try_from(wide).map_err(|_| ApiError::NotFound {
            resource: resource_for(parts.uri.path()),
            id: raw,
        })?;

        Ok(Self(id))
    }
}

fn resource_for(path: &str) -> &'static str {
    match path.trim_start_matches('/').split('/').next() {
        Some("users") => "user",
        Some("facilities") => "facility",
        Some("reservations" | "reservation") => "reservation",
        _ => "resource",
    }
}

/// JSON body whose parse failures map to a 400 with an error payload
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_follow_the_collection() {
        assert_eq!(resource_for("/users/1"), "user");
        assert_eq!(resource_for("/facilities/1"), "facility");
        assert_eq!(resource_for("/reservation/1"), "reservation");
        assert_eq!(resource_for("/other/1"), "resource");
    }
}
