//! Shared response bodies and query helpers

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::ValidationError;

/// Confirmation body for writes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl MessageResponse {
    pub fn created(resource: &str, id: i32) -> Self {
        Self {
            message: format!("{} {} created", resource, id),
            id: Some(id),
        }
    }

    pub fn updated(resource: &str, id: i32) -> Self {
        Self {
            message: format!("{} {} updated", resource, id),
            id: None,
        }
    }

    pub fn deleted(resource: &str, id: i32) -> Self {
        Self {
            message: format!("{} {} deleted", resource, id),
            id: None,
        }
    }
}

/// Keep an explicit JSON `null` apart from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`: absent gives
/// `None`, `null` gives `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Drop absent and empty query values.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an optional integer query value.
pub fn parse_id_param(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<i32>, ValidationError> {
    present(value)
        .map(|v| {
            v.trim().parse::<i32>().map_err(|_| ValidationError::InvalidFormat {
                field,
                reason: "must be an integer",
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_carries_id() {
        let body = serde_json::to_value(MessageResponse::created("User", 3)).unwrap();
        assert_eq!(body["message"], "User 3 created");
        assert_eq!(body["id"], 3);

        let body = serde_json::to_value(MessageResponse::deleted("User", 3)).unwrap();
        assert!(body.get("id").is_none());
    }

    #[derive(Debug, Deserialize)]
    struct Nullable {
        #[serde(default, deserialize_with = "nullable")]
        value: Option<Option<String>>,
    }

    #[test]
    fn null_is_not_absent() {
        let absent: Nullable = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.value, None);

        let null: Nullable = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(null.value, Some(None));

        let set: Nullable = serde_json::from_str(r#"{"value": "x"}"#).unwrap();
        assert_eq!(set.value, Some(Some("x".into())));
    }

    #[test]
    fn id_params() {
        assert_eq!(parse_id_param(None, "user_id").unwrap(), None);
        assert_eq!(parse_id_param(Some("".into()), "user_id").unwrap(), None);
        assert_eq!(parse_id_param(Some("12".into()), "user_id").unwrap(), Some(12));
        assert!(parse_id_param(Some("twelve".into()), "user_id").is_err());
    }
}
