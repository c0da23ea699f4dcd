//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent from the request
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e-mail, date, time)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Partial update carried no recognized field
    NothingToUpdate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "missing required field '{}'", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {}", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::NothingToUpdate => write!(f, "no recognized fields to update"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unwrap a required request field, treating absent and blank alike.
pub fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value.as_deref() {
        None => Err(ValidationError::Missing { field }),
        Some(s) if s.trim().is_empty() => Err(ValidationError::Empty { field }),
        Some(s) => Ok(s),
    }
}

/// Non-empty check for fields that are present.
pub fn non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "description",
            max: 65_535,
        };
        assert_eq!(
            err.to_string(),
            "description exceeds maximum length of 65535"
        );
        assert_eq!(
            ValidationError::Missing { field: "email" }.to_string(),
            "missing required field 'email'"
        );
    }

    #[test]
    fn required_distinguishes_missing_and_blank() {
        assert_eq!(
            required(&None, "username").unwrap_err(),
            ValidationError::Missing { field: "username" }
        );
        assert_eq!(
            required(&Some("  ".into()), "username").unwrap_err(),
            ValidationError::Empty { field: "username" }
        );
        assert_eq!(required(&Some("jirka".into()), "username").unwrap(), "jirka");
    }
}
