//! User input types: role, e-mail, create/update/patch payloads

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::validation::non_empty;
use super::ValidationError;

/// Maximum e-mail length, matches the column width
const MAX_EMAIL_LEN: usize = 100;

/// Column widths of `users.username` and `users.password`, in characters
pub const MAX_USERNAME_LEN: usize = 50;
pub const MAX_PASSWORD_LEN: usize = 100;

/// Local part, an `@`, then a domain containing at least one dot
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]*\.[^@\s]*$").expect("invalid email regex")
});

/// User role, stored as lowercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(ValidationError::InvalidVariant {
                field: "role",
                value: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Check a username: non-empty, at most 50 characters. Stored as given.
pub fn check_username(username: &str) -> Result<(), ValidationError> {
    non_empty(username, "username")?;
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username",
            max: MAX_USERNAME_LEN,
        });
    }
    Ok(())
}

/// Check a password: non-empty, at most 100 characters. Stored as given.
pub fn check_password(password: &str) -> Result<(), ValidationError> {
    non_empty(password, "password")?;
    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password",
            max: MAX_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validated e-mail address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new e-mail address.
    ///
    /// # Example
    /// ```
    /// use sportbook_server::models::Email;
    ///
    /// assert!(Email::new("test@example.com").is_ok());
    /// assert!(Email::new("example.com@nowhere").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must contain '@' followed by a '.'",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated payload for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password: String,
    pub role: Role,
}

/// Full update: every field overwritten except the role
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub username: String,
    pub email: Email,
    pub password: String,
}

/// Partial update; only present fields are written
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<Email>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }
}

/// Exact-match list filter
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}
