//! Facility input types

use super::validation::non_empty;
use super::ValidationError;

/// Maximum length for facility names and locations
const MAX_NAME_LEN: usize = 100;

/// Maximum description size (TEXT column convention)
pub const MAX_DESCRIPTION_LEN: usize = 65_535;

/// Check a facility name: non-empty, at most 100 bytes.
pub fn check_name(name: &str) -> Result<(), ValidationError> {
    non_empty(name, "name")?;
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

pub fn check_location(location: &str) -> Result<(), ValidationError> {
    if location.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "location",
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Descriptions may be empty but not oversized.
pub fn check_description(description: &str) -> Result<(), ValidationError> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description",
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// Validated payload for creating or fully replacing a facility
#[derive(Debug, Clone)]
pub struct NewFacility {
    pub name: String,
    pub location: Option<String>,
    pub description: String,
    pub available: bool,
}

impl NewFacility {
    pub fn new(
        name: &str,
        location: Option<&str>,
        description: &str,
        available: bool,
    ) -> Result<Self, ValidationError> {
        check_name(name)?;
        if let Some(location) = location {
            check_location(location)?;
        }
        check_description(description)?;

        Ok(Self {
            name: name.trim().to_owned(),
            location: location.map(str::to_owned),
            description: description.to_owned(),
            available,
        })
    }
}

/// Partial update; only present fields are written
#[derive(Debug, Clone, Default)]
pub struct FacilityPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the location
    pub location: Option<Option<String>>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl FacilityPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.description.is_none()
            && self.available.is_none()
    }
}

/// Exact-match list filter
#[derive(Debug, Clone, Default)]
pub struct FacilityFilter {
    pub name: Option<String>,
}
