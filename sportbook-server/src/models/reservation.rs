//! Reservation input types: status lifecycle and time-slot composition
//!
//! Requests carry a calendar date plus two times of day. They are composed
//! into `"{date} {time}"` timestamps before validation, so a slot always
//! sits on a single day and ends strictly after it starts.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Reservation status, stored as lowercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError::InvalidVariant {
                field: "status",
                value: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for ReservationStatus {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidFormat {
        field: "date",
        reason: "expected YYYY-MM-DD",
    })
}

fn parse_timestamp(s: &str, field: &'static str) -> Result<NaiveDateTime, ValidationError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or(ValidationError::InvalidFormat {
            field,
            reason: "expected HH:MM:SS",
        })
}

/// A validated single-day time slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationSlot {
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl ReservationSlot {
    /// Compose a slot from a date and two times of day.
    ///
    /// # Example
    /// ```
    /// use sportbook_server::models::ReservationSlot;
    ///
    /// let slot = ReservationSlot::compose("2025-07-01", "14:00:00", "15:00:00").unwrap();
    /// assert_eq!(slot.start().to_string(), "2025-07-01 14:00:00");
    /// assert!(ReservationSlot::compose("2025-07-01", "15:00", "14:00").is_err());
    /// ```
    pub fn compose(date: &str, start_time: &str, end_time: &str) -> Result<Self, ValidationError> {
        let date = parse_date(date)?;
        let start = parse_timestamp(&format!("{} {}", date, start_time.trim()), "start_time")?;
        let end = parse_timestamp(&format!("{} {}", date, end_time.trim()), "end_time")?;
        Self::new(start, end)
    }

    /// Build a slot from two timestamps on the same day.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if start.date() != end.date() {
            return Err(ValidationError::InvalidFormat {
                field: "end_time",
                reason: "must fall on the same date as start_time",
            });
        }
        if end <= start {
            return Err(ValidationError::InvalidFormat {
                field: "end_time",
                reason: "must be later than start_time",
            });
        }

        Ok(Self {
            date: start.date(),
            start_time: start.time(),
            end_time: end.time(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }
}

/// Validated payload for creating a reservation
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i32,
    pub facility_id: i32,
    pub slot: ReservationSlot,
    pub status: ReservationStatus,
}

/// Exact-match list filter
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub user_id: Option<i32>,
    pub facility_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_accepts_seconds_optional() {
        let a = ReservationSlot::compose("2025-07-01", "09:00:00", "10:30:00").unwrap();
        let b = ReservationSlot::compose("2025-07-01", "09:00", "10:30").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.date().to_string(), "2025-07-01");
        assert_eq!(a.end_time().to_string(), "10:30:00");
    }

    #[test]
    fn end_must_follow_start() {
        let err = ReservationSlot::compose("2025-07-01", "10:00:00", "10:00:00").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFormat { field: "end_time", .. }
        ));
    }

    #[test]
    fn rejects_bad_date_and_time() {
        assert!(matches!(
            ReservationSlot::compose("01.07.2025", "09:00", "10:00").unwrap_err(),
            ValidationError::InvalidFormat { field: "date", .. }
        ));
        assert!(matches!(
            ReservationSlot::compose("2025-07-01", "nine", "10:00").unwrap_err(),
            ValidationError::InvalidFormat { field: "start_time", .. }
        ));
        assert!(matches!(
            ReservationSlot::compose("2025-07-01", "09:00", "25:00").unwrap_err(),
            ValidationError::InvalidFormat { field: "end_time", .. }
        ));
    }

    #[test]
    fn status_is_closed() {
        assert_eq!(ReservationStatus::default(), ReservationStatus::Pending);
        for status in ReservationStatus::ALL {
            assert_eq!(status.as_str().parse::<ReservationStatus>().unwrap(), status);
        }
        assert!("done".parse::<ReservationStatus>().is_err());
    }
}
