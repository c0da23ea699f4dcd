//! Textual encoding of temporal values in responses
//!
//! Dates, times and timestamps go out as `YYYY-MM-DD`, `HH:MM:SS` and
//! `YYYY-MM-DD HH:MM:SS`. Sub-second precision is dropped.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serializer;

pub const DATE: &str = "%Y-%m-%d";
pub const TIME: &str = "%H:%M:%S";
pub const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

pub fn serialize_date<S: Serializer>(value: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&value.format(DATE))
}

pub fn serialize_time<S: Serializer>(value: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&value.format(TIME))
}

pub fn serialize_timestamp<S: Serializer>(
    value: &NaiveDateTime,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.collect_str(&value.format(TIMESTAMP))
}
