use crate::calendar::errors::CalendarError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Parses a ledger timestamp.
///
/// Accepts a plain calendar date (attributed to its first moment), a local
/// date-time, or an RFC 3339 timestamp whose wall-clock time is kept as is.
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, CalendarError> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.naive_local());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(date_time);
        }
    }

    parse_date(value).map(|date| date.and_time(NaiveTime::MIN))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, CalendarError> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(value.to_string()))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, CalendarError> {
    let value = value.trim();

    TIME_FORMATS.iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .ok_or_else(|| CalendarError::InvalidTime(value.to_string()))
}

pub fn deserialize_date_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_date_time(&value).map_err(de::Error::custom)
}
