//! Tolerant decoding for values the backend does not keep consistent
//!
//! Listings must never lose a record because one field is spelled in a way
//! this client does not know yet. Enum-like strings fall back to
//! [`WireValue::Other`] and dates fall back to `None`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A wire enum that keeps unknown spellings instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue<T> {
    Known(T),
    /// Raw value as the backend sent it
    Other(String),
}

impl<T> WireValue<T> {
    pub const fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Other(_) => None,
        }
    }
}

impl<T: FromStr> WireValue<T> {
    pub fn parse(raw: &str) -> Self {
        raw.parse().map_or_else(|_| Self::Other(raw.to_string()), Self::Known)
    }
}

impl<T> From<T> for WireValue<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: Default> Default for WireValue<T> {
    fn default() -> Self {
        Self::Known(T::default())
    }
}

impl<T: fmt::Display> fmt::Display for WireValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

impl<T: fmt::Display> Serialize for WireValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr> Deserialize<'de> for WireValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => Self::parse(&raw),
            other => Self::Other(other.to_string()),
        })
    }
}

/// Parse the date spellings the backend has been seen to use: RFC 3339,
/// a zone-less timestamp (read as UTC) or a bare `YYYY-MM-DD`.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` helper: unreadable dates become `None`.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_datetime))
}
