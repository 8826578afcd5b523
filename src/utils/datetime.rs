//! Serde helpers for timestamps supplied by API callers.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserializes an optional expiry timestamp.
///
/// Accepts RFC 3339 with an explicit offset, or a naive datetime
/// (`2026-01-01T12:00:00`) which is interpreted as UTC. All comparisons
/// downstream happen in a single time representation, so naive input is
/// pinned to UTC here at the boundary.
pub fn deserialize_opt_utc<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw {
        None => Ok(None),
        Some(s) => parse_utc(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Naive datetime, assumed UTC.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("invalid datetime: '{s}'"))
}
