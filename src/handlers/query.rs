//! Query parameter validation shared by the windowed endpoints.
//! Used by: handlers::traffic, handlers::revenue.

use crate::error::{Error, Result};

pub const DEFAULT_LIMIT: &str = "10";
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 60;

/// Parse the optional `limit` parameter. Absent means "10"; anything that
/// is not an integer in [1, 60] is rejected outright, never clamped.
pub fn parse_limit(raw: Option<&str>) -> Result<u32> {
    let raw = raw.unwrap_or(DEFAULT_LIMIT);
    match raw.parse::<i64>() {
        Ok(n) if (MIN_LIMIT..=MAX_LIMIT).contains(&n) => Ok(n as u32),
        _ => Err(Error::Validation("limit must be between 1 and 60".into())),
    }
}
