pub mod blackout;
pub mod book;
pub mod calendar;
pub mod contact;
pub mod leave;
pub mod theme;
pub mod units;

use anyhow::Result;
use chrono::NaiveDate;
use mintleaf_core::date_key::DateKey;

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    Ok(DateKey::parse(input.trim())?.date())
}
