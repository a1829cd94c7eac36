//! Canonical `YYYY-MM-DD` identity for a calendar day.
//!
//! Keys are fixed-width and zero-padded, so comparing the strings gives the
//! same order as comparing the days they name.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{MintleafError, MintleafResult};

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day encoded as `YYYY-MM-DD`.
///
/// Only years 0000..=9999 have a fixed-width key; anything else is rejected
/// with [`MintleafError::InvalidDate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey {
    key: String,
    date: NaiveDate,
}

impl DateKey {
    pub fn from_date(date: NaiveDate) -> MintleafResult<Self> {
        let year = date.year();
        if !(0..=9999).contains(&year) {
            return Err(MintleafError::InvalidDate(format!(
                "year {year} has no fixed-width day key"
            )));
        }

        Ok(DateKey {
            key: format!("{:04}-{:02}-{:02}", year, date.month(), date.day()),
            date,
        })
    }

    /// Parse a `YYYY-MM-DD` string. Unpadded input such as `2024-6-1` is
    /// accepted and normalized.
    pub fn parse(s: &str) -> MintleafResult<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), KEY_FORMAT).map_err(|_| {
            MintleafError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", s.trim()))
        })?;
        Self::from_date(date)
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Encode a day as its key.
pub fn to_key(date: NaiveDate) -> MintleafResult<DateKey> {
    DateKey::from_date(date)
}

/// Chronological comparison of two days, performed on their keys.
pub fn compare(a: NaiveDate, b: NaiveDate) -> MintleafResult<Ordering> {
    Ok(to_key(a)?.cmp(&to_key(b)?))
}

impl PartialEq for DateKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for DateKey {}

impl Hash for DateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl TryFrom<String> for DateKey {
    type Error = MintleafError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DateKey::parse(&s)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn key_is_zero_padded() {
        assert_eq!(to_key(ymd(2024, 6, 1)).unwrap().as_str(), "2024-06-01");
        assert_eq!(to_key(ymd(987, 12, 31)).unwrap().as_str(), "0987-12-31");
    }

    #[test]
    fn key_rejects_years_without_fixed_width() {
        let far = ymd(12000, 1, 1);
        assert!(matches!(to_key(far), Err(MintleafError::InvalidDate(_))));
        assert!(to_key(ymd(-1, 1, 1)).is_err());
    }

    #[test]
    fn parse_normalizes_unpadded_input() {
        let key = DateKey::parse("2024-6-1").unwrap();
        assert_eq!(key.as_str(), "2024-06-01");
        assert_eq!(key.date(), ymd(2024, 6, 1));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(DateKey::parse("tomorrow").is_err());
        assert!(DateKey::parse("2024-02-30").is_err());
        assert!(DateKey::parse("").is_err());
    }

    #[test]
    fn string_order_matches_chronological_order() {
        let days = [
            ymd(2023, 12, 31),
            ymd(2024, 1, 1),
            ymd(2024, 1, 10),
            ymd(2024, 2, 9),
            ymd(2024, 10, 1),
        ];
        for a in days {
            for b in days {
                assert_eq!(compare(a, b).unwrap(), a.cmp(&b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn equal_days_have_equal_keys() {
        assert_eq!(to_key(ymd(2024, 3, 5)).unwrap(), DateKey::parse("2024-03-05").unwrap());
        assert_ne!(to_key(ymd(2024, 3, 5)).unwrap(), to_key(ymd(2024, 3, 6)).unwrap());
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = DateKey::parse("2024-06-05").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-06-05\"");
        let back: DateKey = serde_json::from_str("\"2024-06-05\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"06/05/2024\"").is_err());
    }
}
