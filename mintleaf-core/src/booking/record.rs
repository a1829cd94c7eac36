//! The booking as it is persisted.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::booking::validation::ValidBooking;
use crate::contact::{Contact, PhoneRules};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A table reservation. Times are naive local wall-clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub reference_code: String,
    pub unit: String,
    pub name: String,
    pub headcount: u32,
    pub occasion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub contact: Contact,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

impl BookingRecord {
    /// Build a pending booking from a validated draft, normalizing its contact
    /// details.
    pub fn pending(
        unit: &str,
        booking: ValidBooking,
        rules: &PhoneRules,
        created_at: NaiveDateTime,
    ) -> Self {
        BookingRecord {
            reference_code: new_reference_code(),
            unit: unit.to_string(),
            contact: Contact::normalized(&booking.phone, &booking.email, rules),
            name: booking.name,
            headcount: booking.headcount,
            occasion: booking.occasion,
            source: booking.source,
            start_time: booking.start,
            end_time: booking.end,
            status: BookingStatus::Pending,
            created_at,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Whether the booking still takes seats.
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}

/// Short, opaque reference handed to the guest.
pub fn new_reference_code() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ValidBooking {
        let day = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        ValidBooking {
            day,
            name: "Anna".into(),
            headcount: 2,
            phone: "06 30 123 4567".into(),
            email: " Anna@Example.HU".into(),
            occasion: "Dinner".into(),
            source: None,
            start: day.and_hms_opt(19, 0, 0).unwrap(),
            end: day.and_hms_opt(21, 0, 0).unwrap(),
        }
    }

    #[test]
    fn pending_record_has_normalized_contact() {
        let created = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
        let record = BookingRecord::pending("bistro", valid(), &PhoneRules::default(), created);

        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.contact.phone_e164, "+36301234567");
        assert_eq!(record.contact.email, "anna@example.hu");
        assert_eq!(record.unit, "bistro");
        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert!(record.is_active());
    }

    #[test]
    fn reference_codes_are_short_and_distinct() {
        let a = new_reference_code();
        let b = new_reference_code();
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BookingStatus::Pending).unwrap(), "\"pending\"");
    }
}
