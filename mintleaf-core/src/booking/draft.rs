//! Form state for a booking in progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the guest has typed so far. Fields hold raw form input and are only
/// interpreted by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub day: Option<NaiveDate>,
    pub name: String,
    pub headcount: String,
    pub phone: String,
    pub email: String,
    pub occasion: String,
    /// Where the guest heard about the venue.
    pub source: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`, or empty for the default duration.
    pub end_time: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        BookingDraft {
            day: None,
            name: String::new(),
            headcount: "2".to_string(),
            phone: String::new(),
            email: String::new(),
            occasion: String::new(),
            source: String::new(),
            start_time: String::new(),
            end_time: String::new(),
        }
    }
}

impl BookingDraft {
    pub fn with_occasion(occasion: impl Into<String>) -> Self {
        BookingDraft {
            occasion: occasion.into(),
            ..Self::default()
        }
    }

    /// Times are chosen for a specific day and are dropped when the day changes.
    pub(crate) fn clear_times(&mut self) {
        self.start_time.clear();
        self.end_time.clear();
    }
}
