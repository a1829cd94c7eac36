//! Shared constants.

/// Length of a booking when the guest leaves the end time empty.
pub const DEFAULT_BOOKING_HOURS: i64 = 2;

/// WCAG AA threshold for body text. Ratios below this are reported as warnings.
pub const MIN_TEXT_CONTRAST: f64 = 4.5;

/// Minimum number of digits a phone number must carry to pass form validation.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Largest party a single booking may hold.
pub const MAX_HEADCOUNT: u32 = 500;

/// Default bookable window, as `HH:MM` wall-clock times.
pub const DEFAULT_WINDOW_FROM: &str = "11:00";
pub const DEFAULT_WINDOW_TO: &str = "23:00";

/// Default international prefix and domestic trunk prefix (Hungary).
pub const DEFAULT_COUNTRY_CODE: &str = "+36";
pub const DEFAULT_TRUNK_PREFIX: &str = "06";

/// Time format used by the guest form and settings files.
pub const TIME_FORMAT: &str = "%H:%M";
