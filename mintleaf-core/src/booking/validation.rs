//! Field-level checks run before a booking is submitted.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::booking::draft::BookingDraft;
use crate::constants::{DEFAULT_BOOKING_HOURS, MAX_HEADCOUNT, MIN_PHONE_DIGITS, TIME_FORMAT};
use crate::settings::BookableWindow;

/// Booking form fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Day,
    Name,
    Headcount,
    Email,
    Phone,
    StartTime,
    EndTime,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Field::Day => "day",
            Field::Name => "name",
            Field::Headcount => "headcount",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::StartTime => "start time",
            Field::EndTime => "end time",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every failed check of one validation run. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        ValidationErrors(vec![FieldError {
            field,
            message: message.into(),
        }])
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// A draft that passed every check, with its input parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub day: NaiveDate,
    pub name: String,
    pub headcount: u32,
    pub phone: String,
    pub email: String,
    pub occasion: String,
    pub source: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

/// Check every field of `draft`. All failures are reported together.
///
/// When the end time is left empty the booking lasts two hours, cut short at
/// the window's closing time.
pub fn validate(
    draft: &BookingDraft,
    window: &BookableWindow,
) -> Result<ValidBooking, ValidationErrors> {
    let mut errors = Collector::default();

    if draft.day.is_none() {
        errors.push(Field::Day, "Choose a day");
    }

    let name = draft.name.trim();
    if name.is_empty() {
        errors.push(Field::Name, "Enter a name for the booking");
    }

    let headcount = match parse_headcount(&draft.headcount) {
        Ok(n) => Some(n),
        Err(message) => {
            errors.push(Field::Headcount, message);
            None
        }
    };

    if !is_valid_email(&draft.email) {
        let message = if draft.email.trim().is_empty() {
            "Enter an email address"
        } else {
            "Enter a valid email address"
        };
        errors.push(Field::Email, message);
    }

    if !is_valid_phone(&draft.phone) {
        let message = if draft.phone.trim().is_empty() {
            "Enter a phone number".to_string()
        } else {
            format!("Enter a phone number with at least {MIN_PHONE_DIGITS} digits")
        };
        errors.push(Field::Phone, message);
    }

    let start = match parse_time(&draft.start_time) {
        None if draft.start_time.trim().is_empty() => {
            errors.push(Field::StartTime, "Choose a start time");
            None
        }
        None => {
            errors.push(Field::StartTime, "Use HH:MM for the start time");
            None
        }
        Some(t) if !window.accepts_start(t) => {
            errors.push(Field::StartTime, format!("Bookings can start between {window}"));
            None
        }
        Some(t) => Some(t),
    };

    let explicit_end = if draft.end_time.trim().is_empty() {
        None
    } else {
        match parse_time(&draft.end_time) {
            None => {
                errors.push(Field::EndTime, "Use HH:MM for the end time");
                None
            }
            Some(end) => {
                if start.is_some_and(|s| end <= s) {
                    errors.push(Field::EndTime, "End time must be after the start time");
                } else if !window.accepts_end(end) {
                    errors.push(Field::EndTime, format!("Bookings must end by {}", window.to.format(TIME_FORMAT)));
                }
                Some(end)
            }
        }
    };

    match (draft.day, headcount, start, errors.0.is_empty()) {
        (Some(day), Some(headcount), Some(start), true) => {
            let start_at = day.and_time(start);
            let end_at = match explicit_end {
                Some(end) => day.and_time(end),
                None => default_end(start_at, day.and_time(window.to)),
            };

            let source = draft.source.trim();
            Ok(ValidBooking {
                day,
                name: name.to_string(),
                headcount,
                phone: draft.phone.trim().to_string(),
                email: draft.email.trim().to_string(),
                occasion: draft.occasion.trim().to_string(),
                source: (!source.is_empty()).then(|| source.to_string()),
                start: start_at,
                end: end_at,
            })
        }
        _ => Err(ValidationErrors(errors.0)),
    }
}

fn default_end(start: NaiveDateTime, closing: NaiveDateTime) -> NaiveDateTime {
    (start + Duration::hours(DEFAULT_BOOKING_HOURS)).min(closing)
}

fn parse_headcount(input: &str) -> Result<u32, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Enter the number of guests".into());
    }
    match input.parse::<u32>() {
        Ok(n) if n > MAX_HEADCOUNT => Err(format!(
            "For parties over {MAX_HEADCOUNT} guests, please contact the venue"
        )),
        Ok(n) if n >= 1 => Ok(n),
        _ => Err("Headcount must be a whole number of at least 1".into()),
    }
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).ok()
}

/// Syntactic email check: one `@`, a non-empty local part, and a dotted
/// domain without empty labels or whitespace.
pub fn is_valid_email(input: &str) -> bool {
    let input = input.trim();
    if input.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Permissive phone check: digits, an optional leading `+`, and common
/// separators, with at least [`MIN_PHONE_DIGITS`] digits.
pub fn is_valid_phone(input: &str) -> bool {
    let input = input.trim();
    let body = input.strip_prefix('+').unwrap_or(input);

    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.' | '/'));
    let digits = body.chars().filter(char::is_ascii_digit).count();

    allowed && digits >= MIN_PHONE_DIGITS
}
