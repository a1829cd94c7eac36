//! Guest table-booking flow.
//!
//! A [`BookingWizard`] walks one guest through picking a day, filling in the
//! [`BookingDraft`], and submitting it as a pending [`BookingRecord`].

pub mod draft;
pub mod record;
pub mod validation;
pub mod wizard;

pub use draft::BookingDraft;
pub use record::{BookingRecord, BookingStatus};
pub use validation::{Field, FieldError, ValidBooking, ValidationErrors};
pub use wizard::{BookingWizard, WizardStep};
