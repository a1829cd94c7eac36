//! Calendar availability and booking engine for mintleaf.
//!
//! - `calendar_grid`, `availability` and `date_key` decide what a month looks
//!   like and which days can be picked
//! - `date_range` turns picked days into contiguous leave blocks; `leave`
//!   stores them as requests
//! - `booking` runs the guest booking flow; `store` persists its result
//! - `settings` and `mintleaf_config` hold per-unit and global configuration

pub mod availability;
pub mod booking;
pub mod calendar_grid;
pub mod constants;
pub mod contact;
pub mod date_key;
pub mod date_range;
pub mod error;
pub mod leave;
pub mod mintleaf;
pub mod mintleaf_config;
pub mod settings;
pub mod store;
pub mod theme;
pub mod unit;

pub use availability::{AvailabilityPolicy, BlackoutSet};
pub use booking::{BookingDraft, BookingRecord, BookingStatus, BookingWizard, WizardStep};
pub use calendar_grid::{CalendarCell, Padding, YearMonth, month_grid};
pub use date_key::DateKey;
pub use date_range::{DateRangeBlock, DateSelection, DayIndex, consolidate};
pub use error::{MintleafError, MintleafResult};
pub use leave::{LeaveRequest, LeaveStatus, LeaveStore};
pub use mintleaf::Mintleaf;
pub use settings::ReservationSettings;
pub use store::{BookingStore, UnitStore};
pub use theme::ThemeConfig;
pub use unit::Unit;
