//! Three-step guest booking state machine.
//!
//! ```text
//! SelectingDate --select_day--> EnteringDetails --submit--> Confirmed
//!       ^                            |                          |
//!       +-----------back-------------+                          |
//!       +-------------------------reset-------------------------+
//! ```

use std::fmt;

use chrono::{Local, NaiveDate};

use crate::availability::AvailabilityPolicy;
use crate::booking::draft::BookingDraft;
use crate::booking::record::BookingRecord;
use crate::booking::validation::{self, Field, ValidBooking, ValidationErrors};
use crate::contact::PhoneRules;
use crate::date_key::DateKey;
use crate::error::{MintleafError, MintleafResult};
use crate::settings::ReservationSettings;
use crate::store::BookingStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectingDate,
    EnteringDetails,
    Confirmed,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            WizardStep::SelectingDate => "selecting a date",
            WizardStep::EnteringDetails => "entering details",
            WizardStep::Confirmed => "confirmed",
        };
        f.write_str(s)
    }
}

/// One guest's pass through the booking form.
///
/// Failed transitions leave the wizard untouched, so the caller can re-prompt
/// and try again.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    unit: String,
    settings: ReservationSettings,
    phone_rules: PhoneRules,
    today: NaiveDate,
    step: WizardStep,
    draft: BookingDraft,
    confirmation: Option<BookingRecord>,
    last_error: Option<String>,
}

impl BookingWizard {
    pub fn new(
        unit: impl Into<String>,
        settings: ReservationSettings,
        phone_rules: PhoneRules,
        today: NaiveDate,
    ) -> Self {
        let draft = BookingDraft::with_occasion(settings.default_occasion());
        BookingWizard {
            unit: unit.into(),
            settings,
            phone_rules,
            today,
            step: WizardStep::SelectingDate,
            draft,
            confirmation: None,
            last_error: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn settings(&self) -> &ReservationSettings {
        &self.settings
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Edit form fields. Use [`select_day`](Self::select_day) to change the day.
    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    /// The stored booking, once confirmed.
    pub fn confirmation(&self) -> Option<&BookingRecord> {
        self.confirmation.as_ref()
    }

    /// Message from the last failed submission, for inline display.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Guest calendars never offer days before today.
    pub fn policy(&self) -> AvailabilityPolicy<'_> {
        AvailabilityPolicy::guest(&self.settings.blackout_dates, self.today)
    }

    pub fn is_selectable(&self, day: NaiveDate) -> bool {
        self.policy().is_selectable(day)
    }

    /// Pick the booking day and move on to the details form.
    ///
    /// Typed details survive re-selection. Start and end times are cleared
    /// only when the day actually changes.
    pub fn select_day(&mut self, day: NaiveDate) -> MintleafResult<()> {
        if self.step == WizardStep::Confirmed {
            return Err(self.invalid("select a day"));
        }

        if !self.is_selectable(day) {
            let key = DateKey::from_date(day)?;
            tracing::debug!(day = %key, "rejected unavailable day");
            return Err(MintleafError::DayUnavailable(key.to_string()));
        }

        if self.draft.day.is_some_and(|previous| previous != day) {
            self.draft.clear_times();
        }
        self.draft.day = Some(day);
        self.step = WizardStep::EnteringDetails;
        tracing::debug!(%day, "day selected");
        Ok(())
    }

    /// Return to the calendar without discarding anything typed so far.
    pub fn back(&mut self) -> MintleafResult<()> {
        if self.step != WizardStep::EnteringDetails {
            return Err(self.invalid("go back"));
        }
        self.step = WizardStep::SelectingDate;
        Ok(())
    }

    /// Run form validation without submitting.
    pub fn validate(&self) -> Result<ValidBooking, ValidationErrors> {
        validation::validate(&self.draft, &self.settings.bookable_window)
    }

    /// Validate the draft and write it to `store` as a pending booking.
    ///
    /// On success the wizard is `Confirmed` and exactly one record has been
    /// written. On any failure the wizard stays in `EnteringDetails`; a failed
    /// store read or write is not retried and is also kept in
    /// [`last_error`](Self::last_error).
    pub async fn submit<S: BookingStore>(&mut self, store: &S) -> MintleafResult<BookingRecord> {
        if self.step != WizardStep::EnteringDetails {
            return Err(self.invalid("submit"));
        }

        let booking = self.validate().map_err(MintleafError::Validation)?;

        // the draft is editable, so the day picked earlier may have been replaced
        if !self.is_selectable(booking.day) {
            return Err(MintleafError::Validation(ValidationErrors::single(
                Field::Day,
                format!("{} is not available for booking", booking.day),
            )));
        }

        if let Some(capacity) = self.settings.daily_capacity {
            let booked = match store.booked_headcount(booking.day).await {
                Ok(booked) => booked,
                Err(e) => return Err(self.store_failed("capacity read", e)),
            };
            let left = capacity.saturating_sub(booked);
            if booking.headcount > left {
                return Err(MintleafError::Validation(ValidationErrors::single(
                    Field::Headcount,
                    format!("Only {left} seats are left on {}", booking.day),
                )));
            }
        }

        let mut record = BookingRecord::pending(
            &self.unit,
            booking,
            &self.phone_rules,
            Local::now().naive_local(),
        );

        match store.create_booking(&record).await {
            Ok(reference_code) => {
                record.reference_code = reference_code;
                tracing::info!(
                    unit = %self.unit,
                    reference = %record.reference_code,
                    start = %record.start_time,
                    "booking created"
                );
                self.last_error = None;
                self.step = WizardStep::Confirmed;
                self.confirmation = Some(record.clone());
                Ok(record)
            }
            Err(e) => Err(self.store_failed("booking write", e)),
        }
    }

    /// Keep a store failure for display and report it as retryable.
    fn store_failed(&mut self, operation: &str, e: MintleafError) -> MintleafError {
        let message = match e {
            MintleafError::StorageWrite(message) => message,
            other => other.to_string(),
        };
        tracing::warn!(unit = %self.unit, error = %message, "{operation} failed");
        self.last_error = Some(message.clone());
        MintleafError::StorageWrite(message)
    }

    /// Start over with an empty form.
    pub fn reset(&mut self) -> MintleafResult<()> {
        if self.step != WizardStep::Confirmed {
            return Err(self.invalid("start over"));
        }
        self.draft = BookingDraft::with_occasion(self.settings.default_occasion());
        self.confirmation = None;
        self.last_error = None;
        self.step = WizardStep::SelectingDate;
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> MintleafError {
        MintleafError::InvalidTransition {
            action,
            step: self.step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        writes: Mutex<Vec<BookingRecord>>,
        booked: u32,
        fail: bool,
        fail_reads: bool,
    }

    impl RecordingStore {
        fn writes(&self) -> Vec<BookingRecord> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl BookingStore for RecordingStore {
        async fn create_booking(&self, record: &BookingRecord) -> MintleafResult<String> {
            if self.fail {
                return Err(MintleafError::StorageWrite("store offline".into()));
            }
            self.writes.lock().unwrap().push(record.clone());
            Ok(format!("REF-{}", self.writes.lock().unwrap().len()))
        }

        async fn booked_headcount(&self, _day: NaiveDate) -> MintleafResult<u32> {
            if self.fail_reads {
                return Err(MintleafError::Provider("sheet unreachable".into()));
            }
            Ok(self.booked)
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 6, 10)
    }

    fn wizard_with(settings: ReservationSettings) -> BookingWizard {
        BookingWizard::new("bistro", settings, PhoneRules::default(), today())
    }

    fn wizard() -> BookingWizard {
        let mut settings = ReservationSettings::default();
        settings.blackout_dates.toggle(DateKey::parse("2024-06-15").unwrap());
        wizard_with(settings)
    }

    fn fill(wizard: &mut BookingWizard) {
        let draft = wizard.draft_mut();
        draft.name = "Anna".into();
        draft.headcount = "4".into();
        draft.phone = "06 30 123 4567".into();
        draft.email = "Anna@Example.hu".into();
        draft.start_time = "19:00".into();
    }

    #[test]
    fn starts_selecting_a_date_with_default_occasion() {
        let w = wizard();
        assert_eq!(w.step(), WizardStep::SelectingDate);
        assert_eq!(w.draft().occasion, "Brunch");
        assert_eq!(w.draft().headcount, "2");
    }

    #[test]
    fn blacked_out_day_is_rejected() {
        let mut w = wizard();
        let err = w.select_day(ymd(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, MintleafError::DayUnavailable(ref d) if d == "2024-06-15"));
        assert_eq!(w.step(), WizardStep::SelectingDate);
        assert_eq!(w.draft().day, None);
    }

    #[test]
    fn past_day_is_rejected_but_today_is_fine() {
        let mut w = wizard();
        assert!(w.select_day(ymd(2024, 6, 9)).is_err());
        assert_eq!(w.step(), WizardStep::SelectingDate);

        w.select_day(today()).unwrap();
        assert_eq!(w.step(), WizardStep::EnteringDetails);
    }

    #[test]
    fn back_keeps_typed_details() {
        let mut w = wizard();
        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);

        w.back().unwrap();
        assert_eq!(w.step(), WizardStep::SelectingDate);
        assert_eq!(w.draft().name, "Anna");

        // same day again: nothing is lost
        w.select_day(ymd(2024, 6, 14)).unwrap();
        assert_eq!(w.draft().start_time, "19:00");
    }

    #[test]
    fn changing_the_day_clears_only_times() {
        let mut w = wizard();
        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);
        w.draft_mut().end_time = "21:00".into();

        w.back().unwrap();
        w.select_day(ymd(2024, 6, 16)).unwrap();

        assert_eq!(w.draft().day, Some(ymd(2024, 6, 16)));
        assert_eq!(w.draft().name, "Anna");
        assert_eq!(w.draft().email, "Anna@Example.hu");
        assert!(w.draft().start_time.is_empty());
        assert!(w.draft().end_time.is_empty());
    }

    #[test]
    fn back_is_only_valid_from_details() {
        let mut w = wizard();
        assert!(matches!(w.back(), Err(MintleafError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn missing_email_keeps_details_step() {
        let store = RecordingStore::default();
        let mut w = wizard();
        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);
        w.draft_mut().email.clear();

        let err = w.submit(&store).await.unwrap_err();
        match err {
            MintleafError::Validation(errors) => {
                assert!(errors.has(Field::Email));
                assert_eq!(errors.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(w.step(), WizardStep::EnteringDetails);
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn valid_submission_confirms_once() {
        let store = RecordingStore::default();
        let mut w = wizard();
        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);

        let record = w.submit(&store).await.unwrap();
        assert_eq!(w.step(), WizardStep::Confirmed);
        assert_eq!(record.reference_code, "REF-1");
        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.contact.phone_e164, "+36301234567");
        assert_eq!(record.contact.email, "anna@example.hu");
        assert_eq!(record.end_time, ymd(2024, 6, 14).and_hms_opt(21, 0, 0).unwrap());
        assert_eq!(w.confirmation(), Some(&record));

        // a second submit is not a second write
        assert!(matches!(
            w.submit(&store).await,
            Err(MintleafError::InvalidTransition { .. })
        ));
        assert_eq!(store.writes().len(), 1);
    }

    #[tokio::test]
    async fn storage_failure_stays_on_details_for_retry() {
        let failing = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let mut w = wizard();
        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);

        let err = w.submit(&failing).await.unwrap_err();
        assert!(matches!(err, MintleafError::StorageWrite(ref m) if m == "store offline"));
        assert_eq!(w.step(), WizardStep::EnteringDetails);
        assert_eq!(w.last_error(), Some("store offline"));

        let working = RecordingStore::default();
        w.submit(&working).await.unwrap();
        assert_eq!(w.step(), WizardStep::Confirmed);
        assert_eq!(w.last_error(), None);
        assert_eq!(working.writes().len(), 1);
    }

    #[tokio::test]
    async fn full_day_rejects_headcount() {
        let settings = ReservationSettings {
            daily_capacity: Some(20),
            ..Default::default()
        };
        let store = RecordingStore {
            booked: 18,
            ..Default::default()
        };
        let mut w = wizard_with(settings);
        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);

        let err = w.submit(&store).await.unwrap_err();
        assert!(matches!(err, MintleafError::Validation(ref e) if e.has(Field::Headcount)));
        assert_eq!(w.step(), WizardStep::EnteringDetails);

        w.draft_mut().headcount = "2".into();
        w.submit(&store).await.unwrap();
        assert_eq!(store.writes().len(), 1);
    }

    #[tokio::test]
    async fn day_swapped_in_the_draft_is_rechecked() {
        let store = RecordingStore::default();
        let mut w = wizard();
        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);

        w.draft_mut().day = Some(ymd(2024, 6, 15));
        let err = w.submit(&store).await.unwrap_err();
        assert!(matches!(err, MintleafError::Validation(ref e) if e.has(Field::Day)));

        w.draft_mut().day = Some(ymd(2024, 6, 1));
        assert!(w.submit(&store).await.is_err());

        assert_eq!(w.step(), WizardStep::EnteringDetails);
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn failed_capacity_read_can_be_retried() {
        let settings = ReservationSettings {
            daily_capacity: Some(20),
            ..Default::default()
        };
        let unreachable = RecordingStore {
            fail_reads: true,
            ..Default::default()
        };
        let mut w = wizard_with(settings);
        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);

        let err = w.submit(&unreachable).await.unwrap_err();
        assert!(matches!(err, MintleafError::StorageWrite(ref m) if m.contains("sheet unreachable")));
        assert_eq!(w.step(), WizardStep::EnteringDetails);
        assert!(w.last_error().is_some_and(|m| m.contains("sheet unreachable")));
        assert!(unreachable.writes().is_empty());

        let working = RecordingStore::default();
        w.submit(&working).await.unwrap();
        assert_eq!(w.step(), WizardStep::Confirmed);
        assert_eq!(working.writes().len(), 1);
    }

    #[tokio::test]
    async fn reset_clears_the_draft() {
        let store = RecordingStore::default();
        let mut w = wizard();
        assert!(w.reset().is_err());

        w.select_day(ymd(2024, 6, 14)).unwrap();
        fill(&mut w);
        w.submit(&store).await.unwrap();
        assert!(w.select_day(ymd(2024, 6, 20)).is_err());

        w.reset().unwrap();
        assert_eq!(w.step(), WizardStep::SelectingDate);
        assert_eq!(w.draft(), &BookingDraft::with_occasion("Brunch"));
        assert!(w.confirmation().is_none());
    }
}
