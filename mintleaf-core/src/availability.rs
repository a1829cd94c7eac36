//! Which days a booking or leave request may target.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::MintleafResult;

/// Days closed to booking, kept sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlackoutSet(BTreeSet<DateKey>);

impl BlackoutSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.0.contains(key)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        DateKey::from_date(date).is_ok_and(|key| self.contains(&key))
    }

    /// Add a day. Returns false if it was already blacked out.
    pub fn insert(&mut self, key: DateKey) -> bool {
        self.0.insert(key)
    }

    /// Remove a day. Returns false if it was not blacked out.
    pub fn remove(&mut self, key: &DateKey) -> bool {
        self.0.remove(key)
    }

    /// Flip membership of a day. Returns true if the day is blacked out
    /// afterwards. Toggling twice restores the original set.
    pub fn toggle(&mut self, key: DateKey) -> bool {
        if self.0.remove(&key) {
            false
        } else {
            self.0.insert(key);
            true
        }
    }

    pub fn toggle_date(&mut self, date: NaiveDate) -> MintleafResult<bool> {
        Ok(self.toggle(DateKey::from_date(date)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateKey> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<DateKey> for BlackoutSet {
    fn from_iter<I: IntoIterator<Item = DateKey>>(iter: I) -> Self {
        BlackoutSet(iter.into_iter().collect())
    }
}

/// Decides, per day, whether a request may target it.
///
/// A day is selectable when it is not blacked out and not strictly before the
/// cutoff. The cutoff day itself is selectable.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityPolicy<'a> {
    blackouts: &'a BlackoutSet,
    not_before: Option<NaiveDate>,
}

impl<'a> AvailabilityPolicy<'a> {
    pub fn new(blackouts: &'a BlackoutSet, not_before: Option<NaiveDate>) -> Self {
        AvailabilityPolicy {
            blackouts,
            not_before,
        }
    }

    /// Guest-facing calendar: past days are never selectable.
    pub fn guest(blackouts: &'a BlackoutSet, today: NaiveDate) -> Self {
        Self::new(blackouts, Some(today))
    }

    /// Blackout editor: administrators may also act on past days.
    pub fn admin(blackouts: &'a BlackoutSet) -> Self {
        Self::new(blackouts, None)
    }

    pub fn not_before(&self) -> Option<NaiveDate> {
        self.not_before
    }

    pub fn is_before_cutoff(&self, date: NaiveDate) -> bool {
        self.not_before.is_some_and(|cutoff| date < cutoff)
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        !self.blackouts.contains_date(date) && !self.is_before_cutoff(date)
    }
}
