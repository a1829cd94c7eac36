//! Contiguous day ranges for multi-day requests.
//!
//! A leave request is picked day by day on the calendar and stored as the
//! smallest set of inclusive ranges covering the picked days.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::{MintleafError, MintleafResult};

/// Inclusive, gap-free run of days. `start_date <= end_date` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeBlock {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRangeBlock {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> MintleafResult<Self> {
        if end_date < start_date {
            return Err(MintleafError::InvalidDate(format!(
                "range ends ({end_date}) before it starts ({start_date})"
            )));
        }
        Ok(DateRangeBlock {
            start_date,
            end_date,
        })
    }

    pub fn single(date: NaiveDate) -> Self {
        DateRangeBlock {
            start_date: date,
            end_date: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn len_days(&self) -> u64 {
        (self.end_date - self.start_date).num_days() as u64 + 1
    }

    /// Every day in the block, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }
}

impl fmt::Display for DateRangeBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.start_date == self.end_date {
            write!(f, "{}", self.start_date)
        } else {
            write!(f, "{} – {}", self.start_date, self.end_date)
        }
    }
}

/// Merge distinct days into the minimal ordered list of contiguous blocks.
///
/// Blocks come out sorted by start date with at least one gap day between
/// neighbours. Adjacency is decided by calendar-day succession, never by
/// adding a fixed number of seconds. Empty input yields an empty list;
/// callers must reject an empty selection before submitting.
pub fn consolidate<I>(dates: I) -> Vec<DateRangeBlock>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut sorted: Vec<NaiveDate> = dates.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut blocks: Vec<DateRangeBlock> = Vec::new();
    for date in sorted {
        match blocks.last_mut() {
            Some(current) if current.end_date.succ_opt() == Some(date) => {
                current.end_date = date;
            }
            _ => blocks.push(DateRangeBlock::single(date)),
        }
    }
    blocks
}

/// Day-by-day selection on a request calendar. Picking a day that is already
/// selected removes it.
#[derive(Debug, Clone, Default)]
pub struct DateSelection {
    days: BTreeSet<NaiveDate>,
}

impl DateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the day is selected afterwards.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.days.remove(&date) {
            false
        } else {
            self.days.insert(date);
            true
        }
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    /// Consolidate the selection for submission.
    pub fn to_blocks(&self) -> MintleafResult<Vec<DateRangeBlock>> {
        if self.days.is_empty() {
            return Err(MintleafError::EmptySelection);
        }
        Ok(consolidate(self.days.iter().copied()))
    }
}

impl FromIterator<NaiveDate> for DateSelection {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        DateSelection {
            days: iter.into_iter().collect(),
        }
    }
}

/// How many existing requests touch each day.
#[derive(Debug, Clone, Default)]
pub struct DayIndex {
    counts: BTreeMap<DateKey, usize>,
}

impl DayIndex {
    pub fn from_blocks<'a, I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = &'a DateRangeBlock>,
    {
        let mut counts = BTreeMap::new();
        for block in blocks {
            for day in block.days() {
                if let Ok(key) = DateKey::from_date(day) {
                    *counts.entry(key).or_insert(0) += 1;
                }
            }
        }
        DayIndex { counts }
    }

    pub fn count(&self, date: NaiveDate) -> usize {
        DateKey::from_date(date)
            .ok()
            .and_then(|key| self.counts.get(&key).copied())
            .unwrap_or(0)
    }
}
