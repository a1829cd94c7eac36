//! Monday-first month grids.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{MintleafError, MintleafResult};

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// `month` is 1-based. Years outside 0000..=9999 are rejected so every
    /// day in the grid has a valid [`DateKey`](crate::date_key::DateKey).
    pub fn new(year: i32, month: u32) -> MintleafResult<Self> {
        if !(0..=9999).contains(&year) {
            return Err(MintleafError::InvalidDate(format!("year {year} is out of range")));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| MintleafError::InvalidDate(format!("month {month} does not exist")))?;
        Ok(YearMonth { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        YearMonth {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> MintleafResult<Self> {
        let invalid = || MintleafError::InvalidDate(format!("'{}' is not a YYYY-MM month", s.trim()));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(self.first)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn next(&self) -> MintleafResult<Self> {
        match self.month() {
            12 => Self::new(self.year() + 1, 1),
            m => Self::new(self.year(), m + 1),
        }
    }

    pub fn prev(&self) -> MintleafResult<Self> {
        match self.month() {
            1 => Self::new(self.year() - 1, 12),
            m => Self::new(self.year(), m - 1),
        }
    }

    /// Long label such as "June 2024".
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// What the cells before the 1st and after the last day of the month hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Padding {
    /// Padding cells carry no date and are not interactive.
    #[default]
    Blank,
    /// Padding cells carry the neighbouring month's dates for display.
    AdjacentMonth,
}

/// One cell of the display grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: Option<NaiveDate>,
    pub in_current_month: bool,
}

impl CalendarCell {
    fn padding(date: Option<NaiveDate>) -> Self {
        CalendarCell {
            date,
            in_current_month: false,
        }
    }
}

/// Weekday labels for a Monday-first grid.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Build the display grid for `month`: leading padding up to the Monday of the
/// first week, every day of the month, then trailing padding up to 35 or 42
/// cells.
pub fn month_grid(month: YearMonth, padding: Padding) -> Vec<CalendarCell> {
    let first = month.first_day();
    let last = month.last_day();
    let offset = u64::from(first.weekday().num_days_from_monday());
    let days = u64::from(month.days_in_month());

    let grid_len = if offset + days > 35 { 42 } else { 35 };
    let mut cells = Vec::with_capacity(grid_len as usize);

    for i in 0..offset {
        let date = match padding {
            Padding::Blank => None,
            Padding::AdjacentMonth => first.checked_sub_days(Days::new(offset - i)),
        };
        cells.push(CalendarCell::padding(date));
    }

    cells.extend(first.iter_days().take(days as usize).map(|date| CalendarCell {
        date: Some(date),
        in_current_month: true,
    }));

    let trailing = grid_len - offset - days;
    for i in 1..=trailing {
        let date = match padding {
            Padding::Blank => None,
            Padding::AdjacentMonth => last.checked_add_days(Days::new(i)),
        };
        cells.push(CalendarCell::padding(date));
    }

    cells
}

/// Split a grid into rows of seven cells.
pub fn weeks(cells: &[CalendarCell]) -> impl Iterator<Item = &[CalendarCell]> {
    cells.chunks(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn every_month_fills_five_or_six_weeks() {
        for year in 1999..=2031 {
            for month in 1..=12 {
                let ym = ym(year, month);
                for padding in [Padding::Blank, Padding::AdjacentMonth] {
                    let cells = month_grid(ym, padding);
                    assert!(cells.len() == 35 || cells.len() == 42, "{ym}: {}", cells.len());

                    let current: Vec<_> = cells.iter().filter(|c| c.in_current_month).collect();
                    assert_eq!(current.len() as u32, ym.days_in_month(), "{ym}");
                    assert!(current.iter().all(|c| c.date.is_some()));
                }
            }
        }
    }

    #[test]
    fn first_day_lands_in_its_monday_first_column() {
        // 2024-06-01 is a Saturday
        let cells = month_grid(ym(2024, 6), Padding::Blank);
        assert_eq!(cells.iter().take_while(|c| c.date.is_none()).count(), 5);
        assert_eq!(cells[5].date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(cells.len(), 35);
    }

    #[test]
    fn month_starting_on_sunday_needs_six_weeks() {
        // 2024-09-01 is a Sunday: 6 leading cells + 30 days
        let cells = month_grid(ym(2024, 9), Padding::Blank);
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[6].date, NaiveDate::from_ymd_opt(2024, 9, 1));
    }

    #[test]
    fn february_starting_on_monday_has_no_leading_padding() {
        // 2021-02-01 is a Monday, 28 days
        let cells = month_grid(ym(2021, 2), Padding::Blank);
        assert_eq!(cells.len(), 35);
        assert!(cells[0].in_current_month);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2021, 2, 1));
        assert!(cells[28..].iter().all(|c| c.date.is_none() && !c.in_current_month));
    }

    #[test]
    fn blank_padding_carries_no_dates() {
        let cells = month_grid(ym(2024, 6), Padding::Blank);
        assert!(cells.iter().filter(|c| !c.in_current_month).all(|c| c.date.is_none()));
    }

    #[test]
    fn adjacent_padding_is_contiguous_with_the_month() {
        let cells = month_grid(ym(2024, 3), Padding::AdjacentMonth);
        let dates: Vec<NaiveDate> = cells.iter().map(|c| c.date.unwrap()).collect();
        for pair in dates.windows(2) {
            assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }
        // 2024-03-01 is a Friday, so the grid opens on Monday 2024-02-26
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
        assert!(!cells[0].in_current_month);
        assert!(!cells.last().unwrap().in_current_month);
    }

    #[test]
    fn adjacent_padding_crosses_year_boundaries() {
        let cells = month_grid(ym(2025, 1), Padding::AdjacentMonth);
        // 2025-01-01 is a Wednesday
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2024, 12, 30));
        let cells = month_grid(ym(2024, 12), Padding::AdjacentMonth);
        assert_eq!(cells.last().unwrap().date.unwrap().year(), 2025);
    }

    #[test]
    fn navigation_wraps_years() {
        assert_eq!(ym(2024, 12).next().unwrap(), ym(2025, 1));
        assert_eq!(ym(2025, 1).prev().unwrap(), ym(2024, 12));
        assert_eq!(ym(2024, 5).next().unwrap(), ym(2024, 6));
        assert!(ym(9999, 12).next().is_err());
    }

    #[test]
    fn parse_and_display_round_trip() {
        let m = YearMonth::parse("2024-06").unwrap();
        assert_eq!(m, ym(2024, 6));
        assert_eq!(m.to_string(), "2024-06");
        assert!(YearMonth::parse("2024-13").is_err());
        assert!(YearMonth::parse("june").is_err());
    }

    #[test]
    fn leap_february_has_29_days() {
        assert_eq!(ym(2024, 2).days_in_month(), 29);
        assert_eq!(ym(2023, 2).days_in_month(), 28);
        assert_eq!(ym(2000, 2).days_in_month(), 29);
        assert_eq!(ym(1900, 2).days_in_month(), 28);
    }

    #[test]
    fn containing_snaps_to_first_of_month() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
        assert_eq!(YearMonth::containing(d), ym(2024, 6));
    }

    #[test]
    fn grid_splits_into_weeks() {
        let cells = month_grid(ym(2024, 9), Padding::Blank);
        assert_eq!(weeks(&cells).count(), 6);
        assert!(weeks(&cells).all(|w| w.len() == 7));
    }
}
