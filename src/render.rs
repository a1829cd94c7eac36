//! Terminal rendering for mintleaf-core types, using owo_colors.
//!
//! Theme colors are passed in explicitly; nothing here is global.

use chrono::{Datelike, NaiveDate};
use mintleaf_core::availability::AvailabilityPolicy;
use mintleaf_core::booking::BookingRecord;
use mintleaf_core::calendar_grid::{CalendarCell, WEEKDAY_LABELS, YearMonth, weeks};
use mintleaf_core::constants::{MIN_TEXT_CONTRAST, TIME_FORMAT};
use mintleaf_core::date_range::{DateRangeBlock, DayIndex};
use mintleaf_core::theme::{ContrastCheck, Rgb, ThemeConfig};
use mintleaf_core::unit::Unit;
use owo_colors::OwoColorize;

/// Extension trait for colored terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Unit {
    fn render(&self) -> String {
        let settings = &self.settings;
        let store = match &settings.remote {
            Some(remote) => format!("remote: {}", remote.provider.name()),
            None => "local".to_string(),
        };
        let capacity = settings
            .daily_capacity
            .map(|c| format!(", {c} seats/day"))
            .unwrap_or_default();

        format!(
            "{} {}",
            self.name.bold(),
            format!(
                "({}, {} blackout {}, {store}{capacity})",
                settings.bookable_window,
                settings.blackout_dates.len(),
                pluralize("day", settings.blackout_dates.len()),
            )
            .dimmed()
        )
    }
}

impl Render for BookingRecord {
    fn render(&self) -> String {
        let lines = [
            format!("  {} {}", "Reference:".dimmed(), self.reference_code.bold()),
            format!(
                "  {} {} {}–{}",
                "When:".dimmed(),
                self.day().format("%A, %d %B %Y"),
                self.start_time.format(TIME_FORMAT),
                self.end_time.format(TIME_FORMAT)
            ),
            format!(
                "  {} {} ({} {})",
                "Guests:".dimmed(),
                self.headcount,
                self.name,
                self.occasion.to_lowercase()
            ),
            format!(
                "  {} {}, {}",
                "Contact:".dimmed(),
                self.contact.phone_e164,
                self.contact.email
            ),
            format!("  {} {}", "Status:".dimmed(), self.status.yellow()),
        ];
        lines.join("\n")
    }
}

impl Render for ContrastCheck {
    fn render(&self) -> String {
        let ratio = format!("{:>5.2}:1", self.ratio);
        let pair = format!("{} on {}", self.foreground, self.background).dimmed().to_string();
        if self.is_below(MIN_TEXT_CONTRAST) {
            format!("  {} {} {:<26} {pair}", "!".red(), ratio.red(), self.label)
        } else {
            format!("  {} {} {:<26} {pair}", "✓".green(), ratio, self.label)
        }
    }
}

impl Render for DateRangeBlock {
    fn render(&self) -> String {
        let days = self.len_days();
        format!(
            "{} {}",
            self,
            format!("({days} {})", pluralize("day", days as usize)).dimmed()
        )
    }
}

/// Colors a calendar day by what the policy says about it. Days that carry
/// leave requests are shown reversed when `requests` is set.
pub struct MonthView<'a> {
    pub month: YearMonth,
    pub cells: &'a [CalendarCell],
    pub policy: AvailabilityPolicy<'a>,
    pub theme: &'a ThemeConfig,
    pub today: NaiveDate,
    pub requests: Option<&'a DayIndex>,
}

impl MonthView<'_> {
    pub fn render(&self) -> String {
        let primary = theme_color(&self.theme.primary);
        let danger = theme_color(&self.theme.danger);

        let mut lines = vec![
            format!("  {}", self.month.label().bold()),
            format!("  {}", WEEKDAY_LABELS.join(" ").dimmed()),
        ];

        for week in weeks(self.cells) {
            let row: Vec<String> = week
                .iter()
                .map(|cell| self.render_cell(cell, primary, danger))
                .collect();
            lines.push(format!("  {}", row.join(" ")));
        }

        lines.join("\n")
    }

    fn render_cell(&self, cell: &CalendarCell, primary: Option<Rgb>, danger: Option<Rgb>) -> String {
        let Some(date) = cell.date else {
            return "  ".to_string();
        };
        let text = format!("{:>2}", date.day());

        if !cell.in_current_month {
            return text.dimmed().to_string();
        }

        let text = if date == self.today {
            text.underline().to_string()
        } else {
            text
        };

        let styled = if self.policy.is_selectable(date) {
            match primary {
                Some(c) => text.truecolor(c.r, c.g, c.b).bold().to_string(),
                None => text.green().bold().to_string(),
            }
        } else if self.policy.is_before_cutoff(date) {
            text.dimmed().to_string()
        } else {
            match danger {
                Some(c) => text.truecolor(c.r, c.g, c.b).strikethrough().to_string(),
                None => text.red().strikethrough().to_string(),
            }
        };

        if self.requests.is_some_and(|index| index.count(date) > 0) {
            styled.reversed().to_string()
        } else {
            styled
        }
    }
}

fn theme_color(hex: &str) -> Option<Rgb> {
    Rgb::from_hex(hex).ok()
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
