use anyhow::Result;
use chrono::{Local, NaiveDate};
use mintleaf_core::availability::AvailabilityPolicy;
use mintleaf_core::calendar_grid::{Padding, YearMonth, month_grid};
use mintleaf_core::date_range::DayIndex;
use mintleaf_core::unit::Unit;
use owo_colors::OwoColorize;

use crate::render::MonthView;

pub fn run(
    unit: &Unit,
    month: Option<&str>,
    adjacent: bool,
    admin: bool,
    requests: bool,
) -> Result<()> {
    let today = Local::now().date_naive();
    let month = resolve_month(month, today)?;
    let padding = if adjacent {
        Padding::AdjacentMonth
    } else {
        Padding::Blank
    };

    let settings = &unit.settings;
    let policy = if admin {
        AvailabilityPolicy::admin(&settings.blackout_dates)
    } else {
        AvailabilityPolicy::guest(&settings.blackout_dates, today)
    };
    let cells = month_grid(month, padding);
    let index = if requests {
        Some(unit.leave_store().day_index()?)
    } else {
        None
    };

    let view = MonthView {
        month,
        cells: &cells,
        policy,
        theme: &settings.theme,
        today,
        requests: index.as_ref(),
    };

    println!("{}", format!("  {unit}").dimmed());
    println!("{}", view.render());

    let closed = month_closed_days(unit, month);
    if closed > 0 {
        println!();
        println!(
            "{}",
            format!("  {closed} blacked-out {} this month", crate::render::pluralize("day", closed))
                .dimmed()
        );
    }

    if let Some(index) = &index {
        let requested = month_requested_days(index, month);
        println!(
            "{}",
            format!(
                "  {requested} {} with leave requests (shown reversed)",
                crate::render::pluralize("day", requested)
            )
            .dimmed()
        );
    }

    Ok(())
}

/// The month given as `YYYY-MM`, or the one containing `today`.
fn resolve_month(month: Option<&str>, today: NaiveDate) -> Result<YearMonth> {
    match month {
        Some(m) => Ok(YearMonth::parse(m)?),
        None => Ok(YearMonth::containing(today)),
    }
}

fn month_closed_days(unit: &Unit, month: YearMonth) -> usize {
    unit.settings
        .blackout_dates
        .iter()
        .filter(|key| YearMonth::containing(key.date()) == month)
        .count()
}

fn month_requested_days(index: &DayIndex, month: YearMonth) -> usize {
    month
        .first_day()
        .iter_days()
        .take_while(|d| *d <= month.last_day())
        .filter(|d| index.count(*d) > 0)
        .count()
}
