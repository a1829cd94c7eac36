use anyhow::Result;
use chrono::{Local, NaiveDate};
use dialoguer::Input;
use mintleaf_core::date_range::{DateSelection, DayIndex};
use mintleaf_core::leave::LeaveRequest;
use mintleaf_core::unit::Unit;
use owo_colors::OwoColorize;

use super::parse_day;
use crate::render::{Render, pluralize};

pub fn run(unit: &Unit, dates: &[String], name: Option<String>, note: Option<String>) -> Result<()> {
    let selection = selection_for(dates)?;
    let store = unit.leave_store();
    let existing = store.day_index()?;

    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("  Your name").interact_text()?,
    };

    let requests = store.submit(&name, &selection, note.as_deref(), Local::now().naive_local())?;

    println!(
        "{}",
        format!(
            "  Requested leave for {} ({} {})",
            name.trim(),
            requests.len(),
            pluralize("range", requests.len())
        )
        .green()
    );
    for request in &requests {
        println!("  {}", request.block.render());
    }

    let shared = shared_days(&requests, &existing);
    if !shared.is_empty() {
        println!();
        println!("{}", "  Already requested by others:".yellow());
        for (day, count) in shared {
            let label = format!("{count} {}", pluralize("request", count));
            println!("  {} {}", day.format("%a %b %-d"), label.dimmed());
        }
    }

    Ok(())
}

/// Picking the same day twice deselects it, as on the calendar.
fn selection_for(dates: &[String]) -> Result<DateSelection> {
    let mut selection = DateSelection::new();
    for date in dates {
        selection.toggle(parse_day(date)?);
    }
    Ok(selection)
}

/// Days in `requests` that earlier requests already hold, with how many.
fn shared_days(requests: &[LeaveRequest], existing: &DayIndex) -> Vec<(NaiveDate, usize)> {
    requests
        .iter()
        .flat_map(|r| r.block.days())
        .filter_map(|day| {
            let count = existing.count(day);
            (count > 0).then_some((day, count))
        })
        .collect()
}
