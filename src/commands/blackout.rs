use anyhow::Result;
use mintleaf_core::unit::Unit;
use owo_colors::OwoColorize;

use super::parse_day;

pub fn list(unit: &Unit) -> Result<()> {
    let blackouts = &unit.settings.blackout_dates;

    if blackouts.is_empty() {
        println!("{}", format!("  No blacked-out days for {unit}").dimmed());
        return Ok(());
    }

    for key in blackouts.iter() {
        println!("  {} {}", key, key.date().format("%A").dimmed());
    }

    Ok(())
}

/// Admin editor toggle. Past days may be toggled too.
pub fn toggle(unit: &mut Unit, date: &str) -> Result<()> {
    let day = parse_day(date)?;

    let closed = unit.settings.blackout_dates.toggle_date(day)?;
    unit.save_settings()?;

    if closed {
        println!("{}", format!("  Closed {day} to booking").red());
    } else {
        println!("{}", format!("  Reopened {day} for booking").green());
    }

    Ok(())
}
