use anyhow::Result;
use mintleaf_core::constants::MIN_TEXT_CONTRAST;
use mintleaf_core::unit::Unit;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(unit: &Unit) -> Result<()> {
    let theme = &unit.settings.theme;
    let report = theme.contrast_report()?;

    println!(
        "{}",
        format!(
            "  {unit}: radius {:?}, elevation {:?}, type scale {:?}",
            theme.radius, theme.elevation, theme.typography_scale
        )
        .dimmed()
    );
    for check in &report {
        println!("{}", check.render());
    }

    let low = theme.contrast_warnings()?.len();
    if low > 0 {
        println!();
        println!(
            "{}",
            format!("  {low} of {} pairs are below {MIN_TEXT_CONTRAST}:1", report.len()).yellow()
        );
    }

    Ok(())
}
