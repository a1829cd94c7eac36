use anyhow::Result;
use mintleaf_core::mintleaf::Mintleaf;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(mintleaf: &Mintleaf) -> Result<()> {
    let units = mintleaf.units();

    if units.is_empty() {
        println!(
            "{}",
            format!("No units in {}", mintleaf.display_path().display()).dimmed()
        );
        return Ok(());
    }

    let default = mintleaf.default_unit().map(|u| u.name);
    for unit in &units {
        let marker = if default.as_deref() == Some(unit.name.as_str()) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{marker} {}", unit.render());
    }

    Ok(())
}
