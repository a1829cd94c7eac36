use anyhow::Result;
use dialoguer::Input;
use mintleaf_core::booking::validation::{is_valid_email, is_valid_phone};
use mintleaf_core::contact::{PhoneRules, normalize_email};
use owo_colors::OwoColorize;

pub fn run(rules: &PhoneRules, phone: Option<&str>, email: Option<&str>) -> Result<()> {
    let (phone, email) = match (phone, email) {
        (None, None) => (
            Some(
                Input::<String>::new()
                    .with_prompt("  Phone")
                    .allow_empty(true)
                    .interact_text()?,
            ),
            Some(
                Input::<String>::new()
                    .with_prompt("  Email")
                    .allow_empty(true)
                    .interact_text()?,
            ),
        ),
        (p, e) => (p.map(String::from), e.map(String::from)),
    };

    if let Some(phone) = phone {
        println!("  {} {}", "Phone:".dimmed(), preview(&rules.normalize(&phone), is_valid_phone(&phone)));
    }
    if let Some(email) = email {
        println!("  {} {}", "Email:".dimmed(), preview(&normalize_email(&email), is_valid_email(&email)));
    }

    Ok(())
}

fn preview(normalized: &str, valid: bool) -> String {
    if normalized.is_empty() {
        "(empty)".dimmed().to_string()
    } else if valid {
        normalized.green().to_string()
    } else {
        format!("{} {}", normalized.yellow(), "(would not pass the booking form)".dimmed())
    }
}
