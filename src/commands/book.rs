use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{Confirm, Input, Select};
use mintleaf_core::booking::{BookingDraft, BookingWizard, Field};
use mintleaf_core::calendar_grid::{Padding, YearMonth, month_grid};
use mintleaf_core::contact::PhoneRules;
use mintleaf_core::error::MintleafError;
use mintleaf_core::unit::Unit;
use owo_colors::OwoColorize;

use super::parse_day;
use crate::render::{MonthView, Render};

#[derive(Args, Debug, Default)]
pub struct BookArgs {
    /// Unit to book at (by directory name)
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Day of the booking (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    /// Number of guests
    #[arg(long)]
    pub headcount: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM, defaults to two hours after the start)
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub occasion: Option<String>,

    /// Where the guest heard about the venue
    #[arg(long)]
    pub source: Option<String>,
}

impl BookArgs {
    /// Whether every required field was given on the command line.
    fn is_complete(&self) -> bool {
        self.date.is_some()
            && self.name.is_some()
            && self.phone.is_some()
            && self.email.is_some()
            && self.start.is_some()
    }
}

pub async fn run(unit: &Unit, phone_rules: PhoneRules, args: BookArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let mut wizard = BookingWizard::new(&unit.name, unit.settings.clone(), phone_rules, today);
    let interactive = !args.is_complete();

    apply_args(wizard.draft_mut(), &args);

    match &args.date {
        Some(date) => wizard.select_day(parse_day(date)?)?,
        None => prompt_day(&mut wizard)?,
    }

    if interactive {
        prompt_missing(&mut wizard, &args)?;
    }

    let store = unit.store();
    loop {
        match wizard.submit(&store).await {
            Ok(record) => {
                if interactive {
                    println!();
                }
                println!("{}", "  Booking received".green());
                println!("{}", record.render());
                return Ok(());
            }
            Err(MintleafError::Validation(errors)) if interactive => {
                for error in errors.iter() {
                    eprintln!("  {}", error.to_string().red());
                }
                for field in errors.fields() {
                    prompt_field(&mut wizard, field)?;
                }
            }
            Err(MintleafError::StorageWrite(message)) if interactive => {
                eprintln!("  {}", format!("Could not save booking: {message}").red());
                let retry = Confirm::new()
                    .with_prompt("  Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    anyhow::bail!("Booking not saved");
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Copy command-line values into the draft, keeping defaults for the rest.
fn apply_args(draft: &mut BookingDraft, args: &BookArgs) {
    let fields = [
        (&args.name, &mut draft.name),
        (&args.headcount, &mut draft.headcount),
        (&args.phone, &mut draft.phone),
        (&args.email, &mut draft.email),
        (&args.start, &mut draft.start_time),
        (&args.end, &mut draft.end_time),
        (&args.occasion, &mut draft.occasion),
        (&args.source, &mut draft.source),
    ];

    for (arg, field) in fields {
        if let Some(value) = arg {
            *field = value.clone();
        }
    }
}

/// Show this month's availability and ask until a selectable day is given.
fn prompt_day(wizard: &mut BookingWizard) -> Result<()> {
    let today = Local::now().date_naive();
    let month = YearMonth::containing(today);
    let cells = month_grid(month, Padding::Blank);
    let view = MonthView {
        month,
        cells: &cells,
        policy: wizard.policy(),
        theme: &wizard.settings().theme,
        today,
        requests: None,
    };
    println!("{}", view.render());
    println!();

    loop {
        let input: String = Input::new()
            .with_prompt("  Which day? (YYYY-MM-DD)")
            .interact_text()?;
        let result = parse_day(&input).and_then(|day| wizard.select_day(day).map_err(Into::into));
        match result {
            Ok(()) => return Ok(()),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn prompt_missing(wizard: &mut BookingWizard, args: &BookArgs) -> Result<()> {
    if args.name.is_none() {
        prompt_field(wizard, Field::Name)?;
    }
    if args.headcount.is_none() {
        prompt_field(wizard, Field::Headcount)?;
    }
    if args.phone.is_none() {
        prompt_field(wizard, Field::Phone)?;
    }
    if args.email.is_none() {
        prompt_field(wizard, Field::Email)?;
    }

    if args.occasion.is_none() {
        let options = &wizard.settings().guest_form.occasion_options;
        if !options.is_empty() {
            let choice = Select::new()
                .with_prompt("  Occasion")
                .items(options)
                .default(0)
                .interact()?;
            let occasion = options[choice].clone();
            wizard.draft_mut().occasion = occasion;
        }
    }

    if args.source.is_none() {
        let mut options = wizard.settings().guest_form.heard_from_options.clone();
        if !options.is_empty() {
            options.push("(skip)".to_string());
            let choice = Select::new()
                .with_prompt("  How did you hear about us?")
                .items(&options)
                .default(options.len() - 1)
                .interact()?;
            if choice + 1 < options.len() {
                wizard.draft_mut().source = options[choice].clone();
            }
        }
    }

    if args.start.is_none() {
        prompt_field(wizard, Field::StartTime)?;
    }
    if args.end.is_none() {
        prompt_field(wizard, Field::EndTime)?;
    }

    Ok(())
}

fn prompt_field(wizard: &mut BookingWizard, field: Field) -> Result<()> {
    if field == Field::Day {
        wizard.back()?;
        return prompt_day(wizard);
    }

    let window = wizard.settings().bookable_window;
    let draft = wizard.draft_mut();

    match field {
        Field::Day => {}
        Field::Name => draft.name = ask("  Name", &draft.name, false)?,
        Field::Headcount => draft.headcount = ask("  Guests", &draft.headcount, false)?,
        Field::Phone => draft.phone = ask("  Phone", &draft.phone, false)?,
        Field::Email => draft.email = ask("  Email", &draft.email, false)?,
        Field::StartTime => {
            draft.start_time = ask(&format!("  Start time ({window})"), &draft.start_time, false)?
        }
        Field::EndTime => {
            draft.end_time = ask("  End time (empty for 2 hours)", &draft.end_time, true)?
        }
    }

    Ok(())
}

fn ask(prompt: &str, current: &str, allow_empty: bool) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty);
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_fill_only_what_was_given() {
        let mut draft = BookingDraft::with_occasion("Brunch");
        let args = BookArgs {
            name: Some("Anna".into()),
            start: Some("19:00".into()),
            ..Default::default()
        };

        apply_args(&mut draft, &args);

        assert_eq!(draft.name, "Anna");
        assert_eq!(draft.start_time, "19:00");
        assert_eq!(draft.headcount, "2");
        assert_eq!(draft.occasion, "Brunch");
        assert!(draft.email.is_empty());
    }

    #[test]
    fn complete_without_optional_fields() {
        let mut args = BookArgs {
            date: Some("2024-06-14".into()),
            name: Some("Anna".into()),
            phone: Some("06301234567".into()),
            email: Some("anna@example.hu".into()),
            start: Some("19:00".into()),
            ..Default::default()
        };
        assert!(args.is_complete());

        args.email = None;
        assert!(!args.is_complete());
    }
}
