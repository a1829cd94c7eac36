mod commands;
mod logging;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mintleaf_core::mintleaf::Mintleaf;
use mintleaf_core::unit::Unit;

#[derive(Parser)]
#[command(name = "mintleaf")]
#[command(about = "Availability calendars, table bookings and leave requests for your venues")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List units found in the units directory
    Units,
    /// Show a month of availability
    Calendar {
        /// Unit to show (by directory name)
        #[arg(short, long)]
        unit: Option<String>,

        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Fill padding cells with the neighbouring months' days
        #[arg(long)]
        adjacent: bool,

        /// Show past days as selectable, as the blackout editor does
        #[arg(long)]
        admin: bool,

        /// Highlight days that already carry leave requests
        #[arg(long)]
        requests: bool,
    },
    /// Book a table, prompting for anything not given
    Book(commands::book::BookArgs),
    /// Manage days closed to booking
    Blackout {
        #[arg(short, long)]
        unit: Option<String>,

        #[command(subcommand)]
        action: BlackoutAction,
    },
    /// Request leave for picked days, one request per contiguous range
    Leave {
        #[arg(short, long)]
        unit: Option<String>,

        /// Who is requesting (prompted if not given)
        #[arg(long)]
        name: Option<String>,

        /// Reason or handover note
        #[arg(long)]
        note: Option<String>,

        /// Days to request (YYYY-MM-DD), in any order
        #[arg(required = true)]
        dates: Vec<String>,
    },
    /// Check the booking page theme for readable contrast
    Theme {
        #[arg(short, long)]
        unit: Option<String>,
    },
    /// Preview how contact details are stored
    Contact {
        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum BlackoutAction {
    /// List blacked-out days
    List,
    /// Close a day to booking, or reopen it if already closed
    Toggle {
        /// Day to toggle (YYYY-MM-DD)
        date: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut mintleaf = Mintleaf::load().context("Could not load mintleaf config")?;

    match cli.command {
        Commands::Units => commands::units::run(&mintleaf),
        Commands::Calendar {
            unit,
            month,
            adjacent,
            admin,
            requests,
        } => {
            let unit = resolve_unit(&mut mintleaf, unit.as_deref())?;
            commands::calendar::run(&unit, month.as_deref(), adjacent, admin, requests)
        }
        Commands::Book(args) => {
            let unit = resolve_unit(&mut mintleaf, args.unit.as_deref())?;
            commands::book::run(&unit, mintleaf.phone_rules().clone(), args).await
        }
        Commands::Blackout { unit, action } => {
            let mut unit = resolve_unit(&mut mintleaf, unit.as_deref())?;
            match action {
                BlackoutAction::List => commands::blackout::list(&unit),
                BlackoutAction::Toggle { date } => commands::blackout::toggle(&mut unit, &date),
            }
        }
        Commands::Leave {
            unit,
            name,
            note,
            dates,
        } => {
            let unit = resolve_unit(&mut mintleaf, unit.as_deref())?;
            commands::leave::run(&unit, &dates, name, note)
        }
        Commands::Theme { unit } => {
            let unit = resolve_unit(&mut mintleaf, unit.as_deref())?;
            commands::theme::run(&unit)
        }
        Commands::Contact { phone, email } => {
            commands::contact::run(mintleaf.phone_rules(), phone.as_deref(), email.as_deref())
        }
    }
}

/// Pick the unit a command operates on: the one named, else the configured
/// default, else the only unit there is.
fn resolve_unit(mintleaf: &mut Mintleaf, name: Option<&str>) -> Result<Unit> {
    if let Some(name) = name {
        return mintleaf.unit(name).map_err(|e| {
            let available: Vec<_> = mintleaf.units().into_iter().map(|u| u.name).collect();
            if available.is_empty() {
                anyhow::anyhow!("{e}")
            } else {
                anyhow::anyhow!("{e}. Available: {}", available.join(", "))
            }
        });
    }

    if let Some(unit) = mintleaf.default_unit() {
        return Ok(unit);
    }

    let mut units = mintleaf.units();
    match units.len() {
        0 => anyhow::bail!(
            "No units found in {}.\n\n\
            Create one by making a directory there and blacking out a day:\n  \
            mkdir -p {}/bistro\n  \
            mintleaf blackout --unit bistro toggle 2025-12-24",
            mintleaf.display_path().display(),
            mintleaf.display_path().display()
        ),
        1 => {
            let unit = units.remove(0);
            mintleaf.set_default_unit_if_unset(&unit.name)?;
            Ok(unit)
        }
        _ => {
            let available: Vec<_> = units.iter().map(|u| u.name.as_str()).collect();
            anyhow::bail!(
                "Multiple units found ({}). Use --unit to pick one.",
                available.join(", ")
            )
        }
    }
}
