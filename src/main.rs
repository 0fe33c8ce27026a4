use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use daybudget::audit::EntityType;
use daybudget::cli::{
    handle_adjust_command, handle_calendar_command, handle_events_command,
    handle_history_command, handle_plan_command, handle_redistribute_command,
    handle_spend_command, HistoryCommands,
};
use daybudget::config::{DayBudgetPaths, RegionProfiles, Settings};
use daybudget::logging::init_tracing;
use daybudget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "daybudget",
    author = "Kaylee Beyene",
    version,
    about = "Day-by-day budget calendar with intra-month redistribution",
    long_about = "daybudget turns a monthly income, fixed expenses, a savings goal and \
                  how often you spend in each category into a per-day budget calendar, \
                  then re-spreads what is left whenever actual spending drifts from plan."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize daybudget (creates config and data directories)
    Init,

    /// Show configuration paths and settings
    Config,

    /// Build a month's plan and calendar from onboarding answers
    Plan {
        /// Path to the onboarding profile (JSON)
        profile: PathBuf,
        /// Month to plan (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Adjust category weights from recent transaction history
        #[arg(short, long)]
        adjust: bool,
        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        today: Option<String>,
    },

    /// Show the day-by-day calendar for a month
    Calendar {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Show a single category
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Record a spend
    Spend {
        /// Category name
        category: String,
        /// Amount (e.g., "12" or "12.50")
        amount: String,
        /// Date of the spend (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short = 'M', long)]
        memo: Option<String>,
        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        today: Option<String>,
    },

    /// Re-spread the remaining budget of every discretionary category
    Redistribute {
        /// Month (YYYY-MM), defaults to the month containing today
        #[arg(short, long)]
        month: Option<String>,
        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        today: Option<String>,
    },

    /// Show redistribution events for a month
    Events {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Transaction history commands
    #[command(subcommand)]
    History(HistoryCommands),

    /// Preview behavior-based weight adjustments without saving a plan
    Adjust {
        /// Path to the onboarding profile (JSON)
        profile: PathBuf,
        /// Treat this date (YYYY-MM-DD) as the end of the history window
        #[arg(long)]
        today: Option<String>,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = DayBudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Init) => {
            paths.ensure_directories()?;
            if paths.is_initialized() {
                println!("daybudget is already initialized at: {}", paths.base_dir().display());
            } else {
                settings.save(&paths)?;
                Storage::new(paths.clone())?.log_create(
                    EntityType::Settings,
                    settings.user_id.to_string(),
                    None,
                    &settings,
                )?;
                println!("Initialized daybudget at: {}", paths.base_dir().display());
            }
            println!();
            println!("Next: write your onboarding answers to a JSON file and run");
            println!("  daybudget plan <profile.json>");
            return Ok(());
        }
        Some(Commands::Config) => {
            let profiles = RegionProfiles::load_or_builtin(&paths.profiles_file())?;
            println!("daybudget Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  User:              {}", settings.user_id);
            println!("  Redistribution:    {:?}", settings.redistribution.mode);
            println!("  Close today:       {}", settings.redistribution.close_today);
            println!("  History window:    {} days", settings.behavior.window_days);
            println!(
                "  Default region:    {}",
                settings.default_region.as_deref().unwrap_or("default")
            );
            println!(
                "  Regions:           {}",
                profiles.codes().collect::<Vec<_>>().join(", ")
            );
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("daybudget - day-by-day budget calendar");
            println!();
            println!("Run 'daybudget --help' for usage information.");
            println!("Run 'daybudget init' to get started.");
            return Ok(());
        }
    };

    if !paths.is_initialized() {
        bail!("daybudget is not initialized. Run 'daybudget init' first.");
    }

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match command {
        Commands::Plan {
            profile,
            month,
            adjust,
            today,
        } => {
            let profiles = RegionProfiles::load_or_builtin(&paths.profiles_file())?;
            handle_plan_command(
                &storage,
                &settings,
                profiles,
                &profile,
                month.as_deref(),
                adjust,
                today.as_deref(),
            )?;
        }
        Commands::Calendar { month, category } => {
            handle_calendar_command(&storage, &settings, month.as_deref(), category.as_deref())?;
        }
        Commands::Spend {
            category,
            amount,
            date,
            memo,
            today,
        } => {
            handle_spend_command(
                &storage,
                &settings,
                &category,
                &amount,
                date.as_deref(),
                today.as_deref(),
                memo,
            )?;
        }
        Commands::Redistribute { month, today } => {
            handle_redistribute_command(&storage, &settings, month.as_deref(), today.as_deref())?;
        }
        Commands::Events { month } => {
            handle_events_command(&storage, &settings, month.as_deref())?;
        }
        Commands::History(cmd) => {
            handle_history_command(&storage, &settings, cmd)?;
        }
        Commands::Adjust { profile, today } => {
            let profiles = RegionProfiles::load_or_builtin(&paths.profiles_file())?;
            handle_adjust_command(&storage, &settings, profiles, &profile, today.as_deref())?;
        }
        Commands::Audit { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries found.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}
