//! Transaction history CLI commands

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_transaction_list;
use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::Category;
use crate::services::ImportService;
use crate::storage::{Storage, TransactionQuery};

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Import past transactions from CSV (date, category, amount[, memo])
    Import {
        /// Path to CSV file
        file: PathBuf,
    },
    /// List recorded transactions
    List {
        /// Filter by category name
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a history command
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    cmd: HistoryCommands,
) -> DayBudgetResult<()> {
    match cmd {
        HistoryCommands::Import { file } => import(storage, settings, &file),
        HistoryCommands::List { category, limit } => {
            let mut query = TransactionQuery::for_user(settings.user_id);
            if let Some(name) = category {
                query = query.category(Category::from_name(&name));
            }
            let transactions = storage.transactions.query(&query)?;
            print!("{}", format_transaction_list(&transactions, limit, &settings.date_format));
            Ok(())
        }
    }
}

fn import(storage: &Storage, settings: &Settings, file: &Path) -> DayBudgetResult<()> {
    if !file.exists() {
        return Err(DayBudgetError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let result = ImportService::new(storage).import_file(file, settings.user_id)?;

    println!("Import complete");
    println!("{}", "=".repeat(40));
    println!("  Imported:           {}", result.imported);
    println!("  Duplicates skipped: {}", result.duplicates_skipped);
    println!("  Errors:             {}", result.errors.len());

    if !result.errors.is_empty() {
        println!();
        for (line, message) in result.errors.iter().take(5) {
            println!("  line {}: {}", line, message);
        }
        if result.errors.len() > 5 {
            println!("  ... and {} more", result.errors.len() - 5);
        }
    }

    Ok(())
}
