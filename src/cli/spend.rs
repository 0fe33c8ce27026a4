//! Spending CLI commands
//!
//! `spend`, `redistribute`, and `events`.

use crate::cli::{parse_date_or_today, parse_month_or};
use crate::config::Settings;
use crate::display::format_event_list;
use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{Category, Money};
use crate::services::SpendingService;
use crate::storage::Storage;

/// Handle `spend <category> <amount>`
pub fn handle_spend_command(
    storage: &Storage,
    settings: &Settings,
    category: &str,
    amount: &str,
    date: Option<&str>,
    today: Option<&str>,
    memo: Option<String>,
) -> DayBudgetResult<()> {
    let today = parse_date_or_today(today)?;
    let date = match date {
        Some(_) => parse_date_or_today(date)?,
        None => today,
    };
    let amount = Money::parse(amount)
        .map_err(|e| DayBudgetError::Validation(format!("Invalid amount: {}", e)))?;
    let category = Category::from_name(category);

    let service = SpendingService::new(storage, settings);
    let outcome = service.record_spend(category, amount, date, today, memo)?;

    println!(
        "Recorded {} on {} for {}",
        outcome.transaction.amount,
        category.label(),
        outcome.transaction.date.format(&settings.date_format)
    );
    if !outcome.on_calendar {
        println!("No calendar for that month; kept as history only.");
    }
    if let Some(event) = &outcome.event {
        println!("{}", event.summary());
    }

    Ok(())
}

/// Handle `redistribute`
pub fn handle_redistribute_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<&str>,
    today: Option<&str>,
) -> DayBudgetResult<()> {
    let today = parse_date_or_today(today)?;
    let period = parse_month_or(month, today)?;

    let service = SpendingService::new(storage, settings);
    let events = service.redistribute(period, today)?;

    if events.is_empty() {
        println!("Nothing to redistribute for {}.", period);
    } else {
        print!("{}", format_event_list(&events));
    }
    Ok(())
}

/// Handle `events`
pub fn handle_events_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<&str>,
) -> DayBudgetResult<()> {
    let today = parse_date_or_today(None)?;
    let period = parse_month_or(month, today)?;

    let service = SpendingService::new(storage, settings);
    print!("{}", format_event_list(&service.events(period)?));
    Ok(())
}
