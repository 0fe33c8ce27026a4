//! Planning CLI commands
//!
//! `plan`, `calendar`, and `adjust`: turn an onboarding profile into a
//! monthly plan and calendar, show the calendar, and preview behavior
//! adjustments.

use std::path::Path;

use crate::cli::{parse_date_or_today, parse_month_or};
use crate::config::{RegionProfiles, Settings};
use crate::display::{format_behavior_report, format_calendar, format_plan};
use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{Category, OnboardingProfile};
use crate::services::PlanningService;
use crate::storage::Storage;

/// Read onboarding answers from a JSON file
pub fn load_profile(path: &Path) -> DayBudgetResult<OnboardingProfile> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DayBudgetError::Io(format!("Failed to read profile {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        DayBudgetError::Validation(format!("Invalid profile {}: {}", path.display(), e))
    })
}

/// Handle `plan <profile.json>`
pub fn handle_plan_command(
    storage: &Storage,
    settings: &Settings,
    profiles: RegionProfiles,
    profile_path: &Path,
    month: Option<&str>,
    adjust: bool,
    today: Option<&str>,
) -> DayBudgetResult<()> {
    let today = parse_date_or_today(today)?;
    let period = parse_month_or(month, today)?;
    let profile = load_profile(profile_path)?;

    let service = PlanningService::new(storage, settings, profiles);
    let outcome = service.plan_month(&profile, period, adjust, today)?;

    print!(
        "{}",
        format_plan(&outcome.record.plan, period, &settings.currency_symbol)
    );
    println!();

    if let Some(report) = &outcome.behavior {
        println!("Behavior adjustment");
        println!("{}", "-".repeat(40));
        print!("{}", format_behavior_report(report));
        println!();
    }

    if outcome.rebuilt {
        println!(
            "Calendar for {} rebuilt; recorded spend was kept.",
            period
        );
    } else {
        println!("Calendar for {} created.", period);
    }
    println!("Run 'daybudget calendar --month {}' to view it.", period);

    Ok(())
}

/// Handle `calendar`
pub fn handle_calendar_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<&str>,
    category: Option<&str>,
) -> DayBudgetResult<()> {
    let today = parse_date_or_today(None)?;
    let period = parse_month_or(month, today)?;
    let category = category.map(Category::from_name);

    let service = PlanningService::new(storage, settings, RegionProfiles::builtin());
    let calendar = match service.calendar(period) {
        Ok(calendar) => calendar,
        Err(e) if e.is_not_found() => {
            let months = storage.plans.periods(settings.user_id)?;
            if months.is_empty() {
                println!("No plans yet. Run 'daybudget plan <profile.json>' first.");
            } else {
                let months: Vec<String> = months.iter().map(|m| m.to_string()).collect();
                println!("No calendar for {}. Planned months: {}", period, months.join(", "));
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let record = service.current_plan(period)?;

    println!(
        "Income tier {}, discretionary {}{}",
        record.plan.user_class,
        settings.currency_symbol,
        record.plan.discretionary_total
    );
    print!(
        "{}",
        format_calendar(&calendar, category, &settings.date_format)
    );
    Ok(())
}

/// Handle `adjust <profile.json>`: analyze history without saving anything
pub fn handle_adjust_command(
    storage: &Storage,
    settings: &Settings,
    profiles: RegionProfiles,
    profile_path: &Path,
    today: Option<&str>,
) -> DayBudgetResult<()> {
    let today = parse_date_or_today(today)?;
    let profile = load_profile(profile_path)?;

    let service = PlanningService::new(storage, settings, profiles);
    let report = service.preview_adjustment(&profile, today)?;

    println!(
        "Behavior analysis for the {} days ending {}",
        settings.behavior.window_days, today
    );
    println!("{}", "=".repeat(40));
    print!("{}", format_behavior_report(&report));
    Ok(())
}
