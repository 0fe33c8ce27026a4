//! Calendar display formatting
//!
//! Renders a month calendar as one table row per day.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, MonthCalendar, Money};

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Planned")]
    planned: Money,
    #[tabled(rename = "Spent")]
    spent: Money,
    #[tabled(rename = "Left")]
    left: Money,
}

/// Format a calendar, optionally restricted to one category
///
/// Dates are written with the strftime `date_format`, after the weekday.
pub fn format_calendar(
    calendar: &MonthCalendar,
    category: Option<Category>,
    date_format: &str,
) -> String {
    let rows: Vec<DayRow> = calendar
        .days
        .iter()
        .map(|day| {
            let (planned, spent) = match category {
                Some(c) => (day.planned_for(c), day.spent_for(c)),
                None => (day.total, day.spent_total()),
            };
            DayRow {
                date: format!("{} {}", day.date.format("%a"), day.date.format(date_format)),
                planned,
                spent,
                left: planned - spent,
            }
        })
        .collect();

    let title = match category {
        Some(c) => format!("{} calendar for {}", c.label(), calendar.period),
        None => format!("Calendar for {}", calendar.period),
    };

    let mut output = format!("{}\n", title);
    output.push_str(&Table::new(rows).with(Style::psql()).to_string());
    output.push('\n');

    let exhausted: Vec<&str> = calendar.exhausted.iter().map(|c| c.label()).collect();
    if !exhausted.is_empty() {
        output.push_str(&format!("\nExhausted for the month: {}\n", exhausted.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CalendarBuilder;
    use crate::models::{CategoryWeightMap, IncomeTier, MonthPeriod, MonthlyBudgetPlan, UserId, WeightSource};
    use std::collections::BTreeMap;

    #[test]
    fn test_format_calendar_for_category() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert(Category::Coffee, Money::from_cents(3_000));
        let plan = MonthlyBudgetPlan {
            total_income: Money::from_cents(3_000),
            fixed_expenses: BTreeMap::new(),
            fixed_total: Money::zero(),
            savings_goal: Money::zero(),
            discretionary_total: Money::from_cents(3_000),
            discretionary_breakdown: breakdown,
            weights: CategoryWeightMap::from_scores([(Category::Coffee, 1.0)]).unwrap(),
            weight_source: WeightSource::DeclaredFrequencies,
            user_class: IncomeTier::Low,
            over_committed: false,
        };
        let period = MonthPeriod::new(2025, 4).unwrap();
        let calendar = CalendarBuilder::new()
            .build(UserId::new(), &plan, period, &BTreeMap::new())
            .unwrap();

        let text = format_calendar(&calendar, Some(Category::Coffee), "%Y-%m-%d");
        assert!(text.starts_with("Coffee calendar for 2025-04"));
        assert!(text.contains("Wed 2025-04-30"));
        assert!(text.contains("1.00"));

        let text = format_calendar(&calendar, None, "%d/%m/%Y");
        assert!(text.contains("Wed 30/04/2025"));
        assert!(!text.contains("2025-04-30"));
    }
}
