//! Behavior report display formatting

use chrono::Weekday;

use crate::engine::BehaviorReport;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Format what the behavior adjuster found and changed
pub fn format_behavior_report(report: &BehaviorReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Transactions considered: {}\n",
        report.transactions_considered
    ));
    if !report.sufficient_history {
        output.push_str("Not enough history to adjust weights; planned weights unchanged.\n");
        return output;
    }

    output.push_str("\nSpend by weekday\n");
    for weekday in WEEKDAYS {
        output.push_str(&format!(
            "  {}  {:>5.1}%\n",
            weekday.to_string(),
            report.weekday_profile.share(weekday) * 100.0
        ));
    }

    if report.adjustments.is_empty() {
        output.push_str("\nNo stable patterns found; planned weights unchanged.\n");
        return output;
    }

    output.push_str("\nAdjustments\n");
    for adj in &report.adjustments {
        output.push_str(&format!(
            "  {:<16} {:<18} observed {:>5.1}% vs planned {:>5.1}%  (+{:.1} pts)\n",
            adj.category.label(),
            adj.pattern.to_string(),
            adj.observed_share * 100.0,
            adj.planned_share * 100.0,
            adj.weight_delta * 100.0
        ));
    }

    output.push_str("\nAdjusted weights\n");
    for (category, weight) in report.weights.iter() {
        output.push_str(&format!("  {:<16} {:>5.1}%\n", category.label(), weight * 100.0));
    }

    output
}
