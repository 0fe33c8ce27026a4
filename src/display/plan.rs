//! Plan display formatting

use crate::models::{MonthlyBudgetPlan, MonthPeriod, WeightSource};

fn weight_source_label(source: WeightSource) -> &'static str {
    match source {
        WeightSource::DeclaredFrequencies => "declared frequencies",
        WeightSource::BehaviorAdjusted => "adjusted from history",
        WeightSource::TierDefaults => "income tier defaults",
        WeightSource::CatchAll => "catch-all",
        WeightSource::Empty => "none",
    }
}

/// Format a monthly plan with its fixed and discretionary breakdown
pub fn format_plan(plan: &MonthlyBudgetPlan, period: MonthPeriod, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Plan for {}\n", period));
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!("  Income:        {:>12}\n", plan.total_income.format_with_symbol(symbol)));
    output.push_str(&format!("  Income tier:   {:>12}\n", plan.user_class.to_string()));
    output.push_str(&format!("  Fixed:         {:>12}\n", plan.fixed_total.format_with_symbol(symbol)));
    output.push_str(&format!("  Savings:       {:>12}\n", plan.savings_goal.format_with_symbol(symbol)));
    output.push_str(&format!("  Discretionary: {:>12}\n", plan.discretionary_total.format_with_symbol(symbol)));

    if plan.over_committed {
        output.push_str(&format!(
            "\n  Over-committed: fixed expenses and savings exceed income by {}\n",
            plan.shortfall().format_with_symbol(symbol)
        ));
    }

    if !plan.fixed_expenses.is_empty() {
        output.push_str("\nFixed expenses\n");
        for (category, amount) in &plan.fixed_expenses {
            output.push_str(&format!("  {:<16} {:>12}\n", category.label(), amount.format_with_symbol(symbol)));
        }
    }

    if !plan.discretionary_breakdown.is_empty() {
        output.push_str(&format!(
            "\nDiscretionary ({})\n",
            weight_source_label(plan.weight_source)
        ));
        for (category, amount) in &plan.discretionary_breakdown {
            output.push_str(&format!(
                "  {:<16} {:>12}  {:>5.1}%\n",
                category.label(),
                amount.format_with_symbol(symbol),
                plan.weights.get(*category) * 100.0
            ));
        }
    }

    output
}
