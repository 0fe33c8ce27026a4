//! Properties of the planning engine, exercised through the public API

use std::collections::BTreeMap;

use chrono::NaiveDate;
use daybudget::config::RegionProfiles;
use daybudget::engine::{CalendarBuilder, CategoryAllocator, IncomeClassifier, Redistributor};
use daybudget::models::{
    AllocationInput, Category, FrequencyAnswer, IncomeTier, Money, MonthCalendar, MonthPeriod,
    MonthlyBudgetPlan, OnboardingProfile, SpendingFrequency, UserId, WeightSource,
};

fn profile(
    income: f64,
    fixed: &[(&str, f64)],
    savings: f64,
    frequencies: &[(&str, SpendingFrequency)],
) -> OnboardingProfile {
    OnboardingProfile {
        monthly_income: income,
        fixed_expenses: fixed.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        savings_goal_amount: savings,
        spending_frequencies: frequencies
            .iter()
            .map(|(k, f)| (k.to_string(), FrequencyAnswer::Structured(*f)))
            .collect(),
        ..Default::default()
    }
}

fn plan_for(profile: &OnboardingProfile) -> (AllocationInput, MonthlyBudgetPlan) {
    let input = profile.to_allocation_input().unwrap();
    let classifier = IncomeClassifier::new(RegionProfiles::builtin());
    let tier = classifier.classify(input.income, None).unwrap();
    let plan = CategoryAllocator::new(RegionProfiles::builtin())
        .allocate(&input, tier, None)
        .unwrap();
    (input, plan)
}

fn worked_profile() -> OnboardingProfile {
    profile(
        5000.0,
        &[("rent", 1700.0)],
        500.0,
        &[
            ("dining out", SpendingFrequency::per_month(15.0)),
            ("coffee", SpendingFrequency::per_week(10.0)),
            ("entertainment", SpendingFrequency::per_month(3.0)),
            ("clothing", SpendingFrequency::per_month(1.0)),
            ("transport", SpendingFrequency::per_month(25.0)),
            ("travel", SpendingFrequency::per_year(3.0)),
        ],
    )
}

fn april() -> MonthPeriod {
    MonthPeriod::new(2025, 4).unwrap()
}

fn april_day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
}

fn planned_sum(calendar: &MonthCalendar, category: Category) -> Money {
    calendar.days.iter().map(|d| d.planned_for(category)).sum()
}

#[test]
fn allocation_reconciles_with_income() {
    let incomes = [1234.56, 3000.0, 5000.0, 8765.43, 20000.01];
    for income in incomes {
        let (input, plan) = plan_for(&profile(
            income,
            &[("rent", 900.0), ("utilities", 123.45)],
            200.0,
            &[
                ("groceries", SpendingFrequency::per_week(2.0)),
                ("coffee", SpendingFrequency::per_week(7.0)),
                ("hobbies", SpendingFrequency::per_month(3.0)),
            ],
        ));
        assert!(!plan.over_committed);
        assert_eq!(
            plan.fixed_total + plan.savings_goal + plan.discretionary_allocated(),
            input.income,
            "income {}",
            income
        );
        assert!(plan.discretionary_breakdown.values().all(|m| !m.is_negative()));
    }
}

#[test]
fn calendar_conserves_every_category() {
    let (input, plan) = plan_for(&worked_profile());
    for period in [
        MonthPeriod::new(2024, 2).unwrap(),
        MonthPeriod::new(2025, 2).unwrap(),
        april(),
        MonthPeriod::new(2025, 1).unwrap(),
    ] {
        let calendar = CalendarBuilder::new()
            .build(UserId::new(), &plan, period, &input.due_days)
            .unwrap();
        assert_eq!(calendar.num_days() as u32, period.num_days());
        for category in plan.fixed_expenses.keys().chain(plan.discretionary_breakdown.keys()) {
            assert_eq!(
                planned_sum(&calendar, *category),
                plan.amount_for(*category),
                "{} in {}",
                category,
                period
            );
        }
    }
}

#[test]
fn rebuild_is_byte_identical() {
    let (input, plan) = plan_for(&worked_profile());
    let builder = CalendarBuilder::new();
    let user = UserId::new();

    let first = builder.build(user, &plan, april(), &input.due_days).unwrap();
    let second = builder.build(user, &plan, april(), &input.due_days).unwrap();
    let rebuilt = builder.rebuild(&first, &plan, &input.due_days).unwrap();

    let json = serde_json::to_string(&first).unwrap();
    assert_eq!(serde_json::to_string(&second).unwrap(), json);
    assert_eq!(serde_json::to_string(&rebuilt).unwrap(), json);
}

#[test]
fn tier_threshold_belongs_to_upper_tier() {
    let classifier = IncomeClassifier::new(RegionProfiles::builtin());
    assert_eq!(
        classifier.classify(Money::from_cents(300_000), None).unwrap(),
        IncomeTier::LowerMiddle
    );
    assert_eq!(
        classifier.classify(Money::from_cents(299_999), None).unwrap(),
        IncomeTier::Low
    );
}

#[test]
fn zero_frequencies_fall_back_to_tier_defaults() {
    let (_, plan) = plan_for(&profile(
        5000.0,
        &[("rent", 1200.0), ("utilities", 150.0)],
        500.0,
        &[
            ("dining out", SpendingFrequency::per_month(0.0)),
            ("coffee", SpendingFrequency::per_week(0.0)),
        ],
    ));

    assert_eq!(plan.weight_source, WeightSource::TierDefaults);
    assert_eq!(plan.discretionary_total.cents(), 315_000);
    assert_eq!(plan.discretionary_allocated().cents(), 315_000);
    assert!(plan.weights.is_normalized());
}

#[test]
fn worked_scenario_shares() {
    let (_, plan) = plan_for(&worked_profile());
    assert_eq!(plan.discretionary_total.cents(), 280_000);
    assert_eq!(plan.discretionary_allocated().cents(), 280_000);
    assert_eq!(plan.weight_source, WeightSource::DeclaredFrequencies);

    let total_rate = 84.25;
    let expected = [
        (Category::DiningOut, 15.0),
        (Category::Coffee, 40.0),
        (Category::Entertainment, 3.0),
        (Category::Clothing, 1.0),
        (Category::Transport, 25.0),
        (Category::Travel, 0.25),
    ];
    for (category, rate) in expected {
        let exact_cents = 280_000.0 * rate / total_rate;
        let actual = plan.discretionary_breakdown[&category].cents() as f64;
        assert!(
            (actual - exact_cents).abs() <= 1.0,
            "{}: {} vs {}",
            category,
            actual,
            exact_cents
        );
    }
    assert_eq!(plan.discretionary_breakdown[&Category::DiningOut].cents(), 49_852);
}

#[test]
fn overspend_lowers_remaining_days() {
    let (input, plan) = plan_for(&profile(
        2000.0,
        &[("rent", 1100.0)],
        0.0,
        &[("dining out", SpendingFrequency::per_month(10.0))],
    ));
    let mut calendar = CalendarBuilder::new()
        .build(UserId::new(), &plan, april(), &input.due_days)
        .unwrap();
    assert_eq!(
        calendar.day(april_day(1)).unwrap().planned_for(Category::DiningOut).cents(),
        3_000
    );

    for day in 1..=10 {
        calendar
            .record_spend(april_day(day), Category::DiningOut, Money::from_cents(4_000))
            .unwrap();
    }
    let before = calendar.clone();

    let redistributor = Redistributor::new(false);
    let spent = redistributor.spent_to_date(&calendar, april_day(11));
    let events = redistributor
        .redistribute(&mut calendar, april_day(11), &spent)
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].new_remaining.cents(), 50_000);
    for day in 11..=30 {
        assert_eq!(
            calendar.day(april_day(day)).unwrap().planned_for(Category::DiningOut).cents(),
            2_500
        );
    }
    for day in 1..=10 {
        assert_eq!(calendar.day(april_day(day)), before.day(april_day(day)));
    }

    // Rent stays anchored to its due day
    assert_eq!(
        calendar.day(april_day(1)).unwrap().planned_for(Category::Rent).cents(),
        110_000
    );
}

#[test]
fn later_redistribution_keeps_earlier_days() {
    let (input, plan) = plan_for(&profile(
        2000.0,
        &[("rent", 1100.0)],
        0.0,
        &[("dining out", SpendingFrequency::per_month(10.0))],
    ));
    let total = plan.discretionary_breakdown[&Category::DiningOut];
    let mut calendar = CalendarBuilder::new()
        .build(UserId::new(), &plan, april(), &input.due_days)
        .unwrap();
    let redistributor = Redistributor::new(false);

    for day in 1..=7 {
        calendar
            .record_spend(april_day(day), Category::DiningOut, Money::from_cents(4_500))
            .unwrap();
    }
    let spent = redistributor.spent_to_date(&calendar, april_day(8));
    redistributor.redistribute(&mut calendar, april_day(8), &spent).unwrap();
    let after_first = calendar.clone();

    for day in 8..=14 {
        calendar
            .record_spend(april_day(day), Category::DiningOut, Money::from_cents(1_000))
            .unwrap();
    }
    let spent = redistributor.spent_to_date(&calendar, april_day(15));
    redistributor.redistribute(&mut calendar, april_day(15), &spent).unwrap();

    let planned_ahead: Money = calendar
        .days
        .iter()
        .filter(|d| d.date >= april_day(15))
        .map(|d| d.planned_for(Category::DiningOut))
        .sum();
    let spent_before = calendar.spent_before(Category::DiningOut, april_day(15));
    assert_eq!(spent_before.cents(), 7 * 4_500 + 7 * 1_000);
    assert_eq!(planned_ahead + spent_before, total);

    for day in 8..=14 {
        assert_eq!(
            calendar.day(april_day(day)).unwrap().planned_for(Category::DiningOut),
            after_first.day(april_day(day)).unwrap().planned_for(Category::DiningOut)
        );
    }
}

#[test]
fn redistribution_preserves_monthly_total() {
    let (input, plan) = plan_for(&worked_profile());
    let mut calendar = CalendarBuilder::new()
        .build(UserId::new(), &plan, april(), &input.due_days)
        .unwrap();

    let spends: BTreeMap<u32, i64> = [(2, 1_999), (3, 250), (9, 7_313), (14, 12)].into_iter().collect();
    for (day, cents) in &spends {
        calendar
            .record_spend(april_day(*day), Category::Coffee, Money::from_cents(*cents))
            .unwrap();
    }

    let redistributor = Redistributor::new(false);
    let today = april_day(15);
    let spent = redistributor.spent_to_date(&calendar, today);
    redistributor.redistribute(&mut calendar, today, &spent).unwrap();

    let remaining: Money = calendar
        .days
        .iter()
        .filter(|d| d.date >= today)
        .map(|d| d.planned_for(Category::Coffee))
        .sum();
    assert_eq!(
        remaining + spent[&Category::Coffee],
        plan.discretionary_breakdown[&Category::Coffee]
    );
}
