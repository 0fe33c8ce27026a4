//! Planning service
//!
//! Runs onboarding answers through the engine: classify income, allocate
//! (optionally with behavior-adjusted weights), then build or rebuild the
//! month's calendar. Persists the plan and calendar and audits both.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::audit::{EntityType, Operation};
use crate::config::{RegionProfiles, Settings};
use crate::engine::{
    BehaviorAdjuster, BehaviorReport, CalendarBuilder, CategoryAllocator, IncomeClassifier,
};
use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{
    AllocationInput, CategoryWeightMap, IncomeTier, Money, MonthCalendar, MonthPeriod,
    OnboardingProfile, UserId,
};
use crate::storage::{PlanRecord, Storage, TransactionQuery};

/// Result of planning a month
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub record: PlanRecord,
    pub calendar: MonthCalendar,
    /// Present when behavior adjustment was requested
    pub behavior: Option<BehaviorReport>,
    /// True when an existing calendar was rebuilt rather than created
    pub rebuilt: bool,
}

/// Service for computing and persisting monthly plans
pub struct PlanningService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    classifier: IncomeClassifier,
    allocator: CategoryAllocator,
    builder: CalendarBuilder,
    adjuster: BehaviorAdjuster,
}

impl<'a> PlanningService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, profiles: RegionProfiles) -> Self {
        Self {
            storage,
            settings,
            classifier: IncomeClassifier::new(profiles.clone()),
            allocator: CategoryAllocator::new(profiles),
            builder: CalendarBuilder::new(),
            adjuster: BehaviorAdjuster::new(settings.behavior.clone()),
        }
    }

    fn user_id(&self) -> UserId {
        self.settings.user_id
    }

    fn allocation_input(&self, profile: &OnboardingProfile) -> DayBudgetResult<AllocationInput> {
        let mut input = profile.to_allocation_input()?;
        if input.region.is_none() {
            input.region = self.settings.default_region.clone();
        }
        Ok(input)
    }

    /// Income tier for an onboarding profile
    pub fn classify(&self, profile: &OnboardingProfile) -> DayBudgetResult<IncomeTier> {
        let input = self.allocation_input(profile)?;
        self.classifier.classify(input.income, input.region.as_deref())
    }

    /// Analyze recent history against the weights a profile would get
    pub fn preview_adjustment(
        &self,
        profile: &OnboardingProfile,
        as_of: NaiveDate,
    ) -> DayBudgetResult<BehaviorReport> {
        let input = self.allocation_input(profile)?;
        let tier = self.classifier.classify(input.income, input.region.as_deref())?;
        let base = self.allocator.allocate(&input, tier, None)?;
        self.behavior_report(&base.weights, as_of)
    }

    fn behavior_report(
        &self,
        weights: &CategoryWeightMap,
        as_of: NaiveDate,
    ) -> DayBudgetResult<BehaviorReport> {
        let query = TransactionQuery::for_user(self.user_id())
            .between(self.adjuster.window_start(as_of), as_of);
        let history = self.storage.transactions.query(&query)?;
        Ok(self.adjuster.adjust(&history, weights, as_of))
    }

    /// Compute a plan for `period` and build (or rebuild) its calendar
    pub fn plan_month(
        &self,
        profile: &OnboardingProfile,
        period: MonthPeriod,
        adjust: bool,
        as_of: NaiveDate,
    ) -> DayBudgetResult<PlanOutcome> {
        let input = self.allocation_input(profile)?;
        let tier = self.classifier.classify(input.income, input.region.as_deref())?;

        let mut plan = self.allocator.allocate(&input, tier, None)?;
        let mut behavior = None;
        if adjust {
            let report = self.behavior_report(&plan.weights, as_of)?;
            if !report.is_unchanged() {
                plan = self.allocator.allocate(&input, tier, Some(&report.weights))?;
            }
            behavior = Some(report);
        }

        if plan.over_committed {
            warn!(shortfall = %plan.shortfall(), %period, "plan is over-committed");
        }

        let record = PlanRecord::new(
            self.user_id(),
            period,
            plan,
            input.due_days.clone(),
            input.region.clone(),
        );
        let previous = self.storage.plans.push(record.clone())?;
        match &previous {
            Some(before) => self.storage.log_update(
                EntityType::Plan,
                record.key(),
                Some(tier.to_string()),
                &before.plan,
                &record.plan,
            )?,
            None => self.storage.log_create(
                EntityType::Plan,
                record.key(),
                Some(tier.to_string()),
                &record.plan,
            )?,
        }

        let mut rebuilt = false;
        let calendar = self
            .storage
            .calendars
            .replace_with(self.user_id(), period, |existing| match existing {
                Some(existing) => {
                    rebuilt = true;
                    self.builder.rebuild(existing, &record.plan, &record.due_days)
                }
                None => self
                    .builder
                    .build(self.user_id(), &record.plan, period, &record.due_days),
            })?;

        self.storage.plans.save()?;
        self.storage.calendars.save()?;
        self.storage.log_summary(
            if rebuilt { Operation::Update } else { Operation::Create },
            EntityType::Calendar,
            record.key(),
            format!(
                "{} calendar: {} categories, {} planned",
                if rebuilt { "rebuilt" } else { "built" },
                calendar.kinds.len(),
                calendar.days.iter().map(|d| d.total).sum::<Money>()
            ),
        )?;

        info!(
            %period,
            %tier,
            source = ?record.plan.weight_source,
            rebuilt,
            "planned month"
        );

        Ok(PlanOutcome {
            record,
            calendar,
            behavior,
            rebuilt,
        })
    }

    /// The current plan for a month
    pub fn current_plan(&self, period: MonthPeriod) -> DayBudgetResult<PlanRecord> {
        self.storage
            .plans
            .current(self.user_id(), period)?
            .ok_or_else(|| DayBudgetError::plan_not_found(format!("{}:{}", self.user_id(), period)))
    }

    /// The calendar for a month
    pub fn calendar(&self, period: MonthPeriod) -> DayBudgetResult<MonthCalendar> {
        self.storage.calendars.get_required(self.user_id(), period)
    }
}
