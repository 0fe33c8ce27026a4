//! Spending service
//!
//! Records spend against the month's calendar and keeps the plan in step
//! with it: in `on_transaction` mode the spend's category is redistributed
//! right away, in `batch` mode only when [`SpendingService::redistribute`]
//! is called.
//!
//! Each redistribution holds the `(user, category, month)` lock for its
//! whole read-compute-write cycle.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::config::{RedistributionMode, Settings};
use crate::engine::Redistributor;
use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{
    Category, CategoryKind, Money, MonthPeriod, RedistributionEvent, Transaction, UserId,
};
use crate::storage::Storage;

/// Result of recording a spend
#[derive(Debug, Clone)]
pub struct SpendOutcome {
    pub transaction: Transaction,
    /// False when the month has no calendar yet (history only)
    pub on_calendar: bool,
    /// Set when the spend triggered a redistribution
    pub event: Option<RedistributionEvent>,
}

/// Service for recording spend and redistributing
pub struct SpendingService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    redistributor: Redistributor,
}

impl<'a> SpendingService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            redistributor: Redistributor::new(settings.redistribution.close_today),
        }
    }

    fn user_id(&self) -> UserId {
        self.settings.user_id
    }

    /// Record a spend on `date`, as seen on `today`
    ///
    /// Spend dated after `today` is rejected.
    pub fn record_spend(
        &self,
        category: Category,
        amount: Money,
        date: NaiveDate,
        today: NaiveDate,
        memo: Option<String>,
    ) -> DayBudgetResult<SpendOutcome> {
        if date > today {
            return Err(DayBudgetError::Validation(format!(
                "cannot record spend for {} before it happens (today is {})",
                date, today
            )));
        }

        let mut transaction = Transaction::new(self.user_id(), date, category, amount);
        if let Some(memo) = memo {
            transaction = transaction.with_memo(memo);
        }
        transaction.validate().map_err(DayBudgetError::Validation)?;

        let period = MonthPeriod::containing(date)?;
        let key = (self.user_id(), category, period);

        let (on_calendar, event) = self.storage.locks.with_lock(key, || {
            self.storage.transactions.insert(transaction.clone())?;

            let on_calendar = match self.storage.calendars.update(self.user_id(), period, |cal| {
                cal.record_spend(date, category, amount)
            }) {
                Ok(()) => true,
                Err(e) if e.is_not_found() => {
                    warn!(%period, "no calendar for this month, spend kept as history only");
                    false
                }
                Err(e) => return Err(e),
            };

            let event = if on_calendar
                && self.settings.redistribution.mode == RedistributionMode::OnTransaction
                && period.contains(today)
            {
                self.redistribute_locked(category, period, today)?
            } else {
                None
            };
            Ok((on_calendar, event))
        })?;

        self.storage.transactions.save()?;
        self.storage.calendars.save()?;
        self.storage.log_create(
            EntityType::Transaction,
            transaction.id.to_string(),
            Some(category.to_string()),
            &transaction,
        )?;
        if let Some(event) = &event {
            self.record_events(std::slice::from_ref(event))?;
        }

        info!(%category, %amount, %date, on_calendar, "recorded spend");
        Ok(SpendOutcome {
            transaction,
            on_calendar,
            event,
        })
    }

    /// Redistribute every discretionary category of a month
    pub fn redistribute(
        &self,
        period: MonthPeriod,
        today: NaiveDate,
    ) -> DayBudgetResult<Vec<RedistributionEvent>> {
        let calendar = self.storage.calendars.get_required(self.user_id(), period)?;
        if !period.contains(today) {
            return Err(DayBudgetError::OutOfRangeRedistribution {
                date: today,
                period: period.to_string(),
            });
        }

        let categories: Vec<Category> = calendar
            .categories()
            .filter(|c| calendar.kind_of(*c) == Some(CategoryKind::Discretionary))
            .collect();

        let mut events = Vec::new();
        for category in categories {
            let key = (self.user_id(), category, period);
            let event = self
                .storage
                .locks
                .with_lock(key, || self.redistribute_locked(category, period, today))?;
            events.extend(event);
        }

        self.storage.calendars.save()?;
        self.record_events(&events)?;
        info!(%period, events = events.len(), "redistributed month");
        Ok(events)
    }

    /// Redistribute one category; the caller holds its lock
    fn redistribute_locked(
        &self,
        category: Category,
        period: MonthPeriod,
        today: NaiveDate,
    ) -> DayBudgetResult<Option<RedistributionEvent>> {
        let redistributor = self.redistributor;
        self.storage
            .calendars
            .update(self.user_id(), period, |cal| {
                let spent = redistributor.spent_on(cal, category, today);
                redistributor.redistribute_category(cal, category, today, spent)
            })
    }

    fn record_events(&self, events: &[RedistributionEvent]) -> DayBudgetResult<()> {
        if events.is_empty() {
            return Ok(());
        }
        self.storage.events.append(events)?;

        let entries: Vec<AuditEntry> = events
            .iter()
            .map(|event| {
                debug!(summary = %event.summary(), "redistribution event");
                AuditEntry::summary(
                    Operation::Update,
                    EntityType::Calendar,
                    format!("{}:{}", event.user_id, event.period),
                    event.summary(),
                )
            })
            .collect();
        self.storage.audit().log_batch(&entries)
    }

    /// Redistribution events recorded for a month
    pub fn events(&self, period: MonthPeriod) -> DayBudgetResult<Vec<RedistributionEvent>> {
        self.storage.events.for_period(self.user_id(), period)
    }
}
