//! Spending transactions
//!
//! Transactions feed two consumers: spend recording on the calendar and the
//! behavior adjuster's view of historical habits.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Money, TransactionId, UserId};

/// A categorized spend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub category: Category,

    /// Amount spent (positive = money out)
    pub amount: Money,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(user_id: UserId, date: NaiveDate, category: Category, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            date,
            category,
            amount,
            memo: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Check the amount is a non-negative spend
    pub fn validate(&self) -> Result<(), String> {
        if self.amount.is_negative() {
            return Err(format!(
                "transaction amount must not be negative (got {})",
                self.amount
            ));
        }
        Ok(())
    }
}
