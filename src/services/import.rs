//! CSV import of transaction history
//!
//! Imported rows feed the behavior adjuster. They are stored as history
//! only and do not touch existing calendars; use `spend` for that.
//!
//! Expected columns: date, category, amount, and optionally memo. Header
//! names are detected; without a header the columns are taken in that
//! order.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{Category, Money, Transaction, UserId};
use crate::storage::{Storage, TransactionQuery};

/// Column mapping configuration for CSV import
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub category_column: usize,
    pub amount_column: usize,
    pub memo_column: Option<usize>,
    /// Date format tried first (strftime)
    pub date_format: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            category_column: 1,
            amount_column: 2,
            memo_column: Some(3),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Detect columns from a header row
    ///
    /// Returns `None` when the row looks like data rather than headers.
    pub fn from_headers(headers: &StringRecord) -> Option<Self> {
        if headers.get(0).map(|s| parse_date(s.trim(), "%Y-%m-%d").is_ok()) == Some(true) {
            return None;
        }

        let mut mapping = ColumnMapping {
            memo_column: None,
            ..Default::default()
        };
        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();
            if h.contains("date") {
                mapping.date_column = idx;
            } else if h.contains("category") || h == "type" {
                mapping.category_column = idx;
            } else if h.contains("amount") || h.contains("spent") {
                mapping.amount_column = idx;
            } else if h.contains("memo") || h.contains("note") || h.contains("description") {
                mapping.memo_column = Some(idx);
            }
        }
        Some(mapping)
    }
}

/// A parsed row, before import
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Money,
    pub memo: String,
    /// 1-based line number in the file
    pub line: usize,
}

impl ParsedRow {
    fn duplicate_key(&self) -> (NaiveDate, Category, Money, String) {
        (self.date, self.category, self.amount, self.memo.clone())
    }
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates_skipped: usize,
    /// Error messages by line number
    pub errors: BTreeMap<usize, String>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse CSV text into rows; bad rows are returned as errors by line
    pub fn parse_csv<R: std::io::Read>(
        &self,
        input: R,
    ) -> DayBudgetResult<Vec<Result<ParsedRow, (usize, String)>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut records = reader.records();
        let Some(first) = records.next() else {
            return Ok(Vec::new());
        };
        let first = first.map_err(|e| DayBudgetError::Import(format!("line 1: {}", e)))?;

        let mut results = Vec::new();
        let mapping = match ColumnMapping::from_headers(&first) {
            Some(mapping) => mapping,
            None => {
                let mapping = ColumnMapping::default();
                results.push(parse_record(&first, 1, &mapping));
                mapping
            }
        };

        for (idx, record) in records.enumerate() {
            let line = idx + 2;
            match record {
                Ok(record) => results.push(parse_record(&record, line, &mapping)),
                Err(e) => results.push(Err((line, format!("unreadable row: {}", e)))),
            }
        }
        Ok(results)
    }

    /// Import a CSV file for a user, skipping rows already in history
    pub fn import_file(&self, path: &Path, user_id: UserId) -> DayBudgetResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            DayBudgetError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file, user_id)
    }

    pub fn import_reader<R: std::io::Read>(
        &self,
        input: R,
        user_id: UserId,
    ) -> DayBudgetResult<ImportResult> {
        let rows = self.parse_csv(input)?;

        let mut seen: HashSet<(NaiveDate, Category, Money, String)> = self
            .storage
            .transactions
            .query(&TransactionQuery::for_user(user_id))?
            .into_iter()
            .map(|t| (t.date, t.category, t.amount, t.memo))
            .collect();

        let mut result = ImportResult::default();
        let mut batch = Vec::new();
        for row in rows {
            match row {
                Ok(row) => {
                    if !seen.insert(row.duplicate_key()) {
                        result.duplicates_skipped += 1;
                        continue;
                    }
                    batch.push(
                        Transaction::new(user_id, row.date, row.category, row.amount)
                            .with_memo(row.memo),
                    );
                }
                Err((line, message)) => {
                    warn!(line, %message, "skipping CSV row");
                    result.errors.insert(line, message);
                }
            }
        }

        result.imported = self.storage.transactions.insert_many(batch)?;
        self.storage.transactions.save()?;

        info!(
            imported = result.imported,
            duplicates = result.duplicates_skipped,
            errors = result.errors.len(),
            "imported transaction history"
        );
        Ok(result)
    }
}

fn parse_record(
    record: &StringRecord,
    line: usize,
    mapping: &ColumnMapping,
) -> Result<ParsedRow, (usize, String)> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| (line, format!("missing {}", name)))
    };

    let date = parse_date(field(mapping.date_column, "date")?, &mapping.date_format)
        .map_err(|e| (line, e))?;
    let category_name = field(mapping.category_column, "category")?;
    let category = Category::from_name(category_name);

    let amount_str = field(mapping.amount_column, "amount")?;
    let amount = Money::parse(amount_str).map_err(|e| (line, e.to_string()))?;
    if amount.is_negative() {
        return Err((line, format!("amount must not be negative: {}", amount_str)));
    }

    let memo = mapping
        .memo_column
        .and_then(|col| record.get(col))
        .unwrap_or_default()
        .to_string();

    Ok(ParsedRow {
        date,
        category,
        amount,
        memo,
        line,
    })
}

fn parse_date(s: &str, primary_format: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, primary_format) {
        return Ok(date);
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }
    Err(format!("could not parse date: '{}'", s))
}
