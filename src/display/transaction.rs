//! Transaction history display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: Money,
    #[tabled(rename = "Memo")]
    memo: String,
}

/// Format transactions as a table, most recent `limit` rows
pub fn format_transaction_list(
    transactions: &[Transaction],
    limit: usize,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let skip = transactions.len().saturating_sub(limit);
    let rows: Vec<TransactionRow> = transactions
        .iter()
        .skip(skip)
        .map(|t| TransactionRow {
            date: t.date.format(date_format).to_string(),
            category: t.category.label().to_string(),
            amount: t.amount,
            memo: t.memo.clone(),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    if skip > 0 {
        output.push_str(&format!("({} older transactions not shown)\n", skip));
    }
    output
}
