use chrono::NaiveDate;
use getset::Getters;
use rust_decimal::Decimal;

/// Rows in the order they appear in the source sheet.
pub type TransactionTable = Vec<Transaction>;

#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct Transaction {
    /// Posting date.
    date: NaiveDate,
    name: String,
    /// Negative for debits, positive for credits.
    amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, name: impl Into<String>, amount: Decimal) -> Transaction {
        Transaction {
            date,
            name: name.into(),
            amount,
        }
    }
}
