use crate::error::{RecordError, Result, StatementError};

use csv::StringRecord;
use serde::Serialize;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

/// Layout of every date in the input file and in the generated statement.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]/[month]/[day]");

const EXPECTED_COLUMNS: usize = 3;

/// A single decoded entry of the transaction file.
///
/// `amount` is in the smallest currency unit: positive is income, negative is
/// expenditure and zero is neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: Date,
    amount: i64,
    description: String,
}

impl Transaction {
    /// Fails with [`RecordError::EmptyDescription`] if `description` is blank.
    pub fn new(
        date: Date,
        amount: i64,
        description: impl Into<String>,
    ) -> std::result::Result<Self, RecordError> {
        let description = description.into();
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(RecordError::EmptyDescription);
        }

        Ok(Self {
            date,
            amount,
            description: trimmed.to_string(),
        })
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0
    }
}

/// How a [`Transaction`] appears in the statement document.
///
/// The amount is kept as text so consumers never coerce it to a float.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    pub date: String,
    pub amount: String,
    pub content: String,
}

impl From<&Transaction> for TransactionView {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: format_date(tx.date),
            amount: tx.amount.to_string(),
            content: tx.description.clone(),
        }
    }
}

/// Parses `YYYY/MM/DD`, rejecting anything that deviates from the layout.
///
/// `time` accepts a sign in front of `[year]`, so a leading `+` or `-` is
/// rejected here.
pub fn parse_date(text: &str) -> std::result::Result<Date, RecordError> {
    let invalid = |source| RecordError::InvalidDate {
        value: text.to_string(),
        source,
    };

    if text.starts_with(['+', '-']) {
        return Err(invalid(None));
    }

    Date::parse(text, DATE_FORMAT).map_err(|err| invalid(Some(err)))
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Decodes one data row (`date,amount,content`) into a [`Transaction`].
///
/// `row_index` is the 1-based position of the row in the file and is attached
/// to every error.
pub fn decode_row(row: &StringRecord, row_index: usize) -> Result<Transaction> {
    decode_fields(row).map_err(|source| StatementError::Row {
        row: row_index,
        source,
    })
}

fn decode_fields(row: &StringRecord) -> std::result::Result<Transaction, RecordError> {
    if row.len() != EXPECTED_COLUMNS {
        return Err(RecordError::MalformedRow {
            expected: EXPECTED_COLUMNS,
            actual: row.len(),
        });
    }

    let date_text = required_field(row, 0, "date")?;
    let amount_text = required_field(row, 1, "amount")?;
    let content = required_field(row, 2, "content")?;

    let date = parse_date(date_text)?;

    let amount = amount_text
        .parse::<i64>()
        .map_err(|source| RecordError::InvalidAmount {
            value: amount_text.to_string(),
            source,
        })?;

    Transaction::new(date, amount, content)
}

fn required_field<'a>(
    row: &'a StringRecord,
    index: usize,
    field: &'static str,
) -> std::result::Result<&'a str, RecordError> {
    match row.get(index).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RecordError::EmptyField { field }),
    }
}
