use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: RecordError,
    },

    #[error("could not read row {row}: {source}")]
    Read {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("could not open {uri}: {source}")]
    Open {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write statement: {0}")]
    Write(#[from] std::io::Error),

    #[error("could not encode statement: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("operation cancelled")]
    Cancelled,
}

/// Reasons a single data row cannot become a [`crate::transaction::Transaction`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("expected {expected} columns, got {actual}")]
    MalformedRow { expected: usize, actual: usize },

    #[error("empty {field} field")]
    EmptyField { field: &'static str },

    #[error("invalid date {value:?}, expected YYYY/MM/DD")]
    InvalidDate {
        value: String,
        #[source]
        source: Option<time::error::Parse>,
    },

    #[error("invalid amount {value:?}: {source}")]
    InvalidAmount {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("description cannot be empty")]
    EmptyDescription,
}

/// Coarse classification of failures, independent of which stage raised them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Malformed,
    Parse,
    Io,
    Cancelled,
}

impl StatementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatementError::InvalidPeriod(_) | StatementError::InvalidDateRange { .. } => {
                ErrorKind::Validation
            }
            StatementError::InvalidHeader(_) => ErrorKind::Malformed,
            StatementError::Row { source, .. } => source.kind(),
            StatementError::Read { .. } => ErrorKind::Parse,
            StatementError::Open { .. }
            | StatementError::Write(_)
            | StatementError::Encode(_) => ErrorKind::Io,
            StatementError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::MalformedRow { .. }
            | RecordError::EmptyField { .. }
            | RecordError::EmptyDescription => ErrorKind::Malformed,
            RecordError::InvalidDate { .. } | RecordError::InvalidAmount { .. } => {
                ErrorKind::Parse
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StatementError>;
