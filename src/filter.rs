use crate::error::{Result, StatementError};
use crate::transaction::{format_date, Transaction};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use time::{Date, Month};

/// A calendar month, used both as a filter and as the statement label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: i32,
    month: Month,
}

impl Period {
    pub fn new(year: i32, month: u8) -> Result<Self> {
        let month = Month::try_from(month).map_err(|_| {
            StatementError::InvalidPeriod(format!(
                "month must be between 01 and 12, got {month:02}"
            ))
        })?;

        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Parses the `YYYYMM` form, e.g. `202501`.
impl FromStr for Period {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StatementError::InvalidPeriod(format!(
                "period must be in YYYYMM format, got {s:?}"
            )));
        }

        let invalid =
            |_: ParseIntError| StatementError::InvalidPeriod(format!("could not parse {s:?}"));
        let year = s[..4].parse::<i32>().map_err(invalid)?;
        let month = s[4..].parse::<u8>().map_err(invalid)?;

        Period::new(year, month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, u8::from(self.month))
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// A range whose `start` is after its `end` is valid and matches nothing.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Like [`DateRange::new`] but rejects `start > end`.
    pub fn checked(start: Date, end: Date) -> Result<Self> {
        if start > end {
            return Err(StatementError::InvalidDateRange {
                start: format_date(start),
                end: format_date(end),
            });
        }

        Ok(Self::new(start, end))
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_date(self.start), format_date(self.end))
    }
}

pub fn by_period(period: Period) -> impl Fn(&Transaction) -> bool + Copy {
    move |tx: &Transaction| period.contains(tx.date())
}

pub fn by_date_range(range: DateRange) -> impl Fn(&Transaction) -> bool + Copy {
    move |tx: &Transaction| range.contains(tx.date())
}

/// Which transactions a statement covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Period(Period),
    Range(DateRange),
    All,
}

impl Selection {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            Selection::Period(period) => by_period(*period)(tx),
            Selection::Range(range) => by_date_range(*range)(tx),
            Selection::All => true,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Selection::Period(period) => period.to_string(),
            Selection::Range(range) => range.to_string(),
            Selection::All => "all".to_string(),
        }
    }
}

impl From<Period> for Selection {
    fn from(period: Period) -> Self {
        Selection::Period(period)
    }
}

impl From<DateRange> for Selection {
    fn from(range: DateRange) -> Self {
        Selection::Range(range)
    }
}
