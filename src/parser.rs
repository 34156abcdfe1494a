//! Streaming parser that filters transactions while reading.
//!
//! Only rows accepted by the predicate are kept, so memory grows with the
//! matching subset rather than with the file.
//!
//! Parsing is fail-fast: the first unreadable or invalid row aborts the whole
//! parse and nothing accumulated so far is returned. A lenient mode that skips
//! bad rows and reports them alongside the result would be a separate option;
//! it is not offered here.

use crate::cancel::CancelToken;
use crate::error::{Result, StatementError};
use crate::transaction::{decode_row, Transaction};

use csv::{ReaderBuilder, StringRecord};
use std::io::Read;

const HEADER: [&str; 3] = ["date", "amount", "content"];
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads `date,amount,content` CSV from `reader` and returns, in file order,
/// every transaction for which `predicate` holds.
///
/// `cancel` is polled before each row is read; once it fires the parse stops
/// with [`StatementError::Cancelled`].
pub fn parse_filtered<R, F>(
    reader: R,
    cancel: &CancelToken,
    predicate: F,
) -> Result<Vec<Transaction>>
where
    R: Read,
    F: Fn(&Transaction) -> bool,
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = StringRecord::new();

    if cancel.is_cancelled() {
        return Err(StatementError::Cancelled);
    }
    let has_header = rdr
        .read_record(&mut record)
        .map_err(|source| StatementError::Read { row: 1, source })?;
    if !has_header {
        return Err(StatementError::InvalidHeader("file is empty".to_string()));
    }
    validate_header(&record)?;

    let mut transactions = Vec::new();
    let mut row_index = 2;

    loop {
        if cancel.is_cancelled() {
            return Err(StatementError::Cancelled);
        }

        let has_row = rdr
            .read_record(&mut record)
            .map_err(|source| StatementError::Read {
                row: row_index,
                source,
            })?;
        if !has_row {
            break;
        }

        let tx = decode_row(&record, row_index)?;
        if predicate(&tx) {
            transactions.push(tx);
        }

        row_index += 1;
    }

    Ok(transactions)
}

fn validate_header(header: &StringRecord) -> Result<()> {
    let fields: Vec<&str> = header
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let field = if i == 0 {
                field.trim_start_matches(BYTE_ORDER_MARK)
            } else {
                field
            };
            field.trim()
        })
        .collect();

    let matches = fields.len() == HEADER.len()
        && fields
            .iter()
            .zip(HEADER)
            .all(|(field, expected)| field.eq_ignore_ascii_case(expected));

    if !matches {
        return Err(StatementError::InvalidHeader(format!(
            "expected {}, got {}",
            HEADER.join(","),
            fields.join(",")
        )));
    }

    Ok(())
}
