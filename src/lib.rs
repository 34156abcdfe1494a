pub mod cancel;
pub mod error;
pub mod filter;
pub mod output;
pub mod parser;
pub mod service;
pub mod source;
pub mod statement;
pub mod transaction;

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::filter::Selection;
use crate::service::StatementService;
use crate::source::FileSource;
use crate::statement::Statement;

/// Builds the statement for `selection` from a local CSV file or `file://` URI.
pub fn generate_statement(
    path: &str,
    selection: &Selection,
    cancel: &CancelToken,
) -> Result<Statement> {
    StatementService::new(FileSource).generate(path, selection, cancel)
}
