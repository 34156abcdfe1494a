use crate::cancel::CancelToken;
use crate::error::{Result, StatementError};
use crate::filter::Selection;
use crate::output::StatementWriter;
use crate::parser::parse_filtered;
use crate::source::Source;
use crate::statement::{Statement, Summary};

/// Generates statements from transaction files opened through a [`Source`].
///
/// Every call owns its own stream and accumulator, so one service can serve
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct StatementService<S> {
    source: S,
}

impl<S: Source> StatementService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Reads `uri` once, keeping only transactions matched by `selection`,
    /// and builds the statement labelled with the selection.
    pub fn generate(
        &self,
        uri: &str,
        selection: &Selection,
        cancel: &CancelToken,
    ) -> Result<Statement> {
        if cancel.is_cancelled() {
            return Err(StatementError::Cancelled);
        }

        let reader = self.source.open(uri)?;
        let transactions = parse_filtered(reader, cancel, |tx| selection.matches(tx))?;
        let summary = Summary::new(transactions);

        Ok(Statement::assemble(selection.label(), &summary))
    }

    /// Generates the statement and hands it to `writer`. Nothing is written
    /// if generation fails or `cancel` fired while it ran.
    pub fn write_statement<W: StatementWriter>(
        &self,
        uri: &str,
        selection: &Selection,
        cancel: &CancelToken,
        writer: &mut W,
    ) -> Result<Statement> {
        let statement = self.generate(uri, selection, cancel)?;
        if cancel.is_cancelled() {
            return Err(StatementError::Cancelled);
        }

        writer.write(&statement)?;
        Ok(statement)
    }
}
