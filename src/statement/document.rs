use crate::statement::summary::Summary;
use crate::transaction::TransactionView;

use serde::Serialize;

/// The generated statement, ready to be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub period: String,
    pub total_income: i64,
    pub total_expenditure: i64,
    pub net_amount: i64,
    pub transaction_count: usize,
    pub transactions: Vec<TransactionView>,
}

impl Statement {
    pub fn assemble(period: impl Into<String>, summary: &Summary) -> Self {
        let transactions: Vec<TransactionView> = summary
            .transactions
            .iter()
            .map(TransactionView::from)
            .collect();

        Self {
            period: period.into(),
            total_income: summary.totals.income,
            total_expenditure: summary.totals.expenditure,
            net_amount: summary.totals.net(),
            transaction_count: transactions.len(),
            transactions,
        }
    }
}
