use crate::transaction::Transaction;

/// Income and expenditure of a set of transactions.
///
/// Zero amounts contribute to neither total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: i64,
    pub expenditure: i64,
}

impl Totals {
    pub fn of(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut totals, tx| {
            if tx.is_income() {
                totals.income = totals.income.saturating_add(tx.amount());
            } else if tx.is_expense() {
                totals.expenditure = totals.expenditure.saturating_add(tx.amount());
            }
            totals
        })
    }

    pub fn net(&self) -> i64 {
        self.income.saturating_add(self.expenditure)
    }
}

/// Orders transactions newest first. Transactions on the same day keep their
/// relative order.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date().cmp(&a.date()));
}

/// Filtered transactions, sorted and totalled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub totals: Totals,
    pub transactions: Vec<Transaction>,
}

impl Summary {
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        sort_newest_first(&mut transactions);
        let totals = Totals::of(&transactions);

        Self {
            totals,
            transactions,
        }
    }
}
