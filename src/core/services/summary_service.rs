use crate::domain::{Transaction, TransactionKind};

/// Totals derived from the ledger. `expense` is a positive magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub balance: f64,
    pub income: f64,
    pub expense: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Recomputes the totals from scratch.
    pub fn summarize(transactions: &[Transaction]) -> Summary {
        let (income, expense) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    TransactionKind::Income => (income + txn.amount, expense),
                    TransactionKind::Expense => (income, expense + txn.amount),
                });
        Summary {
            balance: income - expense,
            income,
            expense,
        }
    }
}
