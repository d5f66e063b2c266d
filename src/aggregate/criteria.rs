use chrono::NaiveDate;

use crate::models::Transaction;
use crate::types::Amount;

/// Multi-field match conditions for [`filter_by_criteria`].
///
/// All four predicates are ANDed together. The merchant comparison is exact
/// equality ignoring case, not a substring match; both date bounds and the
/// minimum amount are inclusive.
#[derive(Debug, Clone)]
pub struct TransactionCriteria {
    pub merchant: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub min_amount: Amount
}

impl TransactionCriteria {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.merchant.eq_ignore_ascii_case(&self.merchant)
            && transaction.date >= self.start_date
            && transaction.date <= self.end_date
            && transaction.amount >= self.min_amount
    }
}

/// Returns the transactions matching every criterion, preserving input order.
pub fn filter_by_criteria(transactions: &[Transaction], criteria: &TransactionCriteria) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| criteria.matches(transaction))
        .cloned()
        .collect()
}
