use crate::types::{Amount, YearMonth};

/// Aggregated figures for all transactions that fall in one calendar month.
///
/// Unlike the category totals, the monthly figures include non-positive
/// amounts: a month of refunds reports a negative total and average.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MonthlyStatistics {
    pub month: YearMonth,
    pub transaction_count: u64,
    /// Exact sum of every amount in the month.
    pub total_amount: Amount,
    /// Total divided by count, rounded half-up to two decimal places.
    /// Zero when the bucket is empty.
    pub average_amount: Amount,
    /// Largest single amount in the month; zero when the bucket is empty.
    pub largest_transaction_amount: Amount
}
