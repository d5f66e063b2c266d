use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::error;

use crate::aggregate::partition_ranges;
use crate::models::{MonthlyStatistics, Transaction};
use crate::types::{Amount, YearMonth};

/// Running figures for one month bucket, filled in a single pass.
#[derive(Debug, Clone, Default)]
struct MonthAccumulator {
    count: u64,
    total: Amount,
    largest: Option<Amount>
}

impl MonthAccumulator {
    fn observe(&mut self, transaction: &Transaction) {
        self.count += 1;
        self.total += transaction.amount;

        // Strictly-greater comparison keeps the first maximum seen on ties.
        if self.largest.is_none_or(|largest| transaction.amount > largest) {
            self.largest = Some(transaction.amount);
        }
    }

    /// Merges a later partial into this one. The left side wins ties on the
    /// maximum so partition boundaries never change the reported value.
    fn combine(&mut self, right: MonthAccumulator) {
        self.count += right.count;
        self.total += right.total;

        if let Some(candidate) = right.largest {
            if self.largest.is_none_or(|largest| candidate > largest) {
                self.largest = Some(candidate);
            }
        }
    }

    fn finish(self, month: YearMonth) -> MonthlyStatistics {
        MonthlyStatistics {
            month,
            transaction_count: self.count,
            total_amount: self.total,
            average_amount: self.total.average_over(self.count),
            largest_transaction_amount: self.largest.unwrap_or_else(Amount::zero)
        }
    }
}

/// Buckets transactions by calendar month and computes count, exact total,
/// half-up-rounded average and the largest amount per bucket.
///
/// Every amount participates here, including zero and negative ones; the
/// positive-amount filter applies to category totals only. Output is sorted
/// by (year, month) ascending, one entry per distinct month in the input.
pub fn monthly_statistics(transactions: &[Transaction]) -> Vec<MonthlyStatistics> {
    finish_buckets(accumulate(transactions))
}

/// Scatter/merge variant of [`monthly_statistics`] for large inputs.
pub async fn monthly_statistics_partitioned(transactions: Arc<Vec<Transaction>>, partitions: usize) -> Vec<MonthlyStatistics> {
    let handles: Vec<JoinHandle<BTreeMap<YearMonth, MonthAccumulator>>> = partition_ranges(transactions.len(), partitions)
        .into_iter()
        .map(|range| {
            let transactions = transactions.clone();
            tokio::spawn(async move { accumulate(&transactions[range]) })
        })
        .collect();

    let mut buckets = BTreeMap::<YearMonth, MonthAccumulator>::new();

    //NOTE: Partials are merged in partition order, left to right, so the
    //      earliest occurrence keeps ties exactly as the sequential pass does.
    for handle in handles {
        match handle.await {
            Ok(partial) => {
                for (month, accumulator) in partial {
                    buckets.entry(month).or_default().combine(accumulator);
                }
            }
            Err(error) => error!("Monthly statistics partition worker failed: {error}")
        }
    }

    finish_buckets(buckets)
}

fn accumulate(transactions: &[Transaction]) -> BTreeMap<YearMonth, MonthAccumulator> {
    let mut buckets = BTreeMap::<YearMonth, MonthAccumulator>::new();

    for transaction in transactions {
        buckets
            .entry(YearMonth::from_date(transaction.date))
            .or_default()
            .observe(transaction);
    }

    buckets
}

fn finish_buckets(buckets: BTreeMap<YearMonth, MonthAccumulator>) -> Vec<MonthlyStatistics> {
    buckets
        .into_iter()
        .map(|(month, accumulator)| accumulator.finish(month))
        .collect()
}
