use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::error;

use crate::models::Transaction;
use crate::types::Amount;

/// Sums the amounts of strictly positive transactions per category.
///
/// Non-positive amounts (refunds, reversals, zero rows) do not contribute.
/// Empty input yields an empty map, never an error.
pub fn totals_by_category(transactions: &[Transaction]) -> HashMap<String, Amount> {
    let mut totals = HashMap::new();

    for transaction in transactions {
        if !transaction.amount.is_positive() {
            continue;
        }

        *totals.entry(transaction.category.clone()).or_insert_with(Amount::zero) += transaction.amount;
    }

    totals
}

/// Scatter/merge variant of [`totals_by_category`] for large inputs.
///
/// The input is split into contiguous partitions, each folded on its own task,
/// and the partial maps are combined by exact addition. Decimal addition is
/// associative and commutative, so any partitioning produces the same totals
/// as the sequential fold.
pub async fn totals_by_category_partitioned(transactions: Arc<Vec<Transaction>>, partitions: usize) -> HashMap<String, Amount> {
    let handles: Vec<JoinHandle<HashMap<String, Amount>>> = partition_ranges(transactions.len(), partitions)
        .into_iter()
        .map(|range| {
            let transactions = transactions.clone();
            tokio::spawn(async move { totals_by_category(&transactions[range]) })
        })
        .collect();

    let mut totals = HashMap::new();

    for handle in handles {
        match handle.await {
            Ok(partial) => combine_totals(&mut totals, partial),
            Err(error) => error!("Category totals partition worker failed: {error}")
        }
    }

    totals
}

fn combine_totals(totals: &mut HashMap<String, Amount>, partial: HashMap<String, Amount>) {
    for (category, amount) in partial {
        *totals.entry(category).or_insert_with(Amount::zero) += amount;
    }
}

/// Splits `len` items into at most `partitions` contiguous index ranges.
pub(crate) fn partition_ranges(len: usize, partitions: usize) -> Vec<Range<usize>> {
    let chunk = len.div_ceil(partitions.max(1)).max(1);

    (0..len)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(len))
        .collect()
}
