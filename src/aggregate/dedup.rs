use dashmap::DashSet;

use crate::models::Transaction;

/// Concurrent set of transaction identifiers with atomic check-and-insert.
///
/// A given identifier is admitted exactly once even when raced from multiple
/// tasks, while distinct identifiers proceed in parallel. A fresh set is
/// constructed per call or per ingestion run; no state outlives its owner.
pub struct SeenIds {
    ids: DashSet<String>
}

impl SeenIds {
    pub fn new() -> Self {
        Self {
            ids: DashSet::new()
        }
    }

    /// Returns true exactly once per identifier, on its first sighting.
    pub fn admit(&self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }
}

/// Drops every transaction whose id was already seen earlier in the sequence,
/// keeping the first occurrence in input order.
pub fn filter_unique(transactions: &[Transaction]) -> Vec<Transaction> {
    let seen = SeenIds::new();

    transactions
        .iter()
        .filter(|transaction| seen.admit(&transaction.id))
        .cloned()
        .collect()
}
