use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::Amount;

/// Represents a single row from the input CSV file.
///
/// The record is immutable for the pipeline's purposes: the aggregation
/// operations read it, clone it into their outputs, and never retain it
/// beyond the call.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Opaque unique identifier, used only as the deduplication key.
    pub id: String,
    /// Calendar date with no time component (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Exact decimal amount; may be zero or negative for refunds and reversals.
    pub amount: Amount,
    /// Free-text merchant label, compared case-insensitively.
    pub merchant: String,
    /// Free-text category label, used as a grouping key.
    pub category: String
}
