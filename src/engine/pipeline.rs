use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread::available_parallelism;

use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error};

use crate::aggregate::{monthly_statistics, monthly_statistics_partitioned, totals_by_category, totals_by_category_partitioned, SeenIds};
use crate::models::{MonthlyStatistics, Transaction};
use crate::types::Amount;

/// Aggregated output of one pipeline run over a transaction CSV.
pub struct Report {
    /// Deduplicated transactions, first occurrence per id, in input order.
    pub transactions: Vec<Transaction>,
    pub category_totals: HashMap<String, Amount>,
    pub monthly: Vec<MonthlyStatistics>
}

/// Streaming aggregation engine for transaction CSV files.
pub struct ReportEngine {
    backpressure: usize,
    partitions: usize,
    parallel_threshold: usize
}

impl ReportEngine {
    /// Creates an engine with defaults sized to the host's parallelism.
    pub fn new() -> Self {
        Self {
            backpressure: 256,
            partitions: available_parallelism().map(NonZeroUsize::get).unwrap_or(4),
            parallel_threshold: 10_000
        }
    }

    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions.max(1);
        self
    }

    /// Inputs at or above this many unique transactions take the scatter/merge
    /// aggregation paths; smaller inputs are folded sequentially.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Orchestrates the end-to-end aggregation pipeline for a CSV file.
    pub async fn run(&self, path: &str) -> anyhow::Result<Report> {
        let (sender, receiver) = mpsc::channel::<Transaction>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_string(), sender);
        let transactions = Self::collect_unique(receiver).await;

        if let Err(error) = csv_handle.await {
            error!("CSV ingestion failed: {error}");
        }

        Ok(self.build_report(transactions).await)
    }

    fn spawn_csv_reader(&self, path: String, sender: mpsc::Sender<Transaction>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening CSV at path: {path} | {error}");
                    return;
                }
            };

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            for result in reader.deserialize::<Transaction>() {
                match result {
                    Ok(transaction) => {
                        if sender.blocking_send(transaction).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        error!("CSV deserialization error: {error}");
                    }
                }
            }
        })
    }

    /// Drains the channel, admitting each id through a fresh concurrent set so
    /// duplicates are dropped at ingestion. The set is shared-safe; additional
    /// producers could admit against the same instance without re-admissions.
    async fn collect_unique(mut receiver: mpsc::Receiver<Transaction>) -> Vec<Transaction> {
        let seen = SeenIds::new();
        let mut transactions = Vec::new();

        while let Some(transaction) = receiver.recv().await {
            if seen.admit(&transaction.id) {
                transactions.push(transaction);
            } else {
                debug!("Dropped duplicate transaction [{}]", transaction.id);
            }
        }

        transactions
    }

    async fn build_report(&self, transactions: Vec<Transaction>) -> Report {
        if transactions.len() < self.parallel_threshold {
            let category_totals = totals_by_category(&transactions);
            let monthly = monthly_statistics(&transactions);

            return Report {
                transactions,
                category_totals,
                monthly
            };
        }

        let shared = Arc::new(transactions);
        let category_totals = totals_by_category_partitioned(shared.clone(), self.partitions).await;
        let monthly = monthly_statistics_partitioned(shared.clone(), self.partitions).await;

        //NOTE: All partition workers have finished by now, so the Arc is back
        //      to a single owner and unwraps without cloning.
        let transactions = Arc::try_unwrap(shared).unwrap_or_else(|shared| shared.as_ref().clone());

        Report {
            transactions,
            category_totals,
            monthly
        }
    }
}
