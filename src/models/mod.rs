mod statistics;
mod transaction;

pub use statistics::MonthlyStatistics;
pub use transaction::Transaction;
