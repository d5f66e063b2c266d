mod category;
mod criteria;
mod dedup;
mod monthly;

pub(crate) use category::partition_ranges;

pub use category::{totals_by_category, totals_by_category_partitioned};
pub use criteria::{filter_by_criteria, TransactionCriteria};
pub use dedup::{filter_unique, SeenIds};
pub use monthly::{monthly_statistics, monthly_statistics_partitioned};
