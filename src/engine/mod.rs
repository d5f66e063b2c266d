mod pipeline;

pub use pipeline::{Report, ReportEngine};
