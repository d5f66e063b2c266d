use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Calendar grouping key for the monthly statistics buckets.
///
/// Field order gives the derived `Ord` chronological meaning, so a sorted
/// collection of keys is already in (year, month) ascending order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32
}

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month()
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:04}-{:02}", self.year, self.month)
    }
}
