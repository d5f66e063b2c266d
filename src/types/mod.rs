mod amount;
mod errors;
mod month;

pub use amount::Amount;
pub use month::YearMonth;
