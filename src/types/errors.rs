use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(String),
    #[error("Amount error: Value has {0} decimal places, limit is 2")]
    TooManyDecimalPlaces(u32),
    #[error("Amount error: Overflow")]
    Overflow
}
