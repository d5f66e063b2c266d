use crate::types::errors::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::str::FromStr;
use tracing::error;

const DECIMAL_PLACES: u32 = 2;

/// An exact currency value carried at two decimal places.
///
/// Backed by `rust_decimal` so that sums stay exact no matter how the input is
/// partitioned; binary floating-point never enters the pipeline.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn zero() -> Self {
        Amount(Decimal::ZERO)
    }

    /// True only for strictly positive values; zero does not count.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Amount) -> Result<Amount, AmountError> {
        self.0.checked_add(rhs.0).map(Amount).ok_or(AmountError::Overflow)
    }

    /// Divides a running total by a transaction count, rounding half-up to two
    /// decimal places. A zero count yields zero rather than an error.
    pub fn average_over(self, count: u64) -> Amount {
        if count == 0 {
            return Amount::zero();
        }

        match self.0.checked_div(Decimal::from(count)) {
            Some(quotient) => Amount(quotient.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)),
            None => Amount::zero()
        }
    }
}

impl AddAssign<Amount> for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        match self.checked_add(rhs) {
            Ok(sum) => *self = sum,
            Err(error) => error!("Amount AddAssign error: {error}")
        }
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(DECIMAL_PLACES);
        write!(formatter, "{value}")
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AmountError::InvalidFormat("Value is an empty string".to_string()));
        }

        let decimal = Decimal::from_str(value).map_err(|error| {
            AmountError::InvalidFormat(format!("Value is not a decimal: {error}"))
        })?;

        if decimal.scale() > DECIMAL_PLACES {
            return Err(AmountError::TooManyDecimalPlaces(decimal.scale()));
        }

        Ok(Amount(decimal))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Amount::from_str(&value).map_err(de::Error::custom)
    }
}
