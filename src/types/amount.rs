use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A strictly positive decimal amount as accepted from user input.
///
/// Every amount entering the ledger through a form or an imported row passes
/// through this type, so zero, negative and non-numeric values never reach
/// the aggregator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PositiveAmount(Decimal);

impl PositiveAmount {
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }

        Ok(PositiveAmount(value))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for PositiveAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        PositiveAmount::new(value)
    }
}

impl From<PositiveAmount> for Decimal {
    fn from(amount: PositiveAmount) -> Self {
        amount.0
    }
}

impl Display for PositiveAmount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for PositiveAmount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AmountError::InvalidFormat("Value is an empty string".to_string()));
        }

        let parsed = Decimal::from_str(value).map_err(|error| {
            AmountError::InvalidFormat(format!("Value '{value}' is not numeric: {error}"))
        })?;

        PositiveAmount::new(parsed)
    }
}

impl<'de> Deserialize<'de> for PositiveAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        PositiveAmount::from_str(&value).map_err(de::Error::custom)
    }
}
