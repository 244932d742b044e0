use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Neg, Sub, SubAssign},
    str::FromStr,
};

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::op;

/// Number of decimal places kept in the canonical representation of an amount.
pub const AMOUNT_SCALE: u32 = 2;

/// The largest magnitude, in whole units, that parsing or deserializing will accept.
///
/// At this bound every amount fits in `i64` minor units, and summing amounts cannot overflow the underlying decimal
/// until there are more than 7.9e13 maximal entries in one list.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

//--------------------------------------       Amount        ---------------------------------------------------------
/// A signed monetary amount.
///
/// Amounts are always held in canonical form: rounded half away from zero to two decimal places. They travel as
/// strings on the wire and in the data file (`"-30.00"`), but numeric JSON values are accepted on input. Values with a
/// magnitude above [`MAX_AMOUNT_UNITS`] are rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

op!(binary Amount, Add, add);
op!(binary Amount, Sub, sub);
op!(inplace Amount, SubAssign, sub_assign);
op!(unary Amount, Neg, neg);

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value cannot be represented as an amount: {0}")]
pub struct AmountConversionError(String);

impl Amount {
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    fn new(value: Decimal) -> Self {
        Self(canonical(value))
    }

    /// Canonicalizes `value`, rejecting it if its magnitude exceeds [`MAX_AMOUNT_UNITS`].
    pub fn try_new(value: Decimal) -> Result<Self, AmountConversionError> {
        if value.abs() > Decimal::from(MAX_AMOUNT_UNITS) {
            return Err(AmountConversionError(format!("{value} exceeds the limit of {MAX_AMOUNT_UNITS}")));
        }
        Ok(Self::new(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The amount expressed in minor units (cents), as payment processors expect it.
    pub fn to_minor_units(&self) -> Result<i64, AmountConversionError> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .ok_or_else(|| AmountConversionError(format!("{self} does not fit in minor units")))
    }
}

fn canonical(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(AMOUNT_SCALE);
    rounded
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::new(Decimal::from(value))
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountConversionError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl FromStr for Amount {
    type Err = AmountConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountConversionError("empty string".to_string()));
        }
        Decimal::from_str_exact(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| AmountConversionError(format!("'{trimmed}' ({e})")))
            .and_then(Self::try_new)
    }
}

impl TryFrom<&str> for Amount {
    type Error = AmountConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match AmountRepr::deserialize(deserializer)? {
            AmountRepr::Text(s) => s,
            AmountRepr::Number(n) => n.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}
