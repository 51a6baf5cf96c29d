//! Monetary amounts.
//!
//! Amounts are kept in the smallest currency unit (cents) so totals and
//! discounts round exactly once, when they are computed.

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::DomainError;

/// Non-negative amount in cents.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Convert a decimal amount, rounding to the nearest cent.
    pub fn from_decimal(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::invalid_amount(amount.to_string()));
        }
        let cents = (amount * 100.0).round();
        if cents >= u64::MAX as f64 {
            return Err(DomainError::invalid_amount(amount.to_string()));
        }
        Ok(Self(cents as u64))
    }

    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Shortest decimal form with trailing zeros dropped: `9`, `8.5`, `8.55`.
    pub fn to_plain_string(&self) -> String {
        let (whole, cents) = (self.0 / 100, self.0 % 100);
        match cents {
            0 => whole.to_string(),
            c if c % 10 == 0 => format!("{whole}.{}", c / 10),
            c => format!("{whole}.{c:02}"),
        }
    }

    /// Amount after taking `percent` off, rounded half up to the cent.
    pub fn discounted(self, percent: u8) -> Money {
        let keep = 100u128 - u128::from(percent.min(100));
        // Never larger than `self.0`, so the narrowing cast is lossless.
        Money(((u128::from(self.0) * keep + 50) / 100) as u64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| DomainError::invalid_amount(s.to_string()))?;
        Money::from_decimal(amount)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative amount as number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_decimal(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money(v.saturating_mul(100)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        u64::try_from(v)
            .map(|v| Money(v.saturating_mul(100)))
            .map_err(|_| E::custom(format!("negative amount: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Decode an amount from whatever the backend sent, falling back to zero.
pub fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    Ok(optional(deserializer)?.unwrap_or_default())
}

/// Decode an optional amount; `"N/A"`, `null` and garbage all become `None`.
pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().and_then(|f| Money::from_decimal(f).ok()),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    })
}

/// Serialize an optional amount the way the backend spells "unknown".
pub fn serialize_optional<S: Serializer>(
    value: &Option<Money>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(money) => money.serialize(serializer),
        None => serializer.serialize_str("N/A"),
    }
}

/// Serialize as a bare JSON number (request bodies).
pub fn serialize_number<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_decimal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_strings() {
        assert_eq!("12.346".parse::<Money>().unwrap(), Money::from_cents(1235));
        assert_eq!(" $7 ".parse::<Money>().unwrap(), Money::from_cents(700));
        assert!("N/A".parse::<Money>().is_err());
        assert!("-1".parse::<Money>().is_err());
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(123_400).to_string(), "1234.00");
    }

    #[test]
    fn plain_string_drops_trailing_zeros() {
        assert_eq!(Money::from_cents(900).to_plain_string(), "9");
        assert_eq!(Money::from_cents(850).to_plain_string(), "8.5");
        assert_eq!(Money::from_cents(855).to_plain_string(), "8.55");
        assert_eq!(Money::from_cents(5).to_plain_string(), "0.05");
        assert_eq!(Money::from_cents(0).to_plain_string(), "0");
    }

    #[test]
    fn ten_percent_discount_rounds_half_up() {
        assert_eq!(Money::from_cents(1001).discounted(10), Money::from_cents(901));
        assert_eq!(Money::from_cents(1999).discounted(10), Money::from_cents(1799));
    }

    #[test]
    fn discount_on_largest_amount_does_not_overflow() {
        let max = Money::from_cents(u64::MAX);
        assert_eq!(max.discounted(0), max);
        assert_eq!(max.discounted(100), Money::from_cents(0));
        assert!(max.discounted(10) < max);

        let big = Money::from_decimal(3.0e15).unwrap();
        assert_eq!(big.discounted(10), Money::from_cents(270_000_000_000_000_000));
    }

    #[test]
    fn out_of_range_decimal_is_rejected() {
        assert!(Money::from_decimal(1.0e18).is_err());
        assert!(Money::from_decimal(f64::MAX).is_err());
        assert!("1e20".parse::<Money>().is_err());
        assert!(serde_json::from_str::<Money>("1e20").is_err());
    }

    #[test]
    fn json_accepts_number_or_string() {
        let a: Money = serde_json::from_str("19.99").unwrap();
        let b: Money = serde_json::from_str("\"19.99\"").unwrap();
        let c: Money = serde_json::from_str("20").unwrap();
        assert_eq!(a, b);
        assert_eq!(c, Money::from_cents(2000));
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"19.99\"");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn display_then_parse_is_identity(cents in 0u64..=u64::MAX / 100_000) {
                let money = Money::from_cents(cents);
                prop_assert_eq!(money.to_string().parse::<Money>().unwrap(), money);
            }

            #[test]
            fn discount_never_exceeds_price(cents in any::<u64>(), pct in 0u8..=100) {
                prop_assert!(Money::from_cents(cents).discounted(pct) <= Money::from_cents(cents));
            }
        }
    }
}
