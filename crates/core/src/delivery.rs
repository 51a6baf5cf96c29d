//! Delivery-day estimates.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire spelling of an unknown estimate.
pub const UNKNOWN_MARKER: &str = "N/A";

/// One bound of a delivery estimate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum DeliveryDays {
    Days(u32),
    #[default]
    Unknown,
}

impl DeliveryDays {
    pub fn days(self) -> Option<u32> {
        match self {
            DeliveryDays::Days(n) => Some(n),
            DeliveryDays::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, DeliveryDays::Days(_))
    }

    fn from_count(n: u64) -> Self {
        match u32::try_from(n) {
            Ok(0) | Err(_) => DeliveryDays::Unknown,
            Ok(n) => DeliveryDays::Days(n),
        }
    }
}

impl fmt::Display for DeliveryDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryDays::Days(n) => write!(f, "{n}"),
            DeliveryDays::Unknown => f.write_str(UNKNOWN_MARKER),
        }
    }
}

impl Serialize for DeliveryDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DeliveryDays::Days(n) => serializer.serialize_u32(*n),
            DeliveryDays::Unknown => serializer.serialize_str(UNKNOWN_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for DeliveryDays {
    /// Never fails: anything that is not a positive day count is `Unknown`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64))
                .map(DeliveryDays::from_count)
                .unwrap_or(DeliveryDays::Unknown),
            serde_json::Value::String(s) => s
                .trim()
                .parse::<u64>()
                .map(DeliveryDays::from_count)
                .unwrap_or(DeliveryDays::Unknown),
            _ => DeliveryDays::Unknown,
        })
    }
}

/// Minimum/maximum delivery estimate for a product.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct DeliveryEstimate {
    pub min: DeliveryDays,
    pub max: DeliveryDays,
}

impl DeliveryEstimate {
    pub fn new(min: DeliveryDays, max: DeliveryDays) -> Self {
        Self { min, max }
    }

    /// At least one bound is known.
    pub fn is_known(&self) -> bool {
        self.min.is_known() || self.max.is_known()
    }

    /// Human-readable estimate: `"2-5 Days"`, `"3 Days"` or `"N/A"`.
    pub fn label(&self) -> String {
        match (self.min.days(), self.max.days()) {
            (Some(min), Some(max)) => format!("{min}-{max} Days"),
            (Some(days), None) | (None, Some(days)) => format!("{days} Days"),
            (None, None) => UNKNOWN_MARKER.to_string(),
        }
    }
}
