use serde::{Deserialize, Serialize};

use crate::calculations::common::parse_leading_number;

/// Lowest accepted bid rate (a 50% offer).
pub const MIN_BID_RATE: f64 = 0.5;

/// Highest accepted bid rate (no discount).
pub const MAX_BID_RATE: f64 = 1.0;

/// Discount factor applied to a target unit price when projecting an offer.
///
/// The wrapped value is always inside `[MIN_BID_RATE, MAX_BID_RATE]`. Every
/// way of building one clamps, including deserialization, so slider-style
/// numeric entry and free text entry behave the same.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct BidRate(f64);

impl BidRate {
    /// Clamps `value` into range. `NaN` falls back to the default rate.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::default()
        } else {
            Self(value.clamp(MIN_BID_RATE, MAX_BID_RATE))
        }
    }

    /// Parses free text such as `"0.85"`.
    ///
    /// Returns `None` when the text holds no number, so callers can keep the
    /// previous rate while the user is still typing.
    pub fn parse(text: &str) -> Option<Self> {
        parse_leading_number(text).map(Self::new)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// The rate as a percentage, e.g. `90.0` for `0.9`.
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for BidRate {
    fn default() -> Self {
        Self(MAX_BID_RATE)
    }
}

impl From<f64> for BidRate {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<BidRate> for f64 {
    fn from(rate: BidRate) -> Self {
        rate.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_no_discount() {
        assert_eq!(BidRate::default().value(), 1.0);
    }

    #[test]
    fn new_keeps_values_in_range() {
        assert_eq!(BidRate::new(0.85).value(), 0.85);
        assert_eq!(BidRate::new(0.5).value(), 0.5);
    }

    #[test]
    fn new_clamps_out_of_range_values() {
        assert_eq!(BidRate::new(0.2).value(), MIN_BID_RATE);
        assert_eq!(BidRate::new(1.4).value(), MAX_BID_RATE);
        assert_eq!(BidRate::new(-3.0).value(), MIN_BID_RATE);
    }

    #[test]
    fn new_maps_nan_to_default() {
        assert_eq!(BidRate::new(f64::NAN), BidRate::default());
    }

    #[test]
    fn parse_clamps_like_numeric_entry() {
        assert_eq!(BidRate::parse("0.9"), Some(BidRate::new(0.9)));
        assert_eq!(BidRate::parse("2"), Some(BidRate::new(1.0)));
        assert_eq!(BidRate::parse("0.1"), Some(BidRate::new(0.5)));
    }

    #[test]
    fn parse_rejects_text_without_a_number() {
        assert_eq!(BidRate::parse(""), None);
        assert_eq!(BidRate::parse("abc"), None);
        assert_eq!(BidRate::parse("."), None);
    }

    #[test]
    fn as_percent_scales_by_hundred() {
        assert_eq!(BidRate::new(0.75).as_percent(), 75.0);
    }
}
