use serde::{Deserialize, Serialize};

use crate::calculations::common::parse_number;
use crate::calculations::units::{percent_to_ratio, ratio_to_percent, sq_meters_to_tsubo};
use crate::models::RawInputs;

/// Numeric view of [`RawInputs`].
///
/// Every text field that fails to parse reads as `0`, and negative amounts
/// are floored to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedInputs {
    pub purchase_price: f64,
    pub expenses: f64,
    pub area_sq_meters: f64,
    /// Always derived from `area_sq_meters`, even when other inputs are missing.
    pub area_tsubo: f64,
    /// Unit fraction, e.g. `2.0` for 200%.
    pub floor_area_ratio: f64,
    pub unit_price: f64,
    pub bid_rate: f64,
}

impl ParsedInputs {
    pub fn from_raw(raw: &RawInputs) -> Self {
        let area_sq_meters = parse_amount(&raw.area_sq_meters);

        Self {
            purchase_price: parse_amount(&raw.purchase_price),
            expenses: parse_amount(&raw.expenses),
            area_sq_meters,
            area_tsubo: sq_meters_to_tsubo(area_sq_meters),
            floor_area_ratio: percent_to_ratio(parse_amount(&raw.floor_area_ratio_percent)),
            unit_price: parse_amount(&raw.unit_price),
            bid_rate: raw.bid_rate.value(),
        }
    }

    /// The floor-area ratio back in percent, e.g. `200.0`.
    pub fn floor_area_ratio_percent(&self) -> f64 {
        ratio_to_percent(self.floor_area_ratio)
    }
}

fn parse_amount(text: &str) -> f64 {
    parse_number(text).max(0.0)
}
