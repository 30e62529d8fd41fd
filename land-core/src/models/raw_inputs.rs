use serde::{Deserialize, Serialize};

use crate::models::{BidRate, ParsedInputs};

/// Text fields a host edits between calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    PurchasePrice,
    Expenses,
    AreaSqMeters,
    FloorAreaRatioPercent,
    UnitPrice,
}

impl InputField {
    pub const ALL: [InputField; 5] = [
        Self::PurchasePrice,
        Self::Expenses,
        Self::AreaSqMeters,
        Self::FloorAreaRatioPercent,
        Self::UnitPrice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchasePrice => "purchase_price",
            Self::Expenses => "expenses",
            Self::AreaSqMeters => "area_sq_meters",
            Self::FloorAreaRatioPercent => "floor_area_ratio_percent",
            Self::UnitPrice => "unit_price",
        }
    }
}

/// Unvalidated form state, exactly as typed.
///
/// Fields that the active mode does not use are kept as they are, so
/// switching modes back and forth never loses what was entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    /// Purchase price in currency units (forward mode).
    pub purchase_price: String,

    /// Transaction expenses added to the projected price (reverse mode).
    pub expenses: String,

    /// Land area in square meters (both modes).
    pub area_sq_meters: String,

    /// Floor-area ratio as a percentage, e.g. `"200"` (both modes).
    pub floor_area_ratio_percent: String,

    /// Offer discount factor (reverse mode).
    pub bid_rate: BidRate,

    /// Type-1 unit price per tsubo (reverse mode).
    pub unit_price: String,
}

impl RawInputs {
    /// Inputs for a purchase price to unit price calculation.
    pub fn forward(
        purchase_price: impl Into<String>,
        area_sq_meters: impl Into<String>,
        floor_area_ratio_percent: impl Into<String>,
    ) -> Self {
        Self {
            purchase_price: purchase_price.into(),
            area_sq_meters: area_sq_meters.into(),
            floor_area_ratio_percent: floor_area_ratio_percent.into(),
            ..Default::default()
        }
    }

    /// Inputs for a unit price to expected purchase price calculation.
    pub fn reverse(
        unit_price: impl Into<String>,
        area_sq_meters: impl Into<String>,
        floor_area_ratio_percent: impl Into<String>,
        bid_rate: BidRate,
        expenses: impl Into<String>,
    ) -> Self {
        Self {
            unit_price: unit_price.into(),
            area_sq_meters: area_sq_meters.into(),
            floor_area_ratio_percent: floor_area_ratio_percent.into(),
            bid_rate,
            expenses: expenses.into(),
            ..Default::default()
        }
    }

    pub fn field(
        &self,
        field: InputField,
    ) -> &str {
        match field {
            InputField::PurchasePrice => &self.purchase_price,
            InputField::Expenses => &self.expenses,
            InputField::AreaSqMeters => &self.area_sq_meters,
            InputField::FloorAreaRatioPercent => &self.floor_area_ratio_percent,
            InputField::UnitPrice => &self.unit_price,
        }
    }

    pub fn set_field(
        &mut self,
        field: InputField,
        text: impl Into<String>,
    ) {
        let slot = match field {
            InputField::PurchasePrice => &mut self.purchase_price,
            InputField::Expenses => &mut self.expenses,
            InputField::AreaSqMeters => &mut self.area_sq_meters,
            InputField::FloorAreaRatioPercent => &mut self.floor_area_ratio_percent,
            InputField::UnitPrice => &mut self.unit_price,
        };
        *slot = text.into();
    }

    pub fn parse(&self) -> ParsedInputs {
        ParsedInputs::from_raw(self)
    }
}
