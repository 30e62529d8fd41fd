use serde::{Deserialize, Serialize};

use crate::models::{CalculationMode, ParsedInputs};

/// Unit prices derived from a known purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForwardResult {
    /// Purchase price per tsubo of land.
    pub built_in_unit_price: Option<f64>,
    /// Built-in unit price normalized by the floor-area ratio.
    pub type1_unit_price: Option<f64>,
}

/// Offer price projected from a target unit price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReverseResult {
    pub expected_purchase_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PricingOutput {
    Forward(ForwardResult),
    Reverse(ReverseResult),
}

/// Outcome of one engine run.
///
/// An output is `None` when one of its formula's inputs is zero, empty or not
/// a number. Hosts should render that as a placeholder rather than `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The numeric inputs the outputs were derived from.
    pub inputs: ParsedInputs,
    pub output: PricingOutput,
}

impl CalculationResult {
    pub fn mode(&self) -> CalculationMode {
        match self.output {
            PricingOutput::Forward(_) => CalculationMode::Forward,
            PricingOutput::Reverse(_) => CalculationMode::Reverse,
        }
    }

    /// True when every output of the active mode is present.
    pub fn is_resolved(&self) -> bool {
        match self.output {
            PricingOutput::Forward(r) => {
                r.built_in_unit_price.is_some() && r.type1_unit_price.is_some()
            }
            PricingOutput::Reverse(r) => r.expected_purchase_price.is_some(),
        }
    }

    pub fn area_tsubo(&self) -> f64 {
        self.inputs.area_tsubo
    }

    /// Always `None` for a reverse result.
    pub fn built_in_unit_price(&self) -> Option<f64> {
        match self.output {
            PricingOutput::Forward(r) => r.built_in_unit_price,
            PricingOutput::Reverse(_) => None,
        }
    }

    /// Always `None` for a reverse result.
    pub fn type1_unit_price(&self) -> Option<f64> {
        match self.output {
            PricingOutput::Forward(r) => r.type1_unit_price,
            PricingOutput::Reverse(_) => None,
        }
    }

    /// Always `None` for a forward result.
    pub fn expected_purchase_price(&self) -> Option<f64> {
        match self.output {
            PricingOutput::Forward(_) => None,
            PricingOutput::Reverse(r) => r.expected_purchase_price,
        }
    }
}
