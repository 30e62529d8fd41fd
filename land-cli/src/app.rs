//! Glue between command-line arguments and the pricing engine.

use land_core::{BidRate, CalculationMode, PricingEngine, RawInputs};
use tracing::{debug, warn};

use crate::config::Config;
use crate::display::ResultPanel;

/// Arguments for a single forward calculation.
#[derive(Debug, Clone)]
pub struct ForwardArgs {
    pub price: String,
    pub area: String,
    pub ratio: String,
}

/// Arguments for a single reverse calculation. Missing values come from the
/// config defaults.
#[derive(Debug, Clone)]
pub struct ReverseArgs {
    pub unit_price: String,
    pub area: String,
    pub ratio: String,
    pub bid_rate: Option<f64>,
    pub expenses: Option<String>,
}

impl ForwardArgs {
    pub fn to_inputs(&self) -> RawInputs {
        RawInputs::forward(&self.price, &self.area, &self.ratio)
    }
}

impl ReverseArgs {
    pub fn to_inputs(
        &self,
        config: &Config,
    ) -> RawInputs {
        let bid_rate = match self.bid_rate {
            Some(value) => {
                let rate = BidRate::new(value);
                if rate.value() != value {
                    warn!(requested = value, used = rate.value(), "bid rate out of range, clamped");
                }
                rate
            }
            None => config.defaults.bid_rate,
        };
        let expenses = self
            .expenses
            .clone()
            .unwrap_or_else(|| config.defaults.expenses.clone());

        RawInputs::reverse(&self.unit_price, &self.area, &self.ratio, bid_rate, expenses)
    }
}

/// Computes one result and renders it as a panel.
pub fn calculate(
    inputs: &RawInputs,
    mode: CalculationMode,
    config: &Config,
) -> String {
    let result = PricingEngine::new().compute(inputs, mode);
    if !result.is_resolved() {
        debug!(%mode, "some inputs are missing, showing placeholders");
    }
    ResultPanel::new(&result, inputs, &config.display).to_string()
}
