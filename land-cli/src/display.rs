//! Text rendering of calculation results.
//!
//! The panel shows the tsubo area and each formula with the numbers that went
//! into it, so a reader can check the arithmetic. Operands that are still
//! missing are shown by name.

use std::fmt;

use land_core::{CalculationMode, CalculationResult, PricingOutput, RawInputs};

use crate::config::DisplayConfig;
use crate::utils::format_rounded;

pub fn describe_mode(mode: CalculationMode) -> &'static str {
    match mode {
        CalculationMode::Forward => "forward (purchase price → type-1 unit price)",
        CalculationMode::Reverse => "reverse (type-1 unit price → expected purchase price)",
    }
}

/// Result panel for one calculation, rendered through [`fmt::Display`].
pub struct ResultPanel<'a> {
    result: &'a CalculationResult,
    raw: &'a RawInputs,
    config: &'a DisplayConfig,
}

impl<'a> ResultPanel<'a> {
    pub fn new(
        result: &'a CalculationResult,
        raw: &'a RawInputs,
        config: &'a DisplayConfig,
    ) -> Self {
        Self {
            result,
            raw,
            config,
        }
    }

    fn price(&self, value: f64) -> String {
        format_rounded(value, self.config.decimals)
    }

    fn value_or_placeholder(
        &self,
        value: Option<f64>,
    ) -> String {
        value
            .map(|v| self.price(v))
            .unwrap_or_else(|| self.config.placeholder.clone())
    }

    /// Typed text followed by `suffix`, or `label` when nothing was typed.
    fn typed_operand(
        &self,
        text: &str,
        suffix: &str,
        label: &str,
    ) -> String {
        let text = text.trim();
        if text.is_empty() {
            label.to_string()
        } else {
            format!("{text} {suffix}")
        }
    }

    fn tsubo(&self) -> String {
        format_rounded(self.result.area_tsubo(), self.config.tsubo_decimals)
    }

    fn ratio_operand(&self) -> String {
        let inputs = &self.result.inputs;
        if inputs.floor_area_ratio > 0.0 {
            format!("{}%", format_rounded(inputs.floor_area_ratio_percent(), 0))
        } else {
            "floor-area ratio".to_string()
        }
    }
}

impl fmt::Display for ResultPanel<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let unit = &self.config.currency_unit;
        let tsubo = self.tsubo();
        let area = self.raw.area_sq_meters.trim();
        let area = if area.is_empty() {
            self.config.placeholder.as_str()
        } else {
            area
        };

        writeln!(f, "Mode: {}", describe_mode(self.result.mode()))?;
        writeln!(f, "Area: {area} m² = {tsubo} tsubo")?;

        match self.result.output {
            PricingOutput::Forward(forward) => {
                let price = self.typed_operand(&self.raw.purchase_price, unit, "purchase price");
                writeln!(f, "{price} ÷ {tsubo} tsubo = built-in unit price")?;
                writeln!(
                    f,
                    "Built-in unit price: {} {unit}/tsubo",
                    self.value_or_placeholder(forward.built_in_unit_price)
                )?;

                let built_in = forward
                    .built_in_unit_price
                    .map(|v| format!("{} {unit}/tsubo", self.price(v)))
                    .unwrap_or_else(|| "built-in unit price".to_string());
                writeln!(
                    f,
                    "{built_in} ÷ {} = type-1 unit price",
                    self.ratio_operand()
                )?;
                write!(
                    f,
                    "Type-1 unit price: {} {unit}/tsubo",
                    self.value_or_placeholder(forward.type1_unit_price)
                )
            }
            PricingOutput::Reverse(reverse) => {
                let unit_price = self.typed_operand(
                    &self.raw.unit_price,
                    &format!("{unit}/tsubo"),
                    "type-1 unit price",
                );
                let expenses = self.typed_operand(&self.raw.expenses, unit, "expenses");
                let bid = format_rounded(self.raw.bid_rate.as_percent(), 0);
                writeln!(
                    f,
                    "{unit_price} × {tsubo} tsubo × {} × {bid}% + {expenses} = expected purchase price",
                    self.ratio_operand()
                )?;
                write!(
                    f,
                    "Expected purchase price: {} {unit}",
                    self.value_or_placeholder(reverse.expected_purchase_price)
                )
            }
        }
    }
}
