//! Conversion between purchase prices and per-tsubo land prices.
//!
//! # Formulas
//!
//! | Mode    | Output                    | Formula                                              |
//! |---------|---------------------------|------------------------------------------------------|
//! | Forward | built-in unit price       | purchase price ÷ area (tsubo)                        |
//! | Forward | type-1 unit price         | built-in unit price ÷ floor-area ratio               |
//! | Reverse | expected purchase price   | unit price × area (tsubo) × ratio × bid rate + expenses |
//!
//! With a bid rate of 1 and no expenses the two directions are exact
//! inverses. Expenses only appear in the reverse direction: they are a
//! buyer-side cost added to an offer, not part of a historical price.
//!
//! # Example
//!
//! ```
//! use land_core::{CalculationMode, PricingEngine, RawInputs};
//!
//! let engine = PricingEngine::new();
//! let raw = RawInputs::forward("5,000", "100", "200");
//! let result = engine.compute(&raw, CalculationMode::Forward);
//!
//! let type1 = result.type1_unit_price().unwrap();
//! assert!((type1 - 82.6445).abs() < 1e-6);
//! ```

use tracing::{debug, trace};

use crate::models::{
    CalculationMode, CalculationResult, ForwardResult, ParsedInputs, PricingOutput, RawInputs,
    ReverseResult,
};

/// Stateless pricing calculator.
///
/// Every call derives its result from the inputs alone, so one engine can be
/// shared freely and results never depend on earlier calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Parses `inputs` and runs the formula selected by `mode`.
    ///
    /// Never fails: missing or malformed inputs produce absent outputs.
    pub fn compute(
        &self,
        inputs: &RawInputs,
        mode: CalculationMode,
    ) -> CalculationResult {
        self.compute_parsed(&ParsedInputs::from_raw(inputs), mode)
    }

    /// Runs the formula selected by `mode` on already parsed inputs.
    pub fn compute_parsed(
        &self,
        inputs: &ParsedInputs,
        mode: CalculationMode,
    ) -> CalculationResult {
        let output = match mode {
            CalculationMode::Forward => PricingOutput::Forward(self.forward(inputs)),
            CalculationMode::Reverse => PricingOutput::Reverse(self.reverse(inputs)),
        };

        let result = CalculationResult {
            inputs: *inputs,
            output,
        };

        if result.is_resolved() {
            debug!(%mode, area_tsubo = inputs.area_tsubo, "pricing resolved");
        } else {
            trace!(%mode, "pricing unresolved, required input is zero or missing");
        }

        result
    }

    fn forward(
        &self,
        inputs: &ParsedInputs,
    ) -> ForwardResult {
        if !self.has_land(inputs) || !is_positive(inputs.purchase_price) {
            return ForwardResult::default();
        }

        let built_in = inputs.purchase_price / inputs.area_tsubo;
        let type1 = built_in / inputs.floor_area_ratio;

        // Both prices or neither.
        match (finite(built_in), finite(type1)) {
            (Some(built_in), Some(type1)) => ForwardResult {
                built_in_unit_price: Some(built_in),
                type1_unit_price: Some(type1),
            },
            _ => ForwardResult::default(),
        }
    }

    fn reverse(
        &self,
        inputs: &ParsedInputs,
    ) -> ReverseResult {
        if !self.has_land(inputs) || !is_positive(inputs.unit_price) {
            return ReverseResult::default();
        }

        let expected = inputs.unit_price * inputs.area_tsubo * inputs.floor_area_ratio
            * inputs.bid_rate
            + inputs.expenses;

        ReverseResult {
            expected_purchase_price: finite(expected),
        }
    }

    /// Area and ratio are required by both directions and are the divisors
    /// of the forward formulas.
    fn has_land(
        &self,
        inputs: &ParsedInputs,
    ) -> bool {
        is_positive(inputs.area_sq_meters)
            && is_positive(inputs.area_tsubo)
            && is_positive(inputs.floor_area_ratio)
    }
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}

fn finite(value: f64) -> Option<f64> {
    Some(value).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::BidRate;

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    fn assert_close(
        actual: f64,
        expected: f64,
    ) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    // =========================================================================
    // Forward
    // =========================================================================

    #[test]
    fn forward_reference_scenario() {
        let result = PricingEngine::new().compute(
            &RawInputs::forward("5000", "100", "200"),
            CalculationMode::Forward,
        );

        assert_eq!(round2(result.area_tsubo()), 30.25);
        assert_eq!(result.built_in_unit_price().map(round2), Some(165.29));
        assert_eq!(result.type1_unit_price().map(round2), Some(82.64));
        assert!(result.is_resolved());
    }

    #[test]
    fn forward_accepts_separated_price() {
        let engine = PricingEngine::new();
        let plain =
            engine.compute(&RawInputs::forward("12500", "250", "150"), CalculationMode::Forward);
        let separated =
            engine.compute(&RawInputs::forward("12,500", "250", "150"), CalculationMode::Forward);

        assert_eq!(plain, separated);
    }

    #[test]
    fn forward_is_absent_when_any_input_is_zero() {
        let engine = PricingEngine::new();
        let cases = [
            RawInputs::forward("0", "100", "200"),
            RawInputs::forward("5000", "0", "200"),
            RawInputs::forward("5000", "100", "0"),
            RawInputs::forward("", "100", "200"),
            RawInputs::forward("5000", "abc", "200"),
        ];

        for raw in cases {
            let result = engine.compute(&raw, CalculationMode::Forward);

            assert_eq!(result.built_in_unit_price(), None, "{raw:?}");
            assert_eq!(result.type1_unit_price(), None, "{raw:?}");
            assert!(!result.is_resolved());
        }
    }

    #[test]
    fn forward_still_reports_tsubo_when_unresolved() {
        let result = PricingEngine::new()
            .compute(&RawInputs::forward("", "100", ""), CalculationMode::Forward);

        assert_eq!(round2(result.area_tsubo()), 30.25);
    }

    #[test]
    fn forward_ignores_reverse_fields() {
        let mut raw = RawInputs::forward("5000", "100", "200");
        let baseline = PricingEngine::new().compute(&raw, CalculationMode::Forward);

        raw.expenses = "300".into();
        raw.unit_price = "90".into();
        raw.bid_rate = BidRate::new(0.6);
        let result = PricingEngine::new().compute(&raw, CalculationMode::Forward);

        assert_eq!(result.output, baseline.output);
    }

    #[test]
    fn forward_larger_area_lowers_built_in_price() {
        let engine = PricingEngine::new();
        let mut previous = f64::INFINITY;

        for area in ["50", "80", "100", "150", "400"] {
            let price = engine
                .compute(&RawInputs::forward("5000", area, "200"), CalculationMode::Forward)
                .built_in_unit_price()
                .unwrap();

            assert!(price < previous, "area {area} gave {price}");
            previous = price;
        }
    }

    #[test]
    fn forward_larger_ratio_lowers_type1_price() {
        let engine = PricingEngine::new();
        let mut previous = f64::INFINITY;

        for ratio in ["60", "100", "200", "300", "600"] {
            let price = engine
                .compute(&RawInputs::forward("5000", "100", ratio), CalculationMode::Forward)
                .type1_unit_price()
                .unwrap();

            assert!(price < previous, "ratio {ratio} gave {price}");
            previous = price;
        }
    }

    #[test]
    fn forward_drops_overflowing_results() {
        let result = PricingEngine::new().compute(
            &RawInputs::forward("1e308", "1e-300", "1"),
            CalculationMode::Forward,
        );

        assert_eq!(result.built_in_unit_price(), None);
        assert_eq!(result.type1_unit_price(), None);
    }

    #[test]
    fn forward_never_half_resolves_when_only_type1_overflows() {
        let result = PricingEngine::new().compute(
            &RawInputs::forward("1e308", "3.30578", "1e-10"),
            CalculationMode::Forward,
        );

        assert_eq!(result.built_in_unit_price(), None);
        assert_eq!(result.type1_unit_price(), None);
        assert!(!result.is_resolved());
    }

    // =========================================================================
    // Reverse
    // =========================================================================

    #[test]
    fn reverse_reference_scenario() {
        let raw = RawInputs::reverse("80", "100", "200", BidRate::new(0.9), "200");

        let result = PricingEngine::new().compute(&raw, CalculationMode::Reverse);

        let expected = 80.0 * (100.0 / 3.30578) * 2.0 * 0.9 + 200.0;
        assert_close(result.expected_purchase_price().unwrap(), expected);
        assert_eq!(result.expected_purchase_price().map(round2), Some(4556.01));
    }

    #[test]
    fn reverse_without_expenses_or_discount() {
        let raw = RawInputs::reverse("80", "100", "200", BidRate::default(), "");

        let result = PricingEngine::new().compute(&raw, CalculationMode::Reverse);

        assert_close(
            result.expected_purchase_price().unwrap(),
            80.0 * (100.0 / 3.30578) * 2.0,
        );
    }

    #[test]
    fn reverse_is_absent_when_any_required_input_is_zero() {
        let engine = PricingEngine::new();
        let cases = [
            RawInputs::reverse("0", "100", "200", BidRate::default(), "200"),
            RawInputs::reverse("80", "", "200", BidRate::default(), "200"),
            RawInputs::reverse("80", "100", "x", BidRate::default(), "200"),
        ];

        for raw in cases {
            let result = engine.compute(&raw, CalculationMode::Reverse);

            assert_eq!(result.expected_purchase_price(), None, "{raw:?}");
        }
    }

    #[test]
    fn reverse_expenses_alone_do_not_resolve() {
        let raw = RawInputs::reverse("", "", "", BidRate::default(), "500");

        let result = PricingEngine::new().compute(&raw, CalculationMode::Reverse);

        assert_eq!(result.expected_purchase_price(), None);
    }

    #[test]
    fn reverse_higher_bid_rate_raises_price() {
        let engine = PricingEngine::new();
        let mut previous = f64::NEG_INFINITY;

        for rate in [0.5, 0.6, 0.75, 0.9, 1.0] {
            let raw = RawInputs::reverse("80", "100", "200", BidRate::new(rate), "200");
            let price = engine
                .compute(&raw, CalculationMode::Reverse)
                .expected_purchase_price()
                .unwrap();

            assert!(price > previous, "rate {rate} gave {price}");
            previous = price;
        }
    }

    #[test]
    fn reverse_clamps_bid_rate_before_use() {
        let engine = PricingEngine::new();
        let low = RawInputs::reverse("80", "100", "200", BidRate::new(0.1), "0");
        let floor = RawInputs::reverse("80", "100", "200", BidRate::new(0.5), "0");
        let high = RawInputs::reverse("80", "100", "200", BidRate::new(3.0), "0");
        let ceiling = RawInputs::reverse("80", "100", "200", BidRate::new(1.0), "0");

        assert_eq!(
            engine.compute(&low, CalculationMode::Reverse),
            engine.compute(&floor, CalculationMode::Reverse)
        );
        assert_eq!(
            engine.compute(&high, CalculationMode::Reverse),
            engine.compute(&ceiling, CalculationMode::Reverse)
        );
    }

    // =========================================================================
    // Both directions
    // =========================================================================

    #[test]
    fn reverse_undoes_forward() {
        let engine = PricingEngine::new();

        for (price, area, ratio) in [
            ("5000", "100", "100"),
            ("3800", "72.5", "80"),
            ("12,000", "330.578", "50"),
            ("0.5", "1", "1"),
        ] {
            let forward =
                engine.compute(&RawInputs::forward(price, area, ratio), CalculationMode::Forward);
            let type1 = forward.type1_unit_price().unwrap();

            let raw = RawInputs::reverse(type1.to_string(), area, ratio, BidRate::default(), "");
            let reverse = engine.compute(&raw, CalculationMode::Reverse);

            assert_close(
                reverse.expected_purchase_price().unwrap(),
                crate::calculations::common::parse_number(price),
            );
        }
    }

    #[test]
    fn result_mode_matches_request() {
        let engine = PricingEngine::new();
        let raw = RawInputs::forward("5000", "100", "200");

        assert_eq!(engine.compute(&raw, CalculationMode::Forward).mode(), CalculationMode::Forward);
        assert_eq!(engine.compute(&raw, CalculationMode::Reverse).mode(), CalculationMode::Reverse);
    }
}
