use land_core::calculations::group_number_text;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to `decimals` places, with midpoints going away from zero.
pub fn round_half_up(
    value: Decimal,
    decimals: u32,
) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an engine value to a [`Decimal`] rounded for display.
///
/// Uses the exact binary value of `value`, so a float sitting just below a
/// midpoint rounds down. Returns `None` for values outside the decimal range.
pub fn to_display_decimal(
    value: f64,
    decimals: u32,
) -> Option<Decimal> {
    Decimal::from_f64_retain(value).map(|d| {
        let rounded = round_half_up(d, decimals);
        if rounded.is_zero() { rounded.abs() } else { rounded }
    })
}

/// Formats `value` with exactly `decimals` fraction digits and `,` grouping.
///
/// Non-finite values format as an empty string.
pub fn format_rounded(
    value: f64,
    decimals: u32,
) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let precision = decimals as usize;
    let text = match to_display_decimal(value, decimals) {
        Some(d) => format!("{d:.precision$}"),
        None => format!("{value:.precision$}"),
    };

    group_number_text(&text)
}
