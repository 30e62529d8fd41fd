//! Area and ratio conversions.

/// Square meters in one tsubo.
pub const SQ_METERS_PER_TSUBO: f64 = 3.30578;

/// Converts square meters to tsubo. No rounding is applied.
///
/// # Examples
///
/// ```
/// use land_core::calculations::units::sq_meters_to_tsubo;
///
/// assert_eq!(sq_meters_to_tsubo(3.30578), 1.0);
/// assert_eq!(sq_meters_to_tsubo(0.0), 0.0);
/// ```
pub fn sq_meters_to_tsubo(area_sq_meters: f64) -> f64 {
    area_sq_meters / SQ_METERS_PER_TSUBO
}

/// Converts a percentage such as `200.0` to a unit fraction (`2.0`).
pub fn percent_to_ratio(percent: f64) -> f64 {
    percent / 100.0
}

pub fn ratio_to_percent(ratio: f64) -> f64 {
    ratio * 100.0
}
