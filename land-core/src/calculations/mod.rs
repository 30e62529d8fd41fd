//! Land pricing calculations.
//!
//! This module holds the numeric side of the calculator: lenient parsing of
//! typed amounts, the square meter to tsubo conversion, and the engine that
//! converts between purchase prices and per-tsubo unit prices.

pub mod common;
pub mod pricing;
pub mod units;

pub use common::{
    format_with_separators, group_number_text, group_thousands, parse_leading_number, parse_number,
};
pub use pricing::PricingEngine;
pub use units::{SQ_METERS_PER_TSUBO, sq_meters_to_tsubo};
