pub mod calculations;
pub mod models;

pub use calculations::PricingEngine;
pub use models::*;
