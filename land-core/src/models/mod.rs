mod bid_rate;
mod calculation_mode;
mod calculation_result;
mod parsed_inputs;
mod raw_inputs;

pub use bid_rate::{BidRate, MAX_BID_RATE, MIN_BID_RATE};
pub use calculation_mode::{CalculationMode, ParseModeError};
pub use calculation_result::{CalculationResult, ForwardResult, PricingOutput, ReverseResult};
pub use parsed_inputs::ParsedInputs;
pub use raw_inputs::{InputField, RawInputs};
