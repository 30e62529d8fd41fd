use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a pricing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Purchase price to built-in and type-1 unit prices.
    #[default]
    Forward,
    /// Type-1 unit price to expected purchase price.
    Reverse,
}

/// Returned when mode text is neither `forward` nor `reverse`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown calculation mode '{0}' (expected 'forward' or 'reverse')")]
pub struct ParseModeError(String);

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "reverse" => Ok(Self::Reverse),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
