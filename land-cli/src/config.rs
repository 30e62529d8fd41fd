//! Settings file for the calculator front end.
//!
//! Every key is optional. A minimal file might look like:
//!
//! ```toml
//! log_level = "debug"
//!
//! [defaults]
//! mode = "reverse"
//! bid_rate = 0.9
//!
//! [display]
//! decimals = 1
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use land_core::{BidRate, CalculationMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File read from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "land-pricing.toml";

/// Upper bound for displayed fraction digits.
pub const MAX_DECIMALS: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Starting values for a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub mode: CalculationMode,
    pub bid_rate: BidRate,
    /// Expenses text used when none is given.
    pub expenses: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: CalculationMode::Forward,
            bid_rate: BidRate::default(),
            expenses: String::new(),
        }
    }
}

/// How results are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Fraction digits for prices.
    pub decimals: u32,
    /// Fraction digits for the tsubo area.
    pub tsubo_decimals: u32,
    /// Currency unit shown after prices.
    pub currency_unit: String,
    /// Shown in place of a result that cannot be computed yet.
    pub placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            tsubo_decimals: 2,
            currency_unit: "万円".to_string(),
            placeholder: "—".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub defaults: DefaultsConfig,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            defaults: DefaultsConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when `path` is `None`.
    ///
    /// A missing default file gives the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.display.decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "display.decimals must be at most {MAX_DECIMALS}, got {}",
                self.display.decimals
            )));
        }
        if self.display.tsubo_decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "display.tsubo_decimals must be at most {MAX_DECIMALS}, got {}",
                self.display.tsubo_decimals
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".to_string()));
        }
        Ok(())
    }
}
