//! Batch evaluation of pricing scenarios from CSV.
//!
//! ## Input format
//!
//! Headers are matched by name; column order does not matter.
//!
//! | Column                     | Required | Notes                                   |
//! |----------------------------|----------|-----------------------------------------|
//! | `mode`                     | yes      | `forward` or `reverse`                  |
//! | `area_sq_meters`           | yes      |                                         |
//! | `floor_area_ratio_percent` | yes      | e.g. `200`                              |
//! | `purchase_price`           | no       | forward mode                            |
//! | `unit_price`               | no       | reverse mode                            |
//! | `bid_rate`                 | no       | reverse mode, defaults to the configured rate |
//! | `expenses`                 | no       | reverse mode, defaults to the configured text |
//!
//! Amount cells are read exactly like typed input, so `"5,000"` works and an
//! empty cell reads as zero.
//!
//! ## Output format
//!
//! ```csv
//! row,mode,area_tsubo,built_in_unit_price,type1_unit_price,expected_purchase_price
//! 1,forward,30.25,165.29,82.64,
//! 2,reverse,30.25,,,4556.01
//! ```
//!
//! `row` is the 1-based data row of the input. Results that cannot be
//! computed are left empty.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use land_core::{BidRate, CalculationMode, ParseModeError, PricingEngine, RawInputs};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, DefaultsConfig};
use crate::utils::to_display_decimal;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {source}")]
    Mode {
        row: usize,
        #[source]
        source: ParseModeError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    mode: String,
    area_sq_meters: String,
    floor_area_ratio_percent: String,
    #[serde(default)]
    purchase_price: String,
    #[serde(default)]
    unit_price: String,
    #[serde(default)]
    bid_rate: String,
    #[serde(default)]
    expenses: Option<String>,
}

/// One calculation request read from a CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub row: usize,
    pub mode: CalculationMode,
    pub inputs: RawInputs,
}

/// One line of the output CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub row: usize,
    pub mode: CalculationMode,
    pub area_tsubo: Option<Decimal>,
    pub built_in_unit_price: Option<Decimal>,
    pub type1_unit_price: Option<Decimal>,
    pub expected_purchase_price: Option<Decimal>,
}

/// Reads scenarios, filling blank bid rates and expenses from `defaults`.
///
/// A bid rate cell holding no number also falls back to the default rate.
pub fn read_scenarios<R: Read>(
    reader: R,
    defaults: &DefaultsConfig,
) -> Result<Vec<Scenario>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut scenarios = Vec::new();

    for (index, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        let record = record?;
        let mode = record
            .mode
            .parse::<CalculationMode>()
            .map_err(|source| BatchError::Mode { row, source })?;

        let bid_rate = BidRate::parse(&record.bid_rate).unwrap_or(defaults.bid_rate);
        let expenses = record
            .expenses
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| defaults.expenses.clone());

        scenarios.push(Scenario {
            row,
            mode,
            inputs: RawInputs {
                purchase_price: record.purchase_price,
                expenses,
                area_sq_meters: record.area_sq_meters,
                floor_area_ratio_percent: record.floor_area_ratio_percent,
                bid_rate,
                unit_price: record.unit_price,
            },
        });
    }

    debug!(count = scenarios.len(), "read scenarios");
    Ok(scenarios)
}

/// Runs every scenario, rounding outputs to `decimals` places.
pub fn evaluate(
    engine: &PricingEngine,
    scenarios: &[Scenario],
    decimals: u32,
    tsubo_decimals: u32,
) -> Vec<ScenarioResult> {
    let round = |value: Option<f64>, places: u32| value.and_then(|v| to_display_decimal(v, places));

    scenarios
        .iter()
        .map(|scenario| {
            let result = engine.compute(&scenario.inputs, scenario.mode);
            ScenarioResult {
                row: scenario.row,
                mode: scenario.mode,
                area_tsubo: round(Some(result.area_tsubo()), tsubo_decimals),
                built_in_unit_price: round(result.built_in_unit_price(), decimals),
                type1_unit_price: round(result.type1_unit_price(), decimals),
                expected_purchase_price: round(result.expected_purchase_price(), decimals),
            }
        })
        .collect()
}

pub fn write_results<W: Write>(
    writer: W,
    results: &[ScenarioResult],
) -> Result<(), BatchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(result)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads `input`, evaluates it, and writes the results to `output`.
///
/// Returns the number of scenarios processed.
pub fn run<R: Read, W: Write>(
    input: R,
    output: W,
    config: &Config,
) -> Result<usize, BatchError> {
    let scenarios = read_scenarios(input, &config.defaults)?;
    let results = evaluate(
        &PricingEngine::new(),
        &scenarios,
        config.display.decimals,
        config.display.tsubo_decimals,
    );
    let resolved = results
        .iter()
        .filter(|r| r.type1_unit_price.is_some() || r.expected_purchase_price.is_some())
        .count();

    write_results(output, &results)?;
    info!(total = results.len(), resolved, "batch complete");
    Ok(results.len())
}

/// Convenience wrapper over [`run`] for a file on disk.
pub fn run_file<W: Write>(
    path: &Path,
    output: W,
    config: &Config,
) -> Result<usize, BatchError> {
    let file = File::open(path)?;
    run(file, output, config)
}
