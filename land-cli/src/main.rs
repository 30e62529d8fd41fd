use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use land_cli::app::{self, ForwardArgs, ReverseArgs};
use land_cli::batch;
use land_cli::config::Config;
use land_cli::logging;
use land_cli::session::Session;
use land_core::CalculationMode;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Land price calculator.
///
/// Converts a purchase price into per-tsubo unit prices, or projects an
/// expected purchase price from a target unit price.
#[derive(Debug, Parser)]
#[command(name = "land-pricing", version, about)]
struct Cli {
    /// Config file (defaults to `land-pricing.toml` when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `land_core=trace`. Overrides the config.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Purchase price to built-in and type-1 unit prices.
    Forward {
        /// Purchase price, e.g. `5,000`.
        #[arg(long, allow_hyphen_values = true)]
        price: String,

        /// Land area in square meters.
        #[arg(long, allow_hyphen_values = true)]
        area: String,

        /// Floor-area ratio in percent, e.g. `200`.
        #[arg(long, allow_hyphen_values = true)]
        ratio: String,
    },

    /// Type-1 unit price to expected purchase price.
    Reverse {
        /// Type-1 unit price per tsubo.
        #[arg(long, allow_hyphen_values = true)]
        unit_price: String,

        /// Land area in square meters.
        #[arg(long, allow_hyphen_values = true)]
        area: String,

        /// Floor-area ratio in percent.
        #[arg(long, allow_hyphen_values = true)]
        ratio: String,

        /// Bid rate between 0.5 and 1.0; values outside are clamped.
        #[arg(long, allow_hyphen_values = true)]
        bid_rate: Option<f64>,

        /// Transaction expenses added to the price.
        #[arg(long, allow_hyphen_values = true)]
        expenses: Option<String>,
    },

    /// Evaluate every scenario in a CSV file.
    Batch {
        /// Input CSV file.
        #[arg(short, long)]
        file: PathBuf,

        /// Output CSV file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive session reading commands from stdin.
    Session,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    logging::init_logging(level, cli.log_file.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Forward { price, area, ratio } => {
            let inputs = ForwardArgs { price, area, ratio }.to_inputs();
            println!("{}", app::calculate(&inputs, CalculationMode::Forward, &config));
        }
        Command::Reverse {
            unit_price,
            area,
            ratio,
            bid_rate,
            expenses,
        } => {
            let args = ReverseArgs {
                unit_price,
                area,
                ratio,
                bid_rate,
                expenses,
            };
            let inputs = args.to_inputs(&config);
            println!("{}", app::calculate(&inputs, CalculationMode::Reverse, &config));
        }
        Command::Batch { file, output } => {
            let count = match output {
                Some(path) => {
                    let out = File::create(&path)
                        .with_context(|| format!("cannot create {}", path.display()))?;
                    batch::run_file(&file, BufWriter::new(out), &config)
                }
                None => batch::run_file(&file, io::stdout().lock(), &config),
            }
            .with_context(|| format!("batch evaluation of {} failed", file.display()))?;
            info!(count, "scenarios evaluated");
        }
        Command::Session => {
            let mut session = Session::new(config.defaults.clone(), config.display.clone());
            session
                .run(io::stdin().lock(), io::stdout().lock())
                .context("session I/O failed")?;
        }
    }

    Ok(())
}
