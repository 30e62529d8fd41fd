//! Interactive calculator session.
//!
//! The session owns the typed inputs and the active mode. After every
//! command that changes either, the result is computed again from scratch
//! and printed, the same way a form recalculates on each keystroke.

use std::io::{BufRead, Write};
use std::str::FromStr;

use land_core::calculations::{format_with_separators, parse_leading_number};
use land_core::{
    BidRate, CalculationMode, CalculationResult, InputField, ParseModeError, PricingEngine,
    RawInputs,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{DefaultsConfig, DisplayConfig};
use crate::display::ResultPanel;
use crate::logging;

pub const HELP: &str = "\
Commands:
  price <amount>      purchase price (forward)
  unit <amount>       type-1 unit price per tsubo (reverse)
  area <m2>           land area in square meters
  ratio <percent>     floor-area ratio, e.g. 200
  expenses <amount>   transaction expenses (reverse)
  bid <rate>          bid rate between 0.5 and 1.0 (reverse)
  mode <forward|reverse>
  toggle              switch calculation direction
  format              add thousands separators to typed amounts
  clear               reset all inputs
  show                print the current result
  log <level>         change the log filter
  help                show this list
  quit                leave the session";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{0}' needs a value")]
    MissingValue(&'static str),

    #[error(transparent)]
    Mode(#[from] ParseModeError),

    #[error("bid rate '{0}' is not a number, keeping the current rate")]
    InvalidBidRate(String),

    #[error("cannot change log level: {0}")]
    Logging(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the text of a field. Empty text clears it.
    Set(InputField, String),
    Bid(String),
    Mode(CalculationMode),
    Toggle,
    Format,
    Clear,
    Show,
    Log(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let set = |field: InputField| -> Result<Command, SessionError> {
            Ok(Command::Set(field, rest.to_string()))
        };
        let required = |name: &'static str| -> Result<String, SessionError> {
            if rest.is_empty() {
                Err(SessionError::MissingValue(name))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "price" => set(InputField::PurchasePrice),
            "unit" => set(InputField::UnitPrice),
            "area" => set(InputField::AreaSqMeters),
            "ratio" => set(InputField::FloorAreaRatioPercent),
            "expenses" => set(InputField::Expenses),
            "bid" => required("bid").map(Command::Bid),
            "mode" => Ok(Command::Mode(required("mode")?.parse()?)),
            "toggle" => Ok(Command::Toggle),
            "format" => Ok(Command::Format),
            "clear" => Ok(Command::Clear),
            "show" | "" => Ok(Command::Show),
            "log" => required("log").map(Command::Log),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(SessionError::UnknownCommand(other.to_string())),
        }
    }
}

/// What the session wants printed after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The freshly computed result panel.
    Result(String),
    Message(String),
    Quit,
}

pub struct Session {
    engine: PricingEngine,
    inputs: RawInputs,
    mode: CalculationMode,
    defaults: DefaultsConfig,
    display: DisplayConfig,
}

impl Session {
    pub fn new(
        defaults: DefaultsConfig,
        display: DisplayConfig,
    ) -> Self {
        Self {
            engine: PricingEngine::new(),
            inputs: Self::initial_inputs(&defaults),
            mode: defaults.mode,
            defaults,
            display,
        }
    }

    fn initial_inputs(defaults: &DefaultsConfig) -> RawInputs {
        RawInputs {
            bid_rate: defaults.bid_rate,
            expenses: defaults.expenses.clone(),
            ..Default::default()
        }
    }

    pub fn inputs(&self) -> &RawInputs {
        &self.inputs
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    /// Computes the result for the current inputs. Nothing is cached.
    pub fn result(&self) -> CalculationResult {
        self.engine.compute(&self.inputs, self.mode)
    }

    pub fn render(&self) -> String {
        let result = self.result();
        ResultPanel::new(&result, &self.inputs, &self.display).to_string()
    }

    pub fn execute(
        &mut self,
        line: &str,
    ) -> Result<Reply, SessionError> {
        self.apply(line.parse()?)
    }

    pub fn apply(
        &mut self,
        command: Command,
    ) -> Result<Reply, SessionError> {
        debug!(?command, "session command");
        match command {
            Command::Set(field, text) => self.inputs.set_field(field, text),
            Command::Bid(text) => {
                let rate = BidRate::parse(&text)
                    .ok_or_else(|| SessionError::InvalidBidRate(text.clone()))?;
                if parse_leading_number(&text) != Some(rate.value()) {
                    warn!(input = %text, clamped = rate.value(), "bid rate out of range, clamped");
                }
                self.inputs.bid_rate = rate;
            }
            Command::Mode(mode) => self.mode = mode,
            Command::Toggle => self.mode = self.mode.toggled(),
            Command::Format => self.format_fields(),
            Command::Clear => self.inputs = Self::initial_inputs(&self.defaults),
            Command::Show => {}
            Command::Log(level) => {
                logging::set_log_level(&level).map_err(|e| SessionError::Logging(e.to_string()))?;
                return Ok(Reply::Message(format!("log level set to '{level}'")));
            }
            Command::Help => return Ok(Reply::Message(HELP.to_string())),
            Command::Quit => return Ok(Reply::Quit),
        }
        Ok(Reply::Result(self.render()))
    }

    /// Rewrites every non-empty field with thousands separators.
    fn format_fields(&mut self) {
        for field in InputField::ALL {
            let text = self.inputs.field(field);
            if text.trim().is_empty() {
                continue;
            }
            let formatted = parse_leading_number(text)
                .map(format_with_separators)
                .unwrap_or_default();
            self.inputs.set_field(field, formatted);
        }
    }

    /// Reads commands line by line until `quit` or end of input.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily so a stray byte
    /// only affects its own command.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> std::io::Result<()> {
        writeln!(output, "{}", self.render())?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            match self.execute(line) {
                Ok(Reply::Result(panel)) => writeln!(output, "{panel}")?,
                Ok(Reply::Message(message)) => writeln!(output, "{message}")?,
                Ok(Reply::Quit) => break,
                Err(err) => writeln!(output, "error: {err}")?,
            }
            output.flush()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn session() -> Session {
        Session::new(DefaultsConfig::default(), DisplayConfig::default())
    }

    // =========================================================================
    // Command parsing
    // =========================================================================

    #[test]
    fn parses_field_commands_with_spaces_in_value() {
        assert_eq!(
            "price  5,000 ".parse::<Command>(),
            Ok(Command::Set(InputField::PurchasePrice, "5,000".to_string()))
        );
        assert_eq!(
            "AREA 100".parse::<Command>(),
            Ok(Command::Set(InputField::AreaSqMeters, "100".into()))
        );
    }

    #[test]
    fn field_command_without_value_clears() {
        assert_eq!(
            "ratio".parse::<Command>(),
            Ok(Command::Set(InputField::FloorAreaRatioPercent, String::new()))
        );
    }

    #[test]
    fn parses_mode_and_reports_bad_mode() {
        assert_eq!("mode reverse".parse::<Command>(), Ok(Command::Mode(CalculationMode::Reverse)));
        assert!(matches!("mode up".parse::<Command>(), Err(SessionError::Mode(_))));
        assert_eq!("mode".parse::<Command>(), Err(SessionError::MissingValue("mode")));
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert_eq!(
            "launch".parse::<Command>(),
            Err(SessionError::UnknownCommand("launch".to_string()))
        );
    }

    // =========================================================================
    // Recalculation
    // =========================================================================

    #[test]
    fn each_change_recomputes() {
        let mut session = session();

        session.execute("price 5000").unwrap();
        session.execute("area 100").unwrap();
        assert!(!session.result().is_resolved());

        let reply = session.execute("ratio 200").unwrap();

        assert!(session.result().is_resolved());
        match reply {
            Reply::Result(panel) => {
                assert!(panel.contains("Type-1 unit price: 82.64 万円/tsubo"))
            }
            other => panic!("expected a result, got {other:?}"),
        }
    }

    #[test]
    fn toggle_keeps_shared_fields() {
        let mut session = session();
        session.execute("area 100").unwrap();
        session.execute("ratio 200").unwrap();
        session.execute("unit 80").unwrap();

        session.execute("toggle").unwrap();

        assert_eq!(session.mode(), CalculationMode::Reverse);
        assert_eq!(session.inputs().area_sq_meters, "100");
        assert_eq!(session.inputs().floor_area_ratio_percent, "200");
        assert!(session.result().expected_purchase_price().is_some());

        session.execute("toggle").unwrap();
        assert_eq!(session.mode(), CalculationMode::Forward);
        assert_eq!(session.inputs().unit_price, "80");
    }

    #[test]
    fn bid_rate_text_is_clamped() {
        let mut session = session();

        session.execute("bid 0.3").unwrap();
        assert_eq!(session.inputs().bid_rate.value(), 0.5);

        session.execute("bid 0.85").unwrap();
        assert_eq!(session.inputs().bid_rate.value(), 0.85);
    }

    #[test]
    fn invalid_bid_rate_keeps_previous_value() {
        let mut session = session();
        session.execute("bid 0.7").unwrap();

        let err = session.execute("bid lots").unwrap_err();

        assert_eq!(err, SessionError::InvalidBidRate("lots".to_string()));
        assert_eq!(session.inputs().bid_rate.value(), 0.7);
    }

    #[test]
    fn format_adds_separators_without_changing_values() {
        let mut session = session();
        session.execute("price 12345678.5").unwrap();
        session.execute("area 1000").unwrap();
        session.execute("ratio 200").unwrap();
        let before = session.result();

        session.execute("format").unwrap();

        assert_eq!(session.inputs().purchase_price, "12,345,678.5");
        assert_eq!(session.inputs().area_sq_meters, "1,000");
        assert_eq!(session.inputs().unit_price, "");
        assert_eq!(session.result(), before);
    }

    #[test]
    fn clear_restores_defaults() {
        let defaults = DefaultsConfig {
            mode: CalculationMode::Reverse,
            bid_rate: BidRate::new(0.9),
            expenses: "100".to_string(),
        };
        let mut session = Session::new(defaults, DisplayConfig::default());
        session.execute("expenses 300").unwrap();
        session.execute("bid 0.6").unwrap();

        session.execute("clear").unwrap();

        assert_eq!(session.inputs().expenses, "100");
        assert_eq!(session.inputs().bid_rate, BidRate::new(0.9));
        assert_eq!(session.mode(), CalculationMode::Reverse);
    }

    #[test]
    fn run_prints_panels_and_errors_until_quit() {
        let mut session = session();
        let input = "price 5000\nbogus\nquit\nprice 1\n";
        let mut output = Vec::new();

        session.run(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("5000 万円 ÷ 0.00 tsubo = built-in unit price"));
        assert!(text.contains("error: unknown command 'bogus'"));
        assert_eq!(session.inputs().purchase_price, "5000");
    }

    #[test]
    fn run_keeps_going_after_a_line_that_is_not_utf8() {
        let mut session = session();
        let input: &[u8] = b"price 5000\nar\xffea 1\r\narea 100\nratio 200\n";
        let mut output = Vec::<u8>::new();

        session.run(input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("error: unknown command"));
        assert_eq!(session.inputs().area_sq_meters, "100");
        assert_eq!(session.inputs().floor_area_ratio_percent, "200");
        assert!(session.result().is_resolved());
    }
}
