//! Scenario configuration loading and validation.
//!
//! A scenario file describes one planning request: the monthly budget, the
//! loans, optional model constants and logging. The budget can be
//! overridden with the `PAYOFF_BUDGET` environment variable.
//!
//! ```toml
//! budget = 850.0
//! start = "2026-11"
//!
//! [[loans]]
//! name = "Subsidized"
//! balance = 5500.0
//! apr = 0.0373
//! min_payment = 55.0
//! deferment_months = 6
//!
//! [model]
//! max_months = 240
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use payoff::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("scenario.toml")?;
//!     let portfolio = config.portfolio()?;
//!     println!("{} loans", portfolio.loans().len());
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::ModelParams;
use crate::domain::{Budget, Loan, Portfolio, YearMonth};
use crate::error::{ConfigError, Result};

/// Environment variable overriding the scenario budget.
pub const BUDGET_ENV: &str = "PAYOFF_BUDGET";

/// One loan entry in the scenario file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoanConfig {
    /// Display label. Defaults to `Loan N`.
    #[serde(default)]
    pub name: Option<String>,

    /// Current balance.
    pub balance: Decimal,

    /// Annual rate as a fraction (0.065 = 6.5%).
    #[serde(default)]
    pub apr: Decimal,

    /// Minimum payment while the loan carries a balance.
    #[serde(default)]
    pub min_payment: Decimal,

    /// Leading months without interest.
    #[serde(default)]
    pub deferment_months: u32,
}

/// Main scenario configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Maximum total payment per month.
    #[serde(default)]
    pub budget: Option<Decimal>,

    /// First month of the plan as `YYYY-MM`. Defaults to the current month.
    #[serde(default)]
    pub start: Option<String>,

    /// Loans to plan, in display order.
    #[serde(default)]
    pub loans: Vec<LoanConfig>,

    /// Model constants (horizon bound, big-M, tolerance).
    #[serde(default)]
    pub model: ModelParams,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `PAYOFF_BUDGET` override when set.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - The budget override is not a number
    /// - Validation fails (no loans, bad start month, bad constants)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(raw) = std::env::var(BUDGET_ENV) {
            let budget = Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidValue {
                field: "PAYOFF_BUDGET",
                reason: e.to_string(),
            })?;
            config.budget = Some(budget);
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Config::parse_toml`]
    /// fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// The budget may still be supplied on the command line, and loan values
    /// are checked by the domain constructors so that their errors name the
    /// offending loan; both are resolved in [`Config::portfolio`].
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.loans.is_empty() {
            return Err(ConfigError::MissingField { field: "loans" }.into());
        }
        self.start_month()?;
        self.model.validate()?;
        Ok(())
    }

    /// The configured first month, or the current month.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `start` is not `YYYY-MM`.
    #[allow(clippy::result_large_err)]
    pub fn start_month(&self) -> Result<YearMonth> {
        match &self.start {
            Some(raw) => YearMonth::from_str(raw).map_err(|reason| {
                ConfigError::InvalidValue {
                    field: "start",
                    reason,
                }
                .into()
            }),
            None => Ok(YearMonth::current()),
        }
    }

    /// Build the validated loan portfolio.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if a loan or the budget violates a
    /// domain invariant, or `ConfigError::MissingField` without a budget.
    #[allow(clippy::result_large_err)]
    pub fn portfolio(&self) -> Result<Portfolio> {
        let budget = self
            .budget
            .ok_or(ConfigError::MissingField { field: "budget" })?;

        let loans = self
            .loans
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let name = entry
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Loan {}", i + 1));
                Loan::try_new(
                    name,
                    entry.balance,
                    entry.apr,
                    entry.min_payment,
                    entry.deferment_months,
                )
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Portfolio::try_new(loans, Budget::try_new(budget)?)?)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    const SCENARIO: &str = r#"
budget = 600.0
start = "2026-11"

[[loans]]
name = "Card"
balance = 3000.0
apr = 0.2299
min_payment = 75.0

[[loans]]
balance = 8000
apr = 0.045
min_payment = 90
deferment_months = 4
"#;

    #[test]
    fn parses_scenario() {
        let config = Config::parse_toml(SCENARIO).unwrap();

        assert_eq!(config.budget, Some(dec!(600.0)));
        assert_eq!(config.start_month().unwrap(), YearMonth::new(2026, 11));
        assert_eq!(config.loans.len(), 2);
        assert_eq!(config.loans[1].deferment_months, 4);
        assert_eq!(config.model, ModelParams::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn portfolio_names_unlabelled_loans() {
        let portfolio = Config::parse_toml(SCENARIO).unwrap().portfolio().unwrap();

        assert_eq!(portfolio.loans()[0].name(), "Card");
        assert_eq!(portfolio.loans()[1].name(), "Loan 2");
        assert_eq!(portfolio.budget().amount(), dec!(600));
    }

    #[test]
    fn rejects_missing_loans() {
        let result = Config::parse_toml("budget = 100\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "loans" }))
        ));
    }

    #[test]
    fn missing_budget_fails_at_portfolio() {
        let config = Config::parse_toml("[[loans]]\nbalance = 10\n").unwrap();
        assert!(matches!(
            config.portfolio(),
            Err(Error::Config(ConfigError::MissingField { field: "budget" }))
        ));
    }

    #[test]
    fn rejects_bad_start() {
        let toml = "budget = 100\nstart = \"soon\"\n[[loans]]\nbalance = 10\n";
        assert!(matches!(
            Config::parse_toml(toml),
            Err(Error::Config(ConfigError::InvalidValue { field: "start", .. }))
        ));
    }

    #[test]
    fn model_section_overrides_defaults() {
        let toml = "budget = 100\n[[loans]]\nbalance = 10\n[model]\nmax_months = 36\ntolerance = 0.005\n";
        let config = Config::parse_toml(toml).unwrap();

        assert_eq!(config.model.max_months, 36);
        assert_eq!(config.model.tolerance, 0.005);
        assert_eq!(config.model.big_m, 1_000_000.0);
    }

    #[test]
    fn negative_balance_is_invalid_input() {
        let toml = "budget = 100\n[[loans]]\nname = \"x\"\nbalance = -10\n";
        let result = Config::parse_toml(toml).unwrap().portfolio();

        assert!(matches!(
            result,
            Err(Error::InvalidInput(DomainError::NegativeBalance { .. }))
        ));
    }
}
