//! Handler for `payoff check`.

use std::path::Path;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::Loan;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct LoanRow {
    #[tabled(rename = "Loan")]
    name: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "APR")]
    apr: String,
    #[tabled(rename = "Minimum")]
    min_payment: String,
    #[tabled(rename = "Deferred")]
    deferment: u32,
}

impl From<&Loan> for LoanRow {
    fn from(loan: &Loan) -> Self {
        Self {
            name: loan.name().to_string(),
            balance: output::money(loan.initial_balance()),
            apr: format!("{:.2}%", loan.apr() * rust_decimal::Decimal::ONE_HUNDRED),
            min_payment: output::money(loan.min_payment()),
            deferment: loan.deferment_months(),
        }
    }
}

/// Validate a scenario file without solving it.
#[allow(clippy::result_large_err)]
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::header(env!("CARGO_PKG_VERSION"));
    output::note(&format!("Checking scenario: {}", path.display()));

    let mut config = Config::load(path)?;
    if let Some(level) = output::verbose_log_level(output::verbosity()) {
        config.logging.level = level.into();
    }
    config.init_logging();
    let portfolio = config.portfolio()?;
    config.model.validate_for(&portfolio)?;
    let start = config.start_month()?;

    output::success("Scenario is valid");

    output::section("Summary");
    output::field("Loans", portfolio.loans().len());
    output::field("Budget", output::money(portfolio.budget().amount()));
    output::field("Total balance", output::money(portfolio.total_balance()));
    output::field("Minimums", output::money(portfolio.total_min_payment()));
    output::field("Start", start);
    output::field("Max months", config.model.max_months);
    output::field("Big-M", config.model.big_m);
    output::field("Tolerance", config.model.tolerance);
    if output::verbosity() > 0 {
        output::field("Balance weight", config.model.balance_weight);
    }

    if !output::is_json() {
        let rows: Vec<LoanRow> = portfolio.loans().iter().map(LoanRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output::section("Loans");
        output::lines(&table.to_string());
    }

    if portfolio.budget().amount() < portfolio.total_min_payment() {
        output::warning("Budget is below the sum of minimum payments; no plan will be feasible");
        output::hint("raise `budget` or pass --budget to `payoff optimize`");
    }

    for loan in portfolio.loans().iter().filter(|l| l.min_payment_exceeds_owed()) {
        output::warning(&format!(
            "{} owes {} but its minimum payment is {}; no plan will be feasible",
            loan.name(),
            output::money(loan.first_month_owed()),
            output::money(loan.min_payment()),
        ));
    }

    Ok(())
}
