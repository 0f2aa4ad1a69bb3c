//! Handler for `payoff optimize`.

use std::sync::Arc;

use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::info;

use super::command::OptimizeArgs;
use super::output;
use crate::adapter::outbound::solver::HiGHSSolver;
use crate::application::Optimizer;
use crate::domain::PayoffPlan;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load the scenario, apply overrides, solve and print the plan.
#[allow(clippy::result_large_err)]
pub fn execute(args: &OptimizeArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    apply_overrides(&mut config, args, output::verbosity());
    config.model.validate()?;
    config.init_logging();

    let portfolio = config.portfolio()?;
    let start = config.start_month()?;

    info!(
        loans = portfolio.loans().len(),
        budget = %portfolio.budget().amount(),
        start = %start,
        "Optimizing payment plan"
    );

    output::header(env!("CARGO_PKG_VERSION"));

    let optimizer = Optimizer::new(Arc::new(HiGHSSolver::new()), config.model);
    if output::verbosity() > 0 {
        output::field("Horizon limit", optimizer.params().max_months);
        output::field("Big-M", optimizer.params().big_m);
    }
    let pb = output::spinner("Solving payment plan");
    let plan = match optimizer.optimize(&portfolio, start) {
        Ok(plan) => {
            output::spinner_success(&pb, "Optimal plan found");
            plan
        }
        Err(e) => {
            output::spinner_fail(&pb, "No payoff plan");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_payload("plan", serde_json::to_value(&plan)?);
        return Ok(());
    }

    print_summary(&plan);
    if !args.summary_only {
        output::section("Schedule");
        output::lines(&schedule_table(&plan));
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &OptimizeArgs, verbosity: u8) {
    if let Some(level) = output::verbose_log_level(verbosity) {
        config.logging.level = level.into();
    }
    if let Some(budget) = args.budget {
        config.budget = Some(budget);
    }
    if let Some(max_months) = args.max_months {
        config.model.max_months = max_months;
    }
    if let Some(start) = &args.start {
        config.start = Some(start.clone());
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".into();
    }
}

fn print_summary(plan: &PayoffPlan) {
    let summary = &plan.summary;
    let (years, months) = summary.years_and_months();

    output::section("Summary");
    output::field("Total interest", output::money(summary.total_interest));
    output::field("Total paid", output::money(plan.total_paid()));
    output::field(
        "Payoff date",
        output::highlight(format!(
            "{}, {}",
            summary.payoff_month_name, summary.payoff_year
        )),
    );
    output::field("Months", summary.total_months);
    output::success(&format!(
        "Loans paid off in {} months ({years} years, {months} months)",
        summary.total_months
    ));
}

/// Render the schedule with one group of four columns per loan, then the
/// month's totals.
#[must_use]
pub fn schedule_table(plan: &PayoffPlan) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Year".to_string(), "Month".to_string()];
    for name in &plan.loan_names {
        header.push(format!("{name} balance"));
        header.push(format!("{name} interest"));
        header.push(format!("{name} payment"));
        header.push(format!("{name} remaining"));
    }
    header.push("Total payment".to_string());
    header.push("Total interest".to_string());
    builder.push_record(header);

    for row in &plan.schedule {
        let mut record = vec![row.year.to_string(), row.month_name.clone()];
        for cell in &row.per_loan {
            record.push(output::money(cell.balance_before));
            record.push(output::money(cell.interest));
            record.push(output::money(cell.payment));
            record.push(output::money(cell.balance_after));
        }
        record.push(output::money(row.total_payment()));
        record.push(output::money(row.total_interest()));
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoanMonth, PayoffSummary, ScheduleRow};
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn args() -> OptimizeArgs {
        OptimizeArgs {
            config: PathBuf::from("scenario.toml"),
            budget: Some(dec!(450)),
            max_months: Some(36),
            start: None,
            log_level: None,
            json_logs: false,
            summary_only: false,
        }
    }

    #[test]
    fn overrides_replace_scenario_values() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args(), 0);

        assert_eq!(config.budget, Some(dec!(450)));
        assert_eq!(config.model.max_months, 36);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn verbose_flag_raises_log_level_unless_set_explicitly() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args(), 1);
        assert_eq!(config.logging.level, "debug");

        let mut config = Config::default();
        let explicit = OptimizeArgs {
            log_level: Some("error".into()),
            ..args()
        };
        apply_overrides(&mut config, &explicit, 2);
        assert_eq!(config.logging.level, "error");
    }

    #[test]
    fn schedule_table_groups_columns_per_loan() {
        let plan = PayoffPlan {
            loan_names: vec!["Card".into()],
            summary: PayoffSummary {
                total_months: 1,
                total_interest: dec!(0),
                payoff_year: 2026,
                payoff_month: 10,
                payoff_month_name: "October".into(),
            },
            schedule: vec![ScheduleRow {
                month: 1,
                year: 2026,
                month_name: "October".into(),
                per_loan: vec![LoanMonth {
                    balance_before: dec!(1500),
                    interest: dec!(0),
                    payment: dec!(1500),
                    balance_after: dec!(0),
                }],
            }],
        };

        let table = schedule_table(&plan);

        assert!(table.contains("Card balance"));
        assert!(table.contains("Card remaining"));
        assert!(table.contains("Total interest"));
        assert!(table.contains("October"));
        assert!(table.contains("$1,500.00"));
    }
}
