//! Interest-minimizing payment planner.
//!
//! [`Optimizer::optimize`] runs the full pipeline for one request:
//!
//! 1. validate the model constants against the portfolio,
//! 2. grow the MILP month by month until the stopping rule fires
//!    ([`ModelBuilder`]),
//! 3. solve it with the configured [`Solver`],
//! 4. read the solution back into a [`PayoffPlan`].
//!
//! Each call builds an independent model, so one optimizer can serve
//! concurrent requests.

mod builder;
mod horizon;
mod params;
mod summary;

use std::sync::Arc;

use tracing::{info, warn};

pub use builder::{CellVars, LoanModel, ModelBuilder};
pub use horizon::{all_paid, AvalancheProjection, FixedHorizon, HorizonProbe};
pub use params::{
    ModelParams, BIG_M_HEADROOM, DEFAULT_BALANCE_WEIGHT, DEFAULT_BIG_M, DEFAULT_MAX_MONTHS,
    DEFAULT_TOLERANCE,
};
pub use summary::{build_schedule, payoff_summary, SolvedPlan};

use crate::domain::{money::from_solver, PayoffPlan, Portfolio, YearMonth};
use crate::error::{Error, Result};
use crate::port::Solver;

/// Builds, solves and summarizes payment plans.
#[derive(Clone)]
pub struct Optimizer {
    solver: Arc<dyn Solver>,
    params: ModelParams,
}

impl Optimizer {
    /// Create an optimizer with a solver backend and model constants.
    #[must_use]
    pub fn new(solver: Arc<dyn Solver>, params: ModelParams) -> Self {
        Self { solver, params }
    }

    /// Return the model constants.
    #[must_use]
    pub const fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Plan payments for `portfolio`, labelling the first month `start`.
    ///
    /// Horizon discovery uses an [`AvalancheProjection`].
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the model constants do not suit the portfolio.
    /// - [`Error::SolverFailure`] if the solver finds no optimal solution,
    ///   e.g. when the budget cannot cover the minimum payments.
    /// - [`Error::InfeasibleHorizon`] if balances remain after `max_months`.
    pub fn optimize(&self, portfolio: &Portfolio, start: YearMonth) -> Result<PayoffPlan> {
        let mut probe = AvalancheProjection::new(portfolio, self.params.tolerance);
        self.optimize_with(portfolio, start, &mut probe)
    }

    /// Plan payments using a custom stopping rule.
    ///
    /// # Errors
    ///
    /// Same as [`Optimizer::optimize`].
    pub fn optimize_with(
        &self,
        portfolio: &Portfolio,
        start: YearMonth,
        probe: &mut dyn HorizonProbe,
    ) -> Result<PayoffPlan> {
        self.params.validate_for(portfolio)?;

        let model = ModelBuilder::new(portfolio, &self.params).build(probe);
        let solution = self.solver.solve(model.problem())?;

        if !solution.is_optimal() {
            warn!(
                solver = self.solver.name(),
                status = %solution.status,
                horizon = model.horizon(),
                "Solver returned no optimal plan"
            );
            return Err(Error::SolverFailure {
                solver: self.solver.name(),
                status: solution.status,
            });
        }

        let plan = SolvedPlan::new(&model, &solution);
        if !plan.paid_off_after(model.horizon()) {
            return Err(Error::InfeasibleHorizon {
                horizon: model.horizon(),
                remaining: from_solver(plan.final_balance()),
            });
        }

        let summary = payoff_summary(&plan, start);
        let schedule = build_schedule(&plan, start);

        info!(
            months = summary.total_months,
            interest = %summary.total_interest,
            payoff = %format!("{} {}", summary.payoff_month_name, summary.payoff_year),
            "Plan optimized"
        );

        Ok(PayoffPlan {
            loan_names: portfolio
                .loans()
                .iter()
                .map(|loan| loan.name().to_string())
                .collect(),
            summary,
            schedule,
        })
    }
}
