//! Incremental construction of the payment MILP.
//!
//! Month 0 holds each loan's opening balance as a constant. For every month
//! `T >= 1` and loan `i` the builder declares:
//!
//! ```text
//! B[T,i] >= 0                      ending balance
//! p[T,i] >= 0                      payment
//! z[T,i] in {0, 1}                 loan still active entering T
//! I[T,i] = 0                       while T <= deferment_i
//!        = (apr_i / 12) * B[T-1,i] afterwards (an expression, not a variable)
//! ```
//!
//! and links them with:
//!
//! ```text
//! p[T,i] <= B[T-1,i] + I[T,i]
//! B[T,i]  = B[T-1,i] + I[T,i] - p[T,i]
//! B[T-1,i] - eps >= -M * (1 - z[T,i])
//! B[T-1,i] - eps <=  M * z[T,i]
//! p[T,i] >= min_i * z[T,i]
//! sum_i p[T,i] <= budget
//! ```
//!
//! `M` is the configured big-M, raised for any row where the loan's balance
//! could have compounded past it, so an unpayable loan leaves the model
//! feasible with a positive final balance.
//!
//! The objective minimizes total interest, plus a negligible weight on
//! ending balances so zero-rate loans are still retired.

use tracing::{debug, warn};

use super::horizon::{all_paid, HorizonProbe};
use super::params::ModelParams;
use crate::domain::{money::to_solver, Constraint, LinearExpr, Portfolio, VarId};
use crate::port::MilpProblem;

/// Decision variables and the interest expression of one `(month, loan)` cell.
#[derive(Debug, Clone)]
pub struct CellVars {
    /// Ending balance `B[T,i]`.
    pub balance: VarId,
    /// Payment `p[T,i]`.
    pub payment: VarId,
    /// Activation binary `z[T,i]`.
    pub active: VarId,
    /// Interest accrued `I[T,i]`.
    pub interest: LinearExpr,
}

/// A fully built payment model and its variable layout.
#[derive(Debug, Clone)]
pub struct LoanModel {
    problem: MilpProblem,
    opening: Vec<f64>,
    cells: Vec<Vec<CellVars>>,
    reached_payoff: bool,
    tolerance: f64,
}

impl LoanModel {
    /// The problem handed to the solver.
    #[must_use]
    pub const fn problem(&self) -> &MilpProblem {
        &self.problem
    }

    /// Number of months modelled.
    #[must_use]
    pub fn horizon(&self) -> u32 {
        self.cells.len() as u32
    }

    /// Number of loans per month.
    #[must_use]
    pub fn num_loans(&self) -> usize {
        self.opening.len()
    }

    /// Whether the stopping rule fired before `max_months`.
    #[must_use]
    pub const fn reached_payoff(&self) -> bool {
        self.reached_payoff
    }

    /// Paid-off threshold used while building.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Variables of month `month` (1-based) for loan `loan`.
    ///
    /// # Panics
    ///
    /// Panics if `month` is 0 or beyond the horizon, or `loan` is out of range.
    #[must_use]
    pub fn cell(&self, month: u32, loan: usize) -> &CellVars {
        &self.cells[month as usize - 1][loan]
    }

    /// Ending balance of `month` as an expression; month 0 is the constant
    /// opening balance.
    #[must_use]
    pub fn balance_after(&self, month: u32, loan: usize) -> LinearExpr {
        if month == 0 {
            LinearExpr::constant(self.opening[loan])
        } else {
            LinearExpr::var(self.cell(month, loan).balance)
        }
    }
}

/// Grows a [`LoanModel`] one month at a time until the stopping rule fires.
pub struct ModelBuilder<'a> {
    portfolio: &'a Portfolio,
    params: &'a ModelParams,
}

impl<'a> ModelBuilder<'a> {
    /// Create a builder for one portfolio. Inputs are assumed validated.
    #[must_use]
    pub const fn new(portfolio: &'a Portfolio, params: &'a ModelParams) -> Self {
        Self { portfolio, params }
    }

    /// Build the model, consulting `probe` after each month.
    ///
    /// After month `T`'s constraints are added, the horizon stops at `T` when
    /// `T > 1` and the probe reports every balance after month `T - 1` paid
    /// off. Otherwise it grows until `max_months`.
    pub fn build(&self, probe: &mut dyn HorizonProbe) -> LoanModel {
        let opening: Vec<f64> = self
            .portfolio
            .loans()
            .iter()
            .map(|loan| to_solver(loan.initial_balance()))
            .collect();

        let mut model = LoanModel {
            problem: MilpProblem::new(),
            opening,
            cells: Vec::new(),
            reached_payoff: false,
            tolerance: self.params.tolerance,
        };

        // Upper bound on each loan's balance entering the next month: it can
        // grow by at most its interest when nothing is paid.
        let mut ceilings = model.opening.clone();

        for month in 1..=self.params.max_months {
            self.add_month(&mut model, month, &mut ceilings);

            if month > 1 && all_paid(probe.balances_after(month - 1), self.params.tolerance) {
                model.reached_payoff = true;
                debug!(horizon = month, "Stopping rule fired");
                break;
            }
        }

        if !model.reached_payoff {
            warn!(
                max_months = self.params.max_months,
                "Horizon exhausted before projected payoff"
            );
        }

        model.problem.set_objective(self.objective(&model));

        debug!(
            horizon = model.horizon(),
            variables = model.problem.num_vars(),
            constraints = model.problem.constraints().len(),
            "Model built"
        );

        model
    }

    fn add_month(&self, model: &mut LoanModel, month: u32, ceilings: &mut [f64]) {
        let eps = self.params.tolerance;
        let mut row = Vec::with_capacity(model.num_loans());

        for (i, loan) in self.portfolio.loans().iter().enumerate() {
            let prev = model.balance_after(month - 1, i);
            let problem = &mut model.problem;
            let big_m = self.params.big_m.max(ceilings[i]);
            if loan.accrues_in(month) {
                ceilings[i] *= 1.0 + loan.monthly_rate();
            }

            let balance = problem.add_continuous(format!("B_{month}_{i}"));
            let payment = problem.add_continuous(format!("p_{month}_{i}"));
            let active = problem.add_binary(format!("z_{month}_{i}"));

            let interest = if loan.accrues_in(month) {
                prev.clone() * loan.monthly_rate()
            } else {
                LinearExpr::zero()
            };

            // Cannot pay more than is owed
            problem.add_constraint(Constraint::leq(payment, prev.clone() + interest.clone()));

            // Balance recurrence
            problem.add_constraint(Constraint::eq(
                balance,
                prev.clone() + interest.clone() - LinearExpr::var(payment),
            ));

            // z = 1 whenever the entering balance exceeds eps
            problem.add_constraint(Constraint::geq(
                prev.clone() - LinearExpr::constant(eps),
                LinearExpr::var(active) * big_m - LinearExpr::constant(big_m),
            ));
            problem.add_constraint(Constraint::leq(
                prev - LinearExpr::constant(eps),
                LinearExpr::var(active) * big_m,
            ));

            // Minimum payment only while active
            problem.add_constraint(Constraint::geq(
                payment,
                LinearExpr::var(active) * to_solver(loan.min_payment()),
            ));

            row.push(CellVars {
                balance,
                payment,
                active,
                interest,
            });
        }

        let total_paid = row
            .iter()
            .fold(LinearExpr::zero(), |acc, c| acc + LinearExpr::var(c.payment));
        model.problem.add_constraint(Constraint::leq(
            total_paid,
            to_solver(self.portfolio.budget().amount()),
        ));

        model.cells.push(row);
    }

    fn objective(&self, model: &LoanModel) -> LinearExpr {
        let weight = self.params.balance_weight;
        model
            .cells
            .iter()
            .flatten()
            .fold(LinearExpr::zero(), |acc, cell| {
                acc + cell.interest.clone() + LinearExpr::var(cell.balance) * weight
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::planner::horizon::FixedHorizon;
    use crate::domain::{Budget, ConstraintSense, Loan, VariableKind};
    use rust_decimal_macros::dec;

    fn two_loans() -> Portfolio {
        Portfolio::try_new(
            vec![
                Loan::try_new("a", dec!(1000), dec!(0.12), dec!(25), 0).unwrap(),
                Loan::try_new("b", dec!(500), dec!(0.06), dec!(10), 3).unwrap(),
            ],
            Budget::try_new(dec!(300)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn horizon_stops_one_month_after_probe_payoff() {
        let portfolio = two_loans();
        let params = ModelParams::default();
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::new(4, 2));

        assert_eq!(model.horizon(), 5);
        assert!(model.reached_payoff());
    }

    #[test]
    fn horizon_never_stops_at_month_one() {
        let portfolio = two_loans();
        let params = ModelParams::default();
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::new(0, 2));

        assert_eq!(model.horizon(), 2);
    }

    #[test]
    fn horizon_truncates_at_max_months() {
        let portfolio = two_loans();
        let params = ModelParams {
            max_months: 12,
            ..ModelParams::default()
        };
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::never(2));

        assert_eq!(model.horizon(), 12);
        assert!(!model.reached_payoff());
    }

    #[test]
    fn each_month_declares_three_variables_per_loan() {
        let portfolio = two_loans();
        let params = ModelParams::default();
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::new(2, 2));
        let problem = model.problem();

        assert_eq!(model.horizon(), 3);
        assert_eq!(problem.num_vars(), 3 * 2 * 3);
        assert_eq!(problem.num_binaries(), 3 * 2);
        // five per cell plus one budget row per month
        assert_eq!(problem.constraints().len(), 3 * (2 * 5 + 1));
        assert_eq!(
            problem.variables()[model.cell(2, 1).active.index()].kind,
            VariableKind::Binary
        );
    }

    #[test]
    fn deferred_months_have_zero_interest() {
        let portfolio = two_loans();
        let params = ModelParams::default();
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::new(5, 2));

        for month in 1..=3 {
            assert!(model.cell(month, 1).interest.is_constant());
            assert_eq!(model.cell(month, 1).interest.offset(), 0.0);
        }
        assert!(!model.cell(4, 1).interest.is_constant());
    }

    #[test]
    fn first_month_interest_is_constant_on_opening_balance() {
        let portfolio = two_loans();
        let params = ModelParams::default();
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::new(2, 2));

        let interest = &model.cell(1, 0).interest;
        assert!(interest.is_constant());
        assert!((interest.offset() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn budget_row_sums_payments() {
        let portfolio = two_loans();
        let params = ModelParams::default();
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::new(2, 2));

        let budget_row = &model.problem().constraints()[10];
        assert_eq!(budget_row.sense, ConstraintSense::LessEqual);
        assert_eq!(
            budget_row.terms,
            vec![(model.cell(1, 0).payment, 1.0), (model.cell(1, 1).payment, 1.0)]
        );
        assert!((budget_row.rhs - 300.0).abs() < 1e-9);
    }

    #[test]
    fn activation_rows_grow_with_compounding_balance() {
        // Minimum below the monthly interest: the balance compounds.
        let portfolio = Portfolio::try_new(
            vec![Loan::try_new("a", dec!(20000), dec!(0.24), dec!(100), 0).unwrap()],
            Budget::try_new(dec!(100)).unwrap(),
        )
        .unwrap();
        let params = ModelParams::default();
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::never(1));
        let constraints = model.problem().constraints();

        // Rows per month: ceiling, recurrence, big-M >=, big-M <=, floor, budget.
        let active_coeff = |month: u32| {
            let active = model.cell(month, 0).active;
            constraints[(month as usize - 1) * 6 + 3]
                .terms
                .iter()
                .find(|(id, _)| *id == active)
                .map(|(_, c)| -c)
                .unwrap()
        };

        assert_eq!(active_coeff(1), params.big_m);
        let ceiling = 20000.0 * 1.02_f64.powi(239);
        assert!(ceiling > params.big_m);
        assert!((active_coeff(240) - ceiling).abs() / ceiling < 1e-9);
    }

    #[test]
    fn amortized_assignment_satisfies_every_constraint() {
        // One loan, no minimum: pay 200 a month until clear.
        let portfolio = Portfolio::try_new(
            vec![Loan::try_new("a", dec!(1200), dec!(0.12), dec!(0), 0).unwrap()],
            Budget::try_new(dec!(200)).unwrap(),
        )
        .unwrap();
        let params = ModelParams::default();
        let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::new(7, 1));

        let mut values = vec![0.0; model.problem().num_vars()];
        let mut balance: f64 = 1200.0;
        for month in 1..=model.horizon() {
            let cell = model.cell(month, 0);
            let owed = balance * 1.01;
            let payment = owed.min(200.0);
            values[cell.payment.index()] = payment;
            values[cell.active.index()] = if balance > 0.01 { 1.0 } else { 0.0 };
            balance = owed - payment;
            values[cell.balance.index()] = balance;
        }

        for constraint in model.problem().constraints() {
            assert!(constraint.is_satisfied(&values, 1e-6), "{constraint:?}");
        }
    }
}
