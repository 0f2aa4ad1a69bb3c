//! Build-and-solve helpers and plan invariant checks.

use crate::adapter::outbound::solver::HiGHSSolver;
use crate::application::planner::{AvalancheProjection, LoanModel, ModelBuilder, SolvedPlan};
use crate::application::ModelParams;
use crate::domain::{money::to_solver, Portfolio};
use crate::port::{Solution, Solver};

/// Slack allowed when comparing solved values.
pub const SOLVED_TOLERANCE: f64 = 1e-5;

/// Build the model for `portfolio` with the default stopping rule and solve
/// it with HiGHS.
pub fn solve(portfolio: &Portfolio, params: &ModelParams) -> (LoanModel, Solution) {
    let mut probe = AvalancheProjection::new(portfolio, params.tolerance);
    let model = ModelBuilder::new(portfolio, params).build(&mut probe);
    let solution = HiGHSSolver::new()
        .solve(model.problem())
        .expect("solver invoked");
    (model, solution)
}

/// Assert the structural properties every solved plan must satisfy:
/// non-negative balances, the balance recurrence, zero interest while
/// deferred, the monthly budget, and minimum payments while active.
pub fn assert_plan_invariants(plan: &SolvedPlan<'_>, portfolio: &Portfolio) {
    let model = plan.model();
    let eps = model.tolerance();
    let budget = to_solver(portfolio.budget().amount());

    for month in 1..=model.horizon() {
        let mut paid = 0.0;
        for (i, loan) in portfolio.loans().iter().enumerate() {
            let before = plan.balance_before(month, i);
            let after = plan.balance_after(month, i);
            let interest = plan.interest(month, i);
            let payment = plan.payment(month, i);
            paid += payment;

            assert!(
                after >= -SOLVED_TOLERANCE,
                "negative balance {after} in month {month} for loan {i}"
            );
            assert!(
                (after - (before + interest - payment)).abs() < 1e-4,
                "recurrence broken in month {month} for loan {i}"
            );
            if !loan.accrues_in(month) {
                assert_eq!(interest, 0.0, "interest during deferment in month {month}");
            }
            // Integrality slack lets the big-M rows leave a balance of up to
            // `big_m * 1e-6` inactive.
            if before > eps + 1.0 {
                assert!(plan.is_active(month, i), "loan {i} inactive in month {month}");
            }
            if plan.is_active(month, i) {
                let floor = to_solver(loan.min_payment());
                assert!(
                    payment >= floor - 1e-4,
                    "payment {payment} below minimum {floor} in month {month} for loan {i}"
                );
            }
        }
        assert!(
            paid <= budget + 1e-4,
            "month {month} pays {paid} over budget {budget}"
        );
    }
}
