//! End-to-end planner tests against the HiGHS backend.

use std::sync::Arc;

use rust_decimal_macros::dec;

use payoff::adapter::outbound::solver::HiGHSSolver;
use payoff::application::planner::{FixedHorizon, ModelBuilder, SolvedPlan};
use payoff::application::{ModelParams, Optimizer};
use payoff::domain::{money::to_solver, Portfolio, YearMonth};
use payoff::error::Error;
use payoff::testkit::domain::{loan, loan_with, portfolio};
use payoff::testkit::solve::{assert_plan_invariants, solve};

fn optimizer() -> Optimizer {
    Optimizer::new(Arc::new(HiGHSSolver::new()), ModelParams::default())
}

fn start() -> YearMonth {
    YearMonth::new(2026, 10)
}

/// Interest paid when the budget is split evenly across loans that still
/// owe, with any share a loan cannot use handed to the others.
fn equal_split_interest(portfolio: &Portfolio) -> f64 {
    let loans = portfolio.loans();
    let mut balances: Vec<f64> = loans
        .iter()
        .map(|l| to_solver(l.initial_balance()))
        .collect();
    let budget = to_solver(portfolio.budget().amount());
    let mut total = 0.0;

    for month in 1..=600u32 {
        if balances.iter().all(|b| *b <= 0.01) {
            break;
        }
        let mut owed = Vec::with_capacity(loans.len());
        for (balance, loan) in balances.iter().zip(loans) {
            let interest = if loan.accrues_in(month) {
                loan.monthly_rate() * balance
            } else {
                0.0
            };
            total += interest;
            owed.push(balance + interest);
        }

        let mut available = budget;
        loop {
            let open: Vec<usize> = (0..owed.len()).filter(|&i| owed[i] > 1e-9).collect();
            if open.is_empty() || available <= 1e-9 {
                break;
            }
            let share = available / open.len() as f64;
            for i in open {
                let paid = share.min(owed[i]);
                owed[i] -= paid;
                available -= paid;
            }
        }
        balances = owed;
    }
    total
}

#[test]
fn single_loan_pays_off_in_seven_months() {
    let portfolio = portfolio(vec![loan(1200.0, 0.12)], 200.0);

    let plan = optimizer()
        .optimize(&portfolio, start())
        .expect("optimal plan");

    assert_eq!(plan.summary.total_months, 7);
    assert!(
        (plan.summary.total_interest - dec!(43.86)).abs() <= dec!(0.02),
        "interest {}",
        plan.summary.total_interest
    );
    assert_eq!(plan.summary.payoff_year, 2027);
    assert_eq!(plan.summary.payoff_month_name, "April");
    assert_eq!(plan.schedule.len(), 7);
    assert_eq!(plan.schedule[0].month_name, "October");
    assert_eq!(plan.schedule[0].per_loan[0].interest, dec!(12.00));
    assert_eq!(plan.schedule[0].per_loan[0].payment, dec!(200.00));
    assert_eq!(plan.schedule[6].remaining(), dec!(0.00));
}

#[test]
fn single_loan_plan_satisfies_model_invariants() {
    let portfolio = portfolio(vec![loan(1200.0, 0.12)], 200.0);
    let (model, solution) = solve(&portfolio, &ModelParams::default());

    assert!(solution.is_optimal());
    assert!(model.reached_payoff());
    let plan = SolvedPlan::new(&model, &solution);
    assert!(plan.paid_off_after(model.horizon()));
    assert_plan_invariants(&plan, &portfolio);
}

#[test]
fn zero_budget_cannot_cover_minimum_payment() {
    let portfolio = portfolio(vec![loan_with(1200.0, 0.12, 50.0, 0)], 0.0);

    let result = optimizer().optimize(&portfolio, start());

    match result {
        Err(Error::SolverFailure { .. } | Error::InfeasibleHorizon { .. }) => {}
        Err(err) => panic!("expected an infeasibility error, got {err}"),
        Ok(plan) => panic!("expected failure, got {} months", plan.summary.total_months),
    }
}

#[test]
fn deferred_loan_paid_in_first_month_accrues_nothing() {
    let portfolio = portfolio(vec![loan_with(500.0, 0.10, 0.0, 12)], 500.0);

    let plan = optimizer()
        .optimize(&portfolio, start())
        .expect("optimal plan");

    assert_eq!(plan.summary.total_months, 1);
    assert_eq!(plan.summary.total_interest, dec!(0.00));
    assert_eq!(plan.summary.payoff_month_name, "October");
    assert_eq!(plan.summary.payoff_year, 2026);
    assert_eq!(plan.schedule[0].per_loan[0].payment, dec!(500.00));
}

#[test]
fn optimizer_beats_equal_split() {
    let portfolio = portfolio(vec![loan(3000.0, 0.20), loan(3000.0, 0.05)], 400.0);

    let plan = optimizer()
        .optimize(&portfolio, start())
        .expect("optimal plan");
    let baseline = equal_split_interest(&portfolio);

    assert!(
        to_solver(plan.summary.total_interest) <= baseline + 0.01,
        "optimizer {} vs equal split {baseline}",
        plan.summary.total_interest
    );
}

#[test]
fn mixed_portfolio_respects_budget_minimums_and_deferment() {
    let portfolio = portfolio(
        vec![
            loan_with(2400.0, 0.2199, 60.0, 0),
            loan_with(4000.0, 0.045, 45.0, 3),
            loan_with(800.0, 0.0, 25.0, 0),
        ],
        600.0,
    );
    let (model, solution) = solve(&portfolio, &ModelParams::default());

    assert!(solution.is_optimal(), "status {}", solution.status);
    let plan = SolvedPlan::new(&model, &solution);
    assert!(plan.paid_off_after(model.horizon()));
    assert_plan_invariants(&plan, &portfolio);

    // The deferred loan accrues nothing in its first three months.
    for month in 1..=3 {
        assert_eq!(plan.interest(month, 1), 0.0);
    }
}

#[test]
fn zero_apr_balance_is_still_retired() {
    let portfolio = portfolio(vec![loan(600.0, 0.0)], 200.0);

    let plan = optimizer()
        .optimize(&portfolio, start())
        .expect("optimal plan");

    assert_eq!(plan.summary.total_months, 3);
    assert_eq!(plan.summary.total_interest, dec!(0.00));
    assert_eq!(plan.total_paid(), dec!(600.00));
}

#[test]
fn fixed_probe_sets_horizon_one_past_payoff() {
    let portfolio = portfolio(vec![loan(1200.0, 0.12)], 200.0);
    let params = ModelParams::default();

    let model = ModelBuilder::new(&portfolio, &params).build(&mut FixedHorizon::new(4, 1));

    assert_eq!(model.horizon(), 5);
    assert!(model.reached_payoff());
}

#[test]
fn horizon_cap_reports_remaining_balance() {
    let portfolio = portfolio(vec![loan(1200.0, 0.12)], 200.0);
    let optimizer = Optimizer::new(
        Arc::new(HiGHSSolver::new()),
        ModelParams {
            max_months: 3,
            ..ModelParams::default()
        },
    );

    let result = optimizer.optimize(&portfolio, start());

    match result {
        Err(Error::InfeasibleHorizon { horizon, remaining }) => {
            assert_eq!(horizon, 3);
            assert!(remaining > dec!(0));
        }
        Err(err) => panic!("expected an unpaid horizon, got {err}"),
        Ok(_) => panic!("three months cannot retire the loan"),
    }
}

#[test]
fn compounding_balance_reports_infeasible_horizon() {
    // The minimum payment is below the monthly interest, so the balance
    // grows past the default big-M long before the horizon ends.
    let portfolio = portfolio(vec![loan_with(20000.0, 0.24, 100.0, 0)], 100.0);

    let result = optimizer().optimize(&portfolio, start());

    match result {
        Err(Error::InfeasibleHorizon { horizon, remaining }) => {
            assert_eq!(horizon, 240);
            assert!(remaining > dec!(1000000));
        }
        Err(err) => panic!("expected an unpaid horizon, got {err}"),
        Ok(_) => panic!("a budget below the interest cannot retire the loan"),
    }
}
