//! Stopping rules for horizon discovery.
//!
//! The model builder does not know in advance how many months the plan
//! needs. After adding month `T` it asks a [`HorizonProbe`] for the ending
//! balances of month `T - 1`; once those are all paid off the horizon stops
//! growing.
//!
//! [`AvalancheProjection`] is the production rule: it simulates a feasible
//! plan (minimums first, then the highest rate) under the same interest,
//! deferment and budget rules the model uses, so the month it pays off in is
//! a horizon long enough for the optimizer to reach a zero balance too.

use std::cmp::Ordering;

use crate::domain::{money::to_solver, Portfolio};

/// Reports ending balances for a month, in loan order.
pub trait HorizonProbe {
    /// Balances after `month` (1-based); `month = 0` is the opening balance.
    fn balances_after(&mut self, month: u32) -> &[f64];
}

/// Whether every balance is at or below `tolerance`.
///
/// A balance of exactly `tolerance` counts as paid, matching the activation
/// rows, which only force a loan active when its balance exceeds it.
#[must_use]
pub fn all_paid(balances: &[f64], tolerance: f64) -> bool {
    balances.iter().all(|b| *b <= tolerance)
}

#[derive(Debug, Clone)]
struct ProjectedLoan {
    monthly_rate: f64,
    min_payment: f64,
    deferment_months: u32,
}

/// Month-by-month simulation of a highest-rate-first repayment plan.
///
/// Each month every loan above the tolerance receives its minimum payment
/// (capped at what it owes), and the rest of the budget goes to loans in
/// descending APR order, ties broken by input order.
#[derive(Debug, Clone)]
pub struct AvalancheProjection {
    loans: Vec<ProjectedLoan>,
    priority: Vec<usize>,
    budget: f64,
    tolerance: f64,
    history: Vec<Vec<f64>>,
}

impl AvalancheProjection {
    /// Start a projection from the portfolio's opening balances.
    #[must_use]
    pub fn new(portfolio: &Portfolio, tolerance: f64) -> Self {
        let loans: Vec<ProjectedLoan> = portfolio
            .loans()
            .iter()
            .map(|loan| ProjectedLoan {
                monthly_rate: loan.monthly_rate(),
                min_payment: to_solver(loan.min_payment()),
                deferment_months: loan.deferment_months(),
            })
            .collect();

        let mut priority: Vec<usize> = (0..loans.len()).collect();
        priority.sort_by(|a, b| {
            loans[*b]
                .monthly_rate
                .partial_cmp(&loans[*a].monthly_rate)
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(b))
        });

        let opening = portfolio
            .loans()
            .iter()
            .map(|loan| to_solver(loan.initial_balance()))
            .collect();

        Self {
            loans,
            priority,
            budget: to_solver(portfolio.budget().amount()),
            tolerance,
            history: vec![opening],
        }
    }

    /// Simulate one more month from the last projected balances.
    fn step(&mut self) {
        let month = self.history.len() as u32;
        let previous = &self.history[self.history.len() - 1];

        let owed: Vec<f64> = previous
            .iter()
            .zip(&self.loans)
            .map(|(balance, loan)| {
                if month > loan.deferment_months {
                    balance * (1.0 + loan.monthly_rate)
                } else {
                    *balance
                }
            })
            .collect();

        let mut available = self.budget;
        let mut paid = vec![0.0; owed.len()];

        for (i, loan) in self.loans.iter().enumerate() {
            if previous[i] > self.tolerance {
                let required = loan.min_payment.min(owed[i]).min(available);
                paid[i] = required;
                available -= required;
            }
        }

        for &i in &self.priority {
            if available <= 0.0 {
                break;
            }
            let extra = (owed[i] - paid[i]).min(available).max(0.0);
            paid[i] += extra;
            available -= extra;
        }

        let next = owed
            .iter()
            .zip(&paid)
            .map(|(o, p)| (o - p).max(0.0))
            .collect();
        self.history.push(next);
    }
}

impl HorizonProbe for AvalancheProjection {
    fn balances_after(&mut self, month: u32) -> &[f64] {
        while self.history.len() <= month as usize {
            self.step();
        }
        &self.history[month as usize]
    }
}

/// Probe reporting every loan paid off after a fixed month.
///
/// Lets horizon discovery be exercised without a simulation or solver.
#[derive(Debug, Clone)]
pub struct FixedHorizon {
    paid_after: u32,
    owing: Vec<f64>,
    cleared: Vec<f64>,
}

impl FixedHorizon {
    /// Balances stay positive through month `paid_after - 1` and are zero
    /// from month `paid_after` on.
    #[must_use]
    pub fn new(paid_after: u32, num_loans: usize) -> Self {
        Self {
            paid_after,
            owing: vec![f64::INFINITY; num_loans],
            cleared: vec![0.0; num_loans],
        }
    }

    /// A probe that never reports payoff.
    #[must_use]
    pub fn never(num_loans: usize) -> Self {
        Self::new(u32::MAX, num_loans)
    }
}

impl HorizonProbe for FixedHorizon {
    fn balances_after(&mut self, month: u32) -> &[f64] {
        if month >= self.paid_after {
            &self.cleared
        } else {
            &self.owing
        }
    }
}
