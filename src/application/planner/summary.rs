//! Reading a solved model back into a schedule and payoff summary.

use super::builder::LoanModel;
use super::horizon::all_paid;
use crate::domain::{
    money::from_solver, LoanMonth, PayoffSummary, ScheduleRow, YearMonth,
};
use crate::port::Solution;

/// A model paired with its optimal solution.
#[derive(Debug, Clone, Copy)]
pub struct SolvedPlan<'a> {
    model: &'a LoanModel,
    solution: &'a Solution,
}

impl<'a> SolvedPlan<'a> {
    /// Pair a model with the solution returned for its problem.
    #[must_use]
    pub const fn new(model: &'a LoanModel, solution: &'a Solution) -> Self {
        Self { model, solution }
    }

    /// The underlying model.
    #[must_use]
    pub const fn model(&self) -> &'a LoanModel {
        self.model
    }

    /// Balance entering `month` (1-based).
    #[must_use]
    pub fn balance_before(&self, month: u32, loan: usize) -> f64 {
        self.balance_after(month - 1, loan)
    }

    /// Balance after `month`; month 0 is the opening balance.
    #[must_use]
    pub fn balance_after(&self, month: u32, loan: usize) -> f64 {
        self.solution.eval(&self.model.balance_after(month, loan))
    }

    /// Interest accrued in `month`.
    #[must_use]
    pub fn interest(&self, month: u32, loan: usize) -> f64 {
        self.solution.eval(&self.model.cell(month, loan).interest)
    }

    /// Payment made in `month`.
    #[must_use]
    pub fn payment(&self, month: u32, loan: usize) -> f64 {
        self.solution.value(self.model.cell(month, loan).payment)
    }

    /// Solved activation indicator for `month`.
    #[must_use]
    pub fn is_active(&self, month: u32, loan: usize) -> bool {
        self.solution.value(self.model.cell(month, loan).active) > 0.5
    }

    fn balances_after(&self, month: u32) -> Vec<f64> {
        (0..self.model.num_loans())
            .map(|i| self.balance_after(month, i))
            .collect()
    }

    /// Whether every loan is at or below the tolerance after `month`.
    #[must_use]
    pub fn paid_off_after(&self, month: u32) -> bool {
        all_paid(&self.balances_after(month), self.model.tolerance())
    }

    /// Sum of balances left after the final modelled month.
    #[must_use]
    pub fn final_balance(&self) -> f64 {
        self.balances_after(self.model.horizon()).iter().sum()
    }

    /// Months in which at least one loan enters with a balance above the
    /// tolerance.
    ///
    /// Because a cleared loan stays cleared, this is also the first month
    /// after which every balance is paid off.
    #[must_use]
    pub fn total_months(&self) -> u32 {
        (1..=self.model.horizon())
            .filter(|m| !self.paid_off_after(m - 1))
            .count() as u32
    }

    /// Unrounded interest over the first `months` months.
    #[must_use]
    pub fn interest_through(&self, months: u32) -> f64 {
        (1..=months)
            .flat_map(|m| (0..self.model.num_loans()).map(move |i| (m, i)))
            .map(|(m, i)| self.interest(m, i))
            .sum()
    }
}

/// Headline results: months to payoff, interest paid and the payoff month.
///
/// The payoff month is `start` shifted by `total_months - 1`, the month of
/// the final payment. A plan with nothing owed pays off in `start`.
#[must_use]
pub fn payoff_summary(plan: &SolvedPlan<'_>, start: YearMonth) -> PayoffSummary {
    let total_months = plan.total_months();
    let payoff = start.plus(i64::from(total_months.saturating_sub(1)));

    PayoffSummary {
        total_months,
        total_interest: from_solver(plan.interest_through(total_months)),
        payoff_year: payoff.year(),
        payoff_month: payoff.month(),
        payoff_month_name: payoff.month_name().to_string(),
    }
}

/// One row per month from 1 through payoff, amounts rounded to cents.
#[must_use]
pub fn build_schedule(plan: &SolvedPlan<'_>, start: YearMonth) -> Vec<ScheduleRow> {
    (1..=plan.total_months())
        .map(|month| {
            let label = start.plus(i64::from(month) - 1);
            let per_loan = (0..plan.model().num_loans())
                .map(|i| LoanMonth {
                    balance_before: from_solver(plan.balance_before(month, i)),
                    interest: from_solver(plan.interest(month, i)),
                    payment: from_solver(plan.payment(month, i)),
                    balance_after: from_solver(plan.balance_after(month, i)),
                })
                .collect();

            ScheduleRow {
                month,
                year: label.year(),
                month_name: label.month_name().to_string(),
                per_loan,
            }
        })
        .collect()
}
