//! Solved payment schedule and payoff summary.

use rust_decimal::Decimal;
use serde::Serialize;

use super::money::Money;

/// One loan's figures for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanMonth {
    /// Balance entering the month.
    pub balance_before: Money,
    /// Interest accrued during the month.
    pub interest: Money,
    /// Amount paid during the month.
    pub payment: Money,
    /// Balance after interest and payment.
    pub balance_after: Money,
}

/// A single month of the schedule, labelled with its calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    /// 1-based month index within the plan.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Full English month name.
    pub month_name: String,
    /// Figures per loan, in input order.
    pub per_loan: Vec<LoanMonth>,
}

impl ScheduleRow {
    /// Total paid across all loans this month.
    #[must_use]
    pub fn total_payment(&self) -> Money {
        self.per_loan.iter().map(|c| c.payment).sum()
    }

    /// Total interest across all loans this month.
    #[must_use]
    pub fn total_interest(&self) -> Money {
        self.per_loan.iter().map(|c| c.interest).sum()
    }

    /// Total remaining balance after this month.
    #[must_use]
    pub fn remaining(&self) -> Money {
        self.per_loan.iter().map(|c| c.balance_after).sum()
    }
}

/// Headline results of a solved plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoffSummary {
    /// Months during which at least one loan carries a balance.
    pub total_months: u32,
    /// Interest paid over those months, rounded to cents.
    pub total_interest: Money,
    /// Calendar year of the final payment.
    pub payoff_year: i32,
    /// 1-based calendar month of the final payment.
    pub payoff_month: u32,
    /// Full English name of the payoff month.
    pub payoff_month_name: String,
}

impl PayoffSummary {
    /// Split `total_months` into whole years and leftover months.
    #[must_use]
    pub const fn years_and_months(&self) -> (u32, u32) {
        (self.total_months / 12, self.total_months % 12)
    }
}

/// Complete optimizer output: summary plus the month-by-month schedule.
#[derive(Debug, Clone, Serialize)]
pub struct PayoffPlan {
    /// Loan labels, matching the column order of every row.
    pub loan_names: Vec<String>,
    /// Headline figures.
    #[serde(flatten)]
    pub summary: PayoffSummary,
    /// One row per month from the first payment to payoff.
    pub schedule: Vec<ScheduleRow>,
}

impl PayoffPlan {
    /// Total paid over the whole schedule.
    #[must_use]
    pub fn total_paid(&self) -> Money {
        self.schedule
            .iter()
            .map(ScheduleRow::total_payment)
            .fold(Decimal::ZERO, |acc, p| acc + p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cell(before: Decimal, interest: Decimal, payment: Decimal) -> LoanMonth {
        LoanMonth {
            balance_before: before,
            interest,
            payment,
            balance_after: before + interest - payment,
        }
    }

    #[test]
    fn row_totals_sum_across_loans() {
        let row = ScheduleRow {
            month: 1,
            year: 2026,
            month_name: "October".into(),
            per_loan: vec![
                cell(dec!(100), dec!(1), dec!(50)),
                cell(dec!(200), dec!(2), dec!(20)),
            ],
        };

        assert_eq!(row.total_payment(), dec!(70));
        assert_eq!(row.total_interest(), dec!(3));
        assert_eq!(row.remaining(), dec!(233));
    }

    #[test]
    fn years_and_months_split() {
        let summary = PayoffSummary {
            total_months: 29,
            total_interest: dec!(10),
            payoff_year: 2029,
            payoff_month: 2,
            payoff_month_name: "February".into(),
        };
        assert_eq!(summary.years_and_months(), (2, 5));
    }
}
