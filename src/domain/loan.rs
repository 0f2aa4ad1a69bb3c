//! Loan and budget inputs.
//!
//! - [`Loan`] - A single debt with its rate, minimum payment and deferment
//! - [`Budget`] - The monthly amount available across all loans
//! - [`Portfolio`] - A validated set of loans paired with a budget

use std::result::Result;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::money::{Money, Rate};

/// Longest deferment (and default horizon) in months.
pub const MAX_DEFERMENT_MONTHS: u32 = 240;

/// A single loan, immutable for the duration of a run.
///
/// The APR is an annual fraction converted to a monthly rate by dividing by
/// twelve. During the first `deferment_months` months no interest accrues.
///
/// # Example
///
/// ```
/// use payoff::domain::Loan;
/// use rust_decimal_macros::dec;
///
/// let loan = Loan::try_new("auto", dec!(12000), dec!(0.069), dec!(250), 0).unwrap();
/// assert!((loan.monthly_rate() - 0.00575).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loan {
    name: String,
    initial_balance: Money,
    apr: Rate,
    min_payment: Money,
    deferment_months: u32,
}

impl Loan {
    /// Create a new loan with domain invariant validation.
    ///
    /// # Domain Invariants
    ///
    /// - `initial_balance >= 0`
    /// - `0 <= apr < 1`
    /// - `min_payment >= 0`
    /// - `deferment_months <= 240`
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    pub fn try_new(
        name: impl Into<String>,
        initial_balance: Money,
        apr: Rate,
        min_payment: Money,
        deferment_months: u32,
    ) -> Result<Self, DomainError> {
        let name = name.into();

        if initial_balance < Decimal::ZERO {
            return Err(DomainError::NegativeBalance {
                loan: name,
                balance: initial_balance,
            });
        }
        if apr < Decimal::ZERO || apr >= Decimal::ONE {
            return Err(DomainError::AprOutOfRange { loan: name, apr });
        }
        if min_payment < Decimal::ZERO {
            return Err(DomainError::NegativeMinPayment {
                loan: name,
                min_payment,
            });
        }
        if deferment_months > MAX_DEFERMENT_MONTHS {
            return Err(DomainError::DefermentOutOfRange {
                loan: name,
                months: deferment_months,
                max: MAX_DEFERMENT_MONTHS,
            });
        }

        Ok(Self {
            name,
            initial_balance,
            apr,
            min_payment,
            deferment_months,
        })
    }

    /// Get the display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the balance at the start of the plan.
    #[must_use]
    pub const fn initial_balance(&self) -> Money {
        self.initial_balance
    }

    /// Get the annual rate as a fraction.
    #[must_use]
    pub const fn apr(&self) -> Rate {
        self.apr
    }

    /// Get the minimum monthly payment while the loan is active.
    #[must_use]
    pub const fn min_payment(&self) -> Money {
        self.min_payment
    }

    /// Get the number of leading interest-free months.
    #[must_use]
    pub const fn deferment_months(&self) -> u32 {
        self.deferment_months
    }

    /// Monthly interest rate (`apr / 12`).
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.apr.to_f64().unwrap_or(0.0) / 12.0
    }

    /// Balance plus first-month interest, before any payment.
    #[must_use]
    pub fn first_month_owed(&self) -> Money {
        if self.accrues_in(1) {
            self.initial_balance + self.initial_balance * self.apr / Decimal::from(12)
        } else {
            self.initial_balance
        }
    }

    /// Whether the minimum payment is more than the loan owes in its first
    /// month. Payments are capped at what is owed, so such a loan has no
    /// feasible first payment.
    #[must_use]
    pub fn min_payment_exceeds_owed(&self) -> bool {
        self.initial_balance > Decimal::ZERO && self.min_payment > self.first_month_owed()
    }

    /// Whether interest accrues in the given 1-based month.
    #[must_use]
    pub const fn accrues_in(&self, month: u32) -> bool {
        month > self.deferment_months
    }
}

/// Maximum total payment across all loans in any month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Budget(Money);

impl Budget {
    /// Create a budget, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeBudget` if `amount < 0`.
    pub fn try_new(amount: Money) -> Result<Self, DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::NegativeBudget { budget: amount });
        }
        Ok(Self(amount))
    }

    /// Get the monthly amount.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.0
    }
}

/// A validated, non-empty set of loans and the budget that pays them.
#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    loans: Vec<Loan>,
    budget: Budget,
}

impl Portfolio {
    /// Pair loans with a budget.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoLoans` if `loans` is empty.
    pub fn try_new(loans: Vec<Loan>, budget: Budget) -> Result<Self, DomainError> {
        if loans.is_empty() {
            return Err(DomainError::NoLoans);
        }
        Ok(Self { loans, budget })
    }

    /// Get the loans in input order.
    #[must_use]
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Get the monthly budget.
    #[must_use]
    pub const fn budget(&self) -> Budget {
        self.budget
    }

    /// Largest initial balance across loans.
    #[must_use]
    pub fn largest_balance(&self) -> Money {
        self.loans
            .iter()
            .map(Loan::initial_balance)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of all initial balances.
    #[must_use]
    pub fn total_balance(&self) -> Money {
        self.loans.iter().map(Loan::initial_balance).sum()
    }

    /// Sum of all minimum payments.
    #[must_use]
    pub fn total_min_payment(&self) -> Money {
        self.loans.iter().map(Loan::min_payment).sum()
    }
}
