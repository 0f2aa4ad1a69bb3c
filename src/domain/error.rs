//! Domain validation errors for loan inputs.
//!
//! These errors are returned by `try_new` constructors when an input would
//! make the payment model meaningless. They are raised before any model is
//! built.
//!
//! # Examples
//!
//! ```
//! use payoff::domain::error::DomainError;
//! use payoff::domain::Loan;
//! use rust_decimal_macros::dec;
//!
//! let result = Loan::try_new("card", dec!(-5), dec!(0.2), dec!(25), 0);
//!
//! assert!(matches!(result, Err(DomainError::NegativeBalance { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when loan or budget invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Balances cannot be negative.
    #[error("balance for {loan} must be non-negative, got {balance}")]
    NegativeBalance {
        /// Loan label.
        loan: String,
        /// The invalid balance.
        balance: Decimal,
    },

    /// APR must be an annual fraction in `[0, 1)`.
    #[error("apr for {loan} must be within [0, 1), got {apr}")]
    AprOutOfRange {
        /// Loan label.
        loan: String,
        /// The invalid rate.
        apr: Decimal,
    },

    /// Minimum payments cannot be negative.
    #[error("minimum payment for {loan} must be non-negative, got {min_payment}")]
    NegativeMinPayment {
        /// Loan label.
        loan: String,
        /// The invalid minimum payment.
        min_payment: Decimal,
    },

    /// Deferment is limited to the maximum modelled horizon.
    #[error("deferment for {loan} must be within [0, {max}] months, got {months}")]
    DefermentOutOfRange {
        /// Loan label.
        loan: String,
        /// The invalid deferment.
        months: u32,
        /// Largest accepted deferment.
        max: u32,
    },

    /// At least one loan is required.
    #[error("at least one loan is required")]
    NoLoans,

    /// The monthly budget cannot be negative.
    #[error("budget must be non-negative, got {budget}")]
    NegativeBudget {
        /// The invalid budget.
        budget: Decimal,
    },
}
