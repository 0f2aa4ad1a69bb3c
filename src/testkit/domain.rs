//! Builders for domain primitives used across tests.
//!
//! Amounts are given as `f64` literals for brevity and converted to
//! `Decimal`; every builder panics on invalid input since tests construct
//! known-good values.

use rust_decimal::Decimal;

use crate::domain::{Budget, Loan, Portfolio};

fn dec(value: f64) -> Decimal {
    Decimal::try_from(value).expect("finite amount")
}

/// A loan with no minimum payment and no deferment.
pub fn loan(balance: f64, apr: f64) -> Loan {
    loan_with(balance, apr, 0.0, 0)
}

/// A fully specified loan, named after its balance.
pub fn loan_with(balance: f64, apr: f64, min_payment: f64, deferment_months: u32) -> Loan {
    Loan::try_new(
        format!("loan-{balance}"),
        dec(balance),
        dec(apr),
        dec(min_payment),
        deferment_months,
    )
    .expect("valid loan")
}

/// A portfolio of `loans` sharing a monthly `budget`.
pub fn portfolio(loans: Vec<Loan>, budget: f64) -> Portfolio {
    Portfolio::try_new(loans, Budget::try_new(dec(budget)).expect("valid budget"))
        .expect("valid portfolio")
}
