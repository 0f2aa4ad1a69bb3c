//! Payoff - interest-minimizing payment planning across multiple loans.
//!
//! Given a monthly budget and a set of loans (balance, APR, minimum payment,
//! interest deferment), the crate builds a mixed-integer linear program over
//! a monthly horizon, solves it with HiGHS, and returns the month-by-month
//! payment schedule that minimizes total interest together with the payoff
//! date.
//!
//! # Architecture
//!
//! - **`domain`** - Loans, budget, schedule rows and the linear model vocabulary
//! - **`port`** - The [`Solver`](port::Solver) trait and MILP problem types
//! - **`adapter::outbound::solver`** - `HiGHSSolver` via good_lp
//! - **`application::planner`** - Model builder, horizon discovery, schedule derivation
//! - **`infrastructure::config`** - Scenario files and logging setup
//! - **`adapter::inbound::cli`** - The `payoff` command line
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use payoff::adapter::outbound::solver::HiGHSSolver;
//! use payoff::application::{ModelParams, Optimizer};
//! use payoff::domain::{Budget, Loan, Portfolio, YearMonth};
//! use rust_decimal_macros::dec;
//!
//! let portfolio = Portfolio::try_new(
//!     vec![
//!         Loan::try_new("card", dec!(3000), dec!(0.22), dec!(60), 0).unwrap(),
//!         Loan::try_new("student", dec!(9000), dec!(0.05), dec!(95), 6).unwrap(),
//!     ],
//!     Budget::try_new(dec!(700)).unwrap(),
//! )
//! .unwrap();
//!
//! let optimizer = Optimizer::new(Arc::new(HiGHSSolver::new()), ModelParams::default());
//! let plan = optimizer.optimize(&portfolio, YearMonth::new(2026, 11)).unwrap();
//! println!("paid off in {} months", plan.summary.total_months);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
