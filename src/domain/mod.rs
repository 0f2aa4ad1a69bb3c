//! Loan domain types: inputs, schedule output and the linear model vocabulary.

pub mod calendar;
pub mod constraint;
pub mod error;
pub mod loan;
pub mod money;
pub mod schedule;

pub use calendar::YearMonth;
pub use constraint::{Constraint, ConstraintSense, LinearExpr, VarId, VariableBounds, VariableKind};
pub use loan::{Budget, Loan, Portfolio, MAX_DEFERMENT_MONTHS};
pub use money::{Money, Rate};
pub use schedule::{LoanMonth, PayoffPlan, PayoffSummary, ScheduleRow};
