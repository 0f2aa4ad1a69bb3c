//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`Solver`] - MILP optimization backend

pub mod outbound;

pub use outbound::{MilpProblem, Solution, SolutionStatus, Solver, Variable};
