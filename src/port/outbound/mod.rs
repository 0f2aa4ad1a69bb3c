//! Outbound ports: capabilities the planner requires from the outside world.

pub mod solver;

pub use solver::{MilpProblem, Solution, SolutionStatus, Solver, Variable};
