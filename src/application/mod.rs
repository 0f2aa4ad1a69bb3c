//! Application services orchestrating the domain and ports.

pub mod planner;

pub use planner::{ModelParams, Optimizer};
