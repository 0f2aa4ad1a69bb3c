//! Outbound adapters implementing the crate's ports.

pub mod solver;
