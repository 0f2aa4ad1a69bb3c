//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for loans and portfolios.
//! - [`config`] - Canonical scenario files.
//! - [`solve`] - Build-and-solve helpers and plan invariant checks.

pub mod config;
pub mod domain;
pub mod solve;
