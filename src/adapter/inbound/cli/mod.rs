//! CLI module graph.

pub mod check;
pub mod command;
pub mod optimize;
pub mod output;

pub use command::{Cli, ColorChoice, Commands};
