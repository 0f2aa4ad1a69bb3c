//! Adapters connecting ports to concrete backends and the terminal.

pub mod inbound;
pub mod outbound;
