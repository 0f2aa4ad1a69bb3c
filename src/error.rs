use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::port::SolutionStatus;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error(
        "payoff not achievable within {horizon} months under current budget \
         ({remaining} still owed at the end of the horizon)"
    )]
    InfeasibleHorizon { horizon: u32, remaining: Decimal },

    #[error("solver {solver} reported {status}")]
    SolverFailure {
        solver: &'static str,
        status: SolutionStatus,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
