//! Numeric constants of the payment model.

use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::domain::{Portfolio, MAX_DEFERMENT_MONTHS};
use crate::error::ConfigError;

/// Default upper bound on the modelled horizon (20 years).
pub const DEFAULT_MAX_MONTHS: u32 = MAX_DEFERMENT_MONTHS;

/// Default big-M used to link activation binaries to balances.
pub const DEFAULT_BIG_M: f64 = 1_000_000.0;

/// Default balance at or below which a loan counts as paid off.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Default objective weight on outstanding balances.
///
/// Only breaks ties between plans with equal interest (zero-APR loans);
/// it is orders of magnitude below any monthly rate.
pub const DEFAULT_BALANCE_WEIGHT: f64 = 1e-6;

/// Required ratio between big-M and the largest initial balance.
pub const BIG_M_HEADROOM: f64 = 10.0;

/// Parameters controlling model construction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Upper bound on the number of months modelled.
    pub max_months: u32,
    /// Big-M linking constant for the activation binaries.
    pub big_m: f64,
    /// Paid-off threshold (epsilon) in currency units.
    pub tolerance: f64,
    /// Objective weight on each month's ending balances.
    pub balance_weight: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            big_m: DEFAULT_BIG_M,
            tolerance: DEFAULT_TOLERANCE,
            balance_weight: DEFAULT_BALANCE_WEIGHT,
        }
    }
}

impl ModelParams {
    /// Check the constants on their own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_months == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_months",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "tolerance",
                reason: format!("must be positive, got {}", self.tolerance),
            });
        }
        if !(self.big_m.is_finite() && self.big_m > self.tolerance) {
            return Err(ConfigError::InvalidValue {
                field: "big_m",
                reason: format!(
                    "must exceed tolerance {}, got {}",
                    self.tolerance, self.big_m
                ),
            });
        }
        if !(self.balance_weight.is_finite() && self.balance_weight >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "balance_weight",
                reason: format!("must be non-negative, got {}", self.balance_weight),
            });
        }
        Ok(())
    }

    /// Check the constants against the magnitude of a concrete portfolio.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the constants are invalid or
    /// big-M is too small to dominate the largest balance.
    pub fn validate_for(&self, portfolio: &Portfolio) -> Result<(), ConfigError> {
        self.validate()?;

        let largest = portfolio.largest_balance().to_f64().unwrap_or(f64::MAX);
        if self.big_m < largest * BIG_M_HEADROOM {
            return Err(ConfigError::InvalidValue {
                field: "big_m",
                reason: format!(
                    "{} is too small for a balance of {largest}; use at least {}",
                    self.big_m,
                    largest * BIG_M_HEADROOM
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, Loan};
    use rust_decimal_macros::dec;

    fn portfolio(balance: rust_decimal::Decimal) -> Portfolio {
        Portfolio::try_new(
            vec![Loan::try_new("a", balance, dec!(0.05), dec!(0), 0).unwrap()],
            Budget::try_new(dec!(100)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn defaults_match_model_constants() {
        let params = ModelParams::default();
        assert_eq!(params.max_months, 240);
        assert_eq!(params.big_m, 1_000_000.0);
        assert_eq!(params.tolerance, 0.01);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        let params = ModelParams {
            tolerance: 0.0,
            ..ModelParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidValue {
                field: "tolerance",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_horizon() {
        let params = ModelParams {
            max_months: 0,
            ..ModelParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidValue {
                field: "max_months",
                ..
            })
        ));
    }

    #[test]
    fn rejects_big_m_below_balance_headroom() {
        let params = ModelParams::default();
        assert!(params.validate_for(&portfolio(dec!(50000))).is_ok());
        assert!(matches!(
            params.validate_for(&portfolio(dec!(200000))),
            Err(ConfigError::InvalidValue { field: "big_m", .. })
        ));
    }
}
