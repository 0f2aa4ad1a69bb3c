//! Monetary amounts and conversions at the solver boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Currency amount represented as a Decimal for precision.
pub type Money = Decimal;

/// Annual rate as a fraction (0.05 = 5% APR).
pub type Rate = Decimal;

/// Decimal places used when presenting currency.
pub const CURRENCY_DP: u32 = 2;

/// Convert a decimal amount into the solver's floating point domain.
#[must_use]
pub fn to_solver(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Convert a solved value back to currency, rounded to cents.
///
/// Solver noise below zero (e.g. `-1e-9`) is clamped to zero.
#[must_use]
pub fn from_solver(value: f64) -> Money {
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    Decimal::try_from(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(CURRENCY_DP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn from_solver_rounds_to_cents() {
        assert_eq!(from_solver(12.345_678), dec!(12.35));
        assert_eq!(from_solver(0.004), dec!(0.00));
    }

    #[test]
    fn from_solver_clamps_negative_noise() {
        assert_eq!(from_solver(-1e-9), Decimal::ZERO);
        assert_eq!(from_solver(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn to_solver_preserves_value() {
        assert!((to_solver(dec!(1200.50)) - 1200.5).abs() < 1e-12);
    }
}
