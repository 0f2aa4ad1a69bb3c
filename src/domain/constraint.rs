//! Linear expressions and constraints for the payment model.
//!
//! Expressions are sparse: each term pairs a [`VarId`] with a coefficient,
//! plus a constant offset. Month-zero balances and deferred interest are
//! pure constants, so the same expression type covers both fixed and
//! decision quantities.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Index of a decision variable within a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

impl VarId {
    /// Position of the variable in the problem's variable list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Whether a variable is continuous or restricted to {0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Real-valued.
    Continuous,
    /// Integer in [0, 1].
    Binary,
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<f64>,
    /// Upper bound (None = +infinity).
    pub upper: Option<f64>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(0.0),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: Some(0.0),
            upper: Some(1.0),
        }
    }

    /// Non-negative variable [0, +inf).
    #[must_use]
    pub fn non_negative() -> Self {
        Self::default()
    }
}

/// A sparse affine expression `sum(coeff * x) + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    /// The zero expression.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            terms: Vec::new(),
            constant: 0.0,
        }
    }

    /// A constant expression.
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// A single variable with coefficient one.
    #[must_use]
    pub fn var(id: VarId) -> Self {
        Self {
            terms: vec![(id, 1.0)],
            constant: 0.0,
        }
    }

    /// Variable terms of the expression.
    #[must_use]
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    /// Constant offset of the expression.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.constant
    }

    /// Whether the expression contains no variables.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|(_, c)| *c == 0.0)
    }

    /// Evaluate against a full assignment of variable values.
    ///
    /// Variables outside `values` are treated as zero.
    #[must_use]
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(id, c)| c * values.get(id.index()).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

impl From<VarId> for LinearExpr {
    fn from(id: VarId) -> Self {
        Self::var(id)
    }
}

impl From<f64> for LinearExpr {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl Add for LinearExpr {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Neg for LinearExpr {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Sub for LinearExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul<f64> for LinearExpr {
    type Output = Self;

    fn mul(mut self, k: f64) -> Self {
        for (_, c) in &mut self.terms {
            *c *= k;
        }
        self.constant *= k;
        self
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

/// A single linear constraint: `sum(terms) {>=, <=, =} rhs`.
///
/// Constructors accept expressions on both sides and move every constant to
/// the right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Variable terms on the left-hand side.
    pub terms: Vec<(VarId, f64)>,
    /// Constraint sense (>=, <=, =).
    pub sense: ConstraintSense,
    /// Right-hand side value.
    pub rhs: f64,
}

impl Constraint {
    fn normalized(lhs: LinearExpr, sense: ConstraintSense, rhs: LinearExpr) -> Self {
        let diff = lhs - rhs;
        Self {
            terms: diff.terms,
            sense,
            rhs: -diff.constant,
        }
    }

    /// Create a `lhs >= rhs` constraint.
    #[must_use]
    pub fn geq(lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Self {
        Self::normalized(lhs.into(), ConstraintSense::GreaterEqual, rhs.into())
    }

    /// Create a `lhs <= rhs` constraint.
    #[must_use]
    pub fn leq(lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Self {
        Self::normalized(lhs.into(), ConstraintSense::LessEqual, rhs.into())
    }

    /// Create a `lhs = rhs` constraint.
    #[must_use]
    pub fn eq(lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Self {
        Self::normalized(lhs.into(), ConstraintSense::Equal, rhs.into())
    }

    /// Check the constraint against an assignment, within `tolerance`.
    #[must_use]
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs: f64 = self
            .terms
            .iter()
            .map(|(id, c)| c * values.get(id.index()).copied().unwrap_or(0.0))
            .sum();
        match self.sense {
            ConstraintSense::GreaterEqual => lhs >= self.rhs - tolerance,
            ConstraintSense::LessEqual => lhs <= self.rhs + tolerance,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_move_to_rhs() {
        // x + 5 <= 2y + 8  =>  x - 2y <= 3
        let x = VarId(0);
        let y = VarId(1);
        let c = Constraint::leq(
            LinearExpr::var(x) + LinearExpr::constant(5.0),
            LinearExpr::var(y) * 2.0 + LinearExpr::constant(8.0),
        );

        assert_eq!(c.sense, ConstraintSense::LessEqual);
        assert_eq!(c.terms, vec![(x, 1.0), (y, -2.0)]);
        assert!((c.rhs - 3.0).abs() < 1e-12);
    }

    #[test]
    fn evaluate_uses_assignment() {
        let e = LinearExpr::var(VarId(0)) * 0.5 - LinearExpr::var(VarId(2)) + 1.0.into();
        assert!((e.evaluate(&[4.0, 100.0, 1.5]) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn is_satisfied_respects_sense() {
        let c = Constraint::geq(VarId(0), 10.0);
        assert!(c.is_satisfied(&[10.0], 0.0));
        assert!(c.is_satisfied(&[9.995], 0.01));
        assert!(!c.is_satisfied(&[9.0], 0.01));

        let e = Constraint::eq(VarId(0), VarId(1));
        assert!(e.is_satisfied(&[3.0, 3.0], 1e-9));
        assert!(!e.is_satisfied(&[3.0, 4.0], 1e-9));
    }

    #[test]
    fn constant_expression_detection() {
        assert!(LinearExpr::constant(3.0).is_constant());
        assert!((LinearExpr::var(VarId(1)) * 0.0).is_constant());
        assert!(!LinearExpr::var(VarId(1)).is_constant());
    }
}
