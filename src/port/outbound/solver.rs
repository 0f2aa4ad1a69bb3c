//! Solver port for mixed-integer linear programming.
//!
//! The payment model is expressed as a [`MilpProblem`]: continuous and binary
//! variables, sparse linear constraints and a linear objective to minimize.
//! Backends implement [`Solver`] and report a [`SolutionStatus`] rather than
//! failing on infeasible models, so callers can tell an unsatisfiable budget
//! apart from an internal solver fault.

use crate::domain::{Constraint, LinearExpr, VarId, VariableBounds, VariableKind};
use crate::error::Result;

/// Mixed-integer linear programming solver.
///
/// Implementations wrap specific solver backends (HiGHS, CBC, etc.) and
/// provide a unified interface for optimization problems.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) and hold no
/// per-problem state, so independent requests can solve in parallel.
pub trait Solver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Minimize the problem's objective subject to its constraints.
    ///
    /// Infeasible and unbounded problems are reported through
    /// [`Solution::status`], not as errors.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend could not be invoked at all.
    fn solve(&self, problem: &MilpProblem) -> Result<Solution>;
}

/// A declared decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Name used in solver diagnostics.
    pub name: String,
    /// Continuous or binary.
    pub kind: VariableKind,
    /// Lower and upper bounds.
    pub bounds: VariableBounds,
}

/// Minimization problem of the form:
///
/// ```text
/// minimize    objective(x)
/// subject to  constraints
///             bounds and integrality on x
/// ```
#[derive(Debug, Clone, Default)]
pub struct MilpProblem {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
}

impl MilpProblem {
    /// Create an empty problem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a non-negative continuous variable.
    pub fn add_continuous(&mut self, name: impl Into<String>) -> VarId {
        self.add_variable(name, VariableKind::Continuous, VariableBounds::non_negative())
    }

    /// Declare a binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_variable(name, VariableKind::Binary, VariableBounds::binary())
    }

    /// Declare a variable with explicit kind and bounds.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        kind: VariableKind,
        bounds: VariableBounds,
    ) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            name: name.into(),
            kind,
            bounds,
        });
        id
    }

    /// Add a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Replace the objective to minimize.
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Declared variables, indexed by [`VarId`].
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Constraints in insertion order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The objective to minimize.
    #[must_use]
    pub const fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Return the number of decision variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Return the number of binary variables.
    #[must_use]
    pub fn num_binaries(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.kind == VariableKind::Binary)
            .count()
    }
}

/// Solution to a mixed-integer problem.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Value of each variable, indexed by [`VarId`]. Empty unless optimal.
    pub values: Vec<f64>,

    /// Objective value at `values`.
    pub objective: f64,

    /// Termination status of the solver.
    pub status: SolutionStatus,
}

impl Solution {
    /// A non-optimal outcome with no values.
    #[must_use]
    pub const fn failed(status: SolutionStatus) -> Self {
        Self {
            values: Vec::new(),
            objective: 0.0,
            status,
        }
    }

    /// Return `true` if the solver found an optimal solution.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Value of a single variable.
    #[must_use]
    pub fn value(&self, id: VarId) -> f64 {
        self.values.get(id.index()).copied().unwrap_or(0.0)
    }

    /// Evaluate an expression at the solved point.
    #[must_use]
    pub fn eval(&self, expr: &LinearExpr) -> f64 {
        expr.evaluate(&self.values)
    }
}

/// Termination status of an optimization solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Solver found a globally optimal solution.
    Optimal,

    /// No feasible solution exists.
    Infeasible,

    /// Objective function is unbounded.
    Unbounded,

    /// Solver encountered an internal error.
    Error(String),
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Optimal => write!(f, "optimal"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::Unbounded => write!(f, "unbounded"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}
