//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is a high-performance open-source linear/mixed-integer programming
//! solver. This implementation wraps it using the good_lp crate for
//! ergonomic Rust usage.

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution as _, SolverModel,
};
use tracing::debug;

use crate::domain::{ConstraintSense, VarId, VariableKind};
use crate::error::Result;
use crate::port::{MilpProblem, Solution, SolutionStatus, Solver};

/// HiGHS-based MILP solver.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver;

impl HiGHSSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, problem: &MilpProblem) -> Result<Solution> {
        Ok(solve_with_good_lp(problem))
    }
}

fn affine(terms: &[(VarId, f64)], vars: &[good_lp::Variable]) -> Expression {
    terms.iter().map(|(id, c)| *c * vars[id.index()]).sum()
}

/// Internal solver implementation using good_lp.
fn solve_with_good_lp(problem: &MilpProblem) -> Solution {
    // Handle empty problem
    if problem.num_vars() == 0 {
        return Solution {
            values: vec![],
            objective: problem.objective().offset(),
            status: SolutionStatus::Optimal,
        };
    }

    let mut vars = variables!();
    let var_list: Vec<good_lp::Variable> = problem
        .variables()
        .iter()
        .map(|decl| {
            let mut v = variable().name(decl.name.clone());
            match decl.kind {
                VariableKind::Binary => v = v.binary(),
                VariableKind::Continuous => {
                    if let Some(lb) = decl.bounds.lower {
                        v = v.min(lb);
                    }
                    if let Some(ub) = decl.bounds.upper {
                        v = v.max(ub);
                    }
                }
            }
            vars.add(v)
        })
        .collect();

    let objective = affine(problem.objective().terms(), &var_list);
    let mut model = vars.minimise(objective).using(highs);

    for constr in problem.constraints() {
        let lhs = affine(&constr.terms, &var_list);
        let rhs = constr.rhs;
        model = match constr.sense {
            ConstraintSense::GreaterEqual => model.with(constraint!(lhs >= rhs)),
            ConstraintSense::LessEqual => model.with(constraint!(lhs <= rhs)),
            ConstraintSense::Equal => model.with(constraint!(lhs == rhs)),
        };
    }

    debug!(
        variables = problem.num_vars(),
        binaries = problem.num_binaries(),
        constraints = problem.constraints().len(),
        "Invoking HiGHS"
    );

    match model.solve() {
        Ok(solution) => {
            let values: Vec<f64> = var_list.iter().map(|v| solution.value(*v)).collect();

            // Re-evaluate objective with the solved values
            let objective = problem.objective().evaluate(&values);

            Solution {
                values,
                objective,
                status: SolutionStatus::Optimal,
            }
        }
        Err(ResolutionError::Infeasible) => Solution::failed(SolutionStatus::Infeasible),
        Err(ResolutionError::Unbounded) => Solution::failed(SolutionStatus::Unbounded),
        Err(e) => Solution::failed(SolutionStatus::Error(e.to_string())),
    }
}
