use crate::models::common::Float;
use crate::solver::{
    LinExpr, MilpBackend, ParamValue, RowSense, SolveOutcome, SolveStatus, VarId, VarKind,
};
use crate::utils::{ModelError, ModelResult};

const FEASIBILITY_TOLERANCE: Float = 1E-6;

/// A tiny exhaustive backend: enumerates all variables over {0,1} and keeps the best
/// feasible assignment. Suitable for test models whose optimum lies at a 0/1 vertex.
#[derive(Default)]
pub struct EnumerationBackend {
    variables: Vec<(String, VarKind)>,
    constraints: Vec<(LinExpr, RowSense, Float)>,
    objective: LinExpr,
    pub params: Vec<(String, ParamValue)>,
}

impl MilpBackend for EnumerationBackend {
    fn add_variable(&mut self, name: &str, kind: VarKind) -> VarId {
        self.variables.push((name.to_string(), kind));
        self.variables.len() - 1
    }

    fn add_constraint(&mut self, _name: &str, expr: LinExpr, sense: RowSense, rhs: Float) {
        self.constraints.push((expr, sense, rhs));
    }

    fn set_objective(&mut self, expr: LinExpr) {
        self.objective = expr;
    }

    fn set_parameter(&mut self, name: &str, value: ParamValue) -> ModelResult<()> {
        match name {
            "TimeLimit" => {
                self.params.push((name.to_string(), value));
                Ok(())
            }
            _ => Err(ModelError::InvalidConfiguration(format!("unknown parameter '{name}'"))),
        }
    }

    fn optimize(&mut self) -> ModelResult<SolveOutcome> {
        let amount = self.variables.len();
        if amount > 24 {
            return Err(ModelError::Backend(format!("enumeration supports up to 24 variables, got {amount}")));
        }

        let mut best: Option<(Float, Vec<Float>)> = None;

        for mask in 0_u32..(1 << amount) {
            let values: Vec<Float> = (0..amount).map(|idx| ((mask >> idx) & 1) as Float).collect();

            let is_feasible = self.constraints.iter().all(|(expr, sense, rhs)| {
                let lhs: Float = expr.iter().map(|term| term.coefficient * values[term.var]).sum();
                match sense {
                    RowSense::LessOrEqual => lhs <= rhs + FEASIBILITY_TOLERANCE,
                    RowSense::GreaterOrEqual => lhs >= rhs - FEASIBILITY_TOLERANCE,
                    RowSense::Equal => (lhs - rhs).abs() <= FEASIBILITY_TOLERANCE,
                }
            });

            if !is_feasible {
                continue;
            }

            let objective: Float = self.objective.iter().map(|term| term.coefficient * values[term.var]).sum();
            if best.as_ref().is_none_or(|(incumbent, _)| objective < *incumbent) {
                best = Some((objective, values));
            }
        }

        Ok(match best {
            Some((objective, values)) => SolveOutcome {
                status: SolveStatus::Optimal,
                objective: Some(objective),
                best_bound: Some(objective),
                values,
            },
            None => SolveOutcome { status: SolveStatus::Infeasible, objective: None, best_bound: None, values: vec![] },
        })
    }
}
