use highs::{Col, HighsModelStatus, RowProblem, Sense};
use lmnd_core::models::common::Float;
use lmnd_core::solver::{LinExpr, MilpBackend, ParamValue, RowSense, SolveOutcome, SolveStatus, VarId, VarKind};
use lmnd_core::utils::{ModelError, ModelResult};

/// A [MilpBackend] implementation on top of the HiGHS solver.
///
/// Variables, rows and the objective are buffered and flushed into a fresh row-based
/// HiGHS problem on every optimize call. Supported parameters: `TimeLimit` (seconds)
/// and `LogToConsole` (0 or 1).
#[derive(Default)]
pub struct HighsBackend {
    variables: Vec<VarKind>,
    constraints: Vec<(LinExpr, RowSense, Float)>,
    objective: LinExpr,
    time_limit: Option<Float>,
    verbose: bool,
}

impl MilpBackend for HighsBackend {
    fn add_variable(&mut self, _name: &str, kind: VarKind) -> VarId {
        self.variables.push(kind);
        self.variables.len() - 1
    }

    fn add_constraint(&mut self, _name: &str, expr: LinExpr, sense: RowSense, rhs: Float) {
        self.constraints.push((expr, sense, rhs));
    }

    fn set_objective(&mut self, expr: LinExpr) {
        self.objective = expr;
    }

    fn set_parameter(&mut self, name: &str, value: ParamValue) -> ModelResult<()> {
        match (name, value) {
            ("TimeLimit", ParamValue::Integer(seconds)) if seconds > 0 => {
                self.time_limit = Some(seconds as Float);
                Ok(())
            }
            ("TimeLimit", ParamValue::Float(seconds)) if seconds > 0. => {
                self.time_limit = Some(seconds);
                Ok(())
            }
            ("TimeLimit", value) => {
                Err(ModelError::InvalidConfiguration(format!("invalid TimeLimit value {value:?}")))
            }
            ("LogToConsole", ParamValue::Integer(flag)) => {
                self.verbose = flag != 0;
                Ok(())
            }
            (name, _) => Err(ModelError::InvalidConfiguration(format!("unknown parameter '{name}'"))),
        }
    }

    fn optimize(&mut self) -> ModelResult<SolveOutcome> {
        let mut objective = vec![0.; self.variables.len()];
        self.objective.iter().for_each(|term| objective[term.var] += term.coefficient);

        let mut problem = RowProblem::new();

        let cols: Vec<Col> = self
            .variables
            .iter()
            .zip(objective)
            .map(|(kind, coefficient)| match kind {
                VarKind::Binary => problem.add_integer_column(coefficient, 0.0..=1.0),
                VarKind::UnitContinuous => problem.add_column(coefficient, 0.0..=1.0),
            })
            .collect();

        for (expr, sense, rhs) in &self.constraints {
            let terms: Vec<(Col, Float)> = expr.iter().map(|term| (cols[term.var], term.coefficient)).collect();
            match sense {
                RowSense::LessOrEqual => problem.add_row(..=*rhs, terms),
                RowSense::GreaterOrEqual => problem.add_row(*rhs.., terms),
                RowSense::Equal => problem.add_row(*rhs..=*rhs, terms),
            }
        }

        let mut model = problem.optimise(Sense::Minimise);
        model.set_option("output_flag", self.verbose);
        if let Some(time_limit) = self.time_limit {
            model.set_option("time_limit", time_limit);
        }

        let solved = model.solve();

        match solved.status() {
            HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => {
                let solution = solved.get_solution();
                let values = cols.iter().map(|&col| solution[col]).collect();
                let objective = solved.objective_value();

                Ok(SolveOutcome {
                    status: SolveStatus::Optimal,
                    objective: Some(objective),
                    best_bound: Some(objective),
                    values,
                })
            }
            HighsModelStatus::Infeasible => Ok(SolveOutcome {
                status: SolveStatus::Infeasible,
                objective: None,
                best_bound: None,
                values: vec![],
            }),
            status => {
                // sub-optimal termination (e.g. a time limit) still carries an incumbent;
                // the row-based api exposes no dual bound for it
                let solution = solved.get_solution();
                if solution.columns().is_empty() {
                    return Err(ModelError::Backend(format!("solver terminated with status {status:?}")));
                }

                let values = cols.iter().map(|&col| solution[col]).collect();

                Ok(SolveOutcome {
                    status: SolveStatus::Feasible,
                    objective: Some(solved.objective_value()),
                    best_bound: None,
                    values,
                })
            }
        }
    }
}
