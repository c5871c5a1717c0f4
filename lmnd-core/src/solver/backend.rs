use crate::models::common::{Cost, Float};
use crate::utils::ModelResult;

/// Identifier of a variable inside a backend model.
pub type VarId = usize;

/// Variable integrality requested from the backend.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VarKind {
    /// A {0,1} variable.
    Binary,
    /// A continuous variable bounded to the unit interval.
    UnitContinuous,
}

/// A single `coefficient * variable` term of a linear expression.
#[derive(Clone, Copy, Debug)]
pub struct LinTerm {
    /// A variable id.
    pub var: VarId,
    /// A coefficient of the term.
    pub coefficient: Float,
}

/// A linear expression as an implicit sum of terms.
pub type LinExpr = Vec<LinTerm>;

/// Comparison sense of a linear constraint against its right-hand side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RowSense {
    /// The expression must not exceed the right-hand side.
    LessOrEqual,
    /// The expression must reach at least the right-hand side.
    GreaterOrEqual,
    /// The expression must equal the right-hand side.
    Equal,
}

/// A value of a named solver tuning parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// An integer parameter value.
    Integer(i64),
    /// A floating point parameter value.
    Float(Float),
    /// A textual parameter value.
    Text(String),
}

/// Termination status reported by a backend.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolveStatus {
    /// The backend proved optimality of the incumbent.
    Optimal,
    /// The backend terminated with a feasible incumbent without proving optimality,
    /// e.g. because of a time limit. This is a legitimate outcome, not an error.
    Feasible,
    /// The backend proved the model infeasible.
    Infeasible,
}

/// Result of one optimization run.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    /// A termination status.
    pub status: SolveStatus,
    /// Achieved objective value, absent when no incumbent was found.
    pub objective: Option<Cost>,
    /// Best known bound on the objective, absent when the backend cannot prove one.
    pub best_bound: Option<Cost>,
    /// Resolved variable values indexed by [`VarId`].
    pub values: Vec<Float>,
}

/// An opaque mixed-integer linear programming service.
///
/// Isolates the model builder from any particular solver's API surface: the builder only
/// declares variables and rows, sets a minimization objective, forwards named tuning
/// parameters and asks for one blocking optimization run. Variable values are read back
/// from the returned [`SolveOutcome`].
pub trait MilpBackend {
    /// Declares a new variable and returns its backend id.
    fn add_variable(&mut self, name: &str, kind: VarKind) -> VarId;

    /// Adds the linear constraint `expr <sense> rhs`.
    fn add_constraint(&mut self, name: &str, expr: LinExpr, sense: RowSense, rhs: Float);

    /// Sets the minimization objective.
    fn set_objective(&mut self, expr: LinExpr);

    /// Forwards a named tuning parameter, e.g. a wall-clock time limit in seconds.
    /// Unknown parameter names or invalid values are errors.
    fn set_parameter(&mut self, name: &str, value: ParamValue) -> ModelResult<()>;

    /// Runs optimization, blocking until the backend terminates.
    fn optimize(&mut self) -> ModelResult<SolveOutcome>;
}
