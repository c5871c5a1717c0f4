#[cfg(test)]
#[path = "../tests/unit/export_test.rs"]
mod export_test;

use crate::Instance;
use lmnd_core::models::common::Float;
use lmnd_core::solver::SolveReport;
use lmnd_core::utils::{ModelError, ModelResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// A summary of the solved instance configuration.
#[derive(Debug, Serialize)]
pub struct InstanceSummary {
    /// An instance id.
    pub id: String,
    /// Amount of planning periods.
    pub periods: usize,
    /// Capacity planning mode.
    pub capacity_mode: String,
    /// Whether assignment variables were relaxed to the unit interval.
    pub continuous_assignment: bool,
    /// Ids of the scenarios in the sample.
    pub scenarios: Vec<String>,
}

/// A summary of the solver result record.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    /// A termination status.
    pub status: String,
    /// Wall-clock run time in seconds.
    pub run_time: Float,
    /// Relative optimality gap in percent, when proven.
    pub gap: Option<Float>,
    /// Achieved objective value, when an incumbent was found.
    pub objective: Option<Float>,
    /// Best known bound on the objective, when proven.
    pub best_bound: Option<Float>,
}

/// The persisted result document: the solve report plus every decision variable's
/// resolved value as a flat mapping keyed by variable name.
#[derive(Debug, Serialize)]
pub struct ResultsDocument {
    /// An instance summary.
    pub instance: InstanceSummary,
    /// A solve report summary.
    pub report: ReportSummary,
    /// Resolved variable values keyed by variable name.
    pub variables: BTreeMap<String, Float>,
}

impl ResultsDocument {
    /// Creates a result document from a solved instance.
    pub fn new(instance: &Instance, report: &SolveReport, variables: BTreeMap<String, Float>) -> Self {
        Self {
            instance: InstanceSummary {
                id: instance.id.clone(),
                periods: instance.config.periods,
                capacity_mode: instance.config.capacity_mode.as_str().to_string(),
                continuous_assignment: instance.config.continuous_assignment,
                scenarios: instance.scenario_ids(),
            },
            report: ReportSummary {
                status: format!("{:?}", report.status),
                run_time: report.run_time,
                gap: report.gap,
                objective: report.objective,
                best_bound: report.best_bound,
            },
            variables,
        }
    }
}

/// Writes a result document as pretty-printed json.
pub fn write_results<W: Write>(writer: W, document: &ResultsDocument) -> ModelResult<()> {
    serde_json::to_writer_pretty(writer, document)
        .map_err(|err| ModelError::InvalidData(format!("cannot write results: {err}")))
}
