#[cfg(test)]
#[path = "../../tests/unit/solver/model_test.rs"]
mod model_test;

use crate::models::common::{round0, round_to, Cost, Float};
use crate::models::problem::Facility;
use crate::models::Scenario;
use crate::solver::{
    ActivationKey, AssignKey, CapacityMode, DepotAssignKey, InstallKey, LinTerm, MilpBackend, ParamValue, RowSense,
    SolveOutcome, SolveStatus, VarId, VarKind, VariableStore,
};
use crate::utils::{Environment, ModelError, ModelResult, Timer};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Configuration of the design model.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    /// Capacity planning mode.
    pub capacity_mode: CapacityMode,
    /// Relaxes assignment variables `X`/`W` to the unit interval instead of binary.
    pub continuous_assignment: bool,
    /// Amount of planning periods.
    pub periods: usize,
}

/// A canonical result record of one solve run. All values are rounded for reporting.
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// A termination status of the backend.
    pub status: SolveStatus,
    /// Wall-clock run time in seconds.
    pub run_time: Float,
    /// Relative optimality gap in percent, absent when the backend proves no bound.
    pub gap: Option<Float>,
    /// Achieved objective value, absent when no incumbent was found.
    pub objective: Option<Cost>,
    /// Best known bound on the objective, absent when the backend proves no bound.
    pub best_bound: Option<Cost>,
}

/// Builds the stochastic facility-location model from facilities and
/// continuous-approximation enriched scenarios, and delegates optimization to an
/// external MILP backend.
///
/// The objective minimizes `installation(Y) + (1/N) * [operating + serving_facilities +
/// serving_depot]`: installation cost is incurred once while all per-scenario costs are
/// averaged uniformly across the `N` scenarios (the sample average approximation).
pub struct DesignModel {
    satellites: Vec<Arc<Facility>>,
    scenarios: Vec<Arc<Scenario>>,
    config: ModelConfig,
    backend: Box<dyn MilpBackend>,
    environment: Arc<Environment>,
    store: VariableStore,
    is_built: bool,
    outcome: Option<SolveOutcome>,
}

impl DesignModel {
    /// Creates a new instance of `DesignModel` from candidate facilities (the depot, if
    /// present, is excluded from installation decisions), scenarios and a backend.
    pub fn new(
        facilities: Vec<Arc<Facility>>,
        scenarios: Vec<Arc<Scenario>>,
        config: ModelConfig,
        backend: Box<dyn MilpBackend>,
        environment: Arc<Environment>,
    ) -> ModelResult<Self> {
        let satellites: Vec<_> = facilities.into_iter().filter(|facility| !facility.is_depot).collect();

        if satellites.is_empty() {
            return Err(ModelError::InvalidConfiguration("expected at least one satellite facility".to_string()));
        }

        if scenarios.is_empty() {
            return Err(ModelError::InvalidConfiguration("expected at least one scenario".to_string()));
        }

        if let Some(scenario) = scenarios.iter().find(|scenario| scenario.periods() != config.periods) {
            return Err(ModelError::InvalidConfiguration(format!(
                "scenario '{}' has {} periods, model is configured for {}",
                scenario.id(),
                scenario.periods(),
                config.periods
            )));
        }

        for facility in &satellites {
            for tier in &facility.tiers {
                if tier.cost_operation.len() != config.periods {
                    return Err(ModelError::InvalidConfiguration(format!(
                        "tier '{}' of facility '{}' has {} operating costs, model is configured for {} periods",
                        tier.label,
                        facility.id,
                        tier.cost_operation.len(),
                        config.periods
                    )));
                }
            }
        }

        Ok(Self {
            satellites,
            scenarios,
            config,
            backend,
            environment,
            store: VariableStore::default(),
            is_built: false,
            outcome: None,
        })
    }

    /// Builds variables, objective and constraints. Construction is idempotent: repeated
    /// calls are no-ops. Must be called before [`DesignModel::solve`].
    pub fn build(&mut self) -> ModelResult<()> {
        if self.is_built {
            (self.environment.logger)("model already built, skipping");
            return Ok(());
        }

        (self.environment.logger)("building model");

        self.add_variables()?;
        self.add_objective()?;
        self.add_constraints()?;

        self.is_built = true;
        (self.environment.logger)("model built");

        Ok(())
    }

    /// Forwards named solver tuning options, e.g. a wall-clock time limit, to the backend.
    pub fn set_params(&mut self, params: &[(String, ParamValue)]) -> ModelResult<()> {
        for (name, value) in params {
            (self.environment.logger)(&format!("setting parameter {name} = {value:?}"));
            self.backend.set_parameter(name, value.clone())?;
        }

        Ok(())
    }

    /// Runs the backend and returns the canonical result record. Sub-optimal termination
    /// (e.g. due to a time limit) is reported via the gap and bound fields, not an error.
    pub fn solve(&mut self) -> ModelResult<SolveReport> {
        if !self.is_built {
            return Err(ModelError::InvalidState("build() must be called before solve()".to_string()));
        }

        (self.environment.logger)("solving model");

        let timer = Timer::start();
        let outcome = self.backend.optimize()?;
        let run_time = timer.elapsed_secs_as_float();

        let gap = match (outcome.objective, outcome.best_bound) {
            (Some(objective), Some(bound)) if objective.abs() > Float::EPSILON => {
                Some(round_to(100. * (objective - bound).abs() / objective.abs(), 3))
            }
            (Some(_), Some(_)) => Some(0.),
            _ => None,
        };

        let report = SolveReport {
            status: outcome.status,
            run_time: round_to(run_time, 3),
            gap,
            objective: outcome.objective.map(|objective| round_to(objective, 3)),
            best_bound: outcome.best_bound.map(|bound| round_to(bound, 3)),
        };

        (self.environment.logger)(&format!(
            "model solved: status {:?}, objective {:?}, bound {:?}, gap {:?}%, run time {}s",
            report.status, report.objective, report.best_bound, report.gap, report.run_time
        ));

        self.outcome = Some(outcome);

        Ok(report)
    }

    /// Returns every decision variable's resolved value as a flat mapping keyed by
    /// variable name, suitable for external persistence.
    pub fn variable_values(&self) -> ModelResult<BTreeMap<String, Float>> {
        let outcome = self
            .outcome
            .as_ref()
            .ok_or_else(|| ModelError::InvalidState("solve() must be called before reading values".to_string()))?;

        self.store
            .iter_names()
            .map(|(name, id)| {
                outcome
                    .values
                    .get(id)
                    .copied()
                    .map(|value| (name.clone(), value))
                    .ok_or(ModelError::MissingVariable(name))
            })
            .collect()
    }

    fn add_variables(&mut self) -> ModelResult<()> {
        let assignment_kind = if self.config.continuous_assignment { VarKind::UnitContinuous } else { VarKind::Binary };
        (self.environment.logger)(&format!("using {assignment_kind:?} assignment variables"));

        // Z: only the flexible mode decides per-period tier activation
        if self.config.capacity_mode.is_flexible() {
            for facility in &self.satellites {
                for tier in &facility.tiers {
                    for period in 0..self.config.periods {
                        for scenario in &self.scenarios {
                            let key = ActivationKey {
                                facility: facility.id.clone(),
                                tier: tier.label.clone(),
                                period,
                                scenario: scenario.id().to_string(),
                            };
                            let id = self.backend.add_variable(&key.name(), VarKind::Binary);
                            self.store.insert_z(key, id);
                        }
                    }
                }
            }
        }

        // X: zone served from a satellite facility
        for facility in &self.satellites {
            for scenario in &self.scenarios {
                for zone_id in sorted_zone_ids(scenario) {
                    for period in 0..self.config.periods {
                        let key = AssignKey {
                            facility: facility.id.clone(),
                            zone: zone_id.clone(),
                            period,
                            scenario: scenario.id().to_string(),
                        };
                        let id = self.backend.add_variable(&key.name(), assignment_kind);
                        self.store.insert_x(key, id);
                    }
                }
            }
        }

        // W: zone served directly from the depot
        for scenario in &self.scenarios {
            for zone_id in sorted_zone_ids(scenario) {
                for period in 0..self.config.periods {
                    let key = DepotAssignKey {
                        zone: zone_id.clone(),
                        period,
                        scenario: scenario.id().to_string(),
                    };
                    let id = self.backend.add_variable(&key.name(), assignment_kind);
                    self.store.insert_w(key, id);
                }
            }
        }

        // Y: facility installed at a capacity tier
        for facility in &self.satellites {
            for tier in &facility.tiers {
                let key = InstallKey { facility: facility.id.clone(), tier: tier.label.clone() };
                let id = self.backend.add_variable(&key.name(), VarKind::Binary);
                self.store.insert_y(key, id);
            }
        }

        let (y, z, x, w) = self.store.counts();
        (self.environment.logger)(&format!("added variables: Y {y}, Z {z}, X {x}, W {w}"));

        Ok(())
    }

    fn add_objective(&mut self) -> ModelResult<()> {
        (self.environment.logger)("adding objective");

        let weight = 1. / self.scenarios.len() as Float;
        let mut terms: FxHashMap<VarId, Float> = FxHashMap::default();

        // installation cost, incurred once
        for facility in &self.satellites {
            for tier in facility.tiers.iter().filter(|tier| tier.capacity > 0.) {
                let var = self.store.y(&facility.id, &tier.label)?;
                *terms.entry(var).or_default() += round0(tier.cost_installation);
            }
        }

        // operating cost, scenario-averaged
        let operating = self.config.capacity_mode.operating_cost_terms(
            &self.satellites,
            &self.scenarios,
            self.config.periods,
            &self.store,
        )?;
        for (var, cost) in operating {
            *terms.entry(var).or_default() += weight * cost;
        }

        // serving costs, scenario-averaged; zones without demand in a period carry no term
        for scenario in &self.scenarios {
            for zone_id in sorted_zone_ids(scenario) {
                let zone = &scenario.zones()[&zone_id];
                for period in 0..self.config.periods {
                    if zone.demand_at(period) <= 0. {
                        continue;
                    }

                    for facility in &self.satellites {
                        let estimate = scenario.facility_estimate(&facility.id, &zone_id, period)?;
                        let var = self.store.x(&facility.id, &zone_id, period, scenario.id())?;
                        *terms.entry(var).or_default() += weight * round0(estimate.cost_total);
                    }

                    let estimate = scenario.depot_estimate(&zone_id, period)?;
                    let var = self.store.w(&zone_id, period, scenario.id())?;
                    *terms.entry(var).or_default() += weight * round0(estimate.cost_total);
                }
            }
        }

        let mut expr: Vec<LinTerm> =
            terms.into_iter().map(|(var, coefficient)| LinTerm { var, coefficient }).collect();
        expr.sort_by_key(|term| term.var);

        self.backend.set_objective(expr);

        Ok(())
    }

    fn add_constraints(&mut self) -> ModelResult<()> {
        (self.environment.logger)("adding constraints");

        self.add_single_tier()?;

        self.config.capacity_mode.build_constraints(
            self.backend.as_mut(),
            &self.store,
            &self.satellites,
            &self.scenarios,
            self.config.periods,
        )?;

        self.add_demand_satisfaction()
    }

    /// A.1: for each facility, exactly one tier is installed.
    fn add_single_tier(&mut self) -> ModelResult<()> {
        for facility in &self.satellites {
            let expr = facility
                .tiers
                .iter()
                .map(|tier| self.store.y(&facility.id, &tier.label).map(|var| LinTerm { var, coefficient: 1. }))
                .collect::<ModelResult<Vec<_>>>()?;

            let name = format!("R_Open_f{}", facility.id);
            self.backend.add_constraint(&name, expr, RowSense::Equal, 1.);
        }

        Ok(())
    }

    /// A.5: every zone, in every period and scenario, is covered by at least one serving
    /// path, either a facility assignment or the depot.
    fn add_demand_satisfaction(&mut self) -> ModelResult<()> {
        for scenario in &self.scenarios {
            for period in 0..self.config.periods {
                for zone_id in sorted_zone_ids(scenario) {
                    let mut expr = self
                        .satellites
                        .iter()
                        .map(|facility| {
                            self.store
                                .x(&facility.id, &zone_id, period, scenario.id())
                                .map(|var| LinTerm { var, coefficient: 1. })
                        })
                        .collect::<ModelResult<Vec<_>>>()?;

                    expr.push(LinTerm { var: self.store.w(&zone_id, period, scenario.id())?, coefficient: 1. });

                    let name = format!("R_demand_z{}_t{}_s{}", zone_id, period, scenario.id());
                    self.backend.add_constraint(&name, expr, RowSense::GreaterOrEqual, 1.);
                }
            }
        }

        Ok(())
    }
}

fn sorted_zone_ids(scenario: &Scenario) -> Vec<String> {
    let mut ids: Vec<String> = scenario.zones().keys().cloned().collect();
    ids.sort();
    ids
}
