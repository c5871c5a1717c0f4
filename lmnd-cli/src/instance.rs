use crate::import::{first_n_scenario_ids, read_distances, read_facilities, read_sampling_plan, read_scenario, read_vehicles, read_zones};
use lmnd_core::approximation::ContinuousApproximation;
use lmnd_core::models::problem::{Facility, Vehicle};
use lmnd_core::models::Scenario;
use lmnd_core::solver::{CapacityMode, DesignModel, MilpBackend, ModelConfig};
use lmnd_core::utils::{Environment, ModelError, ModelResult};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Selection of the scenario sample to optimize over.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScenarioSelection {
    /// The first `n` numbered scenarios.
    FirstN,
    /// The persisted evaluation sample.
    Evaluation,
    /// A persisted numbered sampling plan.
    Plan(u32),
}

/// Configuration of an instance.
#[derive(Clone, Debug)]
pub struct InstanceConfig {
    /// Amount of planning periods.
    pub periods: usize,
    /// Amount of scenarios under the default selection.
    pub scenario_count: usize,
    /// Capacity planning mode.
    pub capacity_mode: CapacityMode,
    /// Relaxes assignment variables to the unit interval.
    pub continuous_assignment: bool,
    /// Scenario sample selection.
    pub selection: ScenarioSelection,
}

/// An assembled problem instance: entities, continuous-approximation enriched scenarios
/// and the configuration to build the design model from them.
pub struct Instance {
    /// An instance id.
    pub id: String,
    /// An instance configuration.
    pub config: InstanceConfig,
    /// Candidate facilities including the depot.
    pub facilities: Vec<Arc<Facility>>,
    /// Vehicle types.
    pub vehicles: Vec<Arc<Vehicle>>,
    /// Scenarios with populated serving tables.
    pub scenarios: Vec<Arc<Scenario>>,
    environment: Arc<Environment>,
}

impl Instance {
    /// Loads an instance from a data directory, runs the continuous approximation and
    /// returns the enriched instance.
    ///
    /// Expected layout: `facilities.csv`, `facility_tiers.csv`, `vehicles.csv`,
    /// `zones.csv`, `distances_zones.csv`, `distances_depot.csv` and
    /// `scenarios/scenario_<id>.json` plus optional sampling plans under
    /// `scenarios/sampling/`.
    pub fn load(data_dir: &Path, id: &str, config: InstanceConfig, environment: Arc<Environment>) -> ModelResult<Self> {
        (environment.logger)(&format!("loading instance '{id}' from {}", data_dir.display()));

        let facilities = read_facilities(
            open(&data_dir.join("facilities.csv"))?,
            open(&data_dir.join("facility_tiers.csv"))?,
            config.periods,
        )?;
        let vehicles = read_vehicles(open(&data_dir.join("vehicles.csv"))?)?;

        let vehicle_ids: Vec<String> = vehicles.iter().map(|vehicle| vehicle.id.clone()).collect();
        let zones = read_zones(open(&data_dir.join("zones.csv"))?, &vehicle_ids)?;

        let distances = read_distances(
            open(&data_dir.join("distances_zones.csv"))?,
            open(&data_dir.join("distances_depot.csv"))?,
        )?;

        let scenario_ids = match &config.selection {
            ScenarioSelection::FirstN => first_n_scenario_ids(config.scenario_count),
            ScenarioSelection::Evaluation => {
                read_sampling_plan(open(&data_dir.join("scenarios/sampling/evaluation.json"))?)?
            }
            ScenarioSelection::Plan(plan_id) => {
                read_sampling_plan(open(&data_dir.join(format!("scenarios/sampling/sampling_{plan_id}.json")))?)?
            }
        };
        (environment.logger)(&format!("scenario sample: {scenario_ids:?}"));

        let mut scenarios = scenario_ids
            .iter()
            .map(|scenario_id| {
                let path = data_dir.join(format!("scenarios/scenario_{scenario_id}.json"));
                read_scenario(open(&path)?, scenario_id, &zones, config.periods, &environment)
            })
            .collect::<ModelResult<Vec<_>>>()?;

        ContinuousApproximation::new(
            facilities.clone(),
            vehicles.clone(),
            Arc::new(distances),
            config.periods,
            environment.clone(),
        )?
        .run(&mut scenarios)?;

        Ok(Self {
            id: id.to_string(),
            config,
            facilities,
            vehicles,
            scenarios: scenarios.into_iter().map(Arc::new).collect(),
            environment,
        })
    }

    /// Returns ids of the selected scenarios.
    pub fn scenario_ids(&self) -> Vec<String> {
        self.scenarios.iter().map(|scenario| scenario.id().to_string()).collect()
    }

    /// Creates the design model over the instance with the given backend.
    pub fn create_model(&self, backend: Box<dyn MilpBackend>) -> ModelResult<DesignModel> {
        DesignModel::new(
            self.facilities.clone(),
            self.scenarios.clone(),
            ModelConfig {
                capacity_mode: self.config.capacity_mode,
                continuous_assignment: self.config.continuous_assignment,
                periods: self.config.periods,
            },
            backend,
            self.environment.clone(),
        )
    }
}

fn open(path: &Path) -> ModelResult<File> {
    File::open(path).map_err(|err| ModelError::InvalidData(format!("cannot open {}: {err}", path.display())))
}
