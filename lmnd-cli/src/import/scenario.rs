#[cfg(test)]
#[path = "../../tests/unit/import/scenario_test.rs"]
mod scenario_test;

use lmnd_core::models::common::Float;
use lmnd_core::models::problem::{DeliveryZone, ZoneDemand};
use lmnd_core::models::Scenario;
use lmnd_core::utils::{Environment, ModelError, ModelResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// One zone realization of a scenario file.
#[derive(Debug, Deserialize)]
pub struct ZoneRealizationData {
    /// A zone id.
    pub id: String,
    /// Demand in items per period.
    pub demand: Vec<Float>,
    /// Drop size in items per customer per period.
    pub drop: Vec<Float>,
    /// Customer stop count per period.
    pub stop: Vec<Float>,
}

/// A scenario file: one demand realization per zone.
#[derive(Debug, Deserialize)]
pub struct ScenarioData {
    /// Zone realizations.
    pub zones: Vec<ZoneRealizationData>,
}

/// Reads one scenario realization, attaching demand data to copies of the base zones.
/// Realizations of unknown zone ids are logged and skipped, not fatal.
pub fn read_scenario<R: Read>(
    reader: R,
    id: &str,
    base_zones: &HashMap<String, DeliveryZone>,
    periods: usize,
    environment: &Environment,
) -> ModelResult<Scenario> {
    let data: ScenarioData = serde_json::from_reader(reader)
        .map_err(|err| ModelError::InvalidData(format!("cannot read scenario '{id}': {err}")))?;

    let mut zones = Vec::default();
    for realization in data.zones {
        let Some(zone) = base_zones.get(&realization.id) else {
            (environment.logger)(&format!("zone '{}' not found in zone data, skipping", realization.id));
            continue;
        };

        let mut zone = zone.clone();
        zone.attach_demand(ZoneDemand {
            demand: realization.demand,
            drop: realization.drop,
            stop: realization.stop,
        })?;
        zones.push(zone);
    }

    Ok(Scenario::new(id, zones, periods))
}

#[derive(Debug, Deserialize)]
struct SamplingPlan {
    id_scenarios_sample: Vec<String>,
}

/// Reads a persisted sampling plan: the list of scenario ids to optimize over.
pub fn read_sampling_plan<R: Read>(reader: R) -> ModelResult<Vec<String>> {
    let plan: SamplingPlan = serde_json::from_reader(reader)
        .map_err(|err| ModelError::InvalidData(format!("cannot read sampling plan: {err}")))?;

    Ok(plan.id_scenarios_sample)
}

/// Returns the default scenario selection: the first `n` numbered scenario ids.
pub fn first_n_scenario_ids(n: usize) -> Vec<String> {
    (1..=n).map(|id| id.to_string()).collect()
}
