#[cfg(test)]
#[path = "../../tests/unit/models/scenario_test.rs"]
mod scenario_test;

use crate::models::common::{Cost, Float, Period};
use crate::models::problem::DeliveryZone;
use crate::utils::{ModelError, ModelResult};
use rustc_hash::FxHashMap;

/// A serving path for a zone: via an installed satellite facility or directly from the depot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Echelon {
    /// Serving via an installed satellite facility, fed by line-haul replenishment.
    Facility,
    /// Serving directly from the central depot.
    Depot,
}

/// A continuous-approximation estimate for serving one zone in one period.
#[derive(Clone, Debug, PartialEq)]
pub struct ServingEstimate {
    /// Total serving cost, rounded to table precision.
    pub cost_total: Cost,
    /// Average fleet size required, rounded to table precision.
    pub fleet_size: Float,
    /// Id of the delivery vehicle type behind the estimate.
    pub vehicle: String,
}

/// Key of a facility-echelon serving estimate.
///
/// Field order is the fixed tuple convention `(facility, zone, period)`; equality and
/// hashing are derived over all fields.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FacilityServingKey {
    /// A facility id.
    pub facility: String,
    /// A zone id.
    pub zone: String,
    /// A period index.
    pub period: Period,
}

/// Key of a depot-echelon serving estimate with tuple convention `(zone, period)`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DepotServingKey {
    /// A zone id.
    pub zone: String,
    /// A period index.
    pub period: Period,
}

/// A serving estimate table of one echelon.
pub type FacilityServingTable = FxHashMap<FacilityServingKey, ServingEstimate>;
/// A serving estimate table of the depot echelon.
pub type DepotServingTable = FxHashMap<DepotServingKey, ServingEstimate>;

/// Holds one demand realization: the delivery zones available under it and, once the
/// continuous approximation has run, the per-echelon serving cost and fleet size tables.
///
/// Tables are write-once: populating an already populated scenario is an invalid state.
/// This is also the guard which prevents first-echelon costs from being injected twice.
pub struct Scenario {
    id: String,
    zones: FxHashMap<String, DeliveryZone>,
    periods: usize,
    facility_serving: Option<FacilityServingTable>,
    depot_serving: Option<DepotServingTable>,
}

impl Scenario {
    /// Creates a scenario from the given zones, keeping only available ones (zones with
    /// an attached demand realization).
    pub fn new(id: &str, zones: impl IntoIterator<Item = DeliveryZone>, periods: usize) -> Self {
        let zones = zones
            .into_iter()
            .filter(|zone| zone.is_available())
            .map(|zone| (zone.id.clone(), zone))
            .collect();

        Self { id: id.to_string(), zones, periods, facility_serving: None, depot_serving: None }
    }

    /// Returns a scenario id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns available zones keyed by id.
    pub fn zones(&self) -> &FxHashMap<String, DeliveryZone> {
        &self.zones
    }

    /// Returns the amount of planning periods.
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Returns true once serving tables have been populated by the approximation engine.
    pub fn is_populated(&self) -> bool {
        self.facility_serving.is_some() || self.depot_serving.is_some()
    }

    /// Populates both echelon tables. Write-once.
    pub fn set_serving_tables(
        &mut self,
        facility: FacilityServingTable,
        depot: DepotServingTable,
    ) -> ModelResult<()> {
        if self.is_populated() {
            return Err(ModelError::InvalidState(format!(
                "scenario '{}' already has serving tables populated",
                self.id
            )));
        }

        self.facility_serving = Some(facility);
        self.depot_serving = Some(depot);

        Ok(())
    }

    /// Returns the serving estimate for a zone served from the given facility.
    pub fn facility_estimate(&self, facility: &str, zone: &str, period: Period) -> ModelResult<&ServingEstimate> {
        let key = FacilityServingKey { facility: facility.to_string(), zone: zone.to_string(), period };
        self.facility_serving
            .as_ref()
            .and_then(|table| table.get(&key))
            .ok_or_else(|| ModelError::MissingEstimate(format!("facility echelon key {key:?} in scenario '{}'", self.id)))
    }

    /// Returns the serving estimate for a zone served directly from the depot.
    pub fn depot_estimate(&self, zone: &str, period: Period) -> ModelResult<&ServingEstimate> {
        let key = DepotServingKey { zone: zone.to_string(), period };
        self.depot_serving
            .as_ref()
            .and_then(|table| table.get(&key))
            .ok_or_else(|| ModelError::MissingEstimate(format!("depot echelon key {key:?} in scenario '{}'", self.id)))
    }

    /// Returns the amount of serving estimates populated for the given echelon.
    pub fn serving_table_len(&self, echelon: Echelon) -> usize {
        match echelon {
            Echelon::Facility => self.facility_serving.as_ref().map_or(0, |table| table.len()),
            Echelon::Depot => self.depot_serving.as_ref().map_or(0, |table| table.len()),
        }
    }
}
