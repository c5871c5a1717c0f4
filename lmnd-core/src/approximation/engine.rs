#[cfg(test)]
#[path = "../../tests/unit/approximation/engine_test.rs"]
mod engine_test;

use crate::approximation::{estimate_tuple, DistanceMatrix, TupleInput};
use crate::models::common::{round2, Cost, Float, Period};
use crate::models::problem::{DeliveryZone, Facility, Vehicle};
use crate::models::{
    DepotServingKey, DepotServingTable, FacilityServingKey, FacilityServingTable, Scenario, ServingEstimate,
};
use crate::utils::{parallel_collect, Environment, ModelError, ModelResult};
use std::sync::Arc;

/// A rounded cost and fleet size cell of the per-combination table.
#[derive(Clone, Debug)]
struct CombinationCell {
    cost: Cost,
    fleet_size: Float,
}

/// A dense per-scenario table over (facility, zone, vehicle, period) combinations,
/// addressed by stable integer indices assigned to each dimension.
struct CombinationTable {
    zones: usize,
    vehicles: usize,
    periods: usize,
    cells: Vec<Option<CombinationCell>>,
}

impl CombinationTable {
    fn new(facilities: usize, zones: usize, vehicles: usize, periods: usize) -> Self {
        Self { zones, vehicles, periods, cells: vec![None; facilities * zones * vehicles * periods] }
    }

    fn index(&self, facility: usize, zone: usize, vehicle: usize, period: Period) -> usize {
        ((facility * self.zones + zone) * self.vehicles + vehicle) * self.periods + period
    }

    fn get(&self, facility: usize, zone: usize, vehicle: usize, period: Period) -> Option<&CombinationCell> {
        self.cells[self.index(facility, zone, vehicle, period)].as_ref()
    }

    fn set(&mut self, facility: usize, zone: usize, vehicle: usize, period: Period, cell: CombinationCell) {
        let index = self.index(facility, zone, vehicle, period);
        self.cells[index] = Some(cell);
    }
}

/// Computes continuous-approximation serving estimates for every combination of facility,
/// delivery zone, vehicle type and period with positive demand, per scenario.
///
/// The computation is a two-stage pipeline: the primary pass evaluates the closed-form
/// estimates in parallel across zones, then, strictly after all its writes, the injection
/// pass adds the first-echelon (line-haul) cost and fleet size of every satellite facility
/// into the entries of all zone-serving vehicle types for the same key. The resulting
/// per-echelon tables are written back onto the scenario, which rejects repopulation.
pub struct ContinuousApproximation {
    facilities: Vec<Arc<Facility>>,
    vehicles: Vec<Arc<Vehicle>>,
    line_haul_index: usize,
    distances: Arc<DistanceMatrix>,
    periods: usize,
    environment: Arc<Environment>,
}

impl ContinuousApproximation {
    /// Creates a new instance of `ContinuousApproximation`.
    ///
    /// Requires exactly one depot facility, exactly one line-haul vehicle type and at
    /// least one zone-serving vehicle type.
    pub fn new(
        facilities: Vec<Arc<Facility>>,
        vehicles: Vec<Arc<Vehicle>>,
        distances: Arc<DistanceMatrix>,
        periods: usize,
        environment: Arc<Environment>,
    ) -> ModelResult<Self> {
        let depots = facilities.iter().filter(|facility| facility.is_depot).count();
        if depots != 1 {
            return Err(ModelError::InvalidConfiguration(format!(
                "expected exactly one depot facility, got {depots}"
            )));
        }

        let mut line_hauls = vehicles.iter().enumerate().filter(|(_, vehicle)| vehicle.is_line_haul());
        let line_haul_index = match (line_hauls.next(), line_hauls.next()) {
            (Some((index, _)), None) => index,
            _ => {
                return Err(ModelError::InvalidConfiguration(
                    "expected exactly one line-haul vehicle type".to_string(),
                ))
            }
        };

        if vehicles.len() == 1 {
            return Err(ModelError::InvalidConfiguration("expected at least one zone-serving vehicle type".to_string()));
        }

        if periods == 0 {
            return Err(ModelError::InvalidConfiguration("expected a positive amount of periods".to_string()));
        }

        Ok(Self { facilities, vehicles, line_haul_index, distances, periods, environment })
    }

    /// Runs the approximation over all scenarios, writing serving tables back onto them.
    pub fn run(&self, scenarios: &mut [Scenario]) -> ModelResult<()> {
        scenarios.iter_mut().try_for_each(|scenario| self.process_scenario(scenario))
    }

    fn process_scenario(&self, scenario: &mut Scenario) -> ModelResult<()> {
        if scenario.is_populated() {
            return Err(ModelError::InvalidState(format!(
                "scenario '{}' already processed: rerunning would double-count first-echelon costs",
                scenario.id()
            )));
        }

        if scenario.periods() != self.periods {
            return Err(ModelError::InvalidConfiguration(format!(
                "scenario '{}' has {} periods, engine is configured for {}",
                scenario.id(),
                scenario.periods(),
                self.periods
            )));
        }

        (self.environment.logger)(&format!(
            "running continuous approximation for scenario '{}' with {} zones",
            scenario.id(),
            scenario.zones().len()
        ));

        let mut zones: Vec<&DeliveryZone> = scenario.zones().values().collect();
        zones.sort_by(|a, b| a.id.cmp(&b.id));

        let mut table = CombinationTable::new(self.facilities.len(), zones.len(), self.vehicles.len(), self.periods);

        // primary pass: zones are independent of each other
        let results = parallel_collect(&zones, |zone| self.process_zone(zone));
        for (zone_index, result) in results.into_iter().enumerate() {
            for (facility_index, vehicle_index, period, cell) in result? {
                table.set(facility_index, zone_index, vehicle_index, period, cell);
            }
        }

        // injection pass: requires every primary write for the scenario to be visible
        self.inject_first_echelon(&mut table, zones.len())?;

        let (facility_table, depot_table) = self.collect_serving_tables(&table, &zones);

        (self.environment.logger)(&format!(
            "scenario '{}': {} facility-echelon and {} depot-echelon estimates",
            scenario.id(),
            facility_table.len(),
            depot_table.len()
        ));

        scenario.set_serving_tables(facility_table, depot_table)
    }

    /// Evaluates all (facility, vehicle, period) combinations of one zone with positive demand.
    #[allow(clippy::type_complexity)]
    fn process_zone(&self, zone: &DeliveryZone) -> ModelResult<Vec<(usize, usize, Period, CombinationCell)>> {
        let area = zone.area();
        let mut cells = Vec::default();

        for period in 0..self.periods {
            let demand = zone.demand_at(period);
            if demand <= 0. {
                continue;
            }

            let density = zone.stop_at(period) / area;
            let drop = zone.drop_at(period);

            for (facility_index, facility) in self.facilities.iter().enumerate() {
                for (vehicle_index, vehicle) in self.vehicles.iter().enumerate() {
                    // the depot feeds itself: its line-haul combinations are never used
                    if vehicle.is_line_haul() && facility.is_depot {
                        continue;
                    }

                    let distance = if vehicle.is_line_haul() {
                        self.distances.depot_distance(&facility.id)?
                    } else {
                        self.distances.zone_distance(&facility.id, &zone.id)?
                    };

                    let estimate = estimate_tuple(&TupleInput {
                        vehicle,
                        zone_circuit_factor: zone.k,
                        area,
                        density,
                        drop,
                        distance,
                    })?;

                    let cell = CombinationCell {
                        cost: round2(estimate.cost_total),
                        fleet_size: round2(estimate.average_fleet_size),
                    };
                    cells.push((facility_index, vehicle_index, period, cell));
                }
            }
        }

        Ok(cells)
    }

    /// Adds the line-haul cost and fleet size of every satellite facility into the entries
    /// of all zone-serving vehicle types for the same (facility, zone, period) key.
    fn inject_first_echelon(&self, table: &mut CombinationTable, zones: usize) -> ModelResult<()> {
        let line_haul_index = self.line_haul_index;

        for (facility_index, facility) in self.facilities.iter().enumerate() {
            if facility.is_depot {
                continue;
            }

            for zone_index in 0..zones {
                for period in 0..self.periods {
                    let line_haul = table.get(facility_index, zone_index, line_haul_index, period).cloned();

                    for vehicle_index in 0..self.vehicles.len() {
                        if vehicle_index == line_haul_index {
                            continue;
                        }

                        let index = table.index(facility_index, zone_index, vehicle_index, period);
                        if let Some(cell) = table.cells[index].as_mut() {
                            let line_haul = line_haul.as_ref().ok_or_else(|| {
                                ModelError::MissingEstimate(format!(
                                    "line-haul combination for facility '{}' while injecting first-echelon costs",
                                    facility.id
                                ))
                            })?;

                            cell.cost += line_haul.cost;
                            cell.fleet_size += line_haul.fleet_size;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Collapses the vehicle dimension into per-echelon serving tables, keeping the
    /// cheapest zone-serving vehicle type per key.
    fn collect_serving_tables(
        &self,
        table: &CombinationTable,
        zones: &[&DeliveryZone],
    ) -> (FacilityServingTable, DepotServingTable) {
        let mut facility_table = FacilityServingTable::default();
        let mut depot_table = DepotServingTable::default();

        for (facility_index, facility) in self.facilities.iter().enumerate() {
            for (zone_index, zone) in zones.iter().enumerate() {
                for period in 0..self.periods {
                    let cheapest = self
                        .vehicles
                        .iter()
                        .enumerate()
                        .filter(|(_, vehicle)| !vehicle.is_line_haul())
                        .filter_map(|(vehicle_index, vehicle)| {
                            table
                                .get(facility_index, zone_index, vehicle_index, period)
                                .map(|cell| (vehicle, cell))
                        })
                        .min_by(|(_, a), (_, b)| a.cost.total_cmp(&b.cost));

                    let Some((vehicle, cell)) = cheapest else { continue };

                    let estimate = ServingEstimate {
                        cost_total: cell.cost,
                        fleet_size: cell.fleet_size,
                        vehicle: vehicle.id.clone(),
                    };

                    if facility.is_depot {
                        depot_table.insert(DepotServingKey { zone: zone.id.clone(), period }, estimate);
                    } else {
                        facility_table.insert(
                            FacilityServingKey {
                                facility: facility.id.clone(),
                                zone: zone.id.clone(),
                                period,
                            },
                            estimate,
                        );
                    }
                }
            }
        }

        (facility_table, depot_table)
    }
}
