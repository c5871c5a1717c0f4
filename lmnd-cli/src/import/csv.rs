#[cfg(test)]
#[path = "../../tests/unit/import/csv_test.rs"]
mod csv_test;

use lmnd_core::approximation::DistanceMatrix;
use lmnd_core::models::common::Float;
use lmnd_core::models::problem::{DeliveryZone, Facility, FacilityBuilder, Vehicle, VehicleBuilder, VehicleKind, ZoneBuilder};
use lmnd_core::utils::{ModelError, ModelResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

fn invalid_data<E: std::fmt::Display>(what: &str) -> impl Fn(E) -> ModelError + '_ {
    move |err| ModelError::InvalidData(format!("cannot read {what}: {err}"))
}

#[derive(Debug, Deserialize)]
struct FacilityRecord {
    id: String,
    lon: Float,
    lat: Float,
    cost_sourcing: Float,
    is_depot: bool,
}

#[derive(Debug, Deserialize)]
struct TierRecord {
    facility_id: String,
    tier: String,
    capacity: Float,
    cost_installation: Float,
    cost_operation: Float,
}

/// Reads facilities and their capacity tiers from two csv tables. The per-period
/// operating cost column is expanded over the whole planning horizon.
pub fn read_facilities<F: Read, T: Read>(
    facilities: F,
    tiers: T,
    periods: usize,
) -> ModelResult<Vec<Arc<Facility>>> {
    let mut tiers_by_facility: HashMap<String, Vec<TierRecord>> = HashMap::new();
    for record in ::csv::Reader::from_reader(tiers).deserialize::<TierRecord>() {
        let record = record.map_err(invalid_data("facility tiers"))?;
        tiers_by_facility.entry(record.facility_id.clone()).or_default().push(record);
    }

    let mut result = Vec::default();
    for record in ::csv::Reader::from_reader(facilities).deserialize::<FacilityRecord>() {
        let record = record.map_err(invalid_data("facilities"))?;

        let tiers = tiers_by_facility.remove(&record.id).ok_or_else(|| {
            ModelError::InvalidData(format!("facility '{}' has no capacity tiers", record.id))
        })?;

        let mut builder = FacilityBuilder::default()
            .id(&record.id)
            .location(record.lon, record.lat)
            .cost_sourcing(record.cost_sourcing);

        if record.is_depot {
            builder = builder.depot();
        }

        for tier in tiers {
            builder = builder.add_tier(
                &tier.tier,
                tier.capacity,
                tier.cost_installation,
                vec![tier.cost_operation; periods],
            );
        }

        result.push(Arc::new(builder.build()?));
    }

    if let Some(orphan) = tiers_by_facility.keys().next() {
        return Err(ModelError::InvalidData(format!("tier rows reference unknown facility '{orphan}'")));
    }

    Ok(result)
}

#[derive(Debug, Deserialize)]
struct VehicleRecord {
    id: String,
    kind: String,
    capacity: Float,
    cost_fixed: Float,
    time_prep: Float,
    time_loading_per_item: Float,
    time_set_up: Float,
    time_service: Float,
    speed_line_haul: Float,
    speed_inter_stop: Float,
    t_max: Float,
    cost_hour: Float,
    cost_km: Float,
    cost_item: Float,
    k: Float,
}

/// Reads vehicle types from a csv table.
pub fn read_vehicles<R: Read>(reader: R) -> ModelResult<Vec<Arc<Vehicle>>> {
    let mut result = Vec::default();

    for record in ::csv::Reader::from_reader(reader).deserialize::<VehicleRecord>() {
        let record = record.map_err(invalid_data("vehicles"))?;

        let kind = match record.kind.as_str() {
            "line_haul" => VehicleKind::LineHaul,
            "delivery" => VehicleKind::Delivery,
            other => {
                return Err(ModelError::InvalidData(format!(
                    "vehicle '{}' has unknown kind '{other}'",
                    record.id
                )))
            }
        };

        let vehicle = VehicleBuilder::default()
            .id(&record.id)
            .kind(kind)
            .capacity(record.capacity)
            .cost_fixed(record.cost_fixed)
            .times(record.time_prep, record.time_loading_per_item, record.time_set_up, record.time_service)
            .speeds(record.speed_line_haul, record.speed_inter_stop)
            .t_max(record.t_max)
            .unit_costs(record.cost_hour, record.cost_km, record.cost_item)
            .circuit_factor(record.k)
            .build()?;

        result.push(Arc::new(vehicle));
    }

    Ok(result)
}

#[derive(Debug, Deserialize)]
struct ZoneRecord {
    id: String,
    lon: Float,
    lat: Float,
    area: Float,
    k: Float,
    speed_intra_stop: Float,
}

/// Reads delivery zone attributes from a csv table. The intra-stop speed column is
/// recorded for every given vehicle id.
pub fn read_zones<R: Read>(reader: R, vehicle_ids: &[String]) -> ModelResult<HashMap<String, DeliveryZone>> {
    let mut result = HashMap::new();

    for record in ::csv::Reader::from_reader(reader).deserialize::<ZoneRecord>() {
        let record = record.map_err(invalid_data("zones"))?;

        let mut builder = ZoneBuilder::default()
            .id(&record.id)
            .location(record.lon, record.lat, record.area)
            .circuit_factor(record.k);

        for vehicle_id in vehicle_ids {
            builder = builder.speed_intra_stop(vehicle_id, record.speed_intra_stop);
        }

        result.insert(record.id.clone(), builder.build()?);
    }

    Ok(result)
}

#[derive(Debug, Deserialize)]
struct ZoneDistanceRecord {
    facility_id: String,
    zone_id: String,
    distance: Float,
}

#[derive(Debug, Deserialize)]
struct DepotDistanceRecord {
    facility_id: String,
    distance: Float,
}

/// Reads the two distance tables: facility to zone centroid and facility to depot.
pub fn read_distances<Z: Read, D: Read>(zone_distances: Z, depot_distances: D) -> ModelResult<DistanceMatrix> {
    let mut matrix = DistanceMatrix::default();

    for record in ::csv::Reader::from_reader(zone_distances).deserialize::<ZoneDistanceRecord>() {
        let record = record.map_err(invalid_data("facility-zone distances"))?;
        matrix.add_zone_distance(&record.facility_id, &record.zone_id, record.distance);
    }

    for record in ::csv::Reader::from_reader(depot_distances).deserialize::<DepotDistanceRecord>() {
        let record = record.map_err(invalid_data("facility-depot distances"))?;
        matrix.add_depot_distance(&record.facility_id, record.distance);
    }

    Ok(matrix)
}
