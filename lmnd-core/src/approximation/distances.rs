use crate::models::common::Distance;
use crate::utils::{ModelError, ModelResult};
use rustc_hash::FxHashMap;

/// Distance data between facilities, delivery zones and the central depot, in kilometers.
///
/// Absence of a required entry is fatal: lookups return an error which is propagated
/// immediately and never retried.
#[derive(Clone, Debug, Default)]
pub struct DistanceMatrix {
    facility_zone: FxHashMap<String, FxHashMap<String, Distance>>,
    facility_depot: FxHashMap<String, Distance>,
}

impl DistanceMatrix {
    /// Adds a facility-to-zone distance entry.
    pub fn add_zone_distance(&mut self, facility: &str, zone: &str, distance: Distance) {
        self.facility_zone.entry(facility.to_string()).or_default().insert(zone.to_string(), distance);
    }

    /// Adds a facility-to-depot distance entry.
    pub fn add_depot_distance(&mut self, facility: &str, distance: Distance) {
        self.facility_depot.insert(facility.to_string(), distance);
    }

    /// Returns the distance between a facility and a zone centroid.
    pub fn zone_distance(&self, facility: &str, zone: &str) -> ModelResult<Distance> {
        self.facility_zone
            .get(facility)
            .and_then(|zones| zones.get(zone))
            .copied()
            .ok_or_else(|| ModelError::MissingDistance { facility: facility.to_string(), zone: Some(zone.to_string()) })
    }

    /// Returns the distance between a facility and the central depot.
    pub fn depot_distance(&self, facility: &str) -> ModelResult<Distance> {
        self.facility_depot
            .get(facility)
            .copied()
            .ok_or_else(|| ModelError::MissingDistance { facility: facility.to_string(), zone: None })
    }
}
