#[cfg(test)]
#[path = "../../../tests/unit/models/problem/zone_test.rs"]
mod zone_test;

use crate::models::common::{Float, GeoPoint, Period};
use crate::utils::{ModelError, ModelResult};

/// One realization of per-period demand data for a delivery zone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoneDemand {
    /// Demand in items per period.
    pub demand: Vec<Float>,
    /// Drop size in items per customer per period.
    pub drop: Vec<Float>,
    /// Customer stop count per period.
    pub stop: Vec<Float>,
}

impl ZoneDemand {
    /// Returns the amount of periods covered by the realization.
    pub fn periods(&self) -> usize {
        self.demand.len()
    }
}

/// Represents a delivery zone (a map pixel): static geographic attributes plus,
/// once attached, a single demand realization.
///
/// A zone without attached demand data is unavailable and excluded from scenario
/// processing.
#[derive(Clone, Debug)]
pub struct DeliveryZone {
    /// A zone id.
    pub id: String,
    /// A zone centroid carrying the surface area and intra-stop speeds.
    pub location: GeoPoint,
    /// A circuit factor calibrating the tour-length approximation within the zone.
    pub k: Float,
    demand: Option<ZoneDemand>,
}

impl DeliveryZone {
    /// Creates a zone without demand data attached.
    pub(crate) fn new(id: String, location: GeoPoint, k: Float) -> Self {
        Self { id, location, k, demand: None }
    }

    /// Attaches a demand realization to the zone and marks it available.
    /// The realization is write-once: a second attach is an invalid state.
    pub fn attach_demand(&mut self, demand: ZoneDemand) -> ModelResult<()> {
        if self.demand.is_some() {
            return Err(ModelError::InvalidState(format!("zone '{}' already has demand data", self.id)));
        }

        if demand.demand.len() != demand.drop.len() || demand.demand.len() != demand.stop.len() {
            return Err(ModelError::InvalidData(format!(
                "zone '{}' has inconsistent period data lengths: {}/{}/{}",
                self.id,
                demand.demand.len(),
                demand.drop.len(),
                demand.stop.len()
            )));
        }

        self.demand = Some(demand);

        Ok(())
    }

    /// Returns true once a demand realization has been attached.
    pub fn is_available(&self) -> bool {
        self.demand.is_some()
    }

    /// Returns the attached demand realization, if any.
    pub fn demand(&self) -> Option<&ZoneDemand> {
        self.demand.as_ref()
    }

    /// Returns demand in items for the given period, zero when no data is attached.
    pub fn demand_at(&self, period: Period) -> Float {
        self.demand.as_ref().and_then(|data| data.demand.get(period)).copied().unwrap_or(0.)
    }

    /// Returns drop size in items per customer for the given period.
    pub fn drop_at(&self, period: Period) -> Float {
        self.demand.as_ref().and_then(|data| data.drop.get(period)).copied().unwrap_or(0.)
    }

    /// Returns the customer stop count for the given period.
    pub fn stop_at(&self, period: Period) -> Float {
        self.demand.as_ref().and_then(|data| data.stop.get(period)).copied().unwrap_or(0.)
    }

    /// Returns the zone surface area in square kilometers.
    pub fn area(&self) -> Float {
        self.location.area.unwrap_or(0.)
    }
}
