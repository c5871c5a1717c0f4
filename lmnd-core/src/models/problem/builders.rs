//! Provides a way to build the problem entities using the builder pattern.

#[cfg(test)]
#[path = "../../../tests/unit/models/problem/builders_test.rs"]
mod builders_test;

use crate::models::common::{Cost, Float, GeoPoint, DEFAULT_CIRCUIT_FACTOR};
use crate::models::problem::{CapacityTier, DeliveryZone, Facility, Vehicle, VehicleKind};
use crate::utils::{ModelError, ModelResult};

/// Provides a way to build a [Vehicle] validating its invariants.
#[derive(Debug)]
pub struct VehicleBuilder(Vehicle);

impl Default for VehicleBuilder {
    fn default() -> Self {
        Self(Vehicle {
            id: Default::default(),
            kind: VehicleKind::Delivery,
            capacity: 0.,
            cost_fixed: 0.,
            time_prep: 0.,
            time_loading_per_item: 0.,
            time_set_up: 0.,
            time_service: 0.,
            speed_line_haul: 0.,
            speed_inter_stop: 0.,
            t_max: 0.,
            cost_hour: 0.,
            cost_km: 0.,
            cost_item: 0.,
            k: DEFAULT_CIRCUIT_FACTOR,
        })
    }
}

impl VehicleBuilder {
    /// Sets a vehicle type id.
    pub fn id(mut self, id: &str) -> Self {
        self.0.id = id.to_string();
        self
    }

    /// Sets a vehicle kind.
    pub fn kind(mut self, kind: VehicleKind) -> Self {
        self.0.kind = kind;
        self
    }

    /// Sets carrying capacity in items.
    pub fn capacity(mut self, capacity: Float) -> Self {
        self.0.capacity = capacity;
        self
    }

    /// Sets a fixed cost per vehicle.
    pub fn cost_fixed(mut self, cost: Cost) -> Self {
        self.0.cost_fixed = cost;
        self
    }

    /// Sets the four time constants: dispatch prep, per-item loading, per-stop set-up
    /// and per-item service, all in hours.
    pub fn times(mut self, prep: Float, loading_per_item: Float, set_up: Float, service: Float) -> Self {
        self.0.time_prep = prep;
        self.0.time_loading_per_item = loading_per_item;
        self.0.time_set_up = set_up;
        self.0.time_service = service;
        self
    }

    /// Sets line-haul and inter-stop speeds in km/h.
    pub fn speeds(mut self, line_haul: Float, inter_stop: Float) -> Self {
        self.0.speed_line_haul = line_haul;
        self.0.speed_inter_stop = inter_stop;
        self
    }

    /// Sets the maximum route duration in hours.
    pub fn t_max(mut self, t_max: Float) -> Self {
        self.0.t_max = t_max;
        self
    }

    /// Sets per-hour, per-km and per-item unit costs.
    pub fn unit_costs(mut self, per_hour: Cost, per_km: Cost, per_item: Cost) -> Self {
        self.0.cost_hour = per_hour;
        self.0.cost_km = per_km;
        self.0.cost_item = per_item;
        self
    }

    /// Sets a circuit factor.
    pub fn circuit_factor(mut self, k: Float) -> Self {
        self.0.k = k;
        self
    }

    /// Builds a [Vehicle].
    pub fn build(self) -> ModelResult<Vehicle> {
        if self.0.id.is_empty() {
            return Err(ModelError::InvalidConfiguration("vehicle requires a non-empty id".to_string()));
        }

        if self.0.capacity <= 0. {
            return Err(ModelError::InvalidConfiguration(format!(
                "vehicle '{}' requires a positive capacity",
                self.0.id
            )));
        }

        if self.0.t_max <= 0. {
            return Err(ModelError::InvalidConfiguration(format!(
                "vehicle '{}' requires a positive max route duration",
                self.0.id
            )));
        }

        Ok(self.0)
    }
}

/// Provides a way to build a [Facility] validating its invariants.
#[derive(Debug)]
pub struct FacilityBuilder(Facility);

impl Default for FacilityBuilder {
    fn default() -> Self {
        Self(Facility {
            id: Default::default(),
            location: Default::default(),
            tiers: Default::default(),
            cost_sourcing: 0.,
            is_depot: false,
        })
    }
}

impl FacilityBuilder {
    /// Sets a facility id.
    pub fn id(mut self, id: &str) -> Self {
        self.0.id = id.to_string();
        self
    }

    /// Sets a facility location.
    pub fn location(mut self, lon: Float, lat: Float) -> Self {
        self.0.location = GeoPoint::new(lon, lat);
        self
    }

    /// Adds a capacity tier with its installation and per-period operating costs.
    pub fn add_tier(mut self, label: &str, capacity: Float, cost_installation: Cost, cost_operation: Vec<Cost>) -> Self {
        self.0.tiers.push(CapacityTier {
            label: label.to_string(),
            capacity,
            cost_installation,
            cost_operation,
        });
        self
    }

    /// Sets a sourcing cost per item.
    pub fn cost_sourcing(mut self, cost: Cost) -> Self {
        self.0.cost_sourcing = cost;
        self
    }

    /// Marks the facility as the central depot.
    pub fn depot(mut self) -> Self {
        self.0.is_depot = true;
        self
    }

    /// Builds a [Facility].
    pub fn build(self) -> ModelResult<Facility> {
        if self.0.id.is_empty() {
            return Err(ModelError::InvalidConfiguration("facility requires a non-empty id".to_string()));
        }

        if self.0.tiers.is_empty() {
            return Err(ModelError::InvalidConfiguration(format!(
                "facility '{}' requires at least one capacity tier",
                self.0.id
            )));
        }

        Ok(self.0)
    }
}

/// Provides a way to build a [DeliveryZone] validating its invariants.
#[derive(Debug)]
pub struct ZoneBuilder {
    id: String,
    location: GeoPoint,
    k: Float,
}

impl Default for ZoneBuilder {
    fn default() -> Self {
        Self { id: Default::default(), location: Default::default(), k: DEFAULT_CIRCUIT_FACTOR }
    }
}

impl ZoneBuilder {
    /// Sets a zone id.
    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets a zone centroid with its surface area in square kilometers.
    pub fn location(mut self, lon: Float, lat: Float, area: Float) -> Self {
        self.location.lon = lon;
        self.location.lat = lat;
        self.location.area = Some(area);
        self
    }

    /// Sets the intra-stop travel speed for a vehicle id.
    pub fn speed_intra_stop(mut self, vehicle: &str, speed: Float) -> Self {
        self.location.speed_intra_stop.insert(vehicle.to_string(), speed);
        self
    }

    /// Sets a circuit factor.
    pub fn circuit_factor(mut self, k: Float) -> Self {
        self.k = k;
        self
    }

    /// Builds a [DeliveryZone] without demand data attached.
    pub fn build(self) -> ModelResult<DeliveryZone> {
        if self.id.is_empty() {
            return Err(ModelError::InvalidConfiguration("zone requires a non-empty id".to_string()));
        }

        match self.location.area {
            Some(area) if area > 0. => Ok(DeliveryZone::new(self.id, self.location, self.k)),
            _ => Err(ModelError::InvalidConfiguration(format!("zone '{}' requires a positive area", self.id))),
        }
    }
}
