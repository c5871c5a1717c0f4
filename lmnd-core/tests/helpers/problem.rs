use crate::approximation::DistanceMatrix;
use crate::models::common::Float;
use crate::models::problem::{DeliveryZone, Facility, FacilityBuilder, Vehicle, VehicleBuilder, VehicleKind, ZoneBuilder, ZoneDemand};
use crate::models::Scenario;
use crate::utils::Environment;
use std::sync::Arc;

pub fn test_environment() -> Arc<Environment> {
    Arc::new(Environment::silent())
}

pub fn test_delivery_vehicle() -> Vehicle {
    VehicleBuilder::default()
        .id("van")
        .kind(VehicleKind::Delivery)
        .capacity(50.)
        .cost_fixed(100.)
        .times(0.5, 0., 0.1, 0.)
        .speeds(10., 10.)
        .t_max(13.)
        .unit_costs(10., 1., 0.5)
        .circuit_factor(1.)
        .build()
        .unwrap()
}

pub fn test_line_haul_vehicle() -> Vehicle {
    VehicleBuilder::default()
        .id("truck")
        .kind(VehicleKind::LineHaul)
        .capacity(100.)
        .cost_fixed(100.)
        .times(1., 0., 0., 0.)
        .speeds(10., 10.)
        .t_max(12.)
        .unit_costs(10., 1., 0.5)
        .circuit_factor(1.)
        .build()
        .unwrap()
}

pub fn test_satellite(id: &str) -> Facility {
    FacilityBuilder::default()
        .id(id)
        .location(0., 0.)
        .add_tier("0", 0., 0., vec![0.])
        .add_tier("100", 100., 500., vec![0.])
        .cost_sourcing(0.335)
        .build()
        .unwrap()
}

pub fn test_depot(id: &str) -> Facility {
    FacilityBuilder::default()
        .id(id)
        .location(0., 0.)
        .add_tier("0", 0., 0., vec![0.])
        .depot()
        .build()
        .unwrap()
}

/// A zone of one square kilometer with a zero circuit factor, which keeps intra-tour
/// travel out of the closed-form estimates and makes expected costs easy to hand-check.
pub fn test_zone(id: &str, demand: &[Float], drop: &[Float], stop: &[Float]) -> DeliveryZone {
    let mut zone = ZoneBuilder::default().id(id).location(0., 0., 1.).circuit_factor(0.).build().unwrap();
    zone.attach_demand(ZoneDemand { demand: demand.to_vec(), drop: drop.to_vec(), stop: stop.to_vec() }).unwrap();
    zone
}

pub fn test_zone_without_demand(id: &str) -> DeliveryZone {
    ZoneBuilder::default().id(id).location(0., 0., 1.).circuit_factor(0.).build().unwrap()
}

/// Distances of the standard tiny instance: satellite `f1` five km away from zone `z1`
/// and ten km away from the depot `dc`, which itself is far from the zone.
pub fn test_distances() -> DistanceMatrix {
    let mut distances = DistanceMatrix::default();
    distances.add_zone_distance("f1", "z1", 5.);
    distances.add_zone_distance("dc", "z1", 500.);
    distances.add_depot_distance("f1", 10.);
    distances
}

pub fn test_scenario(id: &str, zones: Vec<DeliveryZone>, periods: usize) -> Scenario {
    Scenario::new(id, zones, periods)
}
