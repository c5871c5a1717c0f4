use super::*;
use crate::models::problem::VehicleKind;

#[test]
fn vehicle_builder_applies_defaults() {
    let vehicle = VehicleBuilder::default()
        .id("van")
        .capacity(115.)
        .t_max(12.)
        .speeds(50., 35.)
        .build()
        .unwrap();

    assert_eq!(vehicle.kind, VehicleKind::Delivery);
    assert_eq!(vehicle.k, DEFAULT_CIRCUIT_FACTOR);
}

#[test]
fn vehicle_builder_rejects_non_positive_capacity_and_duration() {
    let result = VehicleBuilder::default().id("van").capacity(0.).t_max(12.).build();
    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));

    let result = VehicleBuilder::default().id("van").capacity(10.).t_max(0.).build();
    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));
}

#[test]
fn facility_builder_requires_a_tier() {
    let result = FacilityBuilder::default().id("f1").location(0., 0.).build();

    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));
}

#[test]
fn facility_builder_keeps_tier_order_and_lookup() {
    let facility = FacilityBuilder::default()
        .id("f1")
        .location(0., 0.)
        .add_tier("small", 4., 100., vec![10.])
        .add_tier("large", 12., 250., vec![25.])
        .build()
        .unwrap();

    assert_eq!(facility.tiers.len(), 2);
    assert_eq!(facility.tier("large").map(|tier| tier.capacity), Some(12.));
    assert_eq!(facility.max_capacity(), 12.);
    assert!(!facility.is_depot);
}

#[test]
fn zone_builder_requires_a_positive_area() {
    let result = ZoneBuilder::default().id("z1").location(0., 0., 0.).build();

    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));
}

#[test]
fn zone_builder_collects_intra_stop_speeds() {
    let zone = ZoneBuilder::default()
        .id("z1")
        .location(0., 0., 1.5)
        .speed_intra_stop("van", 35.)
        .speed_intra_stop("bike", 15.)
        .build()
        .unwrap();

    assert_eq!(zone.area(), 1.5);
    assert_eq!(zone.location.speed_intra_stop.get("bike"), Some(&15.));
}
