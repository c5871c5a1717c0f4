use crate::models::problem::{ZoneBuilder, ZoneDemand};
use crate::utils::ModelError;

fn zone_demand(periods: usize) -> ZoneDemand {
    ZoneDemand { demand: vec![10.; periods], drop: vec![1.; periods], stop: vec![5.; periods] }
}

#[test]
fn zone_becomes_available_once_demand_is_attached() {
    let mut zone = ZoneBuilder::default().id("z1").location(0., 0., 1.).build().unwrap();
    assert!(!zone.is_available());
    assert_eq!(zone.demand_at(0), 0.);

    zone.attach_demand(zone_demand(2)).unwrap();

    assert!(zone.is_available());
    assert_eq!(zone.demand_at(0), 10.);
    assert_eq!(zone.drop_at(1), 1.);
    assert_eq!(zone.stop_at(1), 5.);
}

#[test]
fn attaching_demand_twice_is_an_invalid_state() {
    let mut zone = ZoneBuilder::default().id("z1").location(0., 0., 1.).build().unwrap();
    zone.attach_demand(zone_demand(1)).unwrap();

    let result = zone.attach_demand(zone_demand(1));

    assert!(matches!(result, Err(ModelError::InvalidState(_))));
}

#[test]
fn attaching_inconsistent_period_data_fails() {
    let mut zone = ZoneBuilder::default().id("z1").location(0., 0., 1.).build().unwrap();

    let result = zone.attach_demand(ZoneDemand { demand: vec![10., 20.], drop: vec![1.], stop: vec![5., 5.] });

    assert!(matches!(result, Err(ModelError::InvalidData(_))));
}
