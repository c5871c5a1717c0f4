use super::*;
use crate::helpers::*;
use crate::models::Echelon;

fn test_engine(periods: usize) -> ContinuousApproximation {
    ContinuousApproximation::new(
        vec![Arc::new(test_satellite("f1")), Arc::new(test_depot("dc"))],
        vec![Arc::new(test_delivery_vehicle()), Arc::new(test_line_haul_vehicle())],
        Arc::new(test_distances()),
        periods,
        test_environment(),
    )
    .unwrap()
}

#[test]
fn rejects_invalid_fleet_configurations() {
    let result = ContinuousApproximation::new(
        vec![Arc::new(test_satellite("f1"))],
        vec![Arc::new(test_delivery_vehicle()), Arc::new(test_line_haul_vehicle())],
        Arc::new(test_distances()),
        1,
        test_environment(),
    );
    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));

    let result = ContinuousApproximation::new(
        vec![Arc::new(test_satellite("f1")), Arc::new(test_depot("dc"))],
        vec![Arc::new(test_delivery_vehicle())],
        Arc::new(test_distances()),
        1,
        test_environment(),
    );
    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));
}

#[test]
fn populates_serving_tables_with_injected_first_echelon_costs() {
    let mut scenarios = vec![test_scenario("1", vec![test_zone("z1", &[50.], &[1.], &[10.])], 1)];

    test_engine(1).run(&mut scenarios).unwrap();

    let scenario = &scenarios[0];
    assert!(scenario.is_populated());

    // the delivery tour alone costs 25.0 and needs 0.1 vehicles; the line-haul
    // replenishment adds 7.5 and 0.03 on top for the satellite echelon
    let estimate = scenario.facility_estimate("f1", "z1", 0).unwrap();
    assert!((estimate.cost_total - 32.5).abs() < 1E-9);
    assert!((estimate.fleet_size - 0.13).abs() < 1E-9);
    assert_eq!(estimate.vehicle, "van");

    // the depot serves the zone directly without any line-haul surcharge
    let depot = scenario.depot_estimate("z1", 0).unwrap();
    assert!(depot.cost_total > estimate.cost_total);
    assert_eq!(scenario.serving_table_len(Echelon::Facility), 1);
    assert_eq!(scenario.serving_table_len(Echelon::Depot), 1);
}

#[test]
fn skips_periods_without_demand() {
    let mut scenarios = vec![test_scenario("1", vec![test_zone("z1", &[50., 0.], &[1., 0.], &[10., 0.])], 2)];

    test_engine(2).run(&mut scenarios).unwrap();

    let scenario = &scenarios[0];
    assert!(scenario.facility_estimate("f1", "z1", 0).is_ok());
    assert!(matches!(scenario.facility_estimate("f1", "z1", 1), Err(ModelError::MissingEstimate(_))));
    assert!(matches!(scenario.depot_estimate("z1", 1), Err(ModelError::MissingEstimate(_))));
}

#[test]
fn rerunning_a_processed_scenario_is_guarded() {
    let mut scenarios = vec![test_scenario("1", vec![test_zone("z1", &[50.], &[1.], &[10.])], 1)];
    let engine = test_engine(1);

    engine.run(&mut scenarios).unwrap();
    let result = engine.run(&mut scenarios);

    assert!(matches!(result, Err(ModelError::InvalidState(_))));
}

#[test]
fn missing_distance_entries_are_fatal() {
    let mut distances = DistanceMatrix::default();
    distances.add_zone_distance("f1", "z1", 5.);
    distances.add_zone_distance("dc", "z1", 500.);
    // no facility-to-depot entry for f1

    let engine = ContinuousApproximation::new(
        vec![Arc::new(test_satellite("f1")), Arc::new(test_depot("dc"))],
        vec![Arc::new(test_delivery_vehicle()), Arc::new(test_line_haul_vehicle())],
        Arc::new(distances),
        1,
        test_environment(),
    )
    .unwrap();

    let mut scenarios = vec![test_scenario("1", vec![test_zone("z1", &[50.], &[1.], &[10.])], 1)];
    let result = engine.run(&mut scenarios);

    assert!(matches!(result, Err(ModelError::MissingDistance { zone: None, .. })));
}

#[test]
fn mismatched_period_configuration_is_rejected() {
    let mut scenarios = vec![test_scenario("1", vec![test_zone("z1", &[50.], &[1.], &[10.])], 1)];

    let result = test_engine(2).run(&mut scenarios);

    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));
}
