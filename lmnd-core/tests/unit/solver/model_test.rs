use super::*;
use crate::approximation::ContinuousApproximation;
use crate::helpers::*;

fn create_scenarios() -> Vec<Arc<Scenario>> {
    let mut scenarios = vec![test_scenario("1", vec![test_zone("z1", &[50.], &[1.], &[10.])], 1)];

    ContinuousApproximation::new(
        vec![Arc::new(test_satellite("f1")), Arc::new(test_depot("dc"))],
        vec![Arc::new(test_delivery_vehicle()), Arc::new(test_line_haul_vehicle())],
        Arc::new(test_distances()),
        1,
        test_environment(),
    )
    .unwrap()
    .run(&mut scenarios)
    .unwrap();

    scenarios.into_iter().map(Arc::new).collect()
}

fn create_model(capacity_mode: CapacityMode) -> DesignModel {
    DesignModel::new(
        vec![Arc::new(test_satellite("f1")), Arc::new(test_depot("dc"))],
        create_scenarios(),
        ModelConfig { capacity_mode, continuous_assignment: false, periods: 1 },
        Box::<EnumerationBackend>::default(),
        test_environment(),
    )
    .unwrap()
}

#[test]
fn creates_variable_families_per_capacity_mode() {
    let mut model = create_model(CapacityMode::Fixed);
    model.build().unwrap();
    // two tiers of the single satellite, one assignment each way, no activation variables
    assert_eq!(model.store.counts(), (2, 0, 1, 1));

    let mut model = create_model(CapacityMode::Flexible);
    model.build().unwrap();
    assert_eq!(model.store.counts(), (2, 2, 1, 1));
}

#[test]
fn solves_the_tiny_instance_to_the_expected_design() {
    let mut model = create_model(CapacityMode::Fixed);
    model.build().unwrap();

    let report = model.solve().unwrap();

    // installing the 100-tier for 500 and serving via the satellite for 33 beats
    // direct depot serving by a wide margin
    assert_eq!(report.status, SolveStatus::Optimal);
    assert_eq!(report.objective, Some(533.));
    assert_eq!(report.best_bound, Some(533.));
    assert_eq!(report.gap, Some(0.));

    let values = model.variable_values().unwrap();
    assert_eq!(values["Y_ff1_q100"], 1.);
    assert_eq!(values["Y_ff1_q0"], 0.);
    assert_eq!(values["X_ff1_zz1_t0_s1"], 1.);
    assert_eq!(values["W_zz1_t0_s1"], 0.);

    // A.1: exactly one tier installed; A.5: the zone is covered by some serving path
    assert_eq!(values["Y_ff1_q100"] + values["Y_ff1_q0"], 1.);
    assert!(values["X_ff1_zz1_t0_s1"] + values["W_zz1_t0_s1"] >= 1.);
}

#[test]
fn flexible_mode_activates_only_the_installed_tier() {
    let mut model = create_model(CapacityMode::Flexible);
    model.build().unwrap();

    let report = model.solve().unwrap();

    assert_eq!(report.objective, Some(533.));

    let values = model.variable_values().unwrap();
    assert_eq!(values["Y_ff1_q100"], 1.);
    assert_eq!(values["Z_ff1_q100_t0_s1"], 1.);
    assert_eq!(values["Z_ff1_q0_t0_s1"], 0.);
}

#[test]
fn time_limit_parameter_keeps_the_result_schema() {
    let mut model = create_model(CapacityMode::Fixed);
    model.build().unwrap();
    model.set_params(&[("TimeLimit".to_string(), ParamValue::Integer(60))]).unwrap();

    let report = model.solve().unwrap();

    assert_eq!(report.objective, Some(533.));
    assert_eq!(report.status, SolveStatus::Optimal);
    assert!(report.run_time >= 0.);
}

#[test]
fn unknown_parameters_are_rejected() {
    let mut model = create_model(CapacityMode::Fixed);
    model.build().unwrap();

    let result = model.set_params(&[("Heuristics".to_string(), ParamValue::Float(0.5))]);

    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));
}

#[test]
fn solve_requires_build() {
    let mut model = create_model(CapacityMode::Fixed);

    assert!(matches!(model.solve(), Err(ModelError::InvalidState(_))));
}

#[test]
fn build_is_idempotent() {
    let mut model = create_model(CapacityMode::Fixed);
    model.build().unwrap();
    model.build().unwrap();

    assert_eq!(model.store.counts(), (2, 0, 1, 1));
    assert_eq!(model.solve().unwrap().objective, Some(533.));
}

#[test]
fn mismatched_periods_are_a_configuration_error() {
    let result = DesignModel::new(
        vec![Arc::new(test_satellite("f1"))],
        create_scenarios(),
        ModelConfig { capacity_mode: CapacityMode::Fixed, continuous_assignment: false, periods: 2 },
        Box::<EnumerationBackend>::default(),
        test_environment(),
    );

    assert!(matches!(result, Err(ModelError::InvalidConfiguration(_))));
}
