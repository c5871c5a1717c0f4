use super::*;

fn test_document() -> ResultsDocument {
    ResultsDocument {
        instance: InstanceSummary {
            id: "1".to_string(),
            periods: 12,
            capacity_mode: "fixed-capacity".to_string(),
            continuous_assignment: false,
            scenarios: vec!["1".to_string(), "2".to_string()],
        },
        report: ReportSummary {
            status: "Optimal".to_string(),
            run_time: 0.421,
            gap: Some(0.),
            objective: Some(533.),
            best_bound: Some(533.),
        },
        variables: [("Y_fS1_qlarge".to_string(), 1.), ("W_zP1_t0_s1".to_string(), 0.)].into_iter().collect(),
    }
}

#[test]
fn writes_results_as_flat_json_document() {
    let mut buffer = Vec::new();

    write_results(&mut buffer, &test_document()).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(json["instance"]["capacity_mode"], "fixed-capacity");
    assert_eq!(json["report"]["objective"], 533.);
    assert_eq!(json["variables"]["Y_fS1_qlarge"], 1.);
    assert_eq!(json["report"]["gap"], 0.);
}

#[test]
fn keeps_absent_bound_and_gap_in_the_schema() {
    let mut document = test_document();
    document.report.gap = None;
    document.report.best_bound = None;

    let mut buffer = Vec::new();
    write_results(&mut buffer, &document).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert!(json["report"].get("gap").is_some());
    assert_eq!(json["report"]["gap"], serde_json::Value::Null);
}
