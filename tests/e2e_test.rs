use std::path::Path;

use energy_doctor::reporter::{json::JsonReporter, Reporter};

#[test]
fn test_e2e_sample_audit() {
    let result = energy_doctor::engine::run(
        Path::new("tests/fixtures/sample_audit.json"),
        Some(Path::new("tests/fixtures/products.json")),
    )
    .unwrap();

    assert_eq!(result.audits_analyzed, 1);
    let report = &result.reports[0];

    // 1978 house with a dead furnace and single-pane windows should score
    // low but never outside the reporting band.
    assert!(report.score.value >= 40);
    assert!(report.score.value <= 100);
    assert!(!report.recommendations.is_empty());

    println!("Score: {} ({})", report.score.value, report.score.label);
    for r in &report.recommendations {
        println!("  [{}] {} — {}", r.priority, r.rule, r.title);
    }
}

#[test]
fn test_e2e_json_output() {
    let result = energy_doctor::engine::run(
        Path::new("tests/fixtures/sample_audit.json"),
        Some(Path::new("tests/fixtures/products.json")),
    )
    .unwrap();

    let json_str = JsonReporter.format(&result.reports[0], false);
    let json: serde_json::Value = serde_json::from_str(&json_str).unwrap();

    assert!(json["score"]["value"].as_u64().unwrap() <= 100);
    assert!(json["recommendations"].as_array().is_some());
    assert!(json["products"].as_array().is_some());
}
