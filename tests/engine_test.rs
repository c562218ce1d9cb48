use std::path::Path;

use chrono::NaiveDate;

use energy_doctor::audit::{AuditDocument, ProductPreferences};
use energy_doctor::config::Config;
use energy_doctor::engine::{analyze, PipelineContext};
use energy_doctor::products::ProductCatalog;
use energy_doctor::recommendation::{Category, Priority};
use energy_doctor::rules::AnalysisDepth;
use tempfile::TempDir;

fn context() -> PipelineContext {
    PipelineContext {
        config: Config::default(),
        catalog: ProductCatalog::load(Path::new("tests/fixtures/products.json")).unwrap(),
        as_of: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
    }
}

fn sample_audit() -> AuditDocument {
    AuditDocument::load(Path::new("tests/fixtures/sample_audit.json")).unwrap()
}

#[test]
fn test_analyze_sample_audit_scores() {
    let doc = sample_audit();
    let report = analyze(&doc.data, &doc.label, &context());

    // Leaky envelope, dead HVAC, incandescent lighting: floor of the band.
    assert_eq!(report.score.value, 40);
    assert_eq!(report.score.label, "Poor");
    assert_eq!(report.score.hvac, Some(0.0));
    assert!(report.score.degraded.is_empty());
    assert_eq!(report.depth, AnalysisDepth::Extended);
}

#[test]
fn test_analyze_generates_expected_recommendations() {
    let doc = sample_audit();
    let report = analyze(&doc.data, &doc.label, &context());

    let rules: Vec<&str> = report
        .recommendations
        .iter()
        .map(|r| r.rule.as_str())
        .collect();
    for expected in [
        "envelope/insulation-upgrade",
        "envelope/window-upgrade",
        "hvac/system-upgrade",
        "hvac/service-overdue",
        "lighting/led-retrofit",
        "humidity/moisture-control",
        "renewable/solar-assessment",
    ] {
        assert!(rules.contains(&expected), "missing {expected}");
    }
}

#[test]
fn test_analyze_sorts_recommendations_by_priority() {
    let doc = sample_audit();
    let report = analyze(&doc.data, &doc.label, &context());

    let ranks: Vec<u8> = report
        .recommendations
        .iter()
        .map(|r| r.priority.rank())
        .collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);
    assert_eq!(report.recommendations[0].priority, Priority::High);
}

#[test]
fn test_analyze_financial_summary_matches_recommendations() {
    let doc = sample_audit();
    let report = analyze(&doc.data, &doc.label, &context());

    let investment: f64 = report.recommendations.iter().map(|r| r.estimated_cost).sum();
    let savings: f64 = report
        .recommendations
        .iter()
        .map(|r| r.estimated_savings)
        .sum();
    assert!((report.financial.total_investment - investment).abs() < 1e-9);
    assert!((report.financial.total_annual_savings - savings).abs() < 1e-9);
    assert!(report.financial.payback_years.is_some());
    assert!(report.financial.roi_percent > 0.0);
    assert!(report.financial.co2_reduction_lbs > 0.0);
}

#[test]
fn test_analyze_attaches_products_per_category() {
    let doc = sample_audit();
    let report = analyze(&doc.data, &doc.label, &context());

    // No preferences in the fixture: context-driven ranking.
    assert_eq!(report.product_strategy, "relevance-ranking");
    let categories: Vec<Category> = report.products.iter().map(|cp| cp.category).collect();
    assert!(categories.contains(&Category::Insulation));
    assert!(categories.contains(&Category::Hvac));
    for cp in &report.products {
        assert!(!cp.products.is_empty());
        assert!(cp.products.len() <= 5);
    }
}

#[test]
fn test_analyze_preferences_switch_strategy() {
    let doc = sample_audit();
    let mut audit = doc.data.clone();
    audit.product_preferences = Some(ProductPreferences {
        categories: vec![],
        features: vec![],
        budget_max: Some(1000.0),
    });
    let report = analyze(&audit, &doc.label, &context());

    assert_eq!(report.product_strategy, "preference-filter");
    for cp in &report.products {
        assert!(cp.products.iter().all(|p| p.price <= 1000.0));
    }
}

#[test]
fn test_analyze_empty_catalog_yields_no_products() {
    let doc = sample_audit();
    let ctx = PipelineContext {
        config: Config::default(),
        catalog: ProductCatalog::empty(),
        as_of: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
    };
    let report = analyze(&doc.data, &doc.label, &ctx);
    assert!(report.products.is_empty());
    assert!(!report.recommendations.is_empty());
}

#[test]
fn test_run_single_file() {
    let result = energy_doctor::engine::run(
        Path::new("tests/fixtures/sample_audit.json"),
        Some(Path::new("tests/fixtures/products.json")),
    )
    .unwrap();
    assert_eq!(result.audits_analyzed, 1);
    assert_eq!(result.reports[0].label, "sample_audit");
    assert!(!result.reports[0].recommendations.is_empty());
}

#[test]
fn test_run_batch_skips_malformed_files() {
    let dir = TempDir::new().unwrap();
    let sample = std::fs::read_to_string("tests/fixtures/sample_audit.json").unwrap();
    std::fs::write(dir.path().join("one.json"), &sample).unwrap();
    std::fs::write(dir.path().join("two.json"), &sample).unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

    let result = energy_doctor::engine::run(dir.path(), None).unwrap();
    assert_eq!(result.audits_analyzed, 2);
    let labels: Vec<&str> = result.reports.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["one", "two"]);
}

#[test]
fn test_run_reads_config_next_to_audits() {
    let dir = TempDir::new().unwrap();
    let sample = std::fs::read_to_string("tests/fixtures/sample_audit.json").unwrap();
    std::fs::write(dir.path().join("audit.json"), &sample).unwrap();
    std::fs::write(
        dir.path().join("energy-doctor.toml"),
        "[ci]\nfail_below = 95\n",
    )
    .unwrap();

    let result = energy_doctor::engine::run(&dir.path().join("audit.json"), None).unwrap();
    assert_eq!(result.fail_below, 95);
}

#[test]
fn test_run_missing_path_errors() {
    let result = energy_doctor::engine::run(Path::new("tests/fixtures/missing"), None);
    assert!(result.is_err());
}
