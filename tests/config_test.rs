use energy_doctor::config::Config;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.rules.is_empty());
    assert_eq!(config.ci.fail_below, 0);
    assert_eq!(config.rates.electricity_kwh, 0.14);
    assert_eq!(config.rates.gas_therm, 1.10);
    assert_eq!(config.rates.co2_lbs_per_kwh, 0.85);
    assert_eq!(config.matching.top_n, 5);
    assert!(!config.matching.require_in_stock);
    assert_eq!(config.matching.catalog, None);
}

#[test]
fn test_load_config_from_toml() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("energy-doctor.toml");
    std::fs::write(
        &config_path,
        r#"
[rules]
"renewable/solar-assessment" = "off"

[rates]
electricity_kwh = 0.19

[matching]
top_n = 3
require_in_stock = true
catalog = "products.json"

[ci]
fail_below = 60
"#,
    )
    .unwrap();

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(
        config.rules.get("renewable/solar-assessment").unwrap(),
        "off"
    );
    assert_eq!(config.rates.electricity_kwh, 0.19);
    // Unset rates keep their defaults.
    assert_eq!(config.rates.gas_therm, 1.10);
    assert_eq!(config.matching.top_n, 3);
    assert!(config.matching.require_in_stock);
    assert_eq!(config.matching.catalog.as_deref(), Some("products.json"));
    assert_eq!(config.ci.fail_below, 60);
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.ci.fail_below, 0);
    assert_eq!(config.matching.top_n, 5);
}

#[test]
fn test_malformed_config_errors() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("energy-doctor.toml"), "rates = 12").unwrap();
    assert!(Config::load(dir.path()).is_err());
}

#[test]
fn test_is_rule_enabled() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("energy-doctor.toml"),
        r#"
[rules]
"hvac/service-overdue" = "off"
"#,
    )
    .unwrap();

    let config = Config::load(dir.path()).unwrap();
    assert!(!config.is_rule_enabled("hvac/service-overdue"));
    assert!(config.is_rule_enabled("envelope/insulation-upgrade"));
}
