use energy_doctor::weather::{estimate_hvac_impact, DegreeDays};

#[test]
fn test_zone_estimates_are_annualized() {
    let cold = DegreeDays::annual_for_zone(Some(5));
    assert_eq!(cold.heating, 12.0 * 365.0);
    assert_eq!(cold.cooling, 0.5 * 365.0);
    assert_eq!(cold.days, 365);
    assert!(cold.estimated);

    let hot = DegreeDays::annual_for_zone(Some(1));
    assert_eq!(hot.heating, 0.5 * 365.0);
    assert_eq!(hot.cooling, 8.0 * 365.0);
}

#[test]
fn test_unknown_zone_uses_generic_estimate() {
    for zone in [None, Some(0), Some(9)] {
        let dd = DegreeDays::annual_for_zone(zone);
        assert_eq!(dd.heating, 5.0 * 365.0);
        assert_eq!(dd.cooling, 3.0 * 365.0);
    }
}

#[test]
fn test_heating_demand_increases_with_zone() {
    let mut last = 0.0;
    for zone in 1..=5 {
        let dd = DegreeDays::annual_for_zone(Some(zone));
        assert!(dd.heating > last);
        last = dd.heating;
    }
}

#[test]
fn test_hvac_impact_basic_arithmetic() {
    let dd = DegreeDays {
        heating: 1000.0,
        cooling: 0.0,
        days: 365,
        estimated: true,
    };
    let impact = estimate_hvac_impact(&dd, 0.75, 2000.0, 0.14);
    // 1000 HDD x 2000 ft2 x 1.5 BTU = 3,000,000 BTU; / 3412 / 0.75.
    let expected_kwh = 3_000_000.0 / 3412.0 / 0.75;
    assert!((impact.heating_kwh - expected_kwh).abs() < 1e-6);
    assert_eq!(impact.cooling_kwh, 0.0);
    assert!((impact.annual_cost - expected_kwh * 0.14).abs() < 1e-6);
}

#[test]
fn test_hvac_impact_upgrade_savings_positive_below_cap() {
    let dd = DegreeDays::annual_for_zone(Some(4));
    let impact = estimate_hvac_impact(&dd, 0.7, 1800.0, 0.14);
    assert!(impact.potential_savings > 0.0);
    assert!(impact.upgrade_roi > 0.0);
}

#[test]
fn test_hvac_impact_no_upgrade_headroom_at_cap() {
    let dd = DegreeDays::annual_for_zone(Some(4));
    let impact = estimate_hvac_impact(&dd, 0.95, 1800.0, 0.14);
    assert!(impact.potential_savings.abs() < 1e-9);
}

#[test]
fn test_hvac_impact_defaults_missing_efficiency() {
    let dd = DegreeDays::annual_for_zone(Some(3));
    let with_default = estimate_hvac_impact(&dd, 0.0, 2000.0, 0.14);
    let with_explicit = estimate_hvac_impact(&dd, 0.8, 2000.0, 0.14);
    assert_eq!(with_default.total_kwh, with_explicit.total_kwh);
}

#[test]
fn test_hvac_impact_monotonic_in_efficiency() {
    let dd = DegreeDays::annual_for_zone(Some(4));
    let worse = estimate_hvac_impact(&dd, 0.6, 2000.0, 0.14);
    let better = estimate_hvac_impact(&dd, 0.9, 2000.0, 0.14);
    assert!(worse.total_kwh > better.total_kwh);
    assert!(worse.potential_savings > better.potential_savings);
}
