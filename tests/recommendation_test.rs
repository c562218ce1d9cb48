use chrono::NaiveDate;

use energy_doctor::recommendation::{
    payback_period, Category, Priority, Recommendation, Status,
};

fn make_recommendation(savings: f64, cost: f64) -> Recommendation {
    Recommendation::new(
        "envelope/insulation-upgrade",
        Category::Insulation,
        Priority::High,
        "Upgrade home insulation",
        "Attic and walls rated poor",
        savings,
        cost,
    )
}

#[test]
fn test_recommendation_creation() {
    let r = make_recommendation(250.0, 5000.0);
    assert_eq!(r.rule, "envelope/insulation-upgrade");
    assert_eq!(r.category, Category::Insulation);
    assert_eq!(r.priority, Priority::High);
    assert_eq!(r.status, Status::Pending);
    assert_eq!(r.payback_years, Some(20.0));
    assert_eq!(r.actual_savings, None);
    assert_eq!(r.implementation_date, None);
}

#[test]
fn test_payback_undefined_for_zero_savings() {
    // Never Infinity or NaN.
    assert_eq!(payback_period(1000.0, 0.0), None);
    assert_eq!(payback_period(1000.0, -50.0), None);
    let r = make_recommendation(0.0, 1000.0);
    assert_eq!(r.payback_years, None);
}

#[test]
fn test_payback_is_cost_over_savings() {
    assert_eq!(payback_period(1000.0, 250.0), Some(4.0));
    assert_eq!(payback_period(0.0, 250.0), Some(0.0));
}

#[test]
fn test_priority_display() {
    assert_eq!(format!("{}", Priority::High), "high");
    assert_eq!(format!("{}", Priority::Medium), "medium");
    assert_eq!(format!("{}", Priority::Low), "low");
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::Insulation), "Insulation");
    assert_eq!(format!("{}", Category::Hvac), "HVAC");
    assert_eq!(format!("{}", Category::SmartHome), "Smart Home");
}

#[test]
fn test_category_default_priorities() {
    assert_eq!(Category::Insulation.default_priority(), Priority::High);
    assert_eq!(Category::Hvac.default_priority(), Priority::High);
    assert_eq!(Category::Renewable.default_priority(), Priority::High);
    assert_eq!(Category::Windows.default_priority(), Priority::Medium);
    assert_eq!(Category::Lighting.default_priority(), Priority::Medium);
    assert_eq!(Category::Appliances.default_priority(), Priority::Medium);
    assert_eq!(Category::SmartHome.default_priority(), Priority::Low);
}

#[test]
fn test_lifecycle_happy_path() {
    let mut r = make_recommendation(250.0, 5000.0);
    r.start().unwrap();
    assert_eq!(r.status, Status::InProgress);

    let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
    r.implement(Some(310.0), date).unwrap();
    assert_eq!(r.status, Status::Implemented);
    assert_eq!(r.actual_savings, Some(310.0));
    assert_eq!(r.implementation_date, Some(date));
}

#[test]
fn test_lifecycle_rejects_skipping_in_progress() {
    let mut r = make_recommendation(250.0, 5000.0);
    let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
    let err = r.implement(Some(310.0), date).unwrap_err();
    assert_eq!(err.from, Status::Pending);
    assert_eq!(err.to, Status::Implemented);
    // A failed transition leaves the record untouched.
    assert_eq!(r.status, Status::Pending);
    assert_eq!(r.actual_savings, None);
}

#[test]
fn test_lifecycle_is_terminal_once_implemented() {
    let mut r = make_recommendation(250.0, 5000.0);
    let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
    r.start().unwrap();
    r.implement(None, date).unwrap();
    assert!(r.start().is_err());
    assert!(r.implement(Some(1.0), date).is_err());
    assert_eq!(r.actual_savings, None);
}

#[test]
fn test_lifecycle_rejects_double_start() {
    let mut r = make_recommendation(250.0, 5000.0);
    r.start().unwrap();
    let err = r.start().unwrap_err();
    assert_eq!(err.from, Status::InProgress);
    assert_eq!(format!("{err}"), "invalid status transition in_progress -> in_progress");
}

#[test]
fn test_recommendation_serialization() {
    let r = make_recommendation(250.0, 5000.0);
    let json = serde_json::to_string(&r).unwrap();
    assert!(json.contains("\"rule\":\"envelope/insulation-upgrade\""));
    assert!(json.contains("\"priority\":\"high\""));
    assert!(json.contains("\"status\":\"pending\""));
    assert!(json.contains("\"payback_years\":20.0"));
}
