use crate::recommendation::{Category, Priority, Recommendation};
use crate::rules::{AuditAnalysis, Rule};
use crate::scoring::months_since_service;
use crate::weather::{estimate_hvac_impact, DegreeDays};

const HVAC_SCORE_THRESHOLD: f64 = 2.0;

const UPGRADE_COST_PER_SQFT: f64 = 4.0;
const UPGRADE_COST_FLOOR: f64 = 5000.0;

const SERVICE_GAP_MONTHS: f64 = 12.0;
const TUNE_UP_COST: f64 = 150.0;
// Share of annual HVAC spend a tune-up typically recovers.
const TUNE_UP_SAVINGS_SHARE: f64 = 0.05;

pub struct SystemUpgrade;
impl Rule for SystemUpgrade {
    fn id(&self) -> &'static str {
        "hvac/system-upgrade"
    }
    fn category(&self) -> Category {
        Category::Hvac
    }
    fn evaluate(&self, analysis: &AuditAnalysis) -> Vec<Recommendation> {
        let score = match analysis.scores.hvac {
            Ok(s) if s < HVAC_SCORE_THRESHOLD => s,
            _ => return vec![],
        };

        let system = match analysis.audit.heating_cooling.heating_system.as_ref() {
            Some(s) => s,
            None => return vec![],
        };

        let area = analysis.square_footage();
        let degree_days = DegreeDays::annual_for_zone(analysis.climate_zone());
        let impact = estimate_hvac_impact(
            &degree_days,
            system.efficiency.unwrap_or(0.0),
            area,
            analysis.rates.electricity_kwh,
        );

        let cost = (area * UPGRADE_COST_PER_SQFT).max(UPGRADE_COST_FLOOR);
        let seasonal = analysis
            .audit
            .energy_consumption
            .seasonal_factor
            .unwrap_or(1.0);
        let savings = impact.potential_savings * seasonal;

        let age_note = system
            .age_years
            .map(|a| format!("{a:.0}-year-old"))
            .unwrap_or_else(|| "aging".to_string());
        let description = format!(
            "HVAC score {:.1}/3 for the {} heating system. A high-efficiency replacement would save an estimated ${:.0}/yr on the current {:.0} kWh/yr load.",
            score, age_note, savings, impact.total_kwh
        );

        vec![Recommendation::new(
            self.id(),
            self.category(),
            self.category().default_priority(),
            "Replace aging heating system",
            description,
            savings,
            cost,
        )]
    }
}

/// Extended-path rule: a system that merely missed its service window gets a
/// cheap tune-up suggestion alongside (or instead of) a full replacement.
pub struct ServiceOverdue;
impl Rule for ServiceOverdue {
    fn id(&self) -> &'static str {
        "hvac/service-overdue"
    }
    fn category(&self) -> Category {
        Category::Hvac
    }
    fn evaluate(&self, analysis: &AuditAnalysis) -> Vec<Recommendation> {
        let system = match analysis.audit.heating_cooling.heating_system.as_ref() {
            Some(s) => s,
            None => return vec![],
        };
        let months = match months_since_service(system.last_service_date, analysis.as_of) {
            Some(m) if m > SERVICE_GAP_MONTHS => m,
            _ => return vec![],
        };

        let degree_days = DegreeDays::annual_for_zone(analysis.climate_zone());
        let impact = estimate_hvac_impact(
            &degree_days,
            system.efficiency.unwrap_or(0.0),
            analysis.square_footage(),
            analysis.rates.electricity_kwh,
        );
        let savings = impact.annual_cost * TUNE_UP_SAVINGS_SHARE;

        let description = format!(
            "Last professional service was roughly {:.0} months ago. An annual tune-up keeps heat exchangers and coils near rated efficiency.",
            months
        );

        vec![Recommendation::new(
            self.id(),
            self.category(),
            Priority::Medium,
            "Schedule an HVAC tune-up",
            description,
            savings,
            TUNE_UP_COST,
        )]
    }
}
