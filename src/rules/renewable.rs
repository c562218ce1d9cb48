use crate::recommendation::{Category, Recommendation};
use crate::rules::{AuditAnalysis, Rule};

// Share of the electric bill a right-sized rooftop array typically offsets.
const SOLAR_OFFSET_SHARE: f64 = 0.6;

const COST_PER_KW: f64 = 2500.0;
const MIN_SYSTEM_KW: f64 = 3.0;
const MAX_SYSTEM_KW: f64 = 10.0;

/// Extended-path rule: suggest a rooftop solar assessment for owner-occupied
/// structures with meaningful electric spend. Apartments have no roof to
/// put panels on.
pub struct SolarAssessment;
impl Rule for SolarAssessment {
    fn id(&self) -> &'static str {
        "renewable/solar-assessment"
    }
    fn category(&self) -> Category {
        Category::Renewable
    }
    fn evaluate(&self, analysis: &AuditAnalysis) -> Vec<Recommendation> {
        if !analysis.audit.basic_info.property_type.owns_envelope() {
            return vec![];
        }
        let monthly_bill = match analysis.audit.energy_consumption.monthly_electric_bill {
            Some(b) if b > 0.0 => b,
            _ => return vec![],
        };

        let savings = monthly_bill * 12.0 * SOLAR_OFFSET_SHARE;

        let system_kw = (analysis.square_footage() / 1000.0 * 1.5)
            .clamp(MIN_SYSTEM_KW, MAX_SYSTEM_KW);
        let cost = system_kw * COST_PER_KW;

        let description = format!(
            "A roughly {:.1} kW rooftop array could offset about {:.0}% of the ${:.0}/month electric bill. Worth a site assessment for shading and roof orientation.",
            system_kw,
            SOLAR_OFFSET_SHARE * 100.0,
            monthly_bill
        );

        vec![Recommendation::new(
            self.id(),
            self.category(),
            self.category().default_priority(),
            "Assess rooftop solar potential",
            description,
            savings,
            cost,
        )]
    }
}
