use crate::audit::ConditionRating;
use crate::recommendation::{Category, Recommendation};
use crate::rules::{AuditAnalysis, Rule};
use crate::weather::{DegreeDays, BTU_PER_KWH, BTU_PER_THERM};

// Conductance improvement (BTU/hr.ft^2.F) per point of insulation score
// below "good".
const U_IMPROVEMENT_PER_POINT: f64 = 0.025;

const INSULATION_SCORE_THRESHOLD: f64 = 2.0;
const WINDOW_SCORE_THRESHOLD: f64 = 1.5;

const COST_PER_SQFT_POOR: f64 = 2.5;
const COST_PER_SQFT_AVERAGE: f64 = 1.5;

const SAVINGS_PER_WINDOW_POINT: f64 = 8.0;
const COST_PER_WINDOW: f64 = 450.0;

pub struct InsulationUpgrade;
impl Rule for InsulationUpgrade {
    fn id(&self) -> &'static str {
        "envelope/insulation-upgrade"
    }
    fn category(&self) -> Category {
        Category::Insulation
    }
    fn evaluate(&self, analysis: &AuditAnalysis) -> Vec<Recommendation> {
        let score = match analysis.scores.insulation {
            Ok(s) if s < INSULATION_SCORE_THRESHOLD => s,
            _ => return vec![],
        };

        let area = analysis.square_footage();
        let degree_days = DegreeDays::annual_for_zone(analysis.climate_zone());

        // Conductive loss recovered by bringing the envelope up to "good":
        // delta-U x area x HDD x 24h, converted from BTU to kWh.
        let delta_u = (INSULATION_SCORE_THRESHOLD - score) * U_IMPROVEMENT_PER_POINT;
        let annual_btu = delta_u * area * degree_days.heating * 24.0;
        let annual_kwh = annual_btu / BTU_PER_KWH;
        // Homes with a gas bill heat with gas; value the recovered load at
        // the matching fuel rate.
        let savings = if analysis.audit.energy_consumption.monthly_gas_bill.is_some() {
            annual_btu / BTU_PER_THERM * analysis.rates.gas_therm
        } else {
            annual_kwh * analysis.rates.electricity_kwh
        };

        let cost_per_sqft = if score < 1.0 {
            COST_PER_SQFT_POOR
        } else {
            COST_PER_SQFT_AVERAGE
        };
        let cost = area * cost_per_sqft;

        let weak_areas = weak_insulation_areas(analysis);
        let description = if weak_areas.is_empty() {
            format!(
                "Overall insulation rated {:.1}/3. Adding insulation could recover roughly {:.0} kWh of heating losses per year.",
                score, annual_kwh
            )
        } else {
            format!(
                "Insulation rated poor in: {}. Bringing these areas up to standard could recover roughly {:.0} kWh of heating losses per year.",
                weak_areas.join(", "),
                annual_kwh
            )
        };

        vec![Recommendation::new(
            self.id(),
            self.category(),
            self.category().default_priority(),
            "Upgrade home insulation",
            description,
            savings,
            cost,
        )]
    }
}

fn weak_insulation_areas(analysis: &AuditAnalysis) -> Vec<&'static str> {
    let Some(ratings) = analysis.audit.current_conditions.insulation.as_ref() else {
        return vec![];
    };
    let areas = [
        ("attic", &ratings.attic),
        ("walls", &ratings.walls),
        ("basement", &ratings.basement),
        ("floor", &ratings.floor),
    ];
    areas
        .iter()
        .filter(|(_, r)| matches!(r, Some(ConditionRating::Poor)))
        .map(|(name, _)| *name)
        .collect()
}

pub struct WindowUpgrade;
impl Rule for WindowUpgrade {
    fn id(&self) -> &'static str {
        "envelope/window-upgrade"
    }
    fn category(&self) -> Category {
        Category::Windows
    }
    fn evaluate(&self, analysis: &AuditAnalysis) -> Vec<Recommendation> {
        let score = match analysis.scores.windows {
            Ok(s) if s < WINDOW_SCORE_THRESHOLD => s,
            _ => return vec![],
        };

        let count = analysis.window_count();
        let savings = (3.0 - score) * SAVINGS_PER_WINDOW_POINT * count as f64;
        let cost = COST_PER_WINDOW * count as f64;

        let description = format!(
            "Window score {:.1}/3 across {} windows. Replacing with double- or triple-pane units cuts conductive and draft losses.",
            score, count
        );

        vec![Recommendation::new(
            self.id(),
            self.category(),
            self.category().default_priority(),
            "Replace inefficient windows",
            description,
            savings,
            cost,
        )]
    }
}
