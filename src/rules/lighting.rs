use crate::recommendation::{Category, Recommendation};
use crate::rules::{AuditAnalysis, Rule};

const EFFICIENCY_THRESHOLD_LM_W: f64 = 80.0;

// Output of a modern LED replacement, lm/W.
const LED_LM_PER_WATT: f64 = 100.0;

const DEFAULT_HOURS_PER_DAY: f64 = 3.0;
const COST_PER_FIXTURE: f64 = 35.0;
const COST_FLOOR: f64 = 100.0;

pub struct LedRetrofit;
impl Rule for LedRetrofit {
    fn id(&self) -> &'static str {
        "lighting/led-retrofit"
    }
    fn category(&self) -> Category {
        Category::Lighting
    }
    fn evaluate(&self, analysis: &AuditAnalysis) -> Vec<Recommendation> {
        let lm_per_watt = match analysis.scores.lighting {
            Ok(e) if e < EFFICIENCY_THRESHOLD_LM_W => e,
            _ => return vec![],
        };

        let lighting = match analysis.audit.current_conditions.lighting.as_ref() {
            Some(l) => l,
            None => return vec![],
        };

        let fallback_hours = analysis
            .audit
            .energy_consumption
            .daily_usage_hours
            .unwrap_or(DEFAULT_HOURS_PER_DAY);
        let occupancy = analysis
            .audit
            .energy_consumption
            .occupancy_factor
            .unwrap_or(1.0);

        // Annual kWh saved = wattage x runtime x the share an LED swap
        // eliminates, per fixture.
        let efficiency_ratio = (lm_per_watt / LED_LM_PER_WATT).min(1.0);
        let mut annual_kwh = 0.0;
        let mut valid_fixtures = 0u32;
        for fixture in lighting.fixtures.iter().filter(|f| f.is_valid()) {
            let watts = fixture.watts.unwrap_or(0.0);
            let hours = fixture.hours_per_day.unwrap_or(fallback_hours);
            annual_kwh += watts * hours * occupancy * 365.0 / 1000.0 * (1.0 - efficiency_ratio);
            valid_fixtures += 1;
        }
        if valid_fixtures == 0 {
            return vec![];
        }

        let savings = annual_kwh * analysis.rates.electricity_kwh;
        let cost = (valid_fixtures as f64 * COST_PER_FIXTURE).max(COST_FLOOR);

        let description = format!(
            "Current fixtures average {:.0} lm/W across {} fixtures. Swapping to LED (~{:.0} lm/W) would save about {:.0} kWh per year.",
            lm_per_watt, valid_fixtures, LED_LM_PER_WATT, annual_kwh
        );

        vec![Recommendation::new(
            self.id(),
            self.category(),
            self.category().default_priority(),
            "Retrofit lighting with LEDs",
            description,
            savings,
            cost,
        )]
    }
}
