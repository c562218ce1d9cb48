use crate::recommendation::{Category, Priority, Recommendation};
use crate::rules::{AuditAnalysis, Rule};

const GAP_THRESHOLD: f64 = 10.0;
const GAP_HIGH: f64 = 15.0;
const GAP_MEDIUM: f64 = 8.0;

// Portable unit sizing and running-cost model.
const UNIT_CAPACITY_PINTS: f64 = 50.0;
const KWH_PER_PINT: f64 = 0.30;
// Fraction of conventional running cost an efficient unit avoids.
const EFFICIENT_UNIT_ADVANTAGE: f64 = 0.30;
const UNIT_COST: f64 = 280.0;

pub struct MoistureControl;
impl Rule for MoistureControl {
    fn id(&self) -> &'static str {
        "humidity/moisture-control"
    }
    fn category(&self) -> Category {
        Category::Humidity
    }
    fn evaluate(&self, analysis: &AuditAnalysis) -> Vec<Recommendation> {
        let readings = match analysis.audit.current_conditions.humidity.as_ref() {
            Some(h) => h,
            None => return vec![],
        };
        let (current, target) = match (readings.current, readings.target) {
            (Some(c), Some(t)) => (c, t),
            _ => return vec![],
        };
        let gap = current - target;
        if gap.abs() <= GAP_THRESHOLD {
            return vec![];
        }

        // Utilization scales with how far off target the home sits.
        let utilization = (gap.abs() / 25.0).min(1.0);
        let baseline_kwh = UNIT_CAPACITY_PINTS * KWH_PER_PINT * 365.0 * utilization;
        let savings = baseline_kwh * EFFICIENT_UNIT_ADVANTAGE * analysis.rates.electricity_kwh;

        // Priority comes from the gap magnitude, not the category default.
        let priority = if gap.abs() > GAP_HIGH {
            Priority::High
        } else if gap.abs() > GAP_MEDIUM {
            Priority::Medium
        } else {
            Priority::Low
        };

        let (title, verb) = if gap > 0.0 {
            ("Install an efficient dehumidifier", "above")
        } else {
            ("Install an efficient humidifier", "below")
        };
        let description = format!(
            "Indoor humidity is {:.0}% — {:.0} points {} the {:.0}% target. An Energy Star unit sized around {:.0} pints/day keeps moisture in range at roughly {:.0}% lower running cost.",
            current,
            gap.abs(),
            verb,
            target,
            UNIT_CAPACITY_PINTS,
            EFFICIENT_UNIT_ADVANTAGE * 100.0
        );

        vec![Recommendation::new(
            self.id(),
            self.category(),
            priority,
            title,
            description,
            savings,
            UNIT_COST,
        )]
    }
}
