pub mod defaults;
pub mod envelope;
pub mod humidity;
pub mod hvac;
pub mod lighting;
pub mod renewable;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::EnergyAuditData;
use crate::config::Rates;
use crate::recommendation::{Category, Recommendation};
use crate::scoring::ScoreBreakdown;

/// Everything a rule may look at: the validated survey, the computed
/// sub-scores, billing rates, and the evaluation date. Built once per audit
/// and passed in explicitly; rules read no ambient state.
pub struct AuditAnalysis<'a> {
    pub audit: &'a EnergyAuditData,
    pub scores: &'a ScoreBreakdown,
    pub rates: &'a Rates,
    pub as_of: NaiveDate,
}

/// Conditioned floor area assumed when the survey omitted square footage.
pub const DEFAULT_SQUARE_FOOTAGE: f64 = 2000.0;
pub const DEFAULT_WINDOW_COUNT: u32 = 10;

impl AuditAnalysis<'_> {
    pub fn square_footage(&self) -> f64 {
        self.audit
            .home_details
            .square_footage
            .filter(|s| *s > 0.0)
            .unwrap_or(DEFAULT_SQUARE_FOOTAGE)
    }

    pub fn window_count(&self) -> u32 {
        self.audit
            .home_details
            .window_count
            .filter(|c| *c > 0)
            .unwrap_or(DEFAULT_WINDOW_COUNT)
    }

    pub fn climate_zone(&self) -> Option<u8> {
        self.audit.heating_cooling.climate_zone
    }

    /// The richer survey shape the extended rule set needs: at least one
    /// lighting fixture or a complete humidity reading.
    pub fn has_extended_inputs(&self) -> bool {
        let lighting = self
            .audit
            .current_conditions
            .lighting
            .as_ref()
            .is_some_and(|l| !l.fixtures.is_empty());
        let humidity = self
            .audit
            .current_conditions
            .humidity
            .as_ref()
            .is_some_and(|h| h.current.is_some() && h.target.is_some());
        lighting || humidity
    }
}

pub trait Rule: Send + Sync {
    fn id(&self) -> &'static str;
    fn category(&self) -> Category;
    fn evaluate(&self, analysis: &AuditAnalysis) -> Vec<Recommendation>;
}

pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Full rule set for audits carrying the richer survey shape.
    pub fn extended() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(envelope::InsulationUpgrade),
            Box::new(envelope::WindowUpgrade),
            Box::new(hvac::SystemUpgrade),
            Box::new(hvac::ServiceOverdue),
            Box::new(lighting::LedRetrofit),
            Box::new(humidity::MoistureControl),
            Box::new(renewable::SolarAssessment),
        ];
        RuleRegistry { rules }
    }

    /// Coarse rule set used when only the basic survey sections are present.
    pub fn basic() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(envelope::InsulationUpgrade),
            Box::new(envelope::WindowUpgrade),
            Box::new(hvac::SystemUpgrade),
        ];
        RuleRegistry { rules }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn run(
        &self,
        analysis: &AuditAnalysis,
        enabled: &dyn Fn(&str) -> bool,
    ) -> Vec<Recommendation> {
        self.rules
            .iter()
            .filter(|r| enabled(r.id()))
            .flat_map(|r| r.evaluate(analysis))
            .collect()
    }
}

/// Which generator produced the recommendations in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    Extended,
    Basic,
    Default,
}

impl fmt::Display for AnalysisDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisDepth::Extended => write!(f, "extended"),
            AnalysisDepth::Basic => write!(f, "basic"),
            AnalysisDepth::Default => write!(f, "default"),
        }
    }
}

/// Recommendation generation with the extended -> basic -> default fallback
/// chain. The extended set runs when its richer inputs are present; an empty
/// result falls through so a report is never generated without at least the
/// default measures.
pub fn generate(
    analysis: &AuditAnalysis,
    enabled: &dyn Fn(&str) -> bool,
) -> (Vec<Recommendation>, AnalysisDepth) {
    if analysis.has_extended_inputs() {
        let recommendations = RuleRegistry::extended().run(analysis, enabled);
        if !recommendations.is_empty() {
            return (recommendations, AnalysisDepth::Extended);
        }
    }

    let recommendations = RuleRegistry::basic().run(analysis, enabled);
    if !recommendations.is_empty() {
        return (recommendations, AnalysisDepth::Basic);
    }

    (defaults::default_set(), AnalysisDepth::Default)
}
