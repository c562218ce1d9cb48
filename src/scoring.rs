use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::{CurrentConditions, EnergyAuditData, HeatingCooling};

/// Why a sub-score could not be computed. Callers treat this as "component
/// excluded from the aggregate", not as a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegradedReason {
    NoInsulationData,
    NoWindowData,
    NoHvacData,
    NoValidFixtures,
    MissingHumidityReading,
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradedReason::NoInsulationData => write!(f, "no insulation ratings provided"),
            DegradedReason::NoWindowData => write!(f, "no window type or condition provided"),
            DegradedReason::NoHvacData => write!(f, "no heating system details provided"),
            DegradedReason::NoValidFixtures => {
                write!(f, "no lighting fixtures with valid wattage and lumens")
            }
            DegradedReason::MissingHumidityReading => {
                write!(f, "current or target humidity missing")
            }
        }
    }
}

pub type SubScore = Result<f64, DegradedReason>;

/// Raw per-domain results, before normalization to the 0-100 aggregate scale.
/// Insulation/windows/HVAC are 0-3, lighting is lumens per watt, humidity is
/// already 0-100.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub insulation: SubScore,
    pub windows: SubScore,
    pub hvac: SubScore,
    pub lighting: SubScore,
    pub humidity: SubScore,
}

impl ScoreBreakdown {
    pub fn from_audit(audit: &EnergyAuditData, as_of: NaiveDate) -> Self {
        ScoreBreakdown {
            insulation: insulation_score(&audit.current_conditions),
            windows: window_score(&audit.current_conditions),
            hvac: hvac_score(&audit.heating_cooling, as_of),
            lighting: lighting_efficiency(&audit.current_conditions),
            humidity: humidity_score(&audit.current_conditions),
        }
    }

    /// Envelope component: mean of the available insulation/window scores,
    /// scaled from 0-3 to 0-100. None when neither is available.
    pub fn energy_component(&self) -> Option<f64> {
        let parts: Vec<f64> = [self.insulation, self.windows]
            .iter()
            .filter_map(|r| r.ok())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(parts.iter().sum::<f64>() / parts.len() as f64 * 100.0 / 3.0)
    }

    pub fn hvac_component(&self) -> Option<f64> {
        self.hvac.ok().map(|s| s * 100.0 / 3.0)
    }

    /// Lumens-per-watt capped at 100 for the aggregate scale; modern LED
    /// output sits right around 100 lm/W.
    pub fn lighting_component(&self) -> Option<f64> {
        self.lighting.ok().map(|lm_w| lm_w.min(100.0))
    }

    pub fn humidity_component(&self) -> Option<f64> {
        self.humidity.ok()
    }

    pub fn degraded_reasons(&self) -> Vec<DegradedReason> {
        [
            self.insulation,
            self.windows,
            self.hvac,
            self.lighting,
            self.humidity,
        ]
        .iter()
        .filter_map(|r| r.err())
        .collect()
    }
}

/// Mean of the four per-area categorical ratings. Areas the survey skipped
/// count as "average/unsure" (1); only a wholly absent section excludes the
/// score.
pub fn insulation_score(conditions: &CurrentConditions) -> SubScore {
    let ratings = conditions
        .insulation
        .as_ref()
        .ok_or(DegradedReason::NoInsulationData)?;
    let areas = [
        &ratings.attic,
        &ratings.walls,
        &ratings.basement,
        &ratings.floor,
    ];
    let total: f64 = areas
        .iter()
        .map(|r| r.as_ref().map(|c| c.score()).unwrap_or(1.0))
        .sum();
    Ok(total / areas.len() as f64)
}

/// Mean of window-type and window-condition scores; a missing half falls back
/// to the other.
pub fn window_score(conditions: &CurrentConditions) -> SubScore {
    match (&conditions.window_type, &conditions.window_condition) {
        (None, None) => Err(DegradedReason::NoWindowData),
        (Some(t), None) => Ok(t.score()),
        (None, Some(c)) => Ok(c.score()),
        (Some(t), Some(c)) => Ok((t.score() + c.score()) / 2.0),
    }
}

/// Starts at 3 and deducts for system age and service gap, floored at 0.
/// Deductions only apply to fields the survey actually answered; a heating
/// system with neither an age nor a service date carries no signal and is
/// excluded rather than scored perfect.
pub fn hvac_score(heating_cooling: &HeatingCooling, as_of: NaiveDate) -> SubScore {
    let system = heating_cooling
        .heating_system
        .as_ref()
        .ok_or(DegradedReason::NoHvacData)?;
    if system.age_years.is_none() && system.last_service_date.is_none() {
        return Err(DegradedReason::NoHvacData);
    }

    let mut score: f64 = 3.0;
    if let Some(age) = system.age_years {
        if age > 15.0 {
            score -= 2.0;
        } else if age > 10.0 {
            score -= 1.0;
        }
    }
    if let Some(months) = months_since_service(system.last_service_date, as_of) {
        if months > 12.0 {
            score -= 1.0;
        }
        if months > 24.0 {
            score -= 1.0;
        }
    }
    Ok(score.max(0.0))
}

pub fn months_since_service(last_service: Option<NaiveDate>, as_of: NaiveDate) -> Option<f64> {
    let date = last_service?;
    let days = (as_of - date).num_days();
    if days < 0 {
        // Service date in the future: treat as freshly serviced.
        return Some(0.0);
    }
    Some(days as f64 / 30.44)
}

/// Aggregate lumens-per-watt across fixtures with positive wattage and
/// lumen figures. Invalid fixtures are skipped, not zero-filled.
pub fn lighting_efficiency(conditions: &CurrentConditions) -> SubScore {
    let lighting = conditions
        .lighting
        .as_ref()
        .ok_or(DegradedReason::NoValidFixtures)?;
    let mut total_watts = 0.0;
    let mut total_lumens = 0.0;
    for fixture in lighting.fixtures.iter().filter(|f| f.is_valid()) {
        total_watts += fixture.watts.unwrap_or(0.0);
        total_lumens += fixture.lumens.unwrap_or(0.0);
    }
    if total_watts <= 0.0 {
        return Err(DegradedReason::NoValidFixtures);
    }
    Ok(total_lumens / total_watts)
}

/// 100 minus twice the distance from target, clamped to [0, 100]. Requires
/// both readings; a half-answered section propagates as missing rather than
/// scoring 0.
pub fn humidity_score(conditions: &CurrentConditions) -> SubScore {
    let readings = conditions
        .humidity
        .as_ref()
        .ok_or(DegradedReason::MissingHumidityReading)?;
    match (readings.current, readings.target) {
        (Some(current), Some(target)) => {
            Ok((100.0 - 2.0 * (current - target).abs()).clamp(0.0, 100.0))
        }
        _ => Err(DegradedReason::MissingHumidityReading),
    }
}

const WEIGHTS: [(f64, fn(&ScoreBreakdown) -> Option<f64>); 4] = [
    (0.4, ScoreBreakdown::energy_component),
    (0.3, ScoreBreakdown::hvac_component),
    (0.2, ScoreBreakdown::lighting_component),
    (0.1, ScoreBreakdown::humidity_component),
];

/// Score reported when no sub-score at all could be computed. A survey this
/// empty says nothing about the building; defaulting to 0 would misreport it
/// as failing.
pub const INSUFFICIENT_DATA_SCORE: u32 = 70;
pub const INSUFFICIENT_DATA_LABEL: &str = "Insufficient data";

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub value: u32,
    pub label: &'static str,
    pub energy: Option<f64>,
    pub hvac: Option<f64>,
    pub lighting: Option<f64>,
    pub humidity: Option<f64>,
    pub degraded: Vec<DegradedReason>,
}

/// Weighted mean over whichever components are available; the weights of
/// missing components drop out of both numerator and denominator.
pub fn compute_score(breakdown: &ScoreBreakdown) -> ScoreResult {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (weight, component) in WEIGHTS {
        if let Some(value) = component(breakdown) {
            weighted_sum += weight * value;
            weight_total += weight;
        }
    }

    let (value, label) = if weight_total == 0.0 {
        (INSUFFICIENT_DATA_SCORE, INSUFFICIENT_DATA_LABEL)
    } else {
        let score = (weighted_sum / weight_total).clamp(40.0, 100.0);
        let value = score.round() as u32;
        let label = match value {
            90..=100 => "Excellent",
            80..=89 => "Very Good",
            70..=79 => "Good",
            60..=69 => "Fair",
            _ => "Poor",
        };
        (value, label)
    };

    ScoreResult {
        value,
        label,
        energy: breakdown.energy_component(),
        hvac: breakdown.hvac_component(),
        lighting: breakdown.lighting_component(),
        humidity: breakdown.humidity_component(),
        degraded: breakdown.degraded_reasons(),
    }
}
