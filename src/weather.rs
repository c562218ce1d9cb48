use serde::Serialize;

/// Heating/cooling degree-day totals for a period. When no measured data is
/// available these are estimated from the climate zone, flagged `estimated`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DegreeDays {
    pub heating: f64,
    pub cooling: f64,
    pub days: u32,
    pub estimated: bool,
}

/// Daily (HDD, CDD) estimates per climate zone 1 (hot/tropical) through
/// 5 (cold).
const ZONE_DAILY: [(f64, f64); 5] = [
    (0.5, 8.0),
    (2.0, 5.0),
    (5.0, 3.0),
    (8.0, 1.0),
    (12.0, 0.5),
];

/// Generic estimate when the climate zone is unknown.
const GENERIC_DAILY: (f64, f64) = (5.0, 3.0);

impl DegreeDays {
    pub fn estimate_for_zone(zone: Option<u8>, days: u32) -> Self {
        let (hdd, cdd) = zone
            .filter(|z| (1..=5).contains(z))
            .map(|z| ZONE_DAILY[(z - 1) as usize])
            .unwrap_or(GENERIC_DAILY);
        DegreeDays {
            heating: hdd * days as f64,
            cooling: cdd * days as f64,
            days,
            estimated: true,
        }
    }

    pub fn annual_for_zone(zone: Option<u8>) -> Self {
        Self::estimate_for_zone(zone, 365)
    }
}

// Industry rule-of-thumb consumption factors, BTU per ft^2 per degree day.
pub const HEATING_BTU_PER_SQFT_DD: f64 = 1.5;
pub const COOLING_BTU_PER_SQFT_DD: f64 = 2.0;
pub const BTU_PER_KWH: f64 = 3412.0;
pub const BTU_PER_THERM: f64 = 100_000.0;

/// Efficiency assumed when the survey gave none or a non-positive value.
pub const DEFAULT_SYSTEM_EFFICIENCY: f64 = 0.8;

/// Efficiency gain modeled for an upgraded system, capped at 95%.
pub const UPGRADE_EFFICIENCY_GAIN: f64 = 0.2;
pub const MAX_SYSTEM_EFFICIENCY: f64 = 0.95;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HvacImpact {
    pub heating_kwh: f64,
    pub cooling_kwh: f64,
    pub total_kwh: f64,
    pub annual_cost: f64,
    /// Dollars per year saved by upgrading to `UPGRADE_EFFICIENCY_GAIN`
    /// better efficiency.
    pub potential_savings: f64,
    /// Savings relative to a rough $1.5/ft^2 upgrade cost.
    pub upgrade_roi: f64,
}

/// Weather-driven HVAC consumption estimate for a building of the given size
/// and system efficiency (0-1 fraction).
pub fn estimate_hvac_impact(
    degree_days: &DegreeDays,
    system_efficiency: f64,
    square_footage: f64,
    electricity_rate: f64,
) -> HvacImpact {
    let efficiency = if system_efficiency > 0.0 {
        system_efficiency.min(MAX_SYSTEM_EFFICIENCY)
    } else {
        DEFAULT_SYSTEM_EFFICIENCY
    };

    let heating_btu = degree_days.heating * square_footage * HEATING_BTU_PER_SQFT_DD;
    let cooling_btu = degree_days.cooling * square_footage * COOLING_BTU_PER_SQFT_DD;

    let heating_kwh = heating_btu / BTU_PER_KWH / efficiency;
    let cooling_kwh = cooling_btu / BTU_PER_KWH / efficiency;
    let total_kwh = heating_kwh + cooling_kwh;

    let improved = (efficiency + UPGRADE_EFFICIENCY_GAIN).min(MAX_SYSTEM_EFFICIENCY);
    let improved_kwh = (heating_btu + cooling_btu) / BTU_PER_KWH / improved;
    let potential_savings = (total_kwh - improved_kwh) * electricity_rate;

    let upgrade_cost = square_footage * 1.5;
    let upgrade_roi = if upgrade_cost > 0.0 {
        potential_savings / upgrade_cost
    } else {
        0.0
    };

    HvacImpact {
        heating_kwh,
        cooling_kwh,
        total_kwh,
        annual_cost: total_kwh * electricity_rate,
        potential_savings,
        upgrade_roi,
    }
}
