use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::Rates;
use crate::recommendation::{payback_period, Priority, Recommendation};

/// Investment horizon bucket, assigned from recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Horizon {
    Immediate,
    ShortTerm,
    LongTerm,
}

impl Horizon {
    pub fn from_priority(priority: Priority) -> Self {
        match priority {
            Priority::High => Horizon::Immediate,
            Priority::Medium => Horizon::ShortTerm,
            Priority::Low => Horizon::LongTerm,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Horizon::Immediate => write!(f, "immediate"),
            Horizon::ShortTerm => write!(f, "short-term"),
            Horizon::LongTerm => write!(f, "long-term"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BucketTotals {
    pub count: usize,
    pub investment: f64,
    pub annual_savings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub total_investment: f64,
    pub total_annual_savings: f64,
    /// Portfolio payback in years; None when nothing saves money.
    pub payback_years: Option<f64>,
    /// Annual savings over investment, as a percentage. 0 when either side
    /// is empty.
    pub roi_percent: f64,
    /// Estimated annual CO2 reduction in pounds, derived from the
    /// savings-equivalent kWh at the configured grid intensity.
    pub co2_reduction_lbs: f64,
    pub by_horizon: BTreeMap<Horizon, BucketTotals>,
    pub by_category: BTreeMap<String, BucketTotals>,
}

pub fn summarize(recommendations: &[Recommendation], rates: &Rates) -> FinancialSummary {
    let mut by_horizon: BTreeMap<Horizon, BucketTotals> = BTreeMap::new();
    let mut by_category: BTreeMap<String, BucketTotals> = BTreeMap::new();
    let mut total_investment = 0.0;
    let mut total_annual_savings = 0.0;

    for rec in recommendations {
        total_investment += rec.estimated_cost;
        total_annual_savings += rec.estimated_savings;

        let horizon = by_horizon
            .entry(Horizon::from_priority(rec.priority))
            .or_default();
        horizon.count += 1;
        horizon.investment += rec.estimated_cost;
        horizon.annual_savings += rec.estimated_savings;

        let category = by_category.entry(rec.category.to_string()).or_default();
        category.count += 1;
        category.investment += rec.estimated_cost;
        category.annual_savings += rec.estimated_savings;
    }

    let roi_percent = if total_investment > 0.0 && total_annual_savings > 0.0 {
        total_annual_savings / total_investment * 100.0
    } else {
        0.0
    };

    let savings_kwh = if rates.electricity_kwh > 0.0 {
        total_annual_savings / rates.electricity_kwh
    } else {
        0.0
    };

    FinancialSummary {
        total_investment,
        total_annual_savings,
        payback_years: payback_period(total_investment, total_annual_savings),
        roi_percent,
        co2_reduction_lbs: savings_kwh * rates.co2_lbs_per_kwh,
        by_horizon,
        by_category,
    }
}
