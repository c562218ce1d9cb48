use std::collections::BTreeMap;

use owo_colors::OwoColorize;

use crate::engine::AuditReport;
use crate::recommendation::{Priority, Recommendation};

use super::Reporter;

pub struct CliReporter;

impl Reporter for CliReporter {
    fn format(&self, report: &AuditReport, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "\n  {} v{}\n\n",
            "energy-doctor".bold(),
            env!("CARGO_PKG_VERSION")
        ));
        out.push_str(&format!("  Audit: {}\n", report.label));

        let score = &report.score;
        let score_colored = match score.value {
            80..=100 => format!("{}", score.value).green().to_string(),
            60..=79 => format!("{}", score.value).yellow().to_string(),
            _ => format!("{}", score.value).red().to_string(),
        };
        out.push_str(&format!(
            "\n  Score: {} / 100 — {}\n",
            score_colored, score.label
        ));
        out.push_str(&format!(
            "  Components: energy {}, hvac {}, lighting {}, humidity {}\n",
            component(score.energy),
            component(score.hvac),
            component(score.lighting),
            component(score.humidity)
        ));
        if verbose && !score.degraded.is_empty() {
            for reason in &score.degraded {
                out.push_str(&format!("  {} {}\n", "Skipped:".dimmed(), reason));
            }
        }

        let high = count(&report.recommendations, Priority::High);
        let medium = count(&report.recommendations, Priority::Medium);
        let low = count(&report.recommendations, Priority::Low);
        out.push_str(&format!(
            "\n  {} recommendations ({} analysis): {} high, {} medium, {} low\n",
            report.recommendations.len(),
            report.depth,
            high.to_string().red(),
            medium.to_string().yellow(),
            low.to_string().blue()
        ));

        let mut by_category: BTreeMap<String, Vec<&Recommendation>> = BTreeMap::new();
        for r in &report.recommendations {
            by_category
                .entry(r.category.to_string())
                .or_default()
                .push(r);
        }

        for (category, recs) in &by_category {
            out.push_str(&format!(
                "\n  {} {} {}\n",
                "──".dimmed(),
                category,
                "─".repeat(50 - category.len().min(49)).dimmed()
            ));
            for r in recs {
                let priority_str = match r.priority {
                    Priority::High => " HIGH".red().bold().to_string(),
                    Priority::Medium => "  MED".yellow().to_string(),
                    Priority::Low => "  LOW".blue().to_string(),
                };
                out.push_str(&format!("  {}  {}\n", priority_str, r.rule.dimmed()));
                out.push_str(&format!("         {}\n", r.title));
                let payback = match r.payback_years {
                    Some(years) => format!("{years:.1} yrs"),
                    None => "—".to_string(),
                };
                out.push_str(&format!(
                    "         Savings: ${:.0}/yr   Cost: ${:.0}   Payback: {}\n",
                    r.estimated_savings, r.estimated_cost, payback
                ));
                if verbose {
                    out.push_str(&format!("         {}\n", r.description.dimmed()));
                }
            }
            if let Some(matched) = report
                .products
                .iter()
                .find(|cp| cp.category.to_string() == *category)
            {
                let names: Vec<String> = matched
                    .products
                    .iter()
                    .map(|p| format!("{} (${:.0})", p.name, p.price))
                    .collect();
                out.push_str(&format!(
                    "         {}: {}\n",
                    "Products".cyan(),
                    names.join(", ")
                ));
            }
        }

        let financial = &report.financial;
        let payback = match financial.payback_years {
            Some(years) => format!("{years:.1} yrs"),
            None => "—".to_string(),
        };
        out.push_str(&format!(
            "\n  Investment: ${:.0}   Savings: ${:.0}/yr   Payback: {}   ROI: {:.0}%   CO2: {:.0} lbs/yr\n",
            financial.total_investment,
            financial.total_annual_savings,
            payback,
            financial.roi_percent,
            financial.co2_reduction_lbs
        ));
        out.push('\n');
        out
    }
}

fn component(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}"),
        None => "—".to_string(),
    }
}

fn count(recommendations: &[Recommendation], priority: Priority) -> usize {
    recommendations
        .iter()
        .filter(|r| r.priority == priority)
        .count()
}
