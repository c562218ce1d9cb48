use serde::Serialize;

use crate::engine::{AuditReport, CategoryProducts};
use crate::financial::FinancialSummary;
use crate::recommendation::{Priority, Recommendation};
use crate::rules::AnalysisDepth;
use crate::scoring::ScoreResult;

use super::Reporter;

pub struct JsonReporter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    version: &'static str,
    audit: &'a str,
    score: &'a ScoreResult,
    depth: AnalysisDepth,
    summary: SummaryJson,
    recommendations: &'a [Recommendation],
    products: &'a [CategoryProducts],
    product_strategy: &'static str,
    financial: &'a FinancialSummary,
}

#[derive(Serialize)]
struct SummaryJson {
    recommendations: usize,
    high: usize,
    medium: usize,
    low: usize,
}

impl Reporter for JsonReporter {
    fn format(&self, report: &AuditReport, _verbose: bool) -> String {
        let count_priority = |p: Priority| {
            report
                .recommendations
                .iter()
                .filter(|r| r.priority == p)
                .count()
        };
        let output = JsonOutput {
            version: env!("CARGO_PKG_VERSION"),
            audit: &report.label,
            score: &report.score,
            depth: report.depth,
            summary: SummaryJson {
                recommendations: report.recommendations.len(),
                high: count_priority(Priority::High),
                medium: count_priority(Priority::Medium),
                low: count_priority(Priority::Low),
            },
            recommendations: &report.recommendations,
            products: &report.products,
            product_strategy: report.product_strategy,
            financial: &report.financial,
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}
