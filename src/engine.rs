use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;

use crate::audit::{discover_audits, AuditDocument, EnergyAuditData};
use crate::config::Config;
use crate::financial::{summarize, FinancialSummary};
use crate::products::{
    MatchQuery, MatchStrategy, PreferenceFilter, Product, ProductCatalog, RelevanceRanking,
};
use crate::recommendation::{Category, Priority, Recommendation};
use crate::rules::{generate, AnalysisDepth, AuditAnalysis};
use crate::scoring::{compute_score, ScoreBreakdown, ScoreResult};

/// Everything the pipeline reads besides the survey itself: config, a
/// catalog snapshot, and the evaluation date. Constructed once per run and
/// passed in; there is no ambient product database.
pub struct PipelineContext {
    pub config: Config,
    pub catalog: ProductCatalog,
    pub as_of: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryProducts {
    pub category: Category,
    pub products: Vec<Product>,
}

/// The pipeline's output: plain data for report rendering and dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub label: String,
    pub score: ScoreResult,
    pub depth: AnalysisDepth,
    pub recommendations: Vec<Recommendation>,
    pub products: Vec<CategoryProducts>,
    pub product_strategy: &'static str,
    pub financial: FinancialSummary,
}

pub struct EngineResult {
    pub reports: Vec<AuditReport>,
    pub audits_analyzed: usize,
    pub fail_below: u32,
}

/// Run the full pipeline on one validated survey: scores -> recommendations
/// -> product enrichment -> financial summary. Pure with respect to the
/// context; no I/O.
pub fn analyze(audit: &EnergyAuditData, label: &str, ctx: &PipelineContext) -> AuditReport {
    let breakdown = ScoreBreakdown::from_audit(audit, ctx.as_of);
    let score = compute_score(&breakdown);

    let analysis = AuditAnalysis {
        audit,
        scores: &breakdown,
        rates: &ctx.config.rates,
        as_of: ctx.as_of,
    };
    let (mut recommendations, depth) =
        generate(&analysis, &|id| ctx.config.is_rule_enabled(id));
    recommendations.sort_by_key(|r| (r.priority.rank(), r.category as u8));

    let financial = summarize(&recommendations, &ctx.config.rates);
    let (products, product_strategy) = match_products(audit, &recommendations, ctx);

    AuditReport {
        label: label.to_string(),
        score,
        depth,
        recommendations,
        products,
        product_strategy,
        financial,
    }
}

/// Attach catalog products per recommendation category. Preference-driven
/// filtering when the survey carries product preferences, context-driven
/// relevance ranking otherwise; the strategies are interchangeable behind
/// the same query contract.
fn match_products(
    audit: &EnergyAuditData,
    recommendations: &[Recommendation],
    ctx: &PipelineContext,
) -> (Vec<CategoryProducts>, &'static str) {
    let preference_filter = PreferenceFilter;
    let relevance_ranking = RelevanceRanking;
    let strategy: &dyn MatchStrategy = if audit.product_preferences.is_some() {
        &preference_filter
    } else {
        &relevance_ranking
    };

    if ctx.catalog.is_empty() {
        return (vec![], strategy.name());
    }

    let priority_categories: Vec<String> = recommendations
        .iter()
        .filter(|r| r.priority == Priority::High)
        .map(|r| r.category.product_key().to_string())
        .collect();

    let preferences = audit.product_preferences.as_ref();
    let mut seen: Vec<Category> = Vec::new();
    let mut results = Vec::new();
    for rec in recommendations {
        if seen.contains(&rec.category) {
            continue;
        }
        seen.push(rec.category);

        // An explicit preference list restricts which categories get
        // product suggestions at all.
        if let Some(prefs) = preferences {
            if !prefs.categories.is_empty()
                && !prefs
                    .categories
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(rec.category.product_key()))
            {
                continue;
            }
        }
        let query = MatchQuery {
            category: rec.category.product_key().to_string(),
            features: preferences.map(|p| p.features.clone()).unwrap_or_default(),
            max_price: preferences.and_then(|p| p.budget_max),
            min_efficiency: None,
            property_type: Some(audit.basic_info.property_type),
            priority_categories: priority_categories.clone(),
            require_in_stock: ctx.config.matching.require_in_stock,
            top_n: ctx.config.matching.top_n,
        };
        let matches = strategy.select(&ctx.catalog, &query);
        if !matches.is_empty() {
            results.push(CategoryProducts {
                category: rec.category,
                products: matches.into_iter().cloned().collect(),
            });
        }
    }
    (results, strategy.name())
}

/// File-level entry point: a single audit JSON file or a directory of them.
/// A file that fails to load is warned about and skipped so one bad payload
/// does not sink the batch.
pub fn run(path: &Path, catalog_override: Option<&Path>) -> Result<EngineResult, String> {
    let config_dir = if path.is_dir() {
        path
    } else {
        match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    };
    let config = Config::load(config_dir)?;
    let catalog = load_catalog(catalog_override, &config, config_dir);
    let as_of = chrono::Local::now().date_naive();

    let files = discover_audits(path)?;
    let ctx = PipelineContext {
        config,
        catalog,
        as_of,
    };

    let mut reports: Vec<AuditReport> = files
        .par_iter()
        .filter_map(|file| match AuditDocument::load(file) {
            Ok(doc) => Some(analyze(&doc.data, &doc.label, &ctx)),
            Err(e) => {
                eprintln!("Warning: {e}");
                None
            }
        })
        .collect();
    reports.sort_by(|a, b| a.label.cmp(&b.label));

    let audits_analyzed = reports.len();
    Ok(EngineResult {
        reports,
        audits_analyzed,
        fail_below: ctx.config.ci.fail_below,
    })
}

fn load_catalog(
    catalog_override: Option<&Path>,
    config: &Config,
    config_dir: &Path,
) -> ProductCatalog {
    let path: Option<PathBuf> = catalog_override
        .map(Path::to_path_buf)
        .or_else(|| config.matching.catalog.as_ref().map(|c| config_dir.join(c)));
    match path {
        Some(p) => match ProductCatalog::load(&p) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Warning: {e}");
                ProductCatalog::empty()
            }
        },
        None => ProductCatalog::empty(),
    }
}
