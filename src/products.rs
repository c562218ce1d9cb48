use std::cmp::Ordering;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::audit::PropertyType;

/// Catalog entry. `efficiency_rating` is the free-text marketing string
/// ("ENERGY STAR 4.5", "SEER 16"); the numeric value is parsed out of it on
/// demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub price: f64,
    pub efficiency_rating: Option<String>,
    pub features: Vec<String>,
    /// Property types the product suits; empty means any.
    pub property_types: Vec<String>,
    pub user_rating: Option<f64>,
    pub green_certified: bool,
    pub rebate_eligible: bool,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Product {
    fn default() -> Self {
        Product {
            id: String::new(),
            name: String::new(),
            category: String::new(),
            subcategory: None,
            price: 0.0,
            efficiency_rating: None,
            features: Vec::new(),
            property_types: Vec::new(),
            user_rating: None,
            green_certified: false,
            rebate_eligible: false,
            in_stock: true,
        }
    }
}

fn rating_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("rating regex is valid"))
}

impl Product {
    /// First numeric token in the free-text rating string, if any.
    pub fn efficiency_value(&self) -> Option<f64> {
        let rating = self.efficiency_rating.as_deref()?;
        let captures = rating_regex().captures(rating)?;
        captures.get(1)?.as_str().parse().ok()
    }

    pub fn matches_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f.eq_ignore_ascii_case(feature))
    }

    pub fn suits_property(&self, property_type: PropertyType) -> bool {
        if self.property_types.is_empty() {
            return true;
        }
        let key = property_type_key(property_type);
        self.property_types.iter().any(|p| p.eq_ignore_ascii_case(key))
    }
}

pub fn property_type_key(property_type: PropertyType) -> &'static str {
    match property_type {
        PropertyType::SingleFamily => "single-family",
        PropertyType::Townhouse => "townhouse",
        PropertyType::Apartment => "apartment",
        PropertyType::MobileHome => "mobile-home",
        PropertyType::Other => "other",
    }
}

/// Snapshot of the product catalog, constructed once and passed into pipeline
/// calls rather than read from ambient state.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        ProductCatalog { products }
    }

    pub fn empty() -> Self {
        ProductCatalog::default()
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read catalog {}: {e}", path.display()))?;
        let products: Vec<Product> = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse catalog {}: {e}", path.display()))?;
        Ok(ProductCatalog { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }
}

/// One "recommend products for this context" request. Both strategies answer
/// the same query shape.
#[derive(Debug, Clone, Default)]
pub struct MatchQuery {
    pub category: String,
    pub features: Vec<String>,
    pub max_price: Option<f64>,
    pub min_efficiency: Option<f64>,
    pub property_type: Option<PropertyType>,
    /// Categories of the audit's high-priority recommendations, for
    /// relevance ranking.
    pub priority_categories: Vec<String>,
    pub require_in_stock: bool,
    pub top_n: usize,
}

pub trait MatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn select<'a>(&self, catalog: &'a ProductCatalog, query: &MatchQuery) -> Vec<&'a Product>;
}

/// Efficiency descending with unrated products last, price ascending as the
/// tie-break. Shared ordering contract for both strategies.
pub fn compare_by_efficiency(a: &Product, b: &Product) -> Ordering {
    match (a.efficiency_value(), b.efficiency_value()) {
        (Some(ea), Some(eb)) => eb
            .partial_cmp(&ea)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
    }
}

pub fn rank_by_efficiency(products: &mut Vec<&Product>) {
    products.sort_by(|a, b| compare_by_efficiency(a, b));
}

fn passes_common_filters(product: &Product, query: &MatchQuery) -> bool {
    if query.require_in_stock && !product.in_stock {
        return false;
    }
    if let Some(max) = query.max_price {
        if product.price > max {
            return false;
        }
    }
    true
}

/// Preference-driven matching: hard category/feature/budget/efficiency
/// filters, then the shared efficiency ordering.
pub struct PreferenceFilter;

impl MatchStrategy for PreferenceFilter {
    fn name(&self) -> &'static str {
        "preference-filter"
    }

    fn select<'a>(&self, catalog: &'a ProductCatalog, query: &MatchQuery) -> Vec<&'a Product> {
        let mut matches: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| p.matches_category(&query.category))
            .filter(|p| passes_common_filters(p, query))
            .filter(|p| query.features.iter().all(|f| p.has_feature(f)))
            .filter(|p| match query.min_efficiency {
                Some(min) => p.efficiency_value().is_some_and(|e| e >= min),
                None => true,
            })
            .collect();
        rank_by_efficiency(&mut matches);
        matches.truncate(query.top_n);
        matches
    }
}

// Relevance factor weights. They sum to 1 so a perfect product scores 1.0.
const WEIGHT_PROPERTY_MATCH: f64 = 0.25;
const WEIGHT_PRIORITY_MATCH: f64 = 0.25;
const WEIGHT_ROI: f64 = 0.20;
const WEIGHT_USER_RATING: f64 = 0.15;
const WEIGHT_GREEN: f64 = 0.10;
const WEIGHT_REBATE: f64 = 0.05;

/// Audit-context matching: soft weighted relevance score over the category's
/// products, falling back to the shared ordering to break score ties.
pub struct RelevanceRanking;

impl RelevanceRanking {
    fn relevance(product: &Product, query: &MatchQuery) -> f64 {
        let property = match query.property_type {
            Some(pt) if product.suits_property(pt) => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        };
        let priority = if query
            .priority_categories
            .iter()
            .any(|c| product.matches_category(c))
        {
            1.0
        } else {
            0.0
        };
        // Efficiency per dollar, saturating at 0.1 units per dollar.
        let roi = match (product.efficiency_value(), product.price) {
            (Some(e), price) if price > 0.0 => (e / price / 0.1).min(1.0),
            _ => 0.0,
        };
        let rating = product.user_rating.map(|r| (r / 5.0).clamp(0.0, 1.0)).unwrap_or(0.0);

        WEIGHT_PROPERTY_MATCH * property
            + WEIGHT_PRIORITY_MATCH * priority
            + WEIGHT_ROI * roi
            + WEIGHT_USER_RATING * rating
            + WEIGHT_GREEN * if product.green_certified { 1.0 } else { 0.0 }
            + WEIGHT_REBATE * if product.rebate_eligible { 1.0 } else { 0.0 }
    }
}

impl MatchStrategy for RelevanceRanking {
    fn name(&self) -> &'static str {
        "relevance-ranking"
    }

    fn select<'a>(&self, catalog: &'a ProductCatalog, query: &MatchQuery) -> Vec<&'a Product> {
        let mut scored: Vec<(f64, &Product)> = catalog
            .products()
            .iter()
            .filter(|p| p.matches_category(&query.category))
            .filter(|p| passes_common_filters(p, query))
            .map(|p| (Self::relevance(p, query), p))
            .collect();
        // Relevance descending; equal relevance falls back to the shared
        // efficiency-then-price ordering.
        scored.sort_by(|(sa, a), (sb, b)| {
            sb.partial_cmp(sa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| compare_by_efficiency(a, b))
        });

        let mut matches: Vec<&Product> = scored.into_iter().map(|(_, p)| p).collect();
        matches.truncate(query.top_n);
        matches
    }
}
