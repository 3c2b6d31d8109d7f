use crate::scoring::{Category, Grade, PageAudit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single category's aggregated view across all successfully audited
/// pages in a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub mean_raw: f64,
    pub max: f64,
    /// Stable-sorted by URL for output determinism.
    pub page_scores: Vec<PageCategoryScore>,
    pub best_page: Option<String>,
    pub worst_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCategoryScore {
    pub url: String,
    pub raw: f64,
    pub max: f64,
}

/// Brand-level GEO inclusion-readiness score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoComponent {
    pub name: String,
    pub score: f64,
    pub max: f64,
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoScore {
    pub overall: f64,
    pub components: Vec<GeoComponent>,
}

/// Domain-level audit result, produced by the Aggregator.
///
/// `overall_score` is the arithmetic mean of per-page overall scores, never
/// a re-derivation from averaged sub-scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainAudit {
    pub domain: String,
    pub pages_audited: usize,
    pub pages_successful: usize,
    pub overall_score: f64,
    pub grade: Grade,
    pub breakdown: BTreeMap<Category, CategoryAggregate>,
    pub best_page: Option<String>,
    pub worst_page: Option<String>,
    pub geo_score: Option<GeoScore>,
    pub page_audits: Vec<PageAudit>,
}
