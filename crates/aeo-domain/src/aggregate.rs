//! Per-category aggregation.
//!
//! The domain overall score is the arithmetic mean of per-page overall
//! scores — never a re-score of averaged sub-scores, which would distort
//! the category scorers' non-linear rules.

use aeo_types::{Category, CategoryAggregate, DomainAudit, Grade, PageAudit, PageCategoryScore};
use std::collections::BTreeMap;

/// Build a `DomainAudit` from every successfully completed page audit.
/// `pages_attempted` counts every URL the worker pool took off the queue,
/// including ones that timed out and were marked failed, so `pages_attempted >= audits.len()`.
///
/// `geo_score` is left `None`; the caller fills it in separately since GEO
/// scoring needs the extracted `PageModel`s, not just the audits.
pub fn aggregate(domain: &str, pages_attempted: usize, audits: Vec<PageAudit>) -> DomainAudit {
    let mut breakdown: BTreeMap<Category, CategoryAggregate> = BTreeMap::new();

    for category in Category::ALL {
        let mut page_scores: Vec<PageCategoryScore> = audits
            .iter()
            .filter_map(|audit| {
                audit.breakdown.get(&category).map(|entry| PageCategoryScore {
                    url: audit.url.clone(),
                    raw: entry.score.raw,
                    max: entry.score.max,
                })
            })
            .collect();

        // Stable-sorted by URL for output determinism.
        page_scores.sort_by(|a, b| a.url.cmp(&b.url));

        let mean_raw = mean(page_scores.iter().map(|p| p.raw));
        let max = page_scores.first().map(|p| p.max).unwrap_or_else(|| category.base_max());

        let best_page = max_by_raw(&page_scores).map(|p| p.url.clone());
        let worst_page = min_by_raw(&page_scores).map(|p| p.url.clone());

        breakdown.insert(category, CategoryAggregate { mean_raw, max, page_scores, best_page, worst_page });
    }

    let overall_score = mean(audits.iter().map(|a| a.overall_score));
    let grade = Grade::from_score(overall_score);

    let best_page = audits
        .iter()
        .max_by(|a, b| a.overall_score.total_cmp(&b.overall_score))
        .map(|a| a.url.clone());
    let worst_page = audits
        .iter()
        .min_by(|a, b| a.overall_score.total_cmp(&b.overall_score))
        .map(|a| a.url.clone());

    DomainAudit {
        domain: domain.to_string(),
        pages_audited: pages_attempted,
        pages_successful: audits.len(),
        overall_score,
        grade,
        breakdown,
        best_page,
        worst_page,
        geo_score: None,
        page_audits: audits,
    }
}

fn mean(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let count = values.clone().count();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

fn max_by_raw(scores: &[PageCategoryScore]) -> Option<&PageCategoryScore> {
    scores.iter().max_by(|a, b| a.raw.total_cmp(&b.raw))
}

fn min_by_raw(scores: &[PageCategoryScore]) -> Option<&PageCategoryScore> {
    scores.iter().min_by(|a, b| a.raw.total_cmp(&b.raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::{BreakdownEntry, CategoryScore, ContentClassification};
    use chrono::Utc;

    fn audit(url: &str, overall: f64, answerability_raw: f64) -> PageAudit {
        let mut breakdown = BTreeMap::new();
        let mut score = CategoryScore::new(30.0);
        score.raw = answerability_raw;
        breakdown.insert(Category::Answerability, BreakdownEntry { score, weight: 1.0, percentage: 0.0 });
        PageAudit {
            url: url.to_string(),
            overall_score: overall,
            grade: Grade::from_score(overall),
            content_classification: ContentClassification::default(),
            breakdown,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn overall_is_mean_of_per_page_scores_not_a_rederivation() {
        let audits = vec![audit("https://a.example/", 80.0, 20.0), audit("https://b.example/", 60.0, 10.0)];
        let result = aggregate("a.example", 2, audits);
        assert!((result.overall_score - 70.0).abs() < 1e-9);
    }

    #[test]
    fn page_scores_are_sorted_by_url() {
        let audits = vec![audit("https://z.example/", 50.0, 5.0), audit("https://a.example/", 90.0, 25.0)];
        let result = aggregate("example.com", 2, audits);
        let answerability = &result.breakdown[&Category::Answerability];
        assert_eq!(answerability.page_scores[0].url, "https://a.example/");
        assert_eq!(answerability.page_scores[1].url, "https://z.example/");
    }

    #[test]
    fn best_and_worst_page_reflect_overall_score() {
        let audits = vec![audit("https://low.example/", 40.0, 5.0), audit("https://high.example/", 95.0, 28.0)];
        let result = aggregate("example.com", 2, audits);
        assert_eq!(result.best_page.as_deref(), Some("https://high.example/"));
        assert_eq!(result.worst_page.as_deref(), Some("https://low.example/"));
    }

    #[test]
    fn empty_audits_produce_zero_overall_without_panicking() {
        let result = aggregate("example.com", 3, vec![]);
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.pages_successful, 0);
        assert_eq!(result.pages_audited, 3);
    }
}
