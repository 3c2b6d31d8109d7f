//! Score Calculator: runs the seven category scorers over a
//! `PageModel`, applies content-type reweighting, and produces the final
//! `PageAudit`.

use crate::ai_citation::CitationProbe;
use crate::{ai_citation, answerability, authority, citationability, content_quality, structured_data, technical};
use aeo_types::{BreakdownEntry, Category, CategoryScore, ContentClassification, PageAudit, PageModel};
use chrono::Utc;
use std::collections::BTreeMap;

/// Run every category scorer and assemble the final weighted audit.
///
/// `probes` may be empty — the AI Citation category is a null-object in
/// that case and contributes nothing to the overall score.
pub async fn calculate(page: &PageModel, classification: &ContentClassification, probes: &[Box<dyn CitationProbe>]) -> PageAudit {
    let mut scores: BTreeMap<Category, CategoryScore> = BTreeMap::new();
    scores.insert(Category::Answerability, answerability::score(page));
    scores.insert(Category::StructuredData, structured_data::score(page));
    scores.insert(Category::Authority, authority::score(page));
    scores.insert(Category::ContentQuality, content_quality::score(page));
    scores.insert(Category::Citationability, citationability::score(page));
    scores.insert(Category::Technical, technical::score(page));
    scores.insert(Category::AiCitation, ai_citation::score(page, probes).await);

    let weighted = crate::weights::apply(classification.content_type, &scores);

    let mut breakdown = BTreeMap::new();
    let mut overall_score = 0.0;
    for (category, score) in scores {
        let (weight, weighted_raw, weighted_max) = weighted
            .get(&category)
            .copied()
            .unwrap_or((1.0, 0.0, 0.0));
        overall_score += weighted_raw;
        breakdown.insert(
            category,
            BreakdownEntry {
                score,
                weight,
                percentage: if weighted_max > 0.0 {
                    (weighted_raw / weighted_max * 100.0).clamp(0.0, 100.0)
                } else {
                    0.0
                },
            },
        );
    }

    let overall_score = overall_score.clamp(0.0, 100.0);
    let grade = aeo_types::Grade::from_score(overall_score);

    PageAudit {
        url: page.url.clone(),
        overall_score,
        grade,
        content_classification: classification.clone(),
        breakdown,
        fetched_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_page_still_produces_a_full_breakdown_and_an_f_grade() {
        let page = PageModel::empty("https://example.com/");
        let classification = ContentClassification::default();
        let audit = calculate(&page, &classification, &[]).await;

        assert_eq!(audit.breakdown.len(), Category::ALL.len());
        assert!(audit.overall_score < 50.0);
        assert_eq!(audit.grade.as_str(), "F");
    }

    #[tokio::test]
    async fn overall_score_never_exceeds_one_hundred() {
        let mut page = PageModel::empty("https://example.com/");
        page.word_count = 5000;
        page.is_https = true;
        for _ in 0..10 {
            page.headings.push(aeo_types::Heading { level: 2, text: "H".into(), id: None });
        }
        let classification = ContentClassification::default();
        let audit = calculate(&page, &classification, &[]).await;
        assert!(audit.overall_score <= 100.0);
    }
}
