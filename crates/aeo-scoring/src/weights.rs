//! Content-type reweighting: each category's raw/max score is
//! multiplied by a content-type weight, then every category is renormalized
//! so the sum of weighted maxes is exactly 100.

use aeo_types::{Category, CategoryScore, ContentType, ContentTypeWeights};
use std::collections::BTreeMap;

fn weight_for(content_type: ContentType, category: Category) -> f64 {
    if category == Category::AiCitation {
        return 1.0;
    }
    let weights = ContentTypeWeights::for_type(content_type);
    match category {
        Category::Answerability => weights.answerability,
        Category::StructuredData => weights.structured_data,
        Category::Authority => weights.authority,
        Category::ContentQuality => weights.content_quality,
        Category::Citationability => weights.citationability,
        Category::Technical => weights.technical,
        Category::AiCitation => unreachable!("handled above"),
    }
}

/// Apply per-category weights, then renormalize so weighted maxes sum to
/// 100. Returns, per category, `(weight, weighted_raw, weighted_max)`.
pub fn apply(
    content_type: ContentType,
    scores: &BTreeMap<Category, CategoryScore>,
) -> BTreeMap<Category, (f64, f64, f64)> {
    let weighted: BTreeMap<Category, (f64, f64, f64)> = scores
        .iter()
        .map(|(category, score)| {
            let weight = weight_for(content_type, *category);
            (*category, (weight, score.raw * weight, score.max * weight))
        })
        .collect();

    let total_weighted_max: f64 = weighted.values().map(|(_, _, max)| max).sum();
    if total_weighted_max <= 0.0 {
        return weighted;
    }

    let renormalize_factor = 100.0 / total_weighted_max;
    weighted
        .into_iter()
        .map(|(category, (weight, raw, max))| {
            (category, (weight, raw * renormalize_factor, max * renormalize_factor))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renormalized_maxes_sum_to_one_hundred() {
        let mut scores = BTreeMap::new();
        for category in Category::ALL {
            let mut score = CategoryScore::new(category.base_max());
            score.raw = category.base_max();
            scores.insert(category, score);
        }
        let weighted = apply(ContentType::Transactional, &scores);
        let total_max: f64 = weighted.values().map(|(_, _, max)| max).sum();
        assert!((total_max - 100.0).abs() < 1e-6);
    }

    #[test]
    fn perfect_scores_in_every_category_yield_overall_one_hundred() {
        let mut scores = BTreeMap::new();
        for category in Category::ALL {
            let mut score = CategoryScore::new(category.base_max());
            score.raw = category.base_max();
            scores.insert(category, score);
        }
        let weighted = apply(ContentType::Informational, &scores);
        let total_raw: f64 = weighted.values().map(|(_, raw, _)| raw).sum();
        assert!((total_raw - 100.0).abs() < 1e-6);
    }
}
