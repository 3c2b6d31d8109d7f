//! Brand-level GEO (Generative-Engine-Optimization) inclusion-readiness
//! score.
//!
//! Every component scans only the already-extracted `PageModel`s passed in
//! — no new fetching. The exact point formulas below are an authored
//! resolution of an open design question; see DESIGN.md.

use aeo_types::{GeoComponent, GeoScore, JsonLdObject, PageAudit, PageModel};

const BRAND_FOUNDATION_MAX: f64 = 30.0;
const TOPIC_COVERAGE_MAX: f64 = 25.0;
const CONSISTENCY_MAX: f64 = 20.0;
const AI_RECALL_MAX: f64 = 15.0;
const TRUST_MAX: f64 = 10.0;

/// Recommended actions are only attached to components scoring below 60%
/// of their max.
const RECOMMENDATION_THRESHOLD: f64 = 0.6;

pub fn score(domain: &str, pages: &[(PageAudit, PageModel)]) -> GeoScore {
    let brand = brand_token(domain);

    let components = vec![
        brand_foundation(&brand, pages),
        topic_coverage(pages),
        consistency(pages),
        ai_recall(&brand, pages),
        trust(pages),
    ];

    let overall = components.iter().map(|c| c.score).sum();
    GeoScore { overall, components }
}

fn brand_token(domain: &str) -> String {
    domain.split('.').next().unwrap_or(domain).to_lowercase()
}

fn mentions_brand(text: &str, brand: &str) -> bool {
    !brand.is_empty() && text.to_lowercase().contains(brand)
}

fn component(name: &str, score: f64, max: f64, actions: Vec<String>) -> GeoComponent {
    let score = score.clamp(0.0, max);
    let recommended_actions = if score < max * RECOMMENDATION_THRESHOLD { actions } else { Vec::new() };
    GeoComponent { name: name.to_string(), score, max, recommended_actions }
}

fn brand_foundation(brand: &str, pages: &[(PageAudit, PageModel)]) -> GeoComponent {
    if pages.is_empty() {
        return component("brand_foundation", 0.0, BRAND_FOUNDATION_MAX, vec!["publish at least one page".to_string()]);
    }

    let has_about_page = pages.iter().any(|(_, page)| {
        let url_has_about = page.url.to_lowercase().contains("about");
        let title_is_what_is = page.title.as_deref().is_some_and(|t| {
            let t = t.to_lowercase();
            t.starts_with("what is") || t.starts_with("about")
        });
        url_has_about || title_is_what_is
    });

    let has_organization_schema = pages.iter().any(|(_, page)| {
        page.jsonld.iter().any(|obj: &JsonLdObject| obj.is_type("Organization"))
    });

    let mention_fraction = fraction(pages.iter().filter(|(_, page)| {
        mentions_brand(page.title.as_deref().unwrap_or_default(), brand)
            || page.headings.iter().any(|h| h.level == 1 && mentions_brand(&h.text, brand))
    }), pages.len());

    let score = if has_about_page { 12.0 } else { 0.0 }
        + if has_organization_schema { 10.0 } else { 0.0 }
        + mention_fraction * 8.0;

    let mut actions = Vec::new();
    if !has_about_page {
        actions.push(format!("publish a canonical About / \"What is {brand}\" page"));
    }
    if !has_organization_schema {
        actions.push("add Organization JSON-LD to the site".to_string());
    }
    if mention_fraction < 0.5 {
        actions.push("mention the brand name in more page titles and H1s".to_string());
    }

    component("brand_foundation", score, BRAND_FOUNDATION_MAX, actions)
}

fn topic_coverage(pages: &[(PageAudit, PageModel)]) -> GeoComponent {
    let mut topics = std::collections::BTreeSet::new();
    for (_, page) in pages {
        for keyword in &page.main_keywords {
            topics.insert(keyword.to_lowercase());
        }
    }
    let breadth_score = (topics.len() as f64 / 20.0 * 15.0).min(15.0);

    let hub_pages = pages.iter().filter(|(_, page)| page.internal_links_count >= 10).count();
    let depth_score = (hub_pages as f64 / (pages.len().max(1) as f64) * 10.0).min(10.0);

    let score = breadth_score + depth_score;
    let mut actions = Vec::new();
    if topics.len() < 10 {
        actions.push("cover more distinct topics across the site's content".to_string());
    }
    if hub_pages == 0 {
        actions.push("build hub pages that link out to related spoke content".to_string());
    }

    component("topic_coverage", score, TOPIC_COVERAGE_MAX, actions)
}

fn consistency(pages: &[(PageAudit, PageModel)]) -> GeoComponent {
    if pages.is_empty() {
        return component("consistency", 0.0, CONSISTENCY_MAX, vec!["publish more than one page".to_string()]);
    }

    let brand = brand_token(&pages[0].0.url);
    let coverage_fraction = fraction(
        pages.iter().filter(|(_, page)| {
            mentions_brand(page.title.as_deref().unwrap_or_default(), &brand) || page.author.found
        }),
        pages.len(),
    );
    let coverage_score = coverage_fraction * 10.0;

    let scores: Vec<f64> = pages.iter().map(|(audit, _)| audit.overall_score).collect();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64;
    let std_dev = variance.sqrt();
    // Low dispersion across pages reads as a consistent brand voice.
    let outlier_score = (1.0 - (std_dev / 40.0).min(1.0)) * 10.0;

    let score = coverage_score + outlier_score;
    let mut actions = Vec::new();
    if coverage_fraction < 0.5 {
        actions.push("carry consistent branding and authorship across more pages".to_string());
    }
    if std_dev > 25.0 {
        actions.push("bring outlier low-scoring pages up to the site's baseline quality".to_string());
    }

    component("consistency", score, CONSISTENCY_MAX, actions)
}

fn ai_recall(brand: &str, pages: &[(PageAudit, PageModel)]) -> GeoComponent {
    let comparative_fraction = fraction(
        pages.iter().filter(|(_, page)| {
            !page.tables.is_empty() || page.lists.iter().any(|l| l.items.len() >= 3)
        }),
        pages.len(),
    );
    let comparative_score = comparative_fraction * 9.0;

    let mut naming_variants = std::collections::BTreeSet::new();
    for (_, page) in pages {
        if let Some(title) = &page.title {
            for word in title.split_whitespace() {
                if word.to_lowercase().contains(brand) {
                    naming_variants.insert(word.to_string());
                }
            }
        }
    }
    let naming_score = (naming_variants.len() as f64 / 3.0 * 6.0).min(6.0);

    let score = comparative_score + naming_score;
    let mut actions = Vec::new();
    if comparative_fraction < 0.5 {
        actions.push("add comparison tables or structured lists an LLM can lift verbatim".to_string());
    }
    if naming_variants.len() < 2 {
        actions.push("use the brand name consistently, including in title tags".to_string());
    }

    component("ai_recall", score, AI_RECALL_MAX, actions)
}

fn trust(pages: &[(PageAudit, PageModel)]) -> GeoComponent {
    if pages.is_empty() {
        return component("trust", 0.0, TRUST_MAX, vec!["publish more than one page".to_string()]);
    }

    let https_fraction = fraction(pages.iter().filter(|(_, page)| page.is_https), pages.len());
    let authorship_fraction = fraction(pages.iter().filter(|(_, page)| page.author.found), pages.len());
    let date_fraction = fraction(pages.iter().filter(|(_, page)| page.dates.published.is_some()), pages.len());

    let score = https_fraction * 4.0 + authorship_fraction * 3.0 + date_fraction * 3.0;

    let mut actions = Vec::new();
    if https_fraction < 1.0 {
        actions.push("serve every page over HTTPS".to_string());
    }
    if authorship_fraction < 0.5 {
        actions.push("attribute content to a named author consistently".to_string());
    }
    if date_fraction < 0.5 {
        actions.push("publish dates on more content pages".to_string());
    }

    component("trust", score, TRUST_MAX, actions)
}

fn fraction<T>(iter: impl Iterator<Item = T>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    iter.count() as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::ContentClassification;
    use chrono::Utc;

    fn page_pair(url: &str, overall: f64) -> (PageAudit, PageModel) {
        let audit = PageAudit {
            url: url.to_string(),
            overall_score: overall,
            grade: aeo_types::Grade::from_score(overall),
            content_classification: ContentClassification::default(),
            breakdown: Default::default(),
            fetched_at: Utc::now(),
        };
        (audit, PageModel::empty(url))
    }

    #[test]
    fn overall_never_exceeds_component_maxes_summed() {
        let pages = vec![page_pair("https://example.com/", 80.0), page_pair("https://example.com/about", 70.0)];
        let result = score("example.com", &pages);
        let max_total = BRAND_FOUNDATION_MAX + TOPIC_COVERAGE_MAX + CONSISTENCY_MAX + AI_RECALL_MAX + TRUST_MAX;
        assert!(result.overall <= max_total + 1e-9);
        assert_eq!(result.components.len(), 5);
    }

    #[test]
    fn empty_domain_yields_low_score_with_recommendations() {
        let result = score("example.com", &[]);
        assert!(result.overall < 20.0);
        assert!(result.components.iter().any(|c| !c.recommended_actions.is_empty()));
    }

    #[test]
    fn about_page_and_https_raise_brand_foundation_and_trust() {
        let mut pages = vec![page_pair("https://example.com/about", 80.0)];
        pages[0].1.title = Some("About Example".to_string());
        pages[0].1.is_https = true;
        let result = score("example.com", &pages);
        let foundation = result.components.iter().find(|c| c.name == "brand_foundation").unwrap();
        assert!(foundation.score >= 12.0);
    }
}
