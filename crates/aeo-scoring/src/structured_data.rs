//! Structured Data scorer: JSON-LD/microdata/RDFa
//! presence, schema quality and completeness, FAQ/breadcrumb richness,
//! OpenGraph/Twitter social metadata.

use aeo_extraction::schema::required_field_completeness;
use aeo_types::{CategoryScore, PageModel};

const CORE_TYPES: &[&str] = &["article", "webpage", "organization"];
const RICH_TYPES: &[&str] = &["faqpage", "howto", "breadcrumblist"];

pub fn score(page: &PageModel) -> CategoryScore {
    let mut score = CategoryScore::new(15.0);

    let basic = basic_presence(page);
    let quality = schema_quality(page);
    let advanced = advanced(page);
    let social = social_metadata(page);

    if basic == 0.0 && quality == 0.0 && advanced == 0.0 && social == 0.0 {
        if let Some(pity) = fallback_pity_points(page) {
            score.add("basic_presence", pity);
            return score.clamp();
        }
    }

    score.add("basic_presence", basic);
    score.add("schema_quality", quality);
    score.add("advanced", advanced);
    score.add("social_metadata", social);

    score.clamp()
}

fn basic_presence(page: &PageModel) -> f64 {
    let mut value = 0.0;
    if !page.jsonld.is_empty() {
        value += 3.0;
    }
    if !page.meta.og.is_empty() {
        value += 2.0;
    }
    if page.microdata_present || page.rdfa_present {
        value += 2.0;
    }
    value.min(5.0)
}

fn schema_quality(page: &PageModel) -> f64 {
    let mut value = 0.0;

    let has_core = page
        .jsonld
        .iter()
        .any(|o| o.schema_type.iter().any(|t| CORE_TYPES.contains(&t.to_lowercase().as_str())));
    if has_core {
        value += 3.0;
    }

    let has_rich = page
        .jsonld
        .iter()
        .any(|o| o.schema_type.iter().any(|t| RICH_TYPES.contains(&t.to_lowercase().as_str())));
    if has_rich {
        value += 2.0;
    }

    let completeness_scores: Vec<f64> = page.jsonld.iter().filter_map(required_field_completeness).collect();
    if !completeness_scores.is_empty() {
        let passing = completeness_scores.iter().filter(|c| **c >= 0.7).count();
        if passing as f64 / completeness_scores.len() as f64 >= 0.7 {
            value += 2.0;
        }
    }

    value.min(5.0)
}

fn advanced(page: &PageModel) -> f64 {
    let mut value = 0.0;
    if page.faq_schema.valid_count >= 3 {
        value += 2.0;
    }
    let has_breadcrumb = page
        .jsonld
        .iter()
        .any(|o| o.is_type("BreadcrumbList"));
    if has_breadcrumb {
        value += 1.0;
    }
    value
}

fn social_metadata(page: &PageModel) -> f64 {
    let mut value = 0.0;
    let og = &page.meta.og;
    if og.contains_key("title") && og.contains_key("description") && og.contains_key("image") {
        value += 1.0;
    }
    if !page.meta.twitter.is_empty() {
        value += 1.0;
    }
    value
}

/// Fallback "basic presence" pity points for pages with real editorial
/// content but no structured data at all.
fn fallback_pity_points(page: &PageModel) -> Option<f64> {
    let title_ok = page.title.as_deref().map(|t| t.len() > 10).unwrap_or(false);
    let description_ok = page.meta.description.as_deref().map(|d| d.len() > 30).unwrap_or(false);
    let headings_ok = page.headings.len() >= 5;

    if title_ok && description_ok && headings_ok {
        Some(3.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::{Heading, JsonLdObject};
    use serde_json::json;

    fn base_page() -> PageModel {
        PageModel::empty("https://example.com/")
    }

    #[test]
    fn jsonld_and_og_contribute_to_basic_presence() {
        let mut page = base_page();
        page.jsonld.push(JsonLdObject {
            schema_type: vec!["Article".to_string()],
            value: json!({"@type": "Article"}),
        });
        page.meta.og.insert("title".to_string(), "Hi".to_string());
        let result = score(&page);
        assert_eq!(result.sub_scores["basic_presence"], 5.0);
    }

    #[test]
    fn fallback_pity_points_apply_only_when_all_conditions_met() {
        let mut page = base_page();
        page.title = Some("A reasonably long title here".to_string());
        page.meta.description = Some("A description that is definitely over thirty characters long.".to_string());
        for _ in 0..5 {
            page.headings.push(Heading { level: 2, text: "H".into(), id: None });
        }
        let result = score(&page);
        assert_eq!(result.sub_scores["basic_presence"], 3.0);
    }

    #[test]
    fn no_pity_points_without_any_editorial_signal() {
        let page = base_page();
        let result = score(&page);
        assert_eq!(result.raw, 0.0);
    }
}
