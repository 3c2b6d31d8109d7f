//! Authority scorer: domain trust, author
//! attribution, freshness, citations and outbound references, publisher
//! organization markup.

use aeo_extraction::schema::required_field_completeness;
use aeo_types::{AuthoritativeHosts, CategoryScore, PageModel};
use chrono::Utc;
use once_cell::sync::Lazy;

static AUTHORITATIVE_HOSTS: Lazy<AuthoritativeHosts> = Lazy::new(AuthoritativeHosts::default);

pub fn score(page: &PageModel) -> CategoryScore {
    let mut score = CategoryScore::new(18.0);

    score.add("domain_trust", domain_trust(page));
    score.add("author_attribution", author_attribution(page));
    score.add("freshness", freshness(page));
    score.add("citations", citations(page));
    score.add("organization", organization(page));

    score.clamp()
}

fn domain_trust(page: &PageModel) -> f64 {
    if !page.is_https {
        return 0.0;
    }
    let host = url::Url::parse(&page.url).ok().and_then(|u| u.host_str().map(str::to_string));
    let authoritative = host.as_deref().map(|h| AUTHORITATIVE_HOSTS.is_authoritative(h)).unwrap_or(false);
    if authoritative {
        4.0
    } else {
        2.0
    }
}

fn author_attribution(page: &PageModel) -> f64 {
    if !page.author.found {
        return 0.0;
    }
    if page.author.is_structured() {
        4.0
    } else {
        2.0
    }
}

fn freshness(page: &PageModel) -> f64 {
    let mut value = 0.0;
    if let Some(published) = page.dates.published {
        let days = (Utc::now() - published).num_days();
        value += if days <= 365 {
            3.0
        } else if days <= 730 {
            2.0
        } else if days <= 1825 {
            1.0
        } else {
            0.0
        };
    }
    if page.dates.modified.is_some() {
        value += 1.0;
    }
    value.min(4.0)
}

fn citations(page: &PageModel) -> f64 {
    let external_link_points = 0.5 * page.external_links.len() as f64;
    let inline_citation_markers = page
        .paragraphs
        .iter()
        .filter(|p| p.text.contains('[') && p.text.contains(']'))
        .count() as f64;
    let has_references_section = page
        .headings
        .iter()
        .any(|h| {
            let t = h.text.to_lowercase();
            t.contains("references") || t.contains("sources") || t.contains("citations")
        });
    let references_bonus = if has_references_section { 1.0 } else { 0.0 };

    (external_link_points + inline_citation_markers + references_bonus).min(5.0)
}

fn organization(page: &PageModel) -> f64 {
    let has_complete_org = page
        .jsonld
        .iter()
        .filter(|o| o.is_type("Organization"))
        .any(|o| required_field_completeness(o).map(|c| c >= 1.0).unwrap_or(false));
    if has_complete_org {
        3.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::{AuthorInfo, FieldSource, JsonLdObject};
    use chrono::Duration;
    use serde_json::json;

    fn base_page() -> PageModel {
        PageModel::empty("https://example.gov/")
    }

    #[test]
    fn https_plus_authoritative_tld_gets_full_domain_trust() {
        let page = base_page();
        let result = score(&page);
        assert_eq!(result.sub_scores["domain_trust"], 4.0);
    }

    #[test]
    fn non_authoritative_https_gets_partial_domain_trust() {
        let mut page = PageModel::empty("https://example.com/");
        page.is_https = true;
        let result = score(&page);
        assert_eq!(result.sub_scores["domain_trust"], 2.0);
    }

    #[test]
    fn structured_author_scores_higher_than_byline_only() {
        let mut structured = base_page();
        structured.author = AuthorInfo {
            found: true,
            name: Some("Jo".into()),
            url: None,
            bio: None,
            sources: vec![FieldSource::JsonLd],
        };
        let mut byline = base_page();
        byline.author = AuthorInfo {
            found: true,
            name: Some("Jo".into()),
            url: None,
            bio: None,
            sources: vec![FieldSource::BylineText],
        };
        assert!(score(&structured).sub_scores["author_attribution"] > score(&byline).sub_scores["author_attribution"]);
    }

    #[test]
    fn recent_publish_date_scores_higher_freshness() {
        let mut page = base_page();
        page.dates.published = Some(Utc::now() - Duration::days(30));
        let result = score(&page);
        assert_eq!(result.sub_scores["freshness"], 3.0);
    }

    #[test]
    fn complete_organization_schema_awards_points() {
        let mut page = base_page();
        page.jsonld.push(JsonLdObject {
            schema_type: vec!["Organization".to_string()],
            value: json!({"@type": "Organization", "name": "Acme"}),
        });
        let result = score(&page);
        assert_eq!(result.sub_scores["organization"], 3.0);
    }
}
