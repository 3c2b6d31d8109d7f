//! Citationability scorer: how quotable/citable the
//! page's content is — fact density, structured data, transport security,
//! trust-hygiene signals.

use aeo_types::{CategoryScore, PageModel};
use once_cell::sync::Lazy;
use regex::Regex;

static STAT_SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(\.\d+)?\s*%|\$\d|\d{4}\b").unwrap());
static DEFINITION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bis (a|an|the)\b|\brefers to\b|\bmeans\b").unwrap());
static PAYWALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)subscribe to (continue|read)|paywall|sign up to read").unwrap());

pub fn score(page: &PageModel) -> CategoryScore {
    let mut score = CategoryScore::new(12.0);

    score.add("fact_density", fact_density(page));
    score.add("structured_data", structured_data_presence(page));
    score.add("security", security(page));
    score.add("trust_hygiene", trust_hygiene(page));

    score.clamp()
}

fn fact_density(page: &PageModel) -> f64 {
    let stats_sentences = page.paragraphs.iter().filter(|p| STAT_SENTENCE_RE.is_match(&p.text)).count() as f64;
    let definitions = page.paragraphs.iter().filter(|p| DEFINITION_RE.is_match(&p.text)).count() as f64;
    (stats_sentences * 0.2 + definitions * 0.3).min(4.0)
}

fn structured_data_presence(page: &PageModel) -> f64 {
    let table_points = page.tables.iter().filter(|t| t.row_count() >= 3).count() as f64 * 0.5;
    let list_points = page.lists.iter().filter(|l| l.items.len() >= 4).count() as f64 * 0.2;
    (table_points + list_points).min(3.0)
}

fn security(page: &PageModel) -> f64 {
    if page.is_https {
        2.0
    } else {
        0.0
    }
}

fn trust_hygiene(page: &PageModel) -> f64 {
    let mut value = 0.0;
    let has_paywall_markers = page.paragraphs.iter().any(|p| PAYWALL_RE.is_match(&p.text));
    if !has_paywall_markers {
        value += 1.0;
    }
    let has_byline_or_references = page.author.found
        || page
            .headings
            .iter()
            .any(|h| h.text.to_lowercase().contains("references") || h.text.to_lowercase().contains("sources"));
    if has_byline_or_references {
        value += 2.0;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::{AuthorInfo, Paragraph};

    fn base_page() -> PageModel {
        PageModel::empty("https://example.com/")
    }

    #[test]
    fn statistic_sentences_contribute_to_fact_density() {
        let mut page = base_page();
        page.paragraphs.push(Paragraph {
            text: "Sales grew 42% in 2023.".into(),
            word_count: 5,
            has_emphasis: false,
        });
        assert!(score(&page).sub_scores["fact_density"] > 0.0);
    }

    #[test]
    fn https_awards_full_security_points() {
        let mut page = base_page();
        page.is_https = true;
        assert_eq!(score(&page).sub_scores["security"], 2.0);
    }

    #[test]
    fn paywall_markers_remove_trust_hygiene_point() {
        let mut clean = base_page();
        clean.author = AuthorInfo { found: true, ..Default::default() };
        let mut paywalled = clean.clone();
        paywalled.paragraphs.push(Paragraph {
            text: "Subscribe to continue reading this article.".into(),
            word_count: 6,
            has_emphasis: false,
        });
        assert!(score(&clean).sub_scores["trust_hygiene"] > score(&paywalled).sub_scores["trust_hygiene"]);
    }
}
