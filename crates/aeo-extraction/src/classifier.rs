//! Content Classifier: a priority-ordered signal cascade
//! stopping at the first confident match. Advisory input to scoring, not a
//! gate — a missed classification just falls back to `informational/low`.

use aeo_types::{Confidence, ContentClassification, ContentType, JsonLdObject, PageMeta};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static EXPERIENTIAL_PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/(experience|event|tour)").unwrap());
static INFORMATIONAL_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/(blog|guide|how-to|faq)").unwrap());
static TRANSACTIONAL_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/(product|shop|pricing)").unwrap());
static NAVIGATIONAL_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/(category|archive|tag)").unwrap());

const EXPERIENTIAL_WORDS: &[&str] = &["experience", "journey", "story"];
const INFORMATIONAL_WORDS: &[&str] = &["how to", "guide", "learn"];
const TRANSACTIONAL_WORDS: &[&str] = &["buy", "price", "specifications"];

fn schema_type_signal(schema_types: &[JsonLdObject]) -> Option<ContentType> {
    let mut votes: Vec<ContentType> = Vec::new();
    for obj in schema_types {
        for t in &obj.schema_type {
            let content_type = match t.to_lowercase().as_str() {
                "article" | "blogposting" => Some(ContentType::Informational),
                "event" | "place" | "touristattraction" => Some(ContentType::Experiential),
                "product" | "offer" => Some(ContentType::Transactional),
                "collectionpage" | "itemlist" => Some(ContentType::Navigational),
                _ => None,
            };
            if let Some(ct) = content_type {
                votes.push(ct);
            }
        }
    }
    votes.dedup();
    if votes.len() == 1 {
        Some(votes[0])
    } else {
        None
    }
}

fn url_path_signal(url: &str) -> Option<ContentType> {
    let path = Url::parse(url).ok().map(|u| u.path().to_string()).unwrap_or_default();
    if EXPERIENTIAL_PATH_RE.is_match(&path) {
        Some(ContentType::Experiential)
    } else if INFORMATIONAL_PATH_RE.is_match(&path) {
        Some(ContentType::Informational)
    } else if TRANSACTIONAL_PATH_RE.is_match(&path) {
        Some(ContentType::Transactional)
    } else if NAVIGATIONAL_PATH_RE.is_match(&path) {
        Some(ContentType::Navigational)
    } else {
        None
    }
}

fn content_heuristic_signal(main_content_text: &str) -> Option<ContentType> {
    let lower = main_content_text.to_lowercase();
    let count = |words: &[&str]| words.iter().filter(|w| lower.contains(*w)).count();

    let experiential = count(EXPERIENTIAL_WORDS);
    let informational = count(INFORMATIONAL_WORDS);
    let transactional = count(TRANSACTIONAL_WORDS);

    let max = experiential.max(informational).max(transactional);
    if max == 0 {
        return None;
    }
    if experiential == max {
        Some(ContentType::Experiential)
    } else if informational == max {
        Some(ContentType::Informational)
    } else {
        Some(ContentType::Transactional)
    }
}

pub fn classify(
    url: &str,
    page_meta: &PageMeta,
    jsonld: &[JsonLdObject],
    main_content_text: &str,
) -> ContentClassification {
    if let Some(explicit) = &page_meta.aeo_content_type {
        if let Some(content_type) = parse_explicit(explicit) {
            return ContentClassification {
                content_type,
                confidence: Confidence::High,
                signals_matched: vec!["meta:aeo:content-type".to_string()],
            };
        }
    }

    if let Some(content_type) = schema_type_signal(jsonld) {
        return ContentClassification {
            content_type,
            confidence: Confidence::High,
            signals_matched: vec!["schema_type".to_string()],
        };
    }

    if let Some(content_type) = url_path_signal(url) {
        return ContentClassification {
            content_type,
            confidence: Confidence::Medium,
            signals_matched: vec!["url_path".to_string()],
        };
    }

    if let Some(content_type) = content_heuristic_signal(main_content_text) {
        return ContentClassification {
            content_type,
            confidence: Confidence::Medium,
            signals_matched: vec!["content_heuristic".to_string()],
        };
    }

    ContentClassification::default()
}

fn parse_explicit(value: &str) -> Option<ContentType> {
    match value.to_lowercase().as_str() {
        "informational" => Some(ContentType::Informational),
        "experiential" => Some(ContentType::Experiential),
        "transactional" => Some(ContentType::Transactional),
        "navigational" => Some(ContentType::Navigational),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_meta_tag_wins_over_everything() {
        let mut meta = PageMeta::default();
        meta.aeo_content_type = Some("transactional".to_string());
        let result = classify("https://example.com/blog/post", &meta, &[], "how to guide learn");
        assert_eq!(result.content_type, ContentType::Transactional);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn url_path_used_when_no_explicit_or_schema_signal() {
        let meta = PageMeta::default();
        let result = classify("https://example.com/shop/widget", &meta, &[], "");
        assert_eq!(result.content_type, ContentType::Transactional);
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn falls_back_to_informational_low_with_no_signals() {
        let meta = PageMeta::default();
        let result = classify("https://example.com/", &meta, &[], "");
        assert_eq!(result.content_type, ContentType::Informational);
        assert_eq!(result.confidence, Confidence::Low);
    }
}
