//! Metadata extractor: title/canonical/description,
//! OpenGraph/Twitter cards, and the author/date signal cascades.

use aeo_html::element_text;
use aeo_types::{AuthorInfo, DateInfo, FieldSource, JsonLdObject, PageMeta};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeMap;

static BYLINE_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)author|byline").unwrap());
static BY_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^by\s+").unwrap());

pub fn extract_title(document_html: &str) -> Option<String> {
    let document = Html::parse_document(document_html);
    let selector = Selector::parse("title").ok()?;
    document.select(&selector).next().map(|el| element_text(&el))
}

fn meta_content(document: &Html, attr: &str, value: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[{attr}="{value}"]"#)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content").map(str::to_string))
}

pub fn extract_page_meta(document_html: &str, jsonld: &[JsonLdObject]) -> PageMeta {
    let document = Html::parse_document(document_html);

    let description = meta_content(&document, "name", "description");
    let canonical = Selector::parse(r#"link[rel="canonical"]"#)
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .and_then(|el| el.value().attr("href").map(str::to_string));
    let viewport = meta_content(&document, "name", "viewport");

    let mut og = BTreeMap::new();
    if let Ok(selector) = Selector::parse(r#"meta[property^="og:"]"#) {
        for el in document.select(&selector) {
            if let (Some(prop), Some(content)) = (el.value().attr("property"), el.value().attr("content")) {
                og.insert(prop.trim_start_matches("og:").to_string(), content.to_string());
            }
        }
    }

    let mut twitter = BTreeMap::new();
    if let Ok(selector) = Selector::parse(r#"meta[name^="twitter:"]"#) {
        for el in document.select(&selector) {
            if let (Some(name), Some(content)) = (el.value().attr("name"), el.value().attr("content")) {
                twitter.insert(name.trim_start_matches("twitter:").to_string(), content.to_string());
            }
        }
    }

    let aeo_content_type = meta_content(&document, "name", "aeo:content-type");

    let _ = jsonld;
    PageMeta {
        description,
        canonical,
        viewport,
        og,
        twitter,
        aeo_content_type,
    }
}

/// Author cascade: JSON-LD `author` → `<meta name=author>` → `rel=author`
/// or `.author`/`.byline` elements → "By X" prefix stripping.
pub fn extract_author(document_html: &str, jsonld: &[JsonLdObject]) -> AuthorInfo {
    for obj in jsonld {
        if let Some(author) = obj.get("author") {
            let name = author
                .get("name")
                .and_then(|v| v.as_str())
                .or_else(|| author.as_str())
                .map(str::to_string);
            if let Some(name) = name {
                return AuthorInfo {
                    found: true,
                    name: Some(name),
                    url: author.get("url").and_then(|v| v.as_str()).map(str::to_string),
                    bio: None,
                    sources: vec![FieldSource::JsonLd],
                };
            }
        }
    }

    let document = Html::parse_document(document_html);
    if let Some(name) = meta_content(&document, "name", "author") {
        return AuthorInfo {
            found: true,
            name: Some(name),
            url: None,
            bio: None,
            sources: vec![FieldSource::MetaTag],
        };
    }

    if let Ok(selector) = Selector::parse(r#"[rel="author"]"#) {
        if let Some(el) = document.select(&selector).next() {
            let name = element_text(&el);
            if !name.is_empty() {
                return AuthorInfo {
                    found: true,
                    name: Some(name),
                    url: el.value().attr("href").map(str::to_string),
                    bio: None,
                    sources: vec![FieldSource::RelAuthor],
                };
            }
        }
    }

    if let Ok(selector) = Selector::parse("[class]") {
        for el in document.select(&selector) {
            let classes: Vec<String> = el.value().classes().map(str::to_string).collect();
            if classes.iter().any(|c| BYLINE_CLASS_RE.is_match(c)) {
                let text = element_text(&el);
                if !text.is_empty() && text.len() < 200 {
                    let name = BY_PREFIX_RE.replace(&text, "").trim().to_string();
                    if !name.is_empty() {
                        return AuthorInfo {
                            found: true,
                            name: Some(name),
                            url: None,
                            bio: None,
                            sources: vec![FieldSource::BylineText],
                        };
                    }
                }
            }
        }
    }

    AuthorInfo::default()
}

fn parse_tolerant_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(DateTime::from_naive_utc_and_offset(
            naive.and_hms_opt(0, 0, 0)?,
            Utc,
        ));
    }
    None
}

/// Date cascade: JSON-LD `datePublished/dateModified` → `article:*_time`
/// meta → `<time datetime>`.
pub fn extract_dates(document_html: &str, jsonld: &[JsonLdObject]) -> DateInfo {
    let mut info = DateInfo::default();

    for obj in jsonld {
        if info.published.is_none() {
            if let Some(raw) = obj.string_field("datePublished") {
                if let Some(dt) = parse_tolerant_date(&raw) {
                    info.published = Some(dt);
                    info.sources.push(FieldSource::JsonLd);
                }
            }
        }
        if info.modified.is_none() {
            if let Some(raw) = obj.string_field("dateModified") {
                if let Some(dt) = parse_tolerant_date(&raw) {
                    info.modified = Some(dt);
                    info.sources.push(FieldSource::JsonLd);
                }
            }
        }
    }

    let document = Html::parse_document(document_html);
    if info.published.is_none() {
        if let Some(raw) = meta_content(&document, "property", "article:published_time") {
            if let Some(dt) = parse_tolerant_date(&raw) {
                info.published = Some(dt);
                info.sources.push(FieldSource::ArticleMeta);
            }
        }
    }
    if info.modified.is_none() {
        if let Some(raw) = meta_content(&document, "property", "article:modified_time") {
            if let Some(dt) = parse_tolerant_date(&raw) {
                info.modified = Some(dt);
                info.sources.push(FieldSource::ArticleMeta);
            }
        }
    }

    if info.published.is_none() {
        if let Ok(selector) = Selector::parse("time[datetime]") {
            if let Some(el) = document.select(&selector).next() {
                if let Some(raw) = el.value().attr("datetime") {
                    if let Some(dt) = parse_tolerant_date(raw) {
                        info.published = Some(dt);
                        info.sources.push(FieldSource::TimeElement);
                    }
                }
            }
        }
    }

    info
}
