//! Orchestrates the six extractors plus the classifier into a single
//! `PageModel`, given a cleaned, main-content-isolated page.

use crate::{classifier, media, metadata, performance, schema, semantic, structural};
use aeo_html::ParsedPage;
use aeo_types::{FetchResult, PageModel};
use aeo_utils::{is_same_registrable_domain, word_count};
use scraper::{Html, Selector};
use url::Url;

/// Run the full extraction + classification pipeline over a fetch result,
/// producing a `PageModel` and its advisory content classification.
///
/// Extraction never fails outright: a fetch error or empty body yields a
/// near-empty `PageModel`, so this function
/// has no `Result` in its signature.
pub fn extract_page(fetched: &FetchResult) -> (PageModel, aeo_types::ContentClassification) {
    if !fetched.is_success() {
        let model = PageModel::empty(&fetched.url);
        let classification = aeo_types::ContentClassification::default();
        return (model, classification);
    }

    let parsed: ParsedPage = aeo_html::parse_page(&fetched.html);

    let headings = structural::extract_headings(&parsed.main_content_html);
    let paragraphs = structural::extract_paragraphs(&parsed.main_content_html);
    let lists = structural::extract_lists(&parsed.main_content_html);
    let tables = structural::extract_tables(&parsed.main_content_html);
    let images = media::extract_images(&parsed.main_content_html);

    let questions = semantic::extract_questions(&parsed.main_content_html);
    let answer_patterns = semantic::extract_answer_patterns(&parsed.main_content_html);
    let main_keywords = semantic::extract_main_keywords(&parsed.main_content_text);

    let jsonld = schema::extract_jsonld(&parsed.cleaned_html);
    let faq_schema = schema::extract_faq_schema(&jsonld);
    let (microdata_present, rdfa_present) = detect_microdata_rdfa(&parsed.cleaned_html);

    let title = metadata::extract_title(&parsed.cleaned_html);
    let meta = metadata::extract_page_meta(&parsed.cleaned_html, &jsonld);
    let author = metadata::extract_author(&parsed.cleaned_html, &jsonld);
    let dates = metadata::extract_dates(&parsed.cleaned_html, &jsonld);

    let (external_links, internal_links_count) = extract_links(&fetched.url, &parsed.cleaned_html);

    let performance = performance::extract_performance(&fetched.performance);
    let word_count = word_count(&parsed.main_content_text);
    let semantic_tag_count = count_semantic_tags(&parsed.cleaned_html);
    let responsive_css_detected = detect_responsive_css(&parsed.cleaned_html, &meta);

    let classification = classifier::classify(&fetched.url, &meta, &jsonld, &parsed.main_content_text);

    let model = PageModel {
        url: fetched.url.clone(),
        title,
        meta,
        headings,
        paragraphs,
        lists,
        tables,
        images,
        questions,
        answer_patterns,
        main_keywords,
        jsonld,
        microdata_present,
        rdfa_present,
        faq_schema,
        author,
        dates,
        external_links,
        internal_links_count,
        word_count,
        is_https: fetched.url.starts_with("https://"),
        performance,
        semantic_tag_count,
        responsive_css_detected,
    };

    (model, classification)
}

const SEMANTIC_LANDMARK_TAGS: &[&str] = &["article", "section", "header", "footer"];

fn count_semantic_tags(document_html: &str) -> usize {
    let document = Html::parse_document(document_html);
    SEMANTIC_LANDMARK_TAGS
        .iter()
        .filter(|tag| {
            let selector = Selector::parse(tag).expect("static selector");
            document.select(&selector).next().is_some()
        })
        .count()
}

fn detect_responsive_css(document_html: &str, meta: &aeo_types::PageMeta) -> bool {
    if meta.viewport.as_deref().is_some_and(|v| v.contains("width=device-width")) {
        return true;
    }
    let document = Html::parse_document(document_html);
    let style_selector = Selector::parse("style").expect("static selector");
    document.select(&style_selector).any(|el| el.text().collect::<String>().contains("@media"))
}

fn detect_microdata_rdfa(document_html: &str) -> (bool, bool) {
    let document = Html::parse_document(document_html);
    let microdata_selector = Selector::parse("[itemscope],[itemtype]").expect("static selector");
    let rdfa_selector = Selector::parse("[typeof],[property][resource],[vocab]").expect("static selector");

    let microdata_present = document.select(&microdata_selector).next().is_some();
    let rdfa_present = document.select(&rdfa_selector).next().is_some();
    (microdata_present, rdfa_present)
}

fn extract_links(page_url: &str, document_html: &str) -> (Vec<String>, usize) {
    let document = Html::parse_document(document_html);
    let selector = Selector::parse("a[href]").expect("static selector");
    let page_host = Url::parse(page_url).ok().and_then(|u| u.host_str().map(str::to_string));

    let mut external = Vec::new();
    let mut internal_count = 0usize;

    for el in document.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = Url::parse(page_url).and_then(|base| base.join(href)) else {
            continue;
        };
        let Some(link_host) = resolved.host_str() else {
            continue;
        };

        match &page_host {
            Some(host) if is_same_registrable_domain(host, link_host) => internal_count += 1,
            Some(_) => external.push(resolved.to_string()),
            None => {}
        }
    }

    (external, internal_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::FetchMethod;

    fn fetched(url: &str, html: &str) -> FetchResult {
        FetchResult {
            url: url.to_string(),
            status_code: Some(200),
            html: html.to_string(),
            fetched_at: chrono::Utc::now(),
            performance: Default::default(),
            fetch_method: FetchMethod::Http,
            error: None,
        }
    }

    #[test]
    fn failed_fetch_yields_near_empty_model() {
        let mut result = fetched("https://example.com/", "");
        result.error = Some("boom".to_string());
        let (model, classification) = extract_page(&result);
        assert!(model.headings.is_empty());
        assert_eq!(classification.content_type, aeo_types::ContentType::Informational);
    }

    #[test]
    fn extracts_full_page_model() {
        let html = r#"<html><head><title>My Page</title>
            <meta name="description" content="A great description of the page.">
        </head><body><main>
            <h1>Welcome</h1>
            <p>This is the main content paragraph with enough words.</p>
            <a href="https://example.com/about">About</a>
            <a href="https://other.com/">Other site</a>
        </main></body></html>"#;
        let result = fetched("https://example.com/", html);
        let (model, _classification) = extract_page(&result);

        assert_eq!(model.title.as_deref(), Some("My Page"));
        assert_eq!(model.headings.len(), 1);
        assert_eq!(model.internal_links_count, 1);
        assert_eq!(model.external_links.len(), 1);
        assert!(model.is_https);
    }
}
