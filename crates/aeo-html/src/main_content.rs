//! Main-content container selection: `<main>`, then
//! `<article>`, then the largest content `<div>` by visible text length,
//! then `<body>` as the last resort.

use scraper::{Html, Selector};

/// Return the outer HTML of the chosen main container, and its visible
/// text content for downstream text-based extractors.
pub fn select_main_content(cleaned_html: &str) -> (String, String) {
    let document = Html::parse_document(cleaned_html);

    if let Some((html, text)) = try_selector(&document, "main") {
        return (html, text);
    }
    if let Some((html, text)) = try_selector(&document, "article") {
        return (html, text);
    }
    if let Some((html, text)) = largest_div(&document) {
        return (html, text);
    }
    if let Some((html, text)) = try_selector(&document, "body") {
        return (html, text);
    }

    (cleaned_html.to_string(), visible_text(&document))
}

fn try_selector(document: &Html, selector_str: &str) -> Option<(String, String)> {
    let selector = Selector::parse(selector_str).ok()?;
    let element = document.select(&selector).next()?;
    let text = element.text().collect::<Vec<_>>().join(" ");
    Some((element.html(), normalize_whitespace(&text)))
}

fn largest_div(document: &Html) -> Option<(String, String)> {
    let selector = Selector::parse("div").ok()?;
    document
        .select(&selector)
        .map(|el| {
            let text = el.text().collect::<Vec<_>>().join(" ");
            (el.html(), normalize_whitespace(&text))
        })
        .max_by_key(|(_, text)| text.len())
        .filter(|(_, text)| !text.is_empty())
}

fn visible_text(document: &Html) -> String {
    let root = document.root_element();
    normalize_whitespace(&root.text().collect::<Vec<_>>().join(" "))
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_main_over_article_and_div() {
        let html = "<html><body><div>filler padding padding padding</div><main><article>short</article></main></body></html>";
        let (chosen_html, _) = select_main_content(html);
        assert!(chosen_html.contains("<main>"));
    }

    #[test]
    fn falls_back_to_article_when_no_main() {
        let html = "<html><body><div>filler</div><article>The real article body</article></body></html>";
        let (chosen_html, _) = select_main_content(html);
        assert!(chosen_html.contains("The real article body"));
    }

    #[test]
    fn falls_back_to_largest_div_when_no_main_or_article() {
        let html = "<html><body><div>tiny</div><div>this div has much more visible text content than the other one</div></body></html>";
        let (_, text) = select_main_content(html);
        assert!(text.contains("much more visible text"));
    }

    #[test]
    fn falls_back_to_body_when_nothing_else_matches() {
        let html = "<html><body>Just some loose text, no containers.</body></html>";
        let (chosen_html, _) = select_main_content(html);
        assert!(chosen_html.contains("Just some loose text"));
    }
}
