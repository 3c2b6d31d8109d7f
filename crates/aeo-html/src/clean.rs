//! DOM cleanup: strip boilerplate elements before extraction. `scraper`'s tree has no node-removal API, so elements are
//! dropped by serializing each match's outer HTML and stripping that
//! substring from the source, then re-parsing — cheap and correct for the
//! non-overlapping top-level matches this step targets.

use scraper::{Html, Selector};

const STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "aside"];
const STRIP_CLASS_ID_SUBSTRINGS: &[&str] =
    &["ad", "advertisement", "sponsored", "cookie-banner", "popup"];

fn matches_strip_class_or_id(element: &scraper::ElementRef) -> bool {
    let value = element.value();
    let id = value.id().unwrap_or("").to_lowercase();
    let classes: Vec<String> = value.classes().map(|c| c.to_lowercase()).collect();

    STRIP_CLASS_ID_SUBSTRINGS
        .iter()
        .any(|needle| id.contains(needle) || classes.iter().any(|c| c.contains(needle)))
}

/// Remove boilerplate tags and ad/cookie/popup-class elements, returning a
/// cleaned HTML string safe to re-parse for extraction.
pub fn clean_html(raw_html: &str) -> String {
    let mut cleaned = raw_html.to_string();

    let strip_tag_selector = Selector::parse(&STRIP_TAGS.join(",")).expect("static selector is valid");
    loop {
        let document = Html::parse_document(&cleaned);
        let hit = document.select(&strip_tag_selector).next().map(|el| el.html());
        match hit {
            Some(element_html) => cleaned = cleaned.replacen(&element_html, "", 1),
            None => break,
        }
    }

    let all_selector = Selector::parse("[class],[id]").expect("static selector is valid");
    loop {
        let document = Html::parse_document(&cleaned);
        let hit = document
            .select(&all_selector)
            .find(matches_strip_class_or_id)
            .map(|el| el.html());
        match hit {
            Some(element_html) => cleaned = cleaned.replacen(&element_html, "", 1),
            None => break,
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_nav_content() {
        let html = "<html><body><nav>Home About</nav><script>evil()</script><p>Real content here</p></body></html>";
        let cleaned = clean_html(html);
        assert!(!cleaned.contains("evil()"));
        assert!(!cleaned.contains("Home About"));
        assert!(cleaned.contains("Real content here"));
    }

    #[test]
    fn strips_elements_with_ad_class() {
        let html = r#"<html><body><div class="sponsored-banner">Buy now</div><p>Article body text</p></body></html>"#;
        let cleaned = clean_html(html);
        assert!(!cleaned.contains("Buy now"));
        assert!(cleaned.contains("Article body text"));
    }

    #[test]
    fn preserves_main_content_structure() {
        let html = "<html><body><header>Top</header><main><h1>Title</h1><p>Body text here</p></main><footer>Bottom</footer></body></html>";
        let cleaned = clean_html(html);
        assert!(cleaned.contains("<h1>Title</h1>"));
        assert!(cleaned.contains("<p>Body text here</p>"));
        assert!(!cleaned.contains("Top"));
        assert!(!cleaned.contains("Bottom"));
    }
}
