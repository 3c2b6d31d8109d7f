//! Whitespace normalization shared by extractors that read text out of
//! `scraper` element references.

/// Collapse runs of whitespace (including newlines/tabs) to single spaces
/// and trim the ends. `scraper`'s `.text()` iterator already decodes HTML
/// entities, so this only needs to handle layout whitespace.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join an element's text nodes the way the structural extractors expect:
/// whitespace-collapsed, with a single space between otherwise-adjacent
/// text nodes (so `<p>Hello<b>world</b></p>` reads "Hello world").
pub fn element_text(element: &scraper::ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_newlines_and_tabs() {
        assert_eq!(collapse_whitespace("a\n\tb   c"), "a b c");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(collapse_whitespace("   \n\t  "), "");
    }
}
