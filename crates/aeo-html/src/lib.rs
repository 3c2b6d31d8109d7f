//! HTML cleaning and main-content isolation, the shared
//! preprocessing stage all six extractors in aeo-extraction build on.

pub mod clean;
pub mod main_content;
pub mod normalize;

pub use clean::clean_html;
pub use main_content::select_main_content;
pub use normalize::{collapse_whitespace, element_text};

/// Run the full cleanup pipeline: clean, then select the main container.
/// Returns the cleaned full-document HTML (for extractors that need
/// document-wide context, e.g. JSON-LD which can live outside `<main>`)
/// alongside the isolated main-content HTML and its plain text.
pub struct ParsedPage {
    pub cleaned_html: String,
    pub main_content_html: String,
    pub main_content_text: String,
}

pub fn parse_page(raw_html: &str) -> ParsedPage {
    let cleaned_html = clean_html(raw_html);
    let (main_content_html, main_content_text) = select_main_content(&cleaned_html);
    ParsedPage {
        cleaned_html,
        main_content_html,
        main_content_text,
    }
}
