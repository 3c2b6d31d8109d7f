//! Structural extractor: heading hierarchy,
//! paragraphs, lists, tables read straight off the cleaned main-content DOM.

use aeo_html::element_text;
use aeo_types::{Heading, ListBlock, Paragraph, TableBlock};
use scraper::{Html, Selector};

const MIN_PARAGRAPH_LEN: usize = 20;
const MIN_LIST_ITEMS: usize = 2;
const MIN_TABLE_ROWS: usize = 2;

pub fn extract_headings(main_content_html: &str) -> Vec<Heading> {
    let document = Html::parse_fragment(main_content_html);
    let selector = Selector::parse("h1,h2,h3,h4,h5,h6").expect("static selector");

    document
        .select(&selector)
        .map(|el| {
            let level: u8 = el.value().name()[1..].parse().unwrap_or(1);
            Heading {
                level,
                text: element_text(&el),
                id: el.value().id().map(str::to_string),
            }
        })
        .collect()
}

pub fn extract_paragraphs(main_content_html: &str) -> Vec<Paragraph> {
    let document = Html::parse_fragment(main_content_html);
    let selector = Selector::parse("p").expect("static selector");

    document
        .select(&selector)
        .filter_map(|el| {
            let text = element_text(&el);
            if text.len() < MIN_PARAGRAPH_LEN {
                return None;
            }
            let has_emphasis = Selector::parse("strong,em,b,i")
                .ok()
                .map(|s| el.select(&s).next().is_some())
                .unwrap_or(false);
            Some(Paragraph {
                word_count: text.split_whitespace().count(),
                text,
                has_emphasis,
            })
        })
        .collect()
}

pub fn extract_lists(main_content_html: &str) -> Vec<ListBlock> {
    let document = Html::parse_fragment(main_content_html);
    let list_selector = Selector::parse("ul,ol").expect("static selector");
    let item_selector = Selector::parse(":scope > li").expect("static selector");
    let heading_selector = Selector::parse("h1,h2,h3,h4,h5,h6").expect("static selector");

    document
        .select(&list_selector)
        .filter_map(|el| {
            let items: Vec<String> = el.select(&item_selector).map(|li| element_text(&li)).collect();
            if items.len() < MIN_LIST_ITEMS {
                return None;
            }
            let parent_heading = nearest_preceding_heading(&document, &el, &heading_selector);
            Some(ListBlock {
                ordered: el.value().name() == "ol",
                items,
                parent_heading,
            })
        })
        .collect()
}

pub fn extract_tables(main_content_html: &str) -> Vec<TableBlock> {
    let document = Html::parse_fragment(main_content_html);
    let table_selector = Selector::parse("table").expect("static selector");
    let header_selector = Selector::parse("th").expect("static selector");
    let row_selector = Selector::parse("tr").expect("static selector");
    let cell_selector = Selector::parse("td").expect("static selector");
    let caption_selector = Selector::parse("caption").expect("static selector");

    document
        .select(&table_selector)
        .filter_map(|table| {
            let headers: Vec<String> = table.select(&header_selector).map(|h| element_text(&h)).collect();
            let rows: Vec<Vec<String>> = table
                .select(&row_selector)
                .filter_map(|tr| {
                    let cells: Vec<String> = tr.select(&cell_selector).map(|td| element_text(&td)).collect();
                    if cells.is_empty() {
                        None
                    } else {
                        Some(cells)
                    }
                })
                .collect();
            if rows.len() < MIN_TABLE_ROWS {
                return None;
            }
            let caption = table
                .select(&caption_selector)
                .next()
                .map(|c| element_text(&c));
            Some(TableBlock { headers, rows, caption })
        })
        .collect()
}

/// Best-effort "which heading introduces this list" lookup: scans document
/// order for the last heading encountered before the list element.
fn nearest_preceding_heading(
    document: &Html,
    list_el: &scraper::ElementRef,
    heading_selector: &Selector,
) -> Option<String> {
    let list_id = list_el.id();
    let mut last_heading: Option<String> = None;

    for node in document.tree.root().descendants() {
        if node.id() == list_id {
            return last_heading;
        }
        if let Some(el) = scraper::ElementRef::wrap(node) {
            if heading_selector.matches(&el) {
                last_heading = Some(element_text(&el));
            }
        }
    }
    last_heading
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_heading_hierarchy_in_order() {
        let html = "<h1>Title</h1><h2>Section</h2><h3>Sub</h3>";
        let headings = extract_headings(html);
        assert_eq!(headings.iter().map(|h| h.level).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn skips_paragraphs_under_twenty_chars() {
        let html = "<p>short</p><p>This paragraph is long enough to count.</p>";
        let paragraphs = extract_paragraphs(html);
        assert_eq!(paragraphs.len(), 1);
    }

    #[test]
    fn skips_lists_with_fewer_than_two_items() {
        let html = "<ul><li>only one</li></ul><ul><li>one</li><li>two</li></ul>";
        let lists = extract_lists(html);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].items.len(), 2);
    }

    #[test]
    fn skips_tables_with_fewer_than_two_rows() {
        let html = "<table><tr><td>a</td></tr></table><table><tr><td>a</td></tr><tr><td>b</td></tr></table>";
        let tables = extract_tables(html);
        assert_eq!(tables.len(), 1);
    }
}
