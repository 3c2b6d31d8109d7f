//! Technical scorer: load performance, mobile
//! readiness, semantic HTML usage, internal linking, meta-description length.

use aeo_types::{CategoryScore, PageModel};

pub fn score(page: &PageModel) -> CategoryScore {
    let mut score = CategoryScore::new(10.0);

    score.add("performance", performance(page));
    score.add("mobile", mobile(page));
    score.add("semantic_html", semantic_html(page));
    score.add("internal_linking", internal_linking(page));
    score.add("meta_description_length", meta_description_length(page));

    score.clamp()
}

fn performance(page: &PageModel) -> f64 {
    let Some(lcp_ms) = page.performance.lcp_ms else {
        return 0.0;
    };
    let lcp_secs = lcp_ms as f64 / 1000.0;
    if lcp_secs <= 2.5 {
        3.0
    } else if lcp_secs <= 4.0 {
        2.0
    } else if lcp_secs <= 6.0 {
        1.0
    } else {
        0.0
    }
}

fn mobile(page: &PageModel) -> f64 {
    let mut value = 0.0;
    if page.meta.viewport.as_deref().is_some_and(|v| v.contains("width=device-width")) {
        value += 1.0;
    }
    if page.responsive_css_detected {
        value += 1.0;
    }
    value
}

fn semantic_html(page: &PageModel) -> f64 {
    let mut value = 0.0;
    if page.semantic_tag_count >= 2 {
        value += 1.0;
    }
    if has_valid_heading_hierarchy(page) {
        value += 1.0;
    }
    value
}

fn has_valid_heading_hierarchy(page: &PageModel) -> bool {
    if page.h1_count() != 1 {
        return false;
    }
    let mut last_level: Option<u8> = None;
    for heading in &page.headings {
        if let Some(prev) = last_level {
            if heading.level > prev + 1 {
                return false;
            }
        }
        last_level = Some(heading.level);
    }
    true
}

fn internal_linking(page: &PageModel) -> f64 {
    (page.internal_links_count as f64 * 0.2).min(2.0)
}

fn meta_description_length(page: &PageModel) -> f64 {
    let len = page.meta.description.as_deref().map(str::len).unwrap_or(0);
    if (50..=160).contains(&len) {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::Heading;

    fn base_page() -> PageModel {
        PageModel::empty("https://example.com/")
    }

    #[test]
    fn fast_lcp_awards_full_performance_points() {
        let mut page = base_page();
        page.performance.lcp_ms = Some(1800);
        assert_eq!(score(&page).sub_scores["performance"], 3.0);
    }

    #[test]
    fn single_h1_and_no_level_jumps_is_valid_hierarchy() {
        let mut page = base_page();
        page.headings.push(Heading { level: 1, text: "T".into(), id: None });
        page.headings.push(Heading { level: 2, text: "A".into(), id: None });
        page.headings.push(Heading { level: 3, text: "B".into(), id: None });
        assert!(has_valid_heading_hierarchy(&page));
    }

    #[test]
    fn level_jump_invalidates_hierarchy() {
        let mut page = base_page();
        page.headings.push(Heading { level: 1, text: "T".into(), id: None });
        page.headings.push(Heading { level: 4, text: "A".into(), id: None });
        assert!(!has_valid_heading_hierarchy(&page));
    }

    #[test]
    fn meta_description_in_range_awards_point() {
        let mut page = base_page();
        page.meta.description = Some("x".repeat(100));
        assert_eq!(score(&page).sub_scores["meta_description_length"], 1.0);
    }
}
