//! Content Quality scorer: depth, structural
//! organization, value-adding content types, freshness, media diversity.

use aeo_types::{CategoryScore, PageModel};
use chrono::Utc;

pub fn score(page: &PageModel) -> CategoryScore {
    let mut score = CategoryScore::new(15.0);

    score.add("depth", depth(page));
    score.add("structure", structure(page));
    score.add("unique_value", unique_value(page));
    score.add("freshness", freshness(page));
    score.add("media_diversity", media_diversity(page));

    score.clamp()
}

fn depth(page: &PageModel) -> f64 {
    match page.word_count {
        n if n >= 1500 => 4.0,
        n if n >= 800 => 3.0,
        n if n >= 400 => 2.0,
        n if n > 0 => 1.0,
        _ => 0.0,
    }
}

fn structure(page: &PageModel) -> f64 {
    match page.h2_count() {
        n if n >= 8 => 3.0,
        n if n >= 5 => 2.0,
        n if n >= 2 => 1.0,
        _ => 0.0,
    }
}

fn unique_value(page: &PageModel) -> f64 {
    let mut value = 0.0;
    if !page.tables.is_empty() {
        value += 1.0;
    }
    if has_code_block(page) {
        value += 1.0;
    }
    let informational_images = page.images.iter().filter(|i| !i.decorative).count();
    if informational_images >= 3 {
        value += 1.0;
    }
    value.min(3.0)
}

fn has_code_block(page: &PageModel) -> bool {
    page.paragraphs.iter().any(|p| p.text.contains("```"))
}

fn freshness(page: &PageModel) -> f64 {
    let reference = page.dates.modified.or(page.dates.published);
    let Some(reference) = reference else {
        return 0.0;
    };
    let days = (Utc::now() - reference).num_days();
    if days <= 90 {
        3.0
    } else if days <= 180 {
        2.0
    } else if days <= 365 {
        1.0
    } else {
        0.0
    }
}

fn media_diversity(page: &PageModel) -> f64 {
    if !page.images.is_empty() && !page.tables.is_empty() {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::{Heading, ImageBlock, TableBlock};
    use chrono::Duration;

    fn base_page() -> PageModel {
        PageModel::empty("https://example.com/")
    }

    #[test]
    fn long_content_gets_full_depth_points() {
        let mut page = base_page();
        page.word_count = 2000;
        assert_eq!(score(&page).sub_scores["depth"], 4.0);
    }

    #[test]
    fn eight_h2_headings_gets_full_structure_points() {
        let mut page = base_page();
        for _ in 0..8 {
            page.headings.push(Heading { level: 2, text: "H".into(), id: None });
        }
        assert_eq!(score(&page).sub_scores["structure"], 3.0);
    }

    #[test]
    fn table_and_informational_images_contribute_unique_value() {
        let mut page = base_page();
        page.tables.push(TableBlock { headers: vec![], rows: vec![vec![]], caption: None });
        for _ in 0..3 {
            page.images.push(ImageBlock {
                src: "a.png".into(),
                alt: Some("chart".into()),
                width: None,
                height: None,
                decorative: false,
            });
        }
        assert_eq!(score(&page).sub_scores["unique_value"], 2.0);
    }

    #[test]
    fn recently_modified_page_gets_full_freshness() {
        let mut page = base_page();
        page.dates.modified = Some(Utc::now() - Duration::days(10));
        assert_eq!(score(&page).sub_scores["freshness"], 3.0);
    }
}
