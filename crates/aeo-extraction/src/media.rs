//! Media extractor: images with meaningful dimensions,
//! alt-text presence, and a decorative-image heuristic.

use aeo_types::ImageBlock;
use scraper::{Html, Selector};

const MIN_DIMENSION: u32 = 50;
const DECORATIVE_ALT_VALUES: &[&str] = &["image", "photo", "picture"];

fn parse_dimension(el: &scraper::ElementRef, attr: &str) -> Option<u32> {
    el.value().attr(attr).and_then(|v| v.trim_end_matches("px").parse().ok())
}

pub fn extract_images(main_content_html: &str) -> Vec<ImageBlock> {
    let document = Html::parse_fragment(main_content_html);
    let selector = Selector::parse("img").expect("static selector");

    document
        .select(&selector)
        .filter_map(|el| {
            let src = el.value().attr("src")?.to_string();
            let width = parse_dimension(&el, "width");
            let height = parse_dimension(&el, "height");

            if let (Some(w), Some(h)) = (width, height) {
                if w < MIN_DIMENSION && h < MIN_DIMENSION {
                    return None;
                }
            }

            let alt = el.value().attr("alt").map(str::to_string);
            let decorative = match alt.as_deref().map(str::trim) {
                None | Some("") => true,
                Some(a) => DECORATIVE_ALT_VALUES.contains(&a.to_lowercase().as_str()),
            };

            Some(ImageBlock {
                src,
                alt,
                width,
                height,
                decorative,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_tracking_pixels_below_minimum_dimension() {
        let html = r#"<img src="pixel.gif" width="1" height="1"><img src="hero.jpg" width="800" height="400">"#;
        let images = extract_images(html);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "hero.jpg");
    }

    #[test]
    fn decorative_when_alt_is_generic_or_empty() {
        let html = r#"<img src="a.jpg" alt=""><img src="b.jpg" alt="photo"><img src="c.jpg" alt="A sunset over the bay">"#;
        let images = extract_images(html);
        assert!(images[0].decorative);
        assert!(images[1].decorative);
        assert!(!images[2].decorative);
        assert!(images[2].has_alt());
    }
}
