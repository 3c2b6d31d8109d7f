//! The HTTP-result quality gate.
//!
//! Every input lies in a documented range and the passing threshold is
//! exactly 30, so this is deliberately a pure function
//! over `(status, body)` with no side effects, easy to unit test in
//! isolation from the network layer.

use once_cell::sync::Lazy;
use regex::Regex;

pub const PASS_THRESHOLD: i32 = 30;

static SPA_LOADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<div\s+id=["']root["']\s*>\s*</div>"#).unwrap());

static JS_SENTINEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)please enable javascript").unwrap());

static PARAGRAPH_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<p[\s>]").unwrap());
static H1_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h1[\s>]").unwrap());
static H2_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h2[\s>]").unwrap());
static LOADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)loading\s*…|loading\.\.\.").unwrap());

/// Count `<p ...>` occurrences as a crude paragraph-element tally (used for
/// both the "no p/h1/h2" penalty and the "10+ paragraphs" bonus).
fn paragraph_tag_count(body: &str) -> usize {
    PARAGRAPH_TAG_RE.find_iter(body).count()
}

fn has_any_of_p_h1_h2(body: &str) -> bool {
    PARAGRAPH_TAG_RE.is_match(body) || H1_TAG_RE.is_match(body) || H2_TAG_RE.is_match(body)
}

fn looks_like_bare_spa_loader(body: &str) -> bool {
    let has_root_div = SPA_LOADER_RE.is_match(body);
    let has_loading_text = LOADING_RE.is_match(body);
    let paragraphs = paragraph_tag_count(body);
    (has_root_div || has_loading_text) && paragraphs == 0
}

/// Quality score starting at 100, penalized/rewarded by content signals. Pass
/// iff `score >= PASS_THRESHOLD`.
pub fn quality_score(_status: Option<u16>, body: &str) -> i32 {
    let mut score: i32 = 100;

    if body.len() < 1000 {
        score -= 30;
    }
    if JS_SENTINEL_RE.is_match(body) {
        score -= 40;
    }
    if !has_any_of_p_h1_h2(body) {
        score -= 30;
    }
    if looks_like_bare_spa_loader(body) {
        score -= 20;
    }

    if body.len() > 10 * 1024 {
        score += 10;
    }
    if paragraph_tag_count(body) >= 10 {
        score += 10;
    }

    score
}

pub fn passes_quality_gate(status: Option<u16>, body: &str) -> bool {
    quality_score(status, body) >= PASS_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_fails_gate() {
        assert!(!passes_quality_gate(Some(200), ""));
    }

    #[test]
    fn rich_content_page_passes_gate() {
        let body = format!(
            "<html><body><h1>Title</h1>{}</body></html>",
            "<p>word word word word word word word word word word word word.</p>".repeat(12)
        );
        assert!(passes_quality_gate(Some(200), &body));
    }

    #[test]
    fn js_required_sentinel_fails_gate() {
        let body = "<html><body>Please enable JavaScript to view this site.</body></html>"
            .repeat(20);
        assert!(!passes_quality_gate(Some(200), &body));
    }

    #[test]
    fn bare_spa_loader_fails_gate() {
        let body = format!(
            "<html><body><div id=\"root\"></div>{}</body></html>",
            "x".repeat(1200)
        );
        assert!(!passes_quality_gate(Some(200), &body));
    }

    #[test]
    fn pass_threshold_is_exactly_thirty() {
        assert_eq!(PASS_THRESHOLD, 30);
    }
}
