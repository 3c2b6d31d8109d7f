//! The single-page pipeline, wired up as the unit
//! of work the domain orchestrator repeats over every discovered URL.

use aeo_extraction::extract_page;
use aeo_fetch::AdaptiveFetcher;
use aeo_scoring::{calculate, CitationProbe};
use aeo_types::{PageAudit, PageModel};

/// Fetch, parse, extract, classify and score one URL.
///
/// Returns the `PageModel` alongside the `PageAudit` because the GEO scorer
/// needs to re-scan already-extracted models without issuing
/// any new fetches.
pub async fn audit_url(fetcher: &AdaptiveFetcher, url: &str, probes: &[Box<dyn CitationProbe>]) -> (PageAudit, PageModel) {
    let fetched = fetcher.fetch(url).await;
    let (page, classification) = extract_page(&fetched);
    let audit = calculate(&page, &classification, probes).await;
    (audit, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::FetchConfig;

    #[tokio::test]
    async fn unreachable_host_still_produces_an_audit() {
        let fetcher = AdaptiveFetcher::new(FetchConfig::default(), None).unwrap();
        let (audit, page) = audit_url(&fetcher, "http://127.0.0.1:1/", &[]).await;
        assert_eq!(audit.url, "http://127.0.0.1:1/");
        assert_eq!(page.word_count, 0);
        assert!(audit.overall_score >= 0.0);
    }
}
