//! Performance extractor: pass through whatever
//! the fetch leg already measured. Rendered fetches carry TTFB/FCP/LCP/
//! page-load from the browser's performance API; HTTP fetches only have
//! TTFB, so the remaining fields stay `None` rather than being guessed.

use aeo_types::PerformanceMetrics;

pub fn extract_performance(fetched: &PerformanceMetrics) -> PerformanceMetrics {
    fetched.clone()
}
