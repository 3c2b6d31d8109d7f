use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a `FetchResult` was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMethod {
    Http,
    Rendered,
}

/// Page-load performance samples.
///
/// For HTTP-mode fetches only `ttfb_ms` is populated; the rendered leg fills
/// in the rest from the browser's performance API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub ttfb_ms: Option<u64>,
    pub dom_load_ms: Option<u64>,
    pub page_load_ms: Option<u64>,
    pub fcp_ms: Option<u64>,
    pub lcp_ms: Option<u64>,
}

/// Result of a single fetch attempt, produced by the Adaptive Fetcher and
/// consumed by the Parser.
///
/// Invariant: if `status_code` is `Some`, `html` is either well-formed bytes
/// or empty — never a partial/truncated read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    /// Final URL after redirects.
    pub url: String,
    pub status_code: Option<u16>,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
    pub performance: PerformanceMetrics,
    pub fetch_method: FetchMethod,
    pub error: Option<String>,
}

impl FetchResult {
    /// A failure-mode result: transport error exhausted retries, or render
    /// failed with no HTTP fallback available.
    pub fn empty_with_error(url: impl Into<String>, method: FetchMethod, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: None,
            html: String::new(),
            fetched_at: Utc::now(),
            performance: PerformanceMetrics::default(),
            fetch_method: method,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.html.is_empty()
    }
}
