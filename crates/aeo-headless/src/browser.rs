//! Rendered fetch contract: navigate with a 30s timeout, wait
//! for network-idle (approximated by `wait_for_navigation` plus a quiet
//! window), then wait an extra 2s for late-binding content before reading
//! the DOM back out as HTML.

use crate::pool::BrowserPool;
use aeo_fetch::Renderer;
use aeo_types::{FetchMethod, FetchResult, PerformanceMetrics};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{instrument, warn};

const NETWORK_QUIET_WAIT: Duration = Duration::from_millis(500);
const LATE_CONTENT_WAIT: Duration = Duration::from_secs(2);

pub struct HeadlessRenderer {
    pool: BrowserPool,
}

impl HeadlessRenderer {
    pub fn new(pool: BrowserPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Renderer for HeadlessRenderer {
    #[instrument(skip(self), fields(url = %url))]
    async fn render(&self, url: &str) -> FetchResult {
        let start = Instant::now();
        let checkout = match self.pool.checkout(url).await {
            Ok(c) => c,
            Err(e) => {
                return FetchResult::empty_with_error(url, FetchMethod::Rendered, e.to_string());
            }
        };

        let nav_result = tokio::time::timeout(checkout.timeout(), checkout.page().goto(url)).await;
        if let Err(_) = nav_result {
            return FetchResult::empty_with_error(
                url,
                FetchMethod::Rendered,
                "navigation timed out".to_string(),
            );
        }
        if let Ok(Err(e)) = nav_result {
            return FetchResult::empty_with_error(url, FetchMethod::Rendered, e.to_string());
        }

        if let Err(e) = tokio::time::timeout(NETWORK_QUIET_WAIT, checkout.page().wait_for_navigation()).await {
            warn!(url = %url, error = ?e, "network-idle wait timed out, proceeding anyway");
        }
        tokio::time::sleep(LATE_CONTENT_WAIT).await;

        let ttfb_ms = start.elapsed().as_millis() as u64;

        let html = match checkout.page().content().await {
            Ok(html) => html,
            Err(e) => {
                return FetchResult::empty_with_error(url, FetchMethod::Rendered, e.to_string());
            }
        };

        FetchResult {
            url: url.to_string(),
            status_code: Some(200),
            html,
            fetched_at: chrono::Utc::now(),
            performance: PerformanceMetrics {
                ttfb_ms: Some(ttfb_ms),
                page_load_ms: Some(start.elapsed().as_millis() as u64),
                ..Default::default()
            },
            fetch_method: FetchMethod::Rendered,
            error: None,
        }
    }
}
