//! Combines sitemap-first discovery with crawl fallback into the single
//! ordered URL set the domain orchestrator audits.

use crate::crawl::CrawlDiscovery;
use crate::sitemap::SitemapDiscovery;
use reqwest::Client;
use std::time::Duration;
use tracing::info;
use url::Url;

/// How a domain's URL set was produced, surfaced in progress/job state for
/// operator visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMethod {
    Sitemap,
    Crawl,
}

pub struct DiscoveryResult {
    pub method: DiscoveryMethod,
    pub urls: Vec<String>,
}

pub struct UrlDiscovery {
    sitemap: SitemapDiscovery,
    crawl: CrawlDiscovery,
}

impl UrlDiscovery {
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            sitemap: SitemapDiscovery::new(client.clone()),
            crawl: CrawlDiscovery::new(client),
        }
    }

    /// Sitemap-first, BFS-crawl fallback, capped and deduplicated in the
    /// order discovered.
    ///
    /// `follow_subdomains` decides cross-sub-domain link handling: when
    /// `false`, only the exact host of `base_url` is kept; when `true`,
    /// any host sharing the same registrable domain (e.g. `blog.` +
    /// `shop.example.com`) is treated as in-domain.
    pub async fn discover(&self, base_url: &Url, max_pages: usize, follow_subdomains: bool) -> DiscoveryResult {
        let sitemap_urls = self
            .sitemap
            .discover(base_url, follow_subdomains)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "sitemap discovery failed, falling back to crawl");
                Vec::new()
            });

        if !sitemap_urls.is_empty() {
            let mut urls = sitemap_urls;
            urls.truncate(max_pages);
            info!(count = urls.len(), "discovered URLs via sitemap");
            return DiscoveryResult { method: DiscoveryMethod::Sitemap, urls };
        }

        let urls = self.crawl.discover(base_url, max_pages, follow_subdomains).await;
        info!(count = urls.len(), "discovered URLs via crawl fallback");
        DiscoveryResult { method: DiscoveryMethod::Crawl, urls }
    }
}
