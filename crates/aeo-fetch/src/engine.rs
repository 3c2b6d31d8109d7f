//! Mode selection for the adaptive fetcher: try the cheap HTTP leg first,
//! escalate to a rendered fetch only when the quality gate says the HTTP
//! result is too thin for extraction.

use crate::http::ReliableHttpClient;
use crate::quality::quality_score;
use aeo_types::{FetchConfig, FetchMethod, FetchResult, FetcherMode};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Abstraction over the rendered (headless browser) fetch leg so aeo-fetch
/// doesn't depend on aeo-headless directly; aeo-domain wires a concrete
/// renderer in. A domain audit with no renderer configured simply never
/// escalates past HTTP.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> FetchResult;
}

pub struct AdaptiveFetcher {
    http_client: ReliableHttpClient,
    renderer: Option<std::sync::Arc<dyn Renderer>>,
    config: FetchConfig,
}

impl AdaptiveFetcher {
    pub fn new(config: FetchConfig, renderer: Option<std::sync::Arc<dyn Renderer>>) -> anyhow::Result<Self> {
        let http_client = ReliableHttpClient::new(
            Duration::from_secs(config.http_timeout_secs),
            crate::http::RetryConfig {
                max_attempts: config.max_retries,
                ..Default::default()
            },
        )?;
        Ok(Self {
            http_client,
            renderer,
            config,
        })
    }

    fn host_requires_render(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        self.config
            .render_required_hosts
            .iter()
            .any(|h| host == h || host.ends_with(&format!(".{h}")))
    }

    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> FetchResult {
        match self.config.mode {
            FetcherMode::Http => self.http_client.get(url).await,
            FetcherMode::Rendered => self.render_or_fallback(url).await,
            FetcherMode::Hybrid => {
                if self.host_requires_render(url) {
                    return self.render_or_fallback(url).await;
                }

                let http_result = self.http_client.get(url).await;
                let score = quality_score(http_result.status_code, &http_result.html);
                if score >= crate::quality::PASS_THRESHOLD {
                    return http_result;
                }

                info!(url = %url, http_quality = score, "http result failed quality gate, escalating to render");
                let rendered_result = self.render_or_fallback(url).await;
                let rendered_score = quality_score(rendered_result.status_code, &rendered_result.html);

                if rendered_score >= score {
                    rendered_result
                } else {
                    http_result
                }
            }
        }
    }

    async fn render_or_fallback(&self, url: &str) -> FetchResult {
        match &self.renderer {
            Some(renderer) => renderer.render(url).await,
            None => {
                FetchResult::empty_with_error(url, FetchMethod::Rendered, "no renderer configured".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubRenderer {
        html: String,
    }

    #[async_trait]
    impl Renderer for StubRenderer {
        async fn render(&self, url: &str) -> FetchResult {
            FetchResult {
                url: url.to_string(),
                status_code: Some(200),
                html: self.html.clone(),
                fetched_at: chrono::Utc::now(),
                performance: Default::default(),
                fetch_method: FetchMethod::Rendered,
                error: None,
            }
        }
    }

    #[tokio::test]
    async fn render_required_host_skips_http_entirely() {
        let mut config = FetchConfig::default();
        config.render_required_hosts = vec!["x.com".to_string()];
        let renderer = Arc::new(StubRenderer {
            html: "<html><body><h1>Tweet</h1><p>content</p></body></html>".to_string(),
        });
        let fetcher = AdaptiveFetcher::new(config, Some(renderer)).unwrap();

        let result = fetcher.fetch("https://x.com/some/status").await;
        assert_eq!(result.fetch_method, FetchMethod::Rendered);
    }

    #[tokio::test]
    async fn hybrid_mode_with_no_renderer_returns_http_result_even_if_thin() {
        let config = FetchConfig {
            mode: FetcherMode::Hybrid,
            render_required_hosts: vec![],
            http_timeout_secs: 5,
            render_timeout_secs: 30,
            max_retries: 1,
        };
        let fetcher = AdaptiveFetcher::new(config, None).unwrap();
        let result = fetcher.fetch("http://127.0.0.1:1").await;
        assert_eq!(result.fetch_method, FetchMethod::Http);
    }
}
