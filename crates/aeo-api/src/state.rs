//! Shared application state: the single
//! `AdaptiveFetcher`/browser pool and `DomainOrchestrator` every handler
//! reaches through, built once at startup and cloned cheaply (Arc-backed)
//! into each request.

use crate::config::ApiConfig;
use crate::llm::{probe_factory, LlmClient};
use crate::pdf::{PdfRenderer, UnimplementedPdfRenderer};
use aeo_discovery::UrlDiscovery;
use aeo_fetch::{AdaptiveFetcher, Renderer};
use aeo_headless::{BrowserPool, BrowserPoolConfig, HeadlessRenderer};
use aeo_scoring::CitationProbe;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub fetcher: Arc<AdaptiveFetcher>,
    pub discovery: Arc<UrlDiscovery>,
    pub orchestrator: aeo_domain::DomainOrchestrator,
    pub llm_clients: Arc<Vec<Arc<dyn LlmClient>>>,
    pub pdf_renderer: Arc<dyn PdfRenderer>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let browser_pool = BrowserPool::new(BrowserPoolConfig {
            page_timeout_secs: config.app.fetch.render_timeout_secs,
            ..Default::default()
        });
        let renderer: Arc<dyn Renderer> = Arc::new(HeadlessRenderer::new(browser_pool));

        let fetcher = Arc::new(AdaptiveFetcher::new(config.app.fetch.clone(), Some(renderer))?);
        let discovery = Arc::new(UrlDiscovery::new("AeoAuditBot/1.0", Duration::from_secs(config.app.fetch.http_timeout_secs)));

        let llm_clients: Vec<Arc<dyn LlmClient>> = config
            .llm_endpoints
            .iter()
            .map(|endpoint| {
                Arc::new(crate::llm::HttpLlmClient::new(
                    endpoint.name.clone(),
                    endpoint.url.clone(),
                    endpoint.api_key.clone(),
                    config.llm_timeout,
                )) as Arc<dyn LlmClient>
            })
            .collect();

        let domain_probe_factory =
            if llm_clients.is_empty() { None } else { Some(probe_factory(llm_clients.clone())) };

        let orchestrator = aeo_domain::DomainOrchestrator::new(fetcher.clone(), discovery.clone(), domain_probe_factory);
        orchestrator.spawn_ttl_sweeper(Duration::from_secs(config.app.domain.job_ttl_seconds));

        Ok(Self {
            config,
            fetcher,
            discovery,
            orchestrator,
            llm_clients: Arc::new(llm_clients),
            pdf_renderer: Arc::new(UnimplementedPdfRenderer),
        })
    }

    /// Probes for a single ad-hoc page audit,
    /// built fresh for this one URL the same way the domain orchestrator's
    /// probe factory does.
    pub fn probes_for(&self, url: &str) -> Vec<Box<dyn CitationProbe>> {
        if self.llm_clients.is_empty() {
            return Vec::new();
        }
        probe_factory((*self.llm_clients).clone())(url)
    }
}
