//! Runtime configuration: typed structs with `Default` impls, overridable
//! via `AEO_`-prefixed environment variables.

use aeo_types::{AppConfig, FetcherMode};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub app: AppConfig,
    /// Named LLM endpoints for the optional AI Citation category; empty disables the category rather than failing the
    /// audit.
    pub llm_endpoints: Vec<LlmEndpoint>,
    pub llm_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LlmEndpoint {
    pub name: String,
    pub url: String,
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".parse().expect("static bind address"),
            app: AppConfig::default(),
            llm_endpoints: Vec::new(),
            llm_timeout: Duration::from_secs(15),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(bind) = std::env::var("AEO_BIND") {
            match bind.parse() {
                Ok(addr) => config.bind = addr,
                Err(err) => warn!(%bind, error = %err, "ignoring invalid AEO_BIND"),
            }
        }

        if let Ok(mode) = std::env::var("AEO_FETCHER_MODE") {
            config.app.fetch.mode = match mode.as_str() {
                "http" => FetcherMode::Http,
                "rendered" => FetcherMode::Rendered,
                "hybrid" => FetcherMode::Hybrid,
                other => {
                    warn!(mode = %other, "unrecognized AEO_FETCHER_MODE, keeping hybrid default");
                    FetcherMode::Hybrid
                }
            };
        }

        if let Some(value) = env_usize("AEO_DOMAIN_MAX_PAGES") {
            config.app.domain.max_pages = value;
        }
        if let Some(value) = env_usize("AEO_DOMAIN_CONCURRENCY") {
            config.app.domain.concurrency = value;
        }
        if let Some(value) = env_u64("AEO_JOB_TTL_SECONDS") {
            config.app.domain.job_ttl_seconds = value;
        }
        if let Some(value) = env_u64("AEO_DOMAIN_STALLED_AFTER_SECS") {
            config.app.domain.stalled_after_secs = value;
        }
        if let Some(value) = env_u64("AEO_DOMAIN_PER_PAGE_TIMEOUT_SECS") {
            config.app.domain.per_page_timeout_secs = value;
        }
        if let Ok(value) = std::env::var("AEO_DOMAIN_FOLLOW_SUBDOMAINS") {
            config.app.domain.follow_subdomains = value == "true" || value == "1";
        }

        // `AEO_LLM_CLIENTS=acme=https://llm.acme.internal/query,other=https://...`
        // maps name to endpoint; the credential for each name is read from
        // `AEO_LLM_KEY_<NAME>`.
        if let Ok(raw) = std::env::var("AEO_LLM_CLIENTS") {
            config.llm_endpoints = raw
                .split(',')
                .filter_map(|entry| entry.split_once('='))
                .map(|(name, url)| {
                    let key_var = format!("AEO_LLM_KEY_{}", name.to_uppercase());
                    LlmEndpoint {
                        name: name.trim().to_string(),
                        url: url.trim().to_string(),
                        api_key: std::env::var(key_var).ok(),
                    }
                })
                .collect();
        }

        config
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
