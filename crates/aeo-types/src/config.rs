use serde::{Deserialize, Serialize};

/// Fetch strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetcherMode {
    Hybrid,
    Http,
    Rendered,
}

impl Default for FetcherMode {
    fn default() -> Self {
        FetcherMode::Hybrid
    }
}

/// Recognized fetcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub mode: FetcherMode,
    /// Hosts that always escalate straight to rendered mode.
    pub render_required_hosts: Vec<String>,
    pub http_timeout_secs: u64,
    pub render_timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            mode: FetcherMode::default(),
            render_required_hosts: default_render_required_hosts(),
            http_timeout_secs: 10,
            render_timeout_secs: 30,
            max_retries: 3,
        }
    }
}

fn default_render_required_hosts() -> Vec<String> {
    // Heavy SPA hosts that never serve useful content over plain HTTP.
    vec![
        "twitter.com".to_string(),
        "x.com".to_string(),
        "instagram.com".to_string(),
        "airbnb.com".to_string(),
        "notion.site".to_string(),
    ]
}

/// Recognized domain-orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// 0 = unlimited, capped at `HARD_MAX_PAGES`.
    pub max_pages: usize,
    pub concurrency: usize,
    pub job_ttl_seconds: u64,
    pub stalled_after_secs: u64,
    pub per_page_timeout_secs: u64,
    pub follow_subdomains: bool,
}

impl DomainConfig {
    pub const HARD_MAX_PAGES: usize = 1000;
    pub const MAX_CONCURRENCY: usize = 10;

    /// Resolve `max_pages = 0` ("unlimited") to the hard ceiling.
    pub fn effective_max_pages(&self) -> usize {
        if self.max_pages == 0 {
            Self::HARD_MAX_PAGES
        } else {
            self.max_pages.min(Self::HARD_MAX_PAGES)
        }
    }

    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.clamp(1, Self::MAX_CONCURRENCY)
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            max_pages: 100,
            concurrency: 3,
            job_ttl_seconds: 3600,
            stalled_after_secs: 300,
            per_page_timeout_secs: 60,
            follow_subdomains: false,
        }
    }
}

/// Per-content-type weight multiplier applied before category reweighting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContentTypeWeights {
    pub answerability: f64,
    pub structured_data: f64,
    pub authority: f64,
    pub content_quality: f64,
    pub citationability: f64,
    pub technical: f64,
}

impl ContentTypeWeights {
    pub fn for_type(content_type: crate::classification::ContentType) -> Self {
        use crate::classification::ContentType::*;
        match content_type {
            Informational => Self {
                answerability: 1.3,
                structured_data: 1.0,
                authority: 1.2,
                content_quality: 1.2,
                citationability: 1.2,
                technical: 1.0,
            },
            Experiential => Self {
                answerability: 0.5,
                structured_data: 1.3,
                authority: 0.9,
                content_quality: 1.1,
                citationability: 0.6,
                technical: 1.0,
            },
            Transactional => Self {
                answerability: 0.8,
                structured_data: 1.4,
                authority: 1.1,
                content_quality: 0.9,
                citationability: 0.7,
                technical: 1.2,
            },
            Navigational => Self {
                answerability: 0.6,
                structured_data: 1.2,
                authority: 0.8,
                content_quality: 0.7,
                citationability: 0.5,
                technical: 1.3,
            },
        }
    }
}

/// Hosts/TLDs treated as inherently authoritative for the Authority scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoritativeHosts {
    pub tlds: Vec<String>,
    pub hosts: Vec<String>,
}

impl Default for AuthoritativeHosts {
    fn default() -> Self {
        Self {
            tlds: vec![".gov".to_string(), ".edu".to_string()],
            hosts: vec![
                "wikipedia.org".to_string(),
                "who.int".to_string(),
                "un.org".to_string(),
            ],
        }
    }
}

impl AuthoritativeHosts {
    pub fn is_authoritative(&self, host: &str) -> bool {
        self.tlds.iter().any(|tld| host.ends_with(tld.as_str()))
            || self.hosts.iter().any(|h| host == h || host.ends_with(&format!(".{h}")))
    }
}

/// Top-level application configuration gathering every recognized
/// operator-configurable option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub domain: DomainConfig,
    pub authoritative_hosts: AuthoritativeHosts,
}
