//! BFS crawl fallback used when a domain publishes no sitemap.

use aeo_utils::is_same_registrable_domain;
use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};
use url::Url;

const MAX_DEPTH: u8 = 2;
const EXCLUDED_PATH_PREFIXES: &[&str] = &["/login", "/cart", "/account"];
const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pdf", ".zip", ".png", ".jpg", ".jpeg", ".gif", ".mp4", ".mov", ".mp3", ".css", ".js", ".svg", ".ico",
];

pub struct CrawlDiscovery {
    client: Client,
}

impl CrawlDiscovery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// BFS from `start_url` to depth 2, following only same-registrable-
    /// domain anchors, excluding login/cart/account paths and binary asset
    /// extensions, capped at `max_pages`.
    pub async fn discover(&self, start_url: &Url, max_pages: usize, follow_subdomains: bool) -> Vec<String> {
        let host = match start_url.host_str() {
            Some(h) => h.to_string(),
            None => return Vec::new(),
        };

        let mut visited = HashSet::new();
        let mut queue: VecDeque<(String, u8)> = VecDeque::new();
        let mut discovered = Vec::new();

        let start = start_url.to_string();
        visited.insert(start.clone());
        queue.push_back((start, 0));

        while let Some((current_url, depth)) = queue.pop_front() {
            discovered.push(current_url.clone());
            if discovered.len() >= max_pages {
                break;
            }
            if depth >= MAX_DEPTH {
                continue;
            }

            let links = match self.fetch_links(&current_url).await {
                Ok(links) => links,
                Err(err) => {
                    warn!(url = %current_url, error = %err, "crawl fetch failed, skipping");
                    continue;
                }
            };

            for link in links {
                if visited.contains(&link) {
                    continue;
                }
                if !is_eligible(&link, &host, follow_subdomains) {
                    continue;
                }
                visited.insert(link.clone());
                queue.push_back((link, depth + 1));
            }
        }

        discovered
    }

    async fn fetch_links(&self, page_url: &str) -> Result<Vec<String>> {
        let response = self.client.get(page_url).send().await.context("fetching page for crawl")?;
        if !response.status().is_success() {
            return Ok(Vec::new());
        }
        let body = response.text().await.context("reading page body")?;
        Ok(extract_links(page_url, &body))
    }
}

fn extract_links(page_url: &str, html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("static selector");
    let Ok(base) = Url::parse(page_url) else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for el in document.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if let Ok(resolved) = base.join(href) {
            let mut resolved = resolved;
            resolved.set_fragment(None);
            links.push(resolved.to_string());
        }
    }
    debug!(page_url, count = links.len(), "extracted links from crawl page");
    links
}

fn is_eligible(url: &str, host: &str, follow_subdomains: bool) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(link_host) = parsed.host_str() else {
        return false;
    };
    let in_domain = if follow_subdomains {
        is_same_registrable_domain(host, link_host)
    } else {
        link_host.eq_ignore_ascii_case(host)
    };
    if !in_domain {
        return false;
    }
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    let path = parsed.path().to_lowercase();
    if EXCLUDED_PATH_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return false;
    }
    if EXCLUDED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_login_cart_and_account_paths() {
        assert!(!is_eligible("https://example.com/login", "example.com", true));
        assert!(!is_eligible("https://example.com/cart/checkout", "example.com", true));
        assert!(!is_eligible("https://example.com/account", "example.com", true));
    }

    #[test]
    fn excludes_binary_asset_extensions() {
        assert!(!is_eligible("https://example.com/report.pdf", "example.com", true));
        assert!(!is_eligible("https://example.com/logo.png", "example.com", true));
    }

    #[test]
    fn excludes_cross_domain_links() {
        assert!(!is_eligible("https://other.com/page", "example.com", true));
    }

    #[test]
    fn allows_same_domain_content_pages() {
        assert!(is_eligible("https://example.com/blog/post-1", "example.com", true));
    }

    #[test]
    fn follow_subdomains_false_rejects_subdomain_links() {
        assert!(!is_eligible("https://blog.example.com/post", "example.com", false));
        assert!(is_eligible("https://example.com/post", "example.com", false));
    }

    #[test]
    fn extracts_and_resolves_relative_links() {
        let html = r#"<a href="/about">About</a><a href="https://other.com/">Other</a>"#;
        let links = extract_links("https://example.com/", html);
        assert!(links.contains(&"https://example.com/about".to_string()));
        assert!(links.contains(&"https://other.com/".to_string()));
    }
}
