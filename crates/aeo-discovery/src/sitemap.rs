//! Sitemap-first URL discovery. Tries the standard well-known locations in
//! order, parses sitemap indexes one level deep, and keeps only
//! same-registrable-domain URLs.

use aeo_utils::is_same_registrable_domain;
use anyhow::{Context, Result};
use reqwest::Client;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;
use xml::reader::{EventReader, XmlEvent};

/// Well-known sitemap locations, tried in order.
const SITEMAP_CANDIDATES: &[&str] = &["/sitemap.xml", "/sitemap_index.xml", "/sitemap-index.xml"];

/// A single `<loc>` entry from either a `<urlset>` or a `<sitemapindex>`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Loc {
    url: String,
    is_sub_sitemap: bool,
}

pub struct SitemapDiscovery {
    client: Client,
}

impl SitemapDiscovery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and parse sitemaps for `base_url`, returning deduplicated,
    /// same-registrable-domain page URLs. Returns an empty vec (not an
    /// error) when no sitemap is found, so the caller can fall back to a
    /// crawl.
    pub async fn discover(&self, base_url: &Url, follow_subdomains: bool) -> Result<Vec<String>> {
        let host = base_url.host_str().context("base URL has no host")?.to_string();
        let origin = base_url.origin().ascii_serialization();

        for candidate in SITEMAP_CANDIDATES {
            let sitemap_url = format!("{origin}{candidate}");
            match self.fetch(&sitemap_url).await {
                Ok(Some(body)) => {
                    debug!(sitemap_url, "found sitemap");
                    return self.parse_recursive(&sitemap_url, &body, &host, follow_subdomains, 0).await;
                }
                Ok(None) => continue,
                Err(err) => {
                    warn!(sitemap_url, error = %err, "sitemap fetch failed");
                    continue;
                }
            }
        }

        info!(%host, "no sitemap found");
        Ok(Vec::new())
    }

    async fn fetch(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send().await.context("fetching sitemap")?;
        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(Some(response.text().await.context("reading sitemap body")?))
    }

    /// One level of recursion into sitemap-index sub-sitemaps.
    async fn parse_recursive(
        &self,
        source_url: &str,
        body: &str,
        host: &str,
        follow_subdomains: bool,
        depth: u8,
    ) -> Result<Vec<String>> {
        let locs = parse_locs(body);
        let mut urls = Vec::new();
        let mut seen = HashSet::new();

        for loc in locs {
            if loc.is_sub_sitemap {
                if depth >= 1 {
                    warn!(source_url, child = %loc.url, "ignoring nested sitemap index beyond one level");
                    continue;
                }
                match self.fetch(&loc.url).await {
                    Ok(Some(child_body)) => {
                        let child_urls =
                            Box::pin(self.parse_recursive(&loc.url, &child_body, host, follow_subdomains, depth + 1))
                                .await?;
                        for url in child_urls {
                            if seen.insert(url.clone()) {
                                urls.push(url);
                            }
                        }
                    }
                    Ok(None) => warn!(child = %loc.url, "sub-sitemap not found"),
                    Err(err) => warn!(child = %loc.url, error = %err, "failed to fetch sub-sitemap"),
                }
                continue;
            }

            let Ok(parsed) = Url::parse(&loc.url) else {
                continue;
            };
            let Some(entry_host) = parsed.host_str() else {
                continue;
            };
            let in_domain = if follow_subdomains {
                is_same_registrable_domain(host, entry_host)
            } else {
                entry_host.eq_ignore_ascii_case(host)
            };
            if !in_domain {
                continue;
            }
            if seen.insert(loc.url.clone()) {
                urls.push(loc.url);
            }
        }

        info!(source_url, count = urls.len(), "parsed sitemap entries");
        Ok(urls)
    }
}

/// Extract every `<loc>` text value, tagging whether it sits inside a
/// `<sitemapindex>` (a sub-sitemap reference) or a `<urlset>` (a page URL).
fn parse_locs(content: &str) -> Vec<Loc> {
    let parser = EventReader::from_str(content);
    let mut element_stack: Vec<String> = Vec::new();
    let mut root_is_index = false;
    let mut locs = Vec::new();
    let mut current_text = String::new();
    let mut in_loc = false;

    for event in parser {
        match event {
            Ok(XmlEvent::StartElement { name, .. }) => {
                let local = name.local_name.clone();
                if element_stack.is_empty() && local == "sitemapindex" {
                    root_is_index = true;
                }
                if local == "loc" {
                    in_loc = true;
                    current_text.clear();
                }
                element_stack.push(local);
            }
            Ok(XmlEvent::Characters(text)) if in_loc => {
                current_text.push_str(&text);
            }
            Ok(XmlEvent::EndElement { name }) => {
                if name.local_name == "loc" {
                    in_loc = false;
                    let url = current_text.trim().to_string();
                    if !url.is_empty() {
                        locs.push(Loc { url, is_sub_sitemap: root_is_index });
                    }
                }
                element_stack.pop();
            }
            Err(err) => {
                warn!(error = %err, "malformed sitemap XML, stopping parse");
                break;
            }
            _ => {}
        }
    }

    locs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urlset_locs_as_page_urls() {
        let xml = r#"<?xml version="1.0"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <url><loc>https://example.com/a</loc></url>
                <url><loc>https://example.com/b</loc></url>
            </urlset>"#;
        let locs = parse_locs(xml);
        assert_eq!(locs.len(), 2);
        assert!(locs.iter().all(|l| !l.is_sub_sitemap));
    }

    #[test]
    fn parses_sitemapindex_locs_as_sub_sitemaps() {
        let xml = r#"<?xml version="1.0"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <sitemap><loc>https://example.com/sitemap-1.xml</loc></sitemap>
            </sitemapindex>"#;
        let locs = parse_locs(xml);
        assert_eq!(locs.len(), 1);
        assert!(locs[0].is_sub_sitemap);
    }
}
