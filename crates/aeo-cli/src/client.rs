//! Thin HTTP client over the `aeo-api` surface. The CLI carries no
//! audit logic of its own — every subcommand is a request plus terminal
//! rendering.

use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;

pub struct AeoClient {
    http: Client,
    base_url: String,
}

impl AeoClient {
    pub fn new(base_url: String) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub async fn audit_page(&self, url: &str) -> Result<Value> {
        let response = self
            .http
            .post(format!("{}/audit/page", self.base_url))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .context("audit/page request failed")?;
        response_json(response).await
    }

    pub async fn submit_domain_audit(&self, domain: &str, max_pages: Option<usize>) -> Result<Value> {
        let mut options = serde_json::Map::new();
        if let Some(max_pages) = max_pages {
            options.insert("max_pages".to_string(), serde_json::json!(max_pages));
        }
        let response = self
            .http
            .post(format!("{}/audit/domain", self.base_url))
            .json(&serde_json::json!({ "domain": domain, "options": options }))
            .send()
            .await
            .context("audit/domain request failed")?;
        response_json(response).await
    }

    pub async fn domain_result(&self, job_id: &str) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}/audit/domain/result/{job_id}", self.base_url))
            .send()
            .await
            .context("audit/domain/result request failed")?;
        response_json(response).await
    }

    /// Streams raw SSE frames back via a callback, one `data:` payload at a
    /// time, so `commands::watch` can render progress as it arrives.
    pub async fn stream_domain_progress(&self, job_id: &str, mut on_event: impl FnMut(&str)) -> Result<()> {
        use futures::StreamExt;

        let response = self
            .http
            .get(format!("{}/audit/domain/progress/{job_id}", self.base_url))
            .send()
            .await
            .context("audit/domain/progress request failed")?;

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("error reading progress stream")?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));
            while let Some(pos) = buffer.find("\n\n") {
                let frame = buffer[..pos].to_string();
                buffer.drain(..pos + 2);
                for line in frame.lines() {
                    if let Some(data) = line.strip_prefix("data:") {
                        on_event(data.trim());
                    }
                }
            }
        }
        Ok(())
    }
}

async fn response_json(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body: Value = response.json().await.context("response body was not valid JSON")?;
    if !status.is_success() {
        anyhow::bail!("request failed with status {status}: {body}");
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = AeoClient::new("http://localhost:8080/".to_string()).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
