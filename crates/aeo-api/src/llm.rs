//! Optional AI-citation LLM client capability: `query(prompt) -> { text, citations[] }`.
//! Implementations wrap arbitrary providers; missing clients disable the
//! category rather than fail the audit.

use aeo_scoring::{CitationProbe, CitationResponse};
use aeo_types::AeoError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LlmResponse {
    pub text: String,
    #[serde(default)]
    pub citations: Vec<String>,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    fn name(&self) -> &str;
    async fn query(&self, prompt: &str) -> anyhow::Result<LlmResponse>;
}

/// Default used whenever `llm_clients` configuration is empty:
/// always errors, so `ai_citation::score`'s `Ok(response) else continue`
/// skip path naturally yields a zero, "not computed" category rather than
/// panicking or failing the audit.
pub struct NullLlmClient;

#[async_trait]
impl LlmClient for NullLlmClient {
    fn name(&self) -> &str {
        "null"
    }

    async fn query(&self, _prompt: &str) -> anyhow::Result<LlmResponse> {
        Err(AeoError::FeatureNotEnabled { feature: "llm_client".to_string() }.into())
    }
}

/// A generic HTTP-backed provider: POSTs `{"prompt": ...}` and expects back
/// `{"text": ..., "citations": [...]}`. Good enough for any provider that
/// fronts its API with that shape; bespoke providers implement `LlmClient`
/// directly instead of going through this adapter.
pub struct HttpLlmClient {
    name: String,
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpLlmClient {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            api_key,
            client: reqwest::Client::builder().timeout(timeout).build().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let mut request = self.client.post(&self.endpoint).json(&serde_json::json!({ "prompt": prompt }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<LlmResponse>().await?)
    }
}

/// Adapts a named `LlmClient` into a `CitationProbe` for one specific page:
/// "cited" means the model's answer or citation list names the page's own
/// URL.
struct LlmCitationProbe {
    client: Arc<dyn LlmClient>,
    target_url: String,
}

#[async_trait]
impl CitationProbe for LlmCitationProbe {
    async fn ask(&self, prompt: &str) -> anyhow::Result<CitationResponse> {
        let response = self.client.query(prompt).await?;
        let cited = response.text.contains(&self.target_url) || response.citations.iter().any(|c| c.contains(&self.target_url));
        // A crude but cheap proxy for paraphrase alignment: citing clients
        // are assumed to have grounded their answer in the page.
        let alignment = cited.then_some(0.75);
        Ok(CitationResponse { cited, alignment })
    }
}

/// Builds the `aeo-domain` probe factory: one fresh `CitationProbe` list per
/// URL, since each probe's "cited" check is specific to that page. An empty
/// client list yields a factory that always returns no probes, matching the
/// "missing clients disable the category" contract.
pub fn probe_factory(clients: Vec<Arc<dyn LlmClient>>) -> aeo_domain::ProbeFactory {
    Arc::new(move |url: &str| -> Vec<Box<dyn CitationProbe>> {
        clients
            .iter()
            .map(|client| Box::new(LlmCitationProbe { client: client.clone(), target_url: url.to_string() }) as Box<dyn CitationProbe>)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_client_always_errors() {
        let client = NullLlmClient;
        assert!(client.query("anything").await.is_err());
    }

    #[tokio::test]
    async fn probe_cites_when_response_contains_target_url() {
        struct Stub;
        #[async_trait]
        impl LlmClient for Stub {
            fn name(&self) -> &str {
                "stub"
            }
            async fn query(&self, _prompt: &str) -> anyhow::Result<LlmResponse> {
                Ok(LlmResponse { text: "see https://example.com/page for details".to_string(), citations: vec![] })
            }
        }

        let factory = probe_factory(vec![Arc::new(Stub)]);
        let probes = factory("https://example.com/page");
        assert_eq!(probes.len(), 1);
        let response = probes[0].ask("what is this page about?").await.unwrap();
        assert!(response.cited);
    }

    #[test]
    fn empty_client_list_yields_no_probes() {
        let factory = probe_factory(Vec::new());
        assert!(factory("https://example.com/").is_empty());
    }
}
