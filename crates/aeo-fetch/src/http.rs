//! Reliable HTTP client: retry with exponential backoff wrapped in a
//! per-host circuit breaker. robots.txt compliance is
//! intentionally dropped (see DESIGN.md) — the audit is a single-page or
//! bounded-domain scan run at the operator's own request, not a crawler
//! roaming the open web.

use crate::circuit::{self, CircuitBreaker, HostBreakers};
use aeo_types::{FetchMethod, FetchResult, PerformanceMetrics};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

#[derive(Debug)]
pub struct ReliableHttpClient {
    client: Client,
    retry_config: RetryConfig,
    breakers: HostBreakers,
}

impl ReliableHttpClient {
    pub fn new(timeout: Duration, retry_config: RetryConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent("AeoAuditBot/1.0 (+https://example.invalid/bot)")
            .gzip(true)
            .brotli(true)
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            retry_config,
            breakers: HostBreakers::new(circuit::Config::default()),
        })
    }

    fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay = self.retry_config.initial_delay.as_millis() as f64
            * self.retry_config.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(delay as u64).min(self.retry_config.max_delay);
        if self.retry_config.jitter {
            let jitter = delay.as_millis() as f64 * 0.1;
            delay + Duration::from_millis(jitter as u64)
        } else {
            delay
        }
    }

    /// Fetch `url` over plain HTTP, never panicking: transport failures and
    /// non-2xx statuses both come back as a `FetchResult` carrying an error
    /// rather than `Err`, so the adaptive fetcher can still run the quality
    /// gate and escalation path over whatever the server did (or didn't)
    /// return.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> FetchResult {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        let breaker: Arc<CircuitBreaker> = self.breakers.get(&host);

        let start = Instant::now();
        let mut last_error: Option<String> = None;

        for attempt in 0..self.retry_config.max_attempts {
            let result = circuit::guarded_call(&breaker, || async {
                self.client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| anyhow::anyhow!(e))
            })
            .await;

            match result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let ttfb_ms = start.elapsed().as_millis() as u64;
                    let retryable_status = status == 408 || status == 429 || status >= 500;

                    if !(200..300).contains(&status) && retryable_status && attempt + 1 < self.retry_config.max_attempts {
                        last_error = Some(format!("HTTP {status}"));
                        let delay = self.calculate_delay(attempt);
                        debug!(url = %url, attempt = attempt + 1, status, "retrying after server error");
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    let html = match response.text().await {
                        Ok(body) => body,
                        Err(e) => {
                            return FetchResult::empty_with_error(
                                url,
                                FetchMethod::Http,
                                format!("failed to read response body: {e}"),
                            );
                        }
                    };

                    return FetchResult {
                        url: url.to_string(),
                        status_code: Some(status),
                        html,
                        fetched_at: chrono::Utc::now(),
                        performance: PerformanceMetrics {
                            ttfb_ms: Some(ttfb_ms),
                            ..Default::default()
                        },
                        fetch_method: FetchMethod::Http,
                        error: None,
                    };
                }
                Err(err) => {
                    let err_str = err.to_string();
                    if err_str.contains("circuit open") || err_str.contains("half-open saturated") {
                        warn!(url = %url, "circuit breaker rejected request");
                        return FetchResult::empty_with_error(url, FetchMethod::Http, err_str);
                    }
                    last_error = Some(err_str);
                    if attempt + 1 < self.retry_config.max_attempts {
                        let delay = self.calculate_delay(attempt);
                        debug!(url = %url, attempt = attempt + 1, "retrying after transport error");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        FetchResult::empty_with_error(
            url,
            FetchMethod::Http,
            last_error.unwrap_or_else(|| "all retry attempts failed".to_string()),
        )
    }

    pub fn circuit_state_for_host(&self, host: &str) -> circuit::State {
        self.breakers.get(host).state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn successful_get_returns_html_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = ReliableHttpClient::new(Duration::from_secs(5), RetryConfig::default()).unwrap();
        let result = client.get(&format!("{}/page", server.uri())).await;

        assert!(result.is_success());
        assert_eq!(result.status_code, Some(200));
        assert!(result.html.contains("ok"));
    }

    #[tokio::test]
    async fn not_found_is_reported_without_retry_storm() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ReliableHttpClient::new(Duration::from_secs(5), RetryConfig::default()).unwrap();
        let result = client.get(&format!("{}/missing", server.uri())).await;

        assert_eq!(result.status_code, Some(404));
    }
}
