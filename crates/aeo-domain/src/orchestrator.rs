//! The Domain Orchestrator: discovers a domain's URLs, audits
//! them with a bounded-concurrency worker pool, streams progress, and hands
//! the finished set of page audits to the Aggregator and GEO scorer.
//!
//! A single `DomainOrchestrator` handle is cloned into every spawned job task, but
//! `JobStore` is the only place state is mutated — this struct just carries
//! the Arc'd collaborators every job needs.

use crate::job_store::JobStore;
use crate::page_audit::audit_url;
use crate::progress::ProgressHub;
use crate::{aggregate, geo};
use aeo_discovery::UrlDiscovery;
use aeo_fetch::AdaptiveFetcher;
use aeo_scoring::CitationProbe;
use aeo_types::{DomainConfig, JobRecord, JobStatus, PageAudit, PageModel, ProgressEvent};
use dashmap::DashMap;
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};
use url::Url;
use uuid::Uuid;

/// How often the stall watchdog checks for forward progress while the
/// worker pool is draining.
const STALL_CHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Builds the probes for one URL. AI-citation probes carry the target URL
/// they check for, which differs per page, so the orchestrator
/// asks for a fresh set per URL rather than sharing one fixed list across an
/// entire domain job.
pub type ProbeFactory = Arc<dyn Fn(&str) -> Vec<Box<dyn CitationProbe>> + Send + Sync>;

#[derive(Clone)]
pub struct DomainOrchestrator {
    job_store: JobStore,
    progress: ProgressHub,
    fetcher: Arc<AdaptiveFetcher>,
    discovery: Arc<UrlDiscovery>,
    probe_factory: Option<ProbeFactory>,
    cancel_flags: Arc<DashMap<String, Arc<AtomicBool>>>,
}

impl DomainOrchestrator {
    pub fn new(
        fetcher: Arc<AdaptiveFetcher>,
        discovery: Arc<UrlDiscovery>,
        probe_factory: Option<ProbeFactory>,
    ) -> Self {
        Self {
            job_store: JobStore::new(),
            progress: ProgressHub::new(),
            fetcher,
            discovery,
            probe_factory,
            cancel_flags: Arc::new(DashMap::new()),
        }
    }

    pub fn job(&self, job_id: &str) -> Option<JobRecord> {
        self.job_store.get(job_id)
    }

    pub fn subscribe(&self, job_id: &str) -> (Vec<ProgressEvent>, broadcast::Receiver<ProgressEvent>) {
        self.progress.subscribe(job_id)
    }

    /// Transition a job to `failed` before it completes.
    pub fn cancel(&self, job_id: &str) -> bool {
        match self.cancel_flags.get(job_id) {
            Some(flag) => {
                flag.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Periodically evict terminal jobs past their TTL.
    pub fn spawn_ttl_sweeper(&self, ttl: Duration) {
        let this = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                for job_id in this.job_store.sweep_expired(ttl) {
                    this.progress.close(&job_id);
                }
            }
        });
    }

    /// Create a `queued` job and kick off discovery + auditing
    /// asynchronously, returning the job-id synchronously.
    pub fn submit_domain_audit(&self, domain: String, config: DomainConfig) -> String {
        let job_id = Uuid::new_v4().to_string();
        self.job_store.insert(JobRecord::new(job_id.clone()));

        let this = self.clone();
        let running_job_id = job_id.clone();
        tokio::spawn(async move {
            this.run(running_job_id, domain, config).await;
        });

        job_id
    }

    #[instrument(skip(self, config), fields(job_id = %job_id, %domain))]
    async fn run(self, job_id: String, domain: String, config: DomainConfig) {
        self.job_store.update(&job_id, |r| r.status = JobStatus::Discovering);
        self.publish(&job_id, JobStatus::Discovering, false, 0, 0, 0, "discovering URLs".to_string(), None);

        let base_url = match Url::parse(&format!("https://{domain}/")) {
            Ok(url) => url,
            Err(err) => {
                self.fail(&job_id, &format!("invalid domain {domain}: {err}")).await;
                return;
            }
        };

        let discovered = self
            .discovery
            .discover(&base_url, config.effective_max_pages(), config.follow_subdomains)
            .await;

        if discovered.urls.is_empty() {
            self.fail(&job_id, "no URLs discovered").await;
            return;
        }

        let urls = discovered.urls;
        let total = urls.len();
        info!(method = ?discovered.method, count = total, "discovery complete");

        self.job_store.update(&job_id, |r| {
            r.urls_discovered = total;
            r.total_urls = total;
            r.status = JobStatus::Auditing;
        });
        self.publish(&job_id, JobStatus::Auditing, true, 0, total, total, "auditing pages".to_string(), None);

        let cancel_flag = Arc::new(AtomicBool::new(false));
        self.cancel_flags.insert(job_id.clone(), cancel_flag.clone());

        let outcome = self.run_worker_pool(&job_id, &urls, &config, &cancel_flag).await;

        self.cancel_flags.remove(&job_id);

        match outcome {
            WorkerPoolOutcome::Cancelled => {
                self.fail(&job_id, "job cancelled before completion").await;
            }
            WorkerPoolOutcome::Stalled { elapsed_secs } => {
                self.fail(&job_id, &format!("worker pool stalled for {elapsed_secs}s with no progress")).await;
            }
            WorkerPoolOutcome::Drained { pages, pages_audited } => {
                self.finish(&job_id, &domain, total, pages, pages_audited).await;
            }
        }
    }

    /// Drive the bounded-concurrency worker pool over `urls`, racing each
    /// completion against a stall watchdog.
    async fn run_worker_pool(
        &self,
        job_id: &str,
        urls: &[String],
        config: &DomainConfig,
        cancel_flag: &Arc<AtomicBool>,
    ) -> WorkerPoolOutcome {
        let total = urls.len();
        let per_page_timeout = Duration::from_secs(config.per_page_timeout_secs);
        let stalled_after = Duration::from_secs(config.stalled_after_secs);

        let fetcher = self.fetcher.clone();
        let probe_factory = self.probe_factory.clone();

        let mut stream = futures::stream::iter(urls.to_vec())
            .map(move |url| {
                let fetcher = fetcher.clone();
                let probes = probe_factory.as_ref().map(|f| f(&url)).unwrap_or_default();
                async move {
                    let outcome = tokio::time::timeout(per_page_timeout, audit_url(&fetcher, &url, &probes)).await;
                    (url, outcome)
                }
            })
            .buffer_unordered(config.effective_concurrency());

        let mut collected: Vec<(PageAudit, PageModel)> = Vec::with_capacity(total);
        let mut pages_audited = 0usize;
        let mut last_progress = Instant::now();

        loop {
            if cancel_flag.load(Ordering::Relaxed) {
                return WorkerPoolOutcome::Cancelled;
            }

            tokio::select! {
                next = stream.next() => {
                    match next {
                        Some((url, Ok((audit, page)))) => {
                            pages_audited += 1;
                            last_progress = Instant::now();
                            collected.push((audit, page));
                            self.report_progress(job_id, total, pages_audited, format!("audited {url}"), Some(url));
                        }
                        Some((url, Err(_elapsed))) => {
                            pages_audited += 1;
                            last_progress = Instant::now();
                            warn!(url = %url, "page audit exceeded per-page timeout, marking failed");
                            self.report_progress(job_id, total, pages_audited, format!("timed out: {url}"), Some(url));
                        }
                        None => return WorkerPoolOutcome::Drained { pages: collected, pages_audited },
                    }
                }
                _ = tokio::time::sleep(STALL_CHECK_INTERVAL) => {
                    let elapsed = last_progress.elapsed();
                    if elapsed > stalled_after {
                        return WorkerPoolOutcome::Stalled { elapsed_secs: elapsed.as_secs() };
                    }
                }
            }
        }
    }

    fn report_progress(&self, job_id: &str, total: usize, pages_audited: usize, message: String, current_url: Option<String>) {
        self.job_store.update(job_id, |r| r.pages_audited = pages_audited);
        self.publish(job_id, JobStatus::Auditing, true, pages_audited, total, total, message, current_url);
    }

    async fn finish(
        &self,
        job_id: &str,
        domain: &str,
        pages_attempted: usize,
        pages: Vec<(PageAudit, PageModel)>,
        pages_audited: usize,
    ) {
        let audits: Vec<PageAudit> = pages.iter().map(|(audit, _)| audit.clone()).collect();
        let mut domain_audit = aggregate::aggregate(domain, pages_attempted, audits);
        domain_audit.geo_score = Some(geo::score(domain, &pages));

        self.job_store.update(job_id, |r| {
            r.status = JobStatus::Completed;
            r.percentage = 100.0;
            r.result = Some(domain_audit.clone());
        });
        self.publish(
            job_id,
            JobStatus::Completed,
            true,
            pages_audited,
            pages_attempted,
            pages_attempted,
            "domain audit complete".to_string(),
            None,
        );
    }

    async fn fail(&self, job_id: &str, reason: &str) {
        self.job_store.update(job_id, |r| {
            r.status = JobStatus::Failed;
            r.failure_reason = Some(reason.to_string());
        });
        let (pages_audited, total_urls, urls_discovered) = self
            .job_store
            .get(job_id)
            .map(|r| (r.pages_audited, r.total_urls, r.urls_discovered))
            .unwrap_or((0, 0, 0));
        self.publish(job_id, JobStatus::Failed, false, pages_audited, total_urls, urls_discovered, reason.to_string(), None);
    }

    fn publish(
        &self,
        job_id: &str,
        status: JobStatus,
        discovery_done: bool,
        pages_audited: usize,
        total_urls: usize,
        urls_discovered: usize,
        message: String,
        current_url: Option<String>,
    ) {
        let percentage = ProgressEvent::percentage_for(discovery_done, pages_audited, total_urls);
        self.job_store.update(job_id, |r| r.percentage = percentage);
        self.progress.publish(
            job_id,
            ProgressEvent {
                status,
                current_step: step_name(status),
                percentage,
                pages_audited,
                total_urls,
                urls_discovered,
                message,
                current_url,
            },
        );
    }
}

enum WorkerPoolOutcome {
    Drained { pages: Vec<(PageAudit, PageModel)>, pages_audited: usize },
    Stalled { elapsed_secs: u64 },
    Cancelled,
}

fn step_name(status: JobStatus) -> String {
    match status {
        JobStatus::Queued => "queued",
        JobStatus::Discovering => "discovering",
        JobStatus::Auditing => "auditing",
        JobStatus::Completed => "completed",
        JobStatus::Failed => "failed",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::FetchConfig;

    fn orchestrator() -> DomainOrchestrator {
        let fetcher = Arc::new(AdaptiveFetcher::new(FetchConfig::default(), None).unwrap());
        let discovery = Arc::new(UrlDiscovery::new("AeoAuditBot/1.0", Duration::from_secs(5)));
        DomainOrchestrator::new(fetcher, discovery, None)
    }

    #[tokio::test]
    async fn zero_urls_discovered_fails_the_job() {
        // A domain with no DNS resolution at all discovers nothing via
        // either the sitemap or crawl path, so the job fails outright.
        let orchestrator = orchestrator();
        let job_id = orchestrator.submit_domain_audit("invalid.invalid".to_string(), DomainConfig::default());

        let mut attempts = 0;
        loop {
            if let Some(record) = orchestrator.job(&job_id) {
                if record.status.is_terminal() {
                    assert_eq!(record.status, JobStatus::Failed);
                    assert!(record.failure_reason.is_some());
                    break;
                }
            }
            attempts += 1;
            assert!(attempts < 200, "job never reached a terminal state");
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    #[test]
    fn step_name_covers_every_status() {
        for status in [
            JobStatus::Queued,
            JobStatus::Discovering,
            JobStatus::Auditing,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            assert!(!step_name(status).is_empty());
        }
    }
}
