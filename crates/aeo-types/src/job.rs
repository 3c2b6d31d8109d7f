use crate::domain::DomainAudit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job lifecycle states. No state is ever
/// revisited; `Failed` and `Completed` are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Discovering,
    Auditing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Process-wide job record. Owned exclusively by the
/// domain orchestrator; this is the single shared-mutable structure in the
/// whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub status: JobStatus,
    pub percentage: f64,
    pub pages_audited: usize,
    pub total_urls: usize,
    pub urls_discovered: usize,
    pub current_url: Option<String>,
    pub result: Option<DomainAudit>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobRecord {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Queued,
            percentage: 0.0,
            pages_audited: 0,
            total_urls: 0,
            urls_discovered: 0,
            current_url: None,
            result: None,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }
}

/// A single progress notification. Events are
/// totally ordered per job because the orchestrator is the single writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub status: JobStatus,
    pub current_step: String,
    pub percentage: f64,
    pub pages_audited: usize,
    pub total_urls: usize,
    pub urls_discovered: usize,
    pub message: String,
    pub current_url: Option<String>,
}

impl ProgressEvent {
    /// `percentage = 10 * discovery_done + 90 * (pages_audited / total_urls)`
    pub fn percentage_for(discovery_done: bool, pages_audited: usize, total_urls: usize) -> f64 {
        let discovery_component = if discovery_done { 10.0 } else { 0.0 };
        let audit_component = if total_urls == 0 {
            0.0
        } else {
            90.0 * (pages_audited as f64 / total_urls as f64)
        };
        (discovery_component + audit_component).clamp(0.0, 100.0)
    }
}
