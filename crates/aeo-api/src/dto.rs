//! Request/response shapes for the inbound API.

use aeo_types::{DomainAudit, JobStatus, PageAudit, ProgressEvent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PageAuditRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PageAuditResponse {
    pub result: PageAudit,
}

#[derive(Debug, Deserialize)]
pub struct DomainAuditRequest {
    pub domain: String,
    #[serde(default)]
    pub options: DomainAuditOptions,
}

#[derive(Debug, Default, Deserialize)]
pub struct DomainAuditOptions {
    pub max_pages: Option<usize>,
    pub concurrency: Option<usize>,
    pub follow_subdomains: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DomainAuditAccepted {
    pub job_id: String,
    pub status: &'static str,
    pub progress_url: String,
}

#[derive(Debug, Serialize)]
pub struct DomainResultResponse {
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DomainAudit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

/// Mirrors `ProgressEvent` for SSE payloads; the terminal event additionally
/// carries the finished `DomainAudit`.
#[derive(Debug, Serialize)]
pub struct ProgressPayload {
    #[serde(flatten)]
    pub event: ProgressEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DomainAudit>,
}

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    pub audit_result: serde_json::Value,
    pub audit_type: PdfAuditType,
    #[serde(default)]
    pub detailed: bool,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PdfAuditType {
    Page,
    Domain,
}
