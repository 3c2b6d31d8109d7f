//! Handlers for the 5 inbound endpoints plus a liveness check.

use crate::dto::{
    DomainAuditAccepted, DomainAuditRequest, DomainResultResponse, PageAuditRequest, PageAuditResponse, PdfAuditType, PdfRequest,
    ProgressPayload,
};
use crate::errors::ApiError;
use crate::pdf::AuditInput;
use crate::state::AppState;
use aeo_types::{DomainAudit, PageAudit};
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, instrument};
use url::Url;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[instrument(skip(state))]
pub async fn audit_page(State(state): State<AppState>, Json(body): Json<PageAuditRequest>) -> Result<Json<PageAuditResponse>, ApiError> {
    let url = normalize_url(&body.url)?;
    let probes = state.probes_for(&url);
    let (audit, _page) = aeo_domain::audit_url(&state.fetcher, &url, &probes).await;
    Ok(Json(PageAuditResponse { result: audit }))
}

#[instrument(skip(state))]
pub async fn audit_domain(
    State(state): State<AppState>,
    Json(body): Json<DomainAuditRequest>,
) -> Result<Json<DomainAuditAccepted>, ApiError> {
    let domain = body.domain.trim();
    if domain.is_empty() {
        return Err(ApiError::validation("domain must not be empty"));
    }

    let mut config = state.config.app.domain.clone();
    if let Some(max_pages) = body.options.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(concurrency) = body.options.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(follow_subdomains) = body.options.follow_subdomains {
        config.follow_subdomains = follow_subdomains;
    }

    let job_id = state.orchestrator.submit_domain_audit(domain.to_string(), config);
    info!(job_id = %job_id, domain = %domain, "domain audit submitted");

    Ok(Json(DomainAuditAccepted {
        progress_url: format!("/audit/domain/progress/{job_id}"),
        job_id,
        status: "queued",
    }))
}

#[instrument(skip(state))]
pub async fn domain_progress(State(state): State<AppState>, Path(job_id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    if state.orchestrator.job(&job_id).is_none() {
        return Err(ApiError::JobNotFound { job_id });
    }

    let (tail, rx) = state.orchestrator.subscribe(&job_id);
    let orchestrator = state.orchestrator.clone();

    let live = BroadcastStream::new(rx).filter_map(|event| async move { event.ok() });
    let events = stream::iter(tail).chain(live).map(move |event| {
        let result = if event.status.is_terminal() { orchestrator.job(&job_id).and_then(|r| r.result) } else { None };
        let payload = ProgressPayload { event, result };
        let sse_event = Event::default()
            .json_data(&payload)
            .unwrap_or_else(|_| Event::default().data("{\"error\":\"progress event serialization failed\"}"));
        Ok::<Event, Infallible>(sse_event)
    });

    let stream: std::pin::Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>> = Box::pin(events);
    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}

#[instrument(skip(state))]
pub async fn domain_result(State(state): State<AppState>, Path(job_id): Path<String>) -> Result<Json<DomainResultResponse>, ApiError> {
    let record = state.orchestrator.job(&job_id).ok_or(ApiError::JobNotFound { job_id })?;
    Ok(Json(DomainResultResponse { status: record.status, result: record.result, failure_reason: record.failure_reason }))
}

#[instrument(skip(state, body))]
pub async fn audit_pdf(State(state): State<AppState>, Json(body): Json<PdfRequest>) -> Result<impl IntoResponse, ApiError> {
    let input = match body.audit_type {
        PdfAuditType::Page => {
            let audit: PageAudit = serde_json::from_value(body.audit_result)
                .map_err(|err| ApiError::validation(format!("audit_result is not a valid page audit: {err}")))?;
            AuditInput::Page(audit)
        }
        PdfAuditType::Domain => {
            let audit: DomainAudit = serde_json::from_value(body.audit_result)
                .map_err(|err| ApiError::validation(format!("audit_result is not a valid domain audit: {err}")))?;
            AuditInput::Domain(audit)
        }
    };

    let bytes = state.pdf_renderer.render(&input, body.detailed).await.map_err(|err| ApiError::Pdf { message: err.to_string() })?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes))
}

fn normalize_url(raw: &str) -> Result<String, ApiError> {
    let parsed = Url::parse(raw).map_err(|err| ApiError::validation(format!("invalid url {raw}: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::validation(format!("unsupported url scheme in {raw}")));
    }
    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_rejects_non_http_schemes() {
        assert!(normalize_url("ftp://example.com/file").is_err());
    }

    #[test]
    fn normalize_url_accepts_https() {
        assert_eq!(normalize_url("https://example.com/page").unwrap(), "https://example.com/page");
    }
}
