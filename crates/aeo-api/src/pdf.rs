//! PDF rendering capability: a narrow interface the core depends on but
//! never implements concretely, keeping PDF/LLM integrations outside the
//! audit core.

use aeo_types::{AeoError, DomainAudit, PageAudit};
use async_trait::async_trait;

/// Either shape `POST /audit/pdf` can be asked to render.
pub enum AuditInput {
    Page(PageAudit),
    Domain(DomainAudit),
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, audit: &AuditInput, detailed: bool) -> anyhow::Result<Vec<u8>>;
}

/// Null object returned by default: `POST /audit/pdf` is wired end-to-end
/// and answers with a clean `FeatureNotEnabled` error instead of a 404,
/// without vendoring a PDF library into the core.
pub struct UnimplementedPdfRenderer;

#[async_trait]
impl PdfRenderer for UnimplementedPdfRenderer {
    async fn render(&self, _audit: &AuditInput, _detailed: bool) -> anyhow::Result<Vec<u8>> {
        Err(AeoError::FeatureNotEnabled { feature: "pdf_rendering".to_string() }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::{ContentClassification, Grade};
    use chrono::Utc;

    #[tokio::test]
    async fn unimplemented_renderer_reports_feature_not_enabled() {
        let renderer = UnimplementedPdfRenderer;
        let audit = PageAudit {
            url: "https://example.com/".to_string(),
            overall_score: 0.0,
            grade: Grade::from_score(0.0),
            content_classification: ContentClassification::default(),
            breakdown: Default::default(),
            fetched_at: Utc::now(),
        };
        let result = renderer.render(&AuditInput::Page(audit), false).await;
        assert!(result.is_err());
    }
}
