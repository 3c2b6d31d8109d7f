use thiserror::Error;

/// Error taxonomy shared across the audit pipeline.
///
/// A failure at any one of these kinds degrades the audit rather than
/// aborting it: a transport failure yields an empty `FetchResult`, a parse
/// failure is recorded and skipped, a scorer error yields a zero sub-score.
/// This enum exists for diagnostics and for the handful of places that *do*
/// need to fail the whole operation (discovery returning zero URLs, a
/// stalled worker pool).
#[derive(Debug, Error)]
pub enum AeoError {
    #[error("transport error fetching {url}: {message}")]
    Transport { url: String, message: String },

    #[error("render failure fetching {url}: {message}")]
    Render { url: String, message: String },

    #[error("parse failure: {message}")]
    Parse { message: String },

    #[error("discovery found zero URLs for domain {domain}")]
    NoUrlsDiscovered { domain: String },

    #[error("worker pool stalled for job {job_id} after {elapsed_secs}s with no progress")]
    WorkerPoolStalled { job_id: String, elapsed_secs: u64 },

    #[error("job {job_id} not found")]
    JobNotFound { job_id: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("PDF generation failed: {message}")]
    Pdf { message: String },

    #[error("feature not enabled: {feature}")]
    FeatureNotEnabled { feature: String },
}
