//! Shared data model for the AEO/GEO audit core.
//!
//! Every type here is a closed record with typed optional fields rather
//! than an untyped dictionary passed between stages: a strongly typed
//! pipeline (`FetchResult -> PageModel -> ContentClassification ->
//! PageAudit -> DomainAudit`).

pub mod classification;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod job;
pub mod page;
pub mod scoring;

pub use classification::{ContentType, Confidence, ContentClassification};
pub use config::*;
pub use domain::*;
pub use error::AeoError;
pub use fetch::*;
pub use job::*;
pub use page::*;
pub use scoring::*;
