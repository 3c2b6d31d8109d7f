pub mod circuit;
pub mod engine;
pub mod http;
pub mod quality;

pub use engine::{AdaptiveFetcher, Renderer};
pub use http::{ReliableHttpClient, RetryConfig};
pub use quality::{passes_quality_gate, quality_score, PASS_THRESHOLD};
