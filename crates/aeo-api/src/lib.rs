//! HTTP surface for the AEO/GEO audit core.
//!
//! The core never constructs its own HTTP clients or servers; this crate is
//! the only place that does, gluing `aeo-domain`'s orchestrator and
//! `aeo-fetch`'s adaptive fetcher onto an axum router.

pub mod config;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod llm;
pub mod pdf;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use routes::build_router;
pub use state::AppState;
