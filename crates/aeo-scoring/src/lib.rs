//! The seven weighted Category Scorers, content-type
//! reweighting, and the Score Calculator that composes them into a
//! `PageAudit`.

pub mod ai_citation;
pub mod answerability;
pub mod authority;
pub mod calculator;
pub mod citationability;
pub mod content_quality;
pub mod structured_data;
pub mod technical;
pub mod weights;

pub use ai_citation::{CitationProbe, CitationResponse};
pub use calculator::calculate;
