use serde::{Deserialize, Serialize};

/// One of four content types. A weighting axis, not a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Informational,
    Experiential,
    Transactional,
    Navigational,
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::Informational
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Output of the Content Classifier. Default on a low-signal page is
/// `informational/low`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentClassification {
    pub content_type: ContentType,
    pub confidence: Confidence,
    pub signals_matched: Vec<String>,
}

impl Default for ContentClassification {
    fn default() -> Self {
        Self {
            content_type: ContentType::Informational,
            confidence: Confidence::Low,
            signals_matched: Vec::new(),
        }
    }
}
