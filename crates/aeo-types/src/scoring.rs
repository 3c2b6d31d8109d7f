use crate::classification::ContentClassification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The seven scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(clippy::enum_variant_names)]
pub enum Category {
    Answerability,
    StructuredData,
    Authority,
    ContentQuality,
    Citationability,
    Technical,
    AiCitation,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Answerability,
        Category::StructuredData,
        Category::Authority,
        Category::ContentQuality,
        Category::Citationability,
        Category::Technical,
        Category::AiCitation,
    ];

    /// Base max-points before content-type reweighting.
    pub fn base_max(self) -> f64 {
        match self {
            Category::Answerability => 30.0,
            Category::StructuredData => 15.0,
            Category::Authority => 18.0,
            Category::ContentQuality => 15.0,
            Category::Citationability => 12.0,
            Category::Technical => 10.0,
            Category::AiCitation => 5.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Answerability => "answerability",
            Category::StructuredData => "structured_data",
            Category::Authority => "authority",
            Category::ContentQuality => "content_quality",
            Category::Citationability => "citationability",
            Category::Technical => "technical",
            Category::AiCitation => "ai_citation",
        }
    }
}

/// A scorer's output: PageModel in, CategoryScore out.
///
/// Invariant: `0 <= raw <= max`; the values in `sub_scores` sum to `raw`
/// within 0.5 (floating-point tolerance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub raw: f64,
    pub max: f64,
    pub sub_scores: BTreeMap<String, f64>,
}

impl CategoryScore {
    pub fn new(max: f64) -> Self {
        Self {
            raw: 0.0,
            max,
            sub_scores: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, name: &str, value: f64) {
        *self.sub_scores.entry(name.to_string()).or_insert(0.0) += value;
        self.raw += value;
    }

    /// Clamp raw into `[0, max]`. Sub-rules are written to respect the cap
    /// already, but this guards against accumulation drift.
    pub fn clamp(mut self) -> Self {
        self.raw = self.raw.clamp(0.0, self.max);
        self
    }

    pub fn percentage(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.raw / self.max * 100.0).clamp(0.0, 100.0)
        }
    }
}

/// Letter grade derived from the overall 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Grade::APlus,
            s if s >= 85.0 => Grade::A,
            s if s >= 80.0 => Grade::AMinus,
            s if s >= 75.0 => Grade::BPlus,
            s if s >= 70.0 => Grade::B,
            s if s >= 65.0 => Grade::BMinus,
            s if s >= 60.0 => Grade::CPlus,
            s if s >= 55.0 => Grade::C,
            s if s >= 50.0 => Grade::CMinus,
            _ => Grade::F,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::F => "F",
        }
    }
}

impl Serialize for Grade {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Grade::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Grade {
    fn from_str(s: &str) -> Result<Self, String> {
        Ok(match s {
            "A+" => Grade::APlus,
            "A" => Grade::A,
            "A-" => Grade::AMinus,
            "B+" => Grade::BPlus,
            "B" => Grade::B,
            "B-" => Grade::BMinus,
            "C+" => Grade::CPlus,
            "C" => Grade::C,
            "C-" => Grade::CMinus,
            "F" => Grade::F,
            other => return Err(format!("unrecognized grade: {other}")),
        })
    }
}

/// A category's contribution to the final breakdown, weighted and
/// renormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub score: CategoryScore,
    pub weight: f64,
    pub percentage: f64,
}

/// Single-page audit result, the canonical output of the Score Calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAudit {
    pub url: String,
    pub overall_score: f64,
    pub grade: Grade,
    pub content_classification: ContentClassification,
    pub breakdown: BTreeMap<Category, BreakdownEntry>,
    pub fetched_at: DateTime<Utc>,
}
