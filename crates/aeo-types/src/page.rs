use crate::fetch::PerformanceMetrics;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single heading in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    /// 1–6.
    pub level: u8,
    pub text: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub word_count: usize,
    pub has_emphasis: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBlock {
    pub ordered: bool,
    pub items: Vec<String>,
    pub parent_heading: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub caption: Option<String>,
}

impl TableBlock {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBlock {
    pub src: String,
    pub alt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub decorative: bool,
}

impl ImageBlock {
    pub fn has_alt(&self) -> bool {
        self.alt.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}

/// Where a detected question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Heading,
    Inline,
    FaqSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub source: QuestionSource,
    pub answer: Option<String>,
}

/// A typed structural "direct answer" pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPatternKind {
    Tldr,
    DefinitionBox,
    Blockquote,
    Callout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPattern {
    pub kind: AnswerPatternKind,
    pub text: String,
}

/// A flattened JSON-LD object, with `@graph` expanded into individual entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonLdObject {
    pub schema_type: Vec<String>,
    pub value: JsonValue,
}

impl JsonLdObject {
    pub fn is_type(&self, t: &str) -> bool {
        self.schema_type.iter().any(|s| s.eq_ignore_ascii_case(t))
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.value.get(field)
    }

    pub fn string_field(&self, field: &str) -> Option<String> {
        self.get(field).and_then(|v| v.as_str()).map(|s| s.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqPair {
    pub question: String,
    pub answer: String,
    pub valid: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqSchema {
    pub pairs: Vec<FaqPair>,
    pub valid_count: usize,
}

/// Source that produced a given piece of metadata, kept alongside the value
/// so scorers can distinguish structured (JSON-LD) from weaker (byline text)
/// signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    JsonLd,
    MetaTag,
    RelAuthor,
    BylineText,
    ArticleMeta,
    TimeElement,
    Unparseable,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub found: bool,
    pub name: Option<String>,
    pub url: Option<String>,
    pub bio: Option<String>,
    pub sources: Vec<FieldSource>,
}

impl AuthorInfo {
    pub fn is_structured(&self) -> bool {
        self.sources.contains(&FieldSource::JsonLd)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateInfo {
    pub published: Option<chrono::DateTime<chrono::Utc>>,
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    pub sources: Vec<FieldSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMeta {
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub viewport: Option<String>,
    pub og: std::collections::BTreeMap<String, String>,
    pub twitter: std::collections::BTreeMap<String, String>,
    pub aeo_content_type: Option<String>,
}

/// The strongly typed page model produced by the Extractors and consumed by
/// the Content Classifier and Category Scorers.
///
/// Invariants: `word_count` counts main-content words only (nav/footer/
/// aside/script/style already stripped by the Parser); `headings` preserves
/// document order; `jsonld` is a flat list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageModel {
    pub url: String,
    pub title: Option<String>,
    pub meta: PageMeta,

    pub headings: Vec<Heading>,
    pub paragraphs: Vec<Paragraph>,
    pub lists: Vec<ListBlock>,
    pub tables: Vec<TableBlock>,
    pub images: Vec<ImageBlock>,

    pub questions: Vec<Question>,
    pub answer_patterns: Vec<AnswerPattern>,
    pub main_keywords: Vec<String>,

    pub jsonld: Vec<JsonLdObject>,
    pub microdata_present: bool,
    pub rdfa_present: bool,
    pub faq_schema: FaqSchema,

    pub author: AuthorInfo,
    pub dates: DateInfo,

    pub external_links: Vec<String>,
    pub internal_links_count: usize,

    pub word_count: usize,
    pub is_https: bool,

    pub performance: PerformanceMetrics,

    /// Count of distinct semantic landmark tags present (article, section,
    /// header, footer).
    pub semantic_tag_count: usize,
    /// Whether a responsive-design signal (viewport meta, or an `@media`
    /// rule in an inline stylesheet) was detected.
    pub responsive_css_detected: bool,
}

impl PageModel {
    /// Near-empty model used when fetching failed outright.
    pub fn empty(url: impl Into<String>) -> Self {
        let url = url.into();
        let is_https = url.starts_with("https://");
        Self {
            url,
            title: None,
            meta: PageMeta::default(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            lists: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
            questions: Vec::new(),
            answer_patterns: Vec::new(),
            main_keywords: Vec::new(),
            jsonld: Vec::new(),
            microdata_present: false,
            rdfa_present: false,
            faq_schema: FaqSchema::default(),
            author: AuthorInfo::default(),
            dates: DateInfo::default(),
            external_links: Vec::new(),
            internal_links_count: 0,
            word_count: 0,
            is_https,
            performance: PerformanceMetrics::default(),
            semantic_tag_count: 0,
            responsive_css_detected: false,
        }
    }

    pub fn heading_count(&self, level: u8) -> usize {
        self.headings.iter().filter(|h| h.level == level).count()
    }

    pub fn h1_count(&self) -> usize {
        self.heading_count(1)
    }

    pub fn h2_count(&self) -> usize {
        self.heading_count(2)
    }

    pub fn h3_count(&self) -> usize {
        self.heading_count(3)
    }
}
