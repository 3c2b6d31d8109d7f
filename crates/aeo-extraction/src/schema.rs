//! Schema extractor: parse every JSON-LD block,
//! flatten `@graph`, record FAQ pairs and per-type required-field
//! completeness.

use aeo_types::{FaqPair, FaqSchema, JsonLdObject};
use scraper::{Html, Selector};
use serde_json::Value as JsonValue;

/// Types and their required fields for completeness scoring.
const REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("article", &["headline", "author", "datePublished"]),
    ("blogposting", &["headline", "author", "datePublished"]),
    ("person", &["name"]),
    ("organization", &["name"]),
    ("faqpage", &["mainEntity"]),
    ("howto", &["name", "step"]),
    ("product", &["name", "offers"]),
];

pub fn extract_jsonld(document_html: &str) -> Vec<JsonLdObject> {
    let document = Html::parse_document(document_html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector");

    let mut objects = Vec::new();
    for script in document.select(&selector) {
        let raw: String = script.text().collect();
        let Ok(value) = serde_json::from_str::<JsonValue>(&raw) else {
            continue;
        };
        flatten_into(value, &mut objects);
    }
    objects
}

fn flatten_into(value: JsonValue, out: &mut Vec<JsonLdObject>) {
    match value {
        JsonValue::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        JsonValue::Object(ref map) if map.contains_key("@graph") => {
            if let Some(graph) = map.get("@graph").cloned() {
                flatten_into(graph, out);
            }
        }
        JsonValue::Object(ref map) => {
            let schema_type = match map.get("@type") {
                Some(JsonValue::String(s)) => vec![s.clone()],
                Some(JsonValue::Array(types)) => {
                    types.iter().filter_map(|t| t.as_str().map(str::to_string)).collect()
                }
                _ => Vec::new(),
            };
            if !schema_type.is_empty() {
                out.push(JsonLdObject {
                    schema_type,
                    value: value.clone(),
                });
            }
        }
        _ => {}
    }
}

/// FAQ Q/A pairs from any `FAQPage` object; a pair is valid when both
/// `name` and `acceptedAnswer.text` are non-empty.
pub fn extract_faq_schema(objects: &[JsonLdObject]) -> FaqSchema {
    let mut pairs = Vec::new();

    for obj in objects.iter().filter(|o| o.is_type("FAQPage")) {
        let Some(entities) = obj.get("mainEntity") else {
            continue;
        };
        let entities = match entities {
            JsonValue::Array(items) => items.clone(),
            other => vec![other.clone()],
        };
        for entity in entities {
            let question = entity.get("name").and_then(|v| v.as_str()).unwrap_or("").trim().to_string();
            let answer = entity
                .get("acceptedAnswer")
                .and_then(|a| a.get("text"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .trim()
                .to_string();
            let valid = !question.is_empty() && !answer.is_empty();
            pairs.push(FaqPair { question, answer, valid });
        }
    }

    let valid_count = pairs.iter().filter(|p| p.valid).count();
    FaqSchema { pairs, valid_count }
}

/// Fraction of required fields present for a JSON-LD object's declared
/// type(s), or `None` when the type has no required-field rule defined.
pub fn required_field_completeness(obj: &JsonLdObject) -> Option<f64> {
    for schema_type in &obj.schema_type {
        let key = schema_type.to_lowercase();
        if let Some((_, required)) = REQUIRED_FIELDS.iter().find(|(t, _)| *t == key) {
            let present = required.iter().filter(|f| field_is_present(obj, f)).count();
            return Some(present as f64 / required.len() as f64);
        }
    }
    None
}

fn field_is_present(obj: &JsonLdObject, field: &str) -> bool {
    match obj.get(field) {
        Some(JsonValue::String(s)) => !s.trim().is_empty(),
        Some(JsonValue::Null) | None => false,
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_graph_and_records_types() {
        let html = r#"<script type="application/ld+json">
            {"@graph": [{"@type": "Article", "headline": "Hi"}, {"@type": "Person", "name": "Jo"}]}
        </script>"#;
        let objects = extract_jsonld(html);
        assert_eq!(objects.len(), 2);
        assert!(objects.iter().any(|o| o.is_type("Article")));
        assert!(objects.iter().any(|o| o.is_type("Person")));
    }

    #[test]
    fn faq_pairs_require_both_question_and_answer_text() {
        let html = r#"<script type="application/ld+json">
            {"@type": "FAQPage", "mainEntity": [
                {"@type": "Question", "name": "What is this?", "acceptedAnswer": {"@type": "Answer", "text": "A thing."}},
                {"@type": "Question", "name": "", "acceptedAnswer": {"@type": "Answer", "text": ""}}
            ]}
        </script>"#;
        let objects = extract_jsonld(html);
        let faq = extract_faq_schema(&objects);
        assert_eq!(faq.pairs.len(), 2);
        assert_eq!(faq.valid_count, 1);
    }

    #[test]
    fn article_completeness_reflects_missing_required_fields() {
        let html = r#"<script type="application/ld+json">
            {"@type": "Article", "headline": "Hi"}
        </script>"#;
        let objects = extract_jsonld(html);
        let completeness = required_field_completeness(&objects[0]).unwrap();
        assert!((completeness - (1.0 / 3.0)).abs() < 1e-9);
    }
}
