//! Semantic extractor: question/answer pairs,
//! TL;DR-style answer patterns, and top-K keywords over the main content.

use aeo_html::element_text;
use aeo_types::{AnswerPattern, AnswerPatternKind, Question, QuestionSource};
use aeo_utils::tfidf_keywords;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

const MAIN_KEYWORDS_K: usize = 20;
const ANSWER_SNIPPET_MAX_CHARS: usize = 500;

static QUESTION_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(How|What|Why|When|Where|Who|Which|Can|Is|Does|Do|Will|Should|Are)\b").unwrap()
});

static TLDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(tl;?dr|in short|quick answer)\b").unwrap());

static CALLOUT_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)definition|callout|highlight|answer-box").unwrap());

fn is_question_heading(text: &str) -> bool {
    text.trim_end().ends_with('?') || QUESTION_START_RE.is_match(text.trim())
}

/// Every h2–h4 that reads as a question, paired with the sibling content up
/// to the next heading.
pub fn extract_questions(main_content_html: &str) -> Vec<Question> {
    let document = Html::parse_fragment(main_content_html);
    let heading_selector = Selector::parse("h2,h3,h4").expect("static selector");
    let any_heading_selector = Selector::parse("h1,h2,h3,h4,h5,h6").expect("static selector");

    let mut questions = Vec::new();
    let heading_ids: Vec<_> = document
        .select(&heading_selector)
        .filter(|el| is_question_heading(&element_text(el)))
        .map(|el| el.id())
        .collect();

    for heading_id in heading_ids {
        let Some(heading_node) = document.tree.get(heading_id) else {
            continue;
        };
        let heading_el = scraper::ElementRef::wrap(heading_node).expect("heading node is element");
        let text = element_text(&heading_el);

        let mut answer = String::new();
        let mut sibling = heading_node.next_sibling();
        while let Some(node) = sibling {
            if let Some(el) = scraper::ElementRef::wrap(node) {
                if any_heading_selector.matches(&el) {
                    break;
                }
                answer.push_str(&element_text(&el));
                answer.push(' ');
            }
            sibling = node.next_sibling();
        }
        let answer: String = answer.trim().chars().take(ANSWER_SNIPPET_MAX_CHARS).collect();

        questions.push(Question {
            text,
            source: QuestionSource::Heading,
            answer: if answer.is_empty() { None } else { Some(answer) },
        });
    }

    questions
}

/// TL;DR boxes, definition/callout boxes, and blockquotes.
pub fn extract_answer_patterns(main_content_html: &str) -> Vec<AnswerPattern> {
    let document = Html::parse_fragment(main_content_html);
    let mut patterns = Vec::new();

    let block_selector = Selector::parse("p,div").expect("static selector");
    for el in document.select(&block_selector) {
        let text = element_text(&el);
        if text.is_empty() {
            continue;
        }
        if TLDR_RE.is_match(&text) {
            patterns.push(AnswerPattern {
                kind: AnswerPatternKind::Tldr,
                text,
            });
            continue;
        }
        let classes: Vec<String> = el.value().classes().map(str::to_string).collect();
        if classes.iter().any(|c| CALLOUT_CLASS_RE.is_match(c)) {
            patterns.push(AnswerPattern {
                kind: AnswerPatternKind::DefinitionBox,
                text,
            });
        }
    }

    let quote_selector = Selector::parse("blockquote").expect("static selector");
    for el in document.select(&quote_selector) {
        let text = element_text(&el);
        if !text.is_empty() {
            patterns.push(AnswerPattern {
                kind: AnswerPatternKind::Blockquote,
                text,
            });
        }
    }

    patterns
}

pub fn extract_main_keywords(main_content_text: &str) -> Vec<String> {
    tfidf_keywords(main_content_text, MAIN_KEYWORDS_K)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_question_heading_by_mark() {
        let html = "<h2>Is this worth it?</h2><p>Yes, absolutely, for these reasons.</p>";
        let questions = extract_questions(html);
        assert_eq!(questions.len(), 1);
        assert!(questions[0].answer.as_deref().unwrap().contains("Yes"));
    }

    #[test]
    fn detects_question_heading_by_start_word() {
        let html = "<h3>How do I reset my password</h3><p>Go to settings and click reset.</p>";
        let questions = extract_questions(html);
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn detects_tldr_pattern() {
        let html = "<p>TL;DR: this product works great for most people.</p>";
        let patterns = extract_answer_patterns(html);
        assert!(patterns.iter().any(|p| p.kind == AnswerPatternKind::Tldr));
    }

    #[test]
    fn detects_blockquote_pattern() {
        let html = "<blockquote>Quoted wisdom here.</blockquote>";
        let patterns = extract_answer_patterns(html);
        assert!(patterns.iter().any(|p| p.kind == AnswerPatternKind::Blockquote));
    }
}
