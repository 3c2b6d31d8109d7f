//! Answerability scorer: how directly the page
//! answers a likely query — first-paragraph shape, question coverage,
//! conciseness, formatting.

use aeo_types::{AnswerPatternKind, CategoryScore, PageModel};

pub fn score(page: &PageModel) -> CategoryScore {
    let mut score = CategoryScore::new(30.0);

    score.add("direct_answer_presence", direct_answer_presence(page));
    score.add("question_coverage", question_coverage(page));
    score.add("conciseness", conciseness(page));
    score.add("formatting", formatting(page));

    score.clamp()
}

fn direct_answer_presence(page: &PageModel) -> f64 {
    let mut value = match page.paragraphs.first() {
        Some(p) if (50..=200).contains(&p.word_count) => 6.0,
        Some(_) => 3.0,
        None => 0.0,
    };
    let pattern_points = (page.answer_patterns.len() as f64) * 2.0;
    value += pattern_points.min(6.0);
    value.min(12.0)
}

fn question_coverage(page: &PageModel) -> f64 {
    let h2_h3 = page.heading_count(2) + page.heading_count(3);
    let mut value = (page.questions.len() as f64 * 0.8) + (h2_h3 as f64 * 0.5);
    value = value.min(8.0);
    if page.faq_schema.valid_count >= 3 {
        value += 3.0;
    }
    value
}

fn conciseness(page: &PageModel) -> f64 {
    let mut value = 0.0;

    let qualifying_lists = page.lists.iter().filter(|l| l.items.len() >= 3).count();
    value += (qualifying_lists as f64 * 2.0).min(3.0);

    if page.answer_patterns.iter().any(|p| p.kind == AnswerPatternKind::Tldr) {
        value += 2.0;
    }

    if page.paragraphs.len() >= 3 {
        let avg = page.paragraphs.iter().map(|p| p.word_count).sum::<usize>() as f64
            / page.paragraphs.len() as f64;
        if avg <= 150.0 {
            value += 2.0;
        }
    }

    value
}

fn formatting(page: &PageModel) -> f64 {
    let mut value = 0.0;

    let h2_h3 = page.heading_count(2) + page.heading_count(3);
    if page.h1_count() >= 1 && h2_h3 >= 3 {
        value += 2.0;
    }

    let emphasis_count = page.paragraphs.iter().filter(|p| p.has_emphasis).count();
    if emphasis_count >= 3 {
        value += 1.0;
    }

    let has_callout_or_quote = page
        .answer_patterns
        .iter()
        .any(|p| matches!(p.kind, AnswerPatternKind::Callout | AnswerPatternKind::Blockquote));
    if has_callout_or_quote {
        value += 1.0;
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::{AnswerPattern, Heading, Paragraph};

    fn base_page() -> PageModel {
        PageModel::empty("https://example.com/")
    }

    #[test]
    fn ideal_first_paragraph_gets_full_direct_answer_points() {
        let mut page = base_page();
        page.paragraphs.push(Paragraph {
            text: "word ".repeat(100),
            word_count: 100,
            has_emphasis: false,
        });
        let result = score(&page);
        assert!(result.sub_scores["direct_answer_presence"] >= 6.0);
    }

    #[test]
    fn faq_bonus_requires_three_valid_pairs() {
        let mut page = base_page();
        page.faq_schema.valid_count = 3;
        page.headings.push(Heading { level: 2, text: "Q".into(), id: None });
        let result = score(&page);
        assert!(result.sub_scores["question_coverage"] >= 3.0);
    }

    #[test]
    fn tldr_pattern_contributes_to_conciseness() {
        let mut page = base_page();
        page.answer_patterns.push(AnswerPattern {
            kind: AnswerPatternKind::Tldr,
            text: "short".into(),
        });
        let result = score(&page);
        assert!(result.sub_scores["conciseness"] >= 2.0);
    }

    #[test]
    fn score_never_exceeds_category_max() {
        let mut page = base_page();
        for _ in 0..10 {
            page.answer_patterns.push(AnswerPattern {
                kind: AnswerPatternKind::Tldr,
                text: "x".into(),
            });
        }
        let result = score(&page);
        assert!(result.raw <= 30.0);
    }
}
