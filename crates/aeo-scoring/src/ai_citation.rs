//! AI Citation scorer: how often an LLM
//! asked likely queries about this page would cite it, and how well the
//! model's paraphrase aligns with the page's own content.
//!
//! This category only runs when the operator supplies LLM clients; with
//! none configured it is a null-object returning a zero, unweighted score
//! so the other six categories fully account for the overall total.

use aeo_types::{CategoryScore, PageModel};

/// An LLM asked whether it would cite this page for a given prompt.
#[async_trait::async_trait]
pub trait CitationProbe: Send + Sync {
    async fn ask(&self, prompt: &str) -> anyhow::Result<CitationResponse>;
}

pub struct CitationResponse {
    pub cited: bool,
    /// 0.0-1.0 lexical/semantic overlap between the model's answer and the
    /// page's own main content, or `None` if the model declined to answer.
    pub alignment: Option<f64>,
}

/// Builds candidate prompts from the page's own questions, keywords and
/// H2 headings — the same material a reader would use to find this page.
pub fn build_probe_prompts(page: &PageModel, max_prompts: usize) -> Vec<String> {
    let mut prompts: Vec<String> = page.questions.iter().map(|q| q.text.clone()).collect();

    for heading in page.headings.iter().filter(|h| h.level == 2) {
        prompts.push(format!("What does this page say about {}?", heading.text));
    }

    for keyword in &page.main_keywords {
        prompts.push(format!("What is {}?", keyword));
    }

    prompts.truncate(max_prompts);
    prompts
}

pub async fn score(page: &PageModel, probes: &[Box<dyn CitationProbe>]) -> CategoryScore {
    let mut score = CategoryScore::new(5.0);

    if probes.is_empty() {
        return score;
    }

    let prompts = build_probe_prompts(page, 10);
    if prompts.is_empty() {
        return score;
    }

    let mut citations = 0usize;
    let mut alignment_sum = 0.0;
    let mut alignment_samples = 0usize;
    let mut total = 0usize;

    for probe in probes {
        for prompt in &prompts {
            total += 1;
            let Ok(response) = probe.ask(prompt).await else {
                continue;
            };
            if response.cited {
                citations += 1;
            }
            if let Some(alignment) = response.alignment {
                alignment_sum += alignment;
                alignment_samples += 1;
            }
        }
    }

    if total == 0 {
        return score;
    }

    let citation_rate = citations as f64 / total as f64;
    let alignment = if alignment_samples > 0 {
        alignment_sum / alignment_samples as f64
    } else {
        0.0
    };

    let citation_points = (citation_rate / 0.1 * 3.0).min(3.0);
    let alignment_points = alignment * 2.0;

    score.add("citation_rate", citation_points);
    score.add("alignment", alignment_points);

    score.clamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::{Heading, Question, QuestionSource};

    struct AlwaysCites;

    #[async_trait::async_trait]
    impl CitationProbe for AlwaysCites {
        async fn ask(&self, _prompt: &str) -> anyhow::Result<CitationResponse> {
            Ok(CitationResponse { cited: true, alignment: Some(0.9) })
        }
    }

    #[test]
    fn build_probe_prompts_combines_questions_headings_and_keywords() {
        let mut page = PageModel::empty("https://example.com/");
        page.questions.push(Question {
            text: "What is AEO?".into(),
            source: QuestionSource::Heading,
            answer: None,
        });
        page.headings.push(Heading { level: 2, text: "Pricing".into(), id: None });
        page.main_keywords.push("optimization".into());

        let prompts = build_probe_prompts(&page, 10);
        assert!(prompts.iter().any(|p| p.contains("AEO")));
        assert!(prompts.iter().any(|p| p.contains("Pricing")));
        assert!(prompts.iter().any(|p| p.contains("optimization")));
    }

    #[tokio::test]
    async fn no_probes_configured_yields_zero_score() {
        let page = PageModel::empty("https://example.com/");
        let probes: Vec<Box<dyn CitationProbe>> = Vec::new();
        let result = score(&page, &probes).await;
        assert_eq!(result.raw, 0.0);
    }

    #[tokio::test]
    async fn always_cited_with_high_alignment_scores_near_max() {
        let mut page = PageModel::empty("https://example.com/");
        page.questions.push(Question {
            text: "What is AEO?".into(),
            source: QuestionSource::Heading,
            answer: None,
        });
        let probes: Vec<Box<dyn CitationProbe>> = vec![Box::new(AlwaysCites)];
        let result = score(&page, &probes).await;
        assert!(result.raw > 4.0);
    }
}
