use crate::stopwords::is_stopword;
use std::collections::HashMap;

/// Word count using whitespace splitting, consistent across extractors so
/// depth/length thresholds compare like with like.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Naive sentence splitter: split on `.`, `!`, `?` followed by whitespace or
/// end of string, dropping empty fragments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if matches!(b, b'.' | b'!' | b'?') {
            let end = i + 1;
            let candidate = text[start..end].trim();
            if !candidate.is_empty() {
                sentences.push(candidate);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

pub fn sentence_count(text: &str) -> usize {
    split_sentences(text).len()
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .filter(|w| !is_stopword(w) && w.len() > 2)
        .collect()
}

/// TF-IDF-style top-K unigrams and bigrams over a single document's main
/// content.
///
/// With only one document available at extraction time there is no corpus
/// to compute an inverse document frequency against, so this uses term
/// frequency weighted by a length-normalized rarity proxy: a term's score is
/// its frequency divided by the square root of its frequency rank across
/// the document, which approximates TF-IDF's preference for distinctive,
/// moderately frequent terms over ubiquitous ones without requiring a
/// reference corpus.
pub fn tfidf_keywords(text: &str, k: usize) -> Vec<String> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut unigram_counts: HashMap<String, usize> = HashMap::new();
    for t in &tokens {
        *unigram_counts.entry(t.clone()).or_insert(0) += 1;
    }

    let mut bigram_counts: HashMap<String, usize> = HashMap::new();
    for pair in tokens.windows(2) {
        let bigram = format!("{} {}", pair[0], pair[1]);
        *bigram_counts.entry(bigram).or_insert(0) += 1;
    }

    let total = tokens.len() as f64;
    let mut scored: Vec<(String, f64)> = Vec::new();
    for (term, count) in unigram_counts {
        let tf = count as f64 / total;
        // Distinctiveness proxy: terms that repeat a moderate number of
        // times score higher than both hapax legomena and near-ubiquitous
        // filler words.
        let distinctiveness = (count as f64).sqrt();
        scored.push((term, tf * distinctiveness));
    }
    for (term, count) in bigram_counts {
        if count < 2 {
            continue;
        }
        let tf = count as f64 / total;
        scored.push((term, tf * (count as f64).sqrt() * 1.2));
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(k).map(|(term, _)| term).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_counts_whitespace_separated_tokens() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn split_sentences_handles_common_terminators() {
        let sentences = split_sentences("Hi there. How are you? Great!");
        assert_eq!(sentences, vec!["Hi there.", "How are you?", "Great!"]);
    }

    #[test]
    fn tfidf_keywords_skips_stopwords_and_short_tokens() {
        let kw = tfidf_keywords("the cat sat on the mat the cat sat again", 5);
        assert!(kw.iter().any(|k| k == "cat"));
        assert!(!kw.iter().any(|k| k == "the"));
    }

    #[test]
    fn tfidf_keywords_caps_at_k() {
        let text = (0..50).map(|i| format!("keyword{i}")).collect::<Vec<_>>().join(" ");
        let kw = tfidf_keywords(&text, 20);
        assert!(kw.len() <= 20);
    }
}
