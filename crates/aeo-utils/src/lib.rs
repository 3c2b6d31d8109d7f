//! Text and URL helpers shared by the extraction and scoring crates.

pub mod stopwords;
pub mod text;
pub mod urlutil;

pub use stopwords::is_stopword;
pub use text::{sentence_count, split_sentences, tfidf_keywords, word_count};
pub use urlutil::{is_same_registrable_domain, registrable_domain};
