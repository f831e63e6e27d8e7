//! Lexical analysis: token frequency and vocabulary richness.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::{AnalysisError, AnalysisResult};
use crate::text;
use crate::tokenize::{JiebaTokenizer, Tokenizer};

use super::reports::LexicalProfile;

/// How many ranked words a profile keeps.
pub const PROFILE_TOP_WORDS: usize = 50;

/// Tokenizes text and measures its vocabulary.
#[derive(Clone)]
pub struct LexicalAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for LexicalAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexicalAnalyzer").finish_non_exhaustive()
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(JiebaTokenizer))
    }
}

impl LexicalAnalyzer {
    /// Create an analyzer backed by `tokenizer`.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    /// Tokenize `text`, dropping units that are only whitespace or punctuation.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|t| !text::is_blank_or_punctuation(t))
            .collect()
    }

    /// Analyze the vocabulary of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] when `text` is empty or
    /// whitespace-only.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> AnalysisResult<LexicalProfile> {
        if text.trim().is_empty() {
            return Err(AnalysisError::InvalidInput);
        }

        let tokens = self.tokenize(text);
        let ranked = rank_by_frequency(&tokens);
        let word_frequency: BTreeMap<String, usize> = ranked
            .iter()
            .map(|(word, count)| ((*word).to_string(), *count))
            .collect();

        let top_words = ranked
            .iter()
            .take(PROFILE_TOP_WORDS)
            .map(|(word, _)| (*word).to_string())
            .collect();

        tracing::debug!(
            total = tokens.len(),
            unique = ranked.len(),
            "lexical analysis complete"
        );

        Ok(LexicalProfile {
            total_tokens: tokens.len(),
            unique_tokens: ranked.len(),
            top_words,
            vocabulary_richness: type_token_ratio(&tokens),
            word_frequency,
        })
    }
}

/// Type-token ratio: distinct tokens over total tokens, 0 when there are none.
pub fn type_token_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let unique: std::collections::HashSet<&str> = tokens.iter().map(String::as_str).collect();
    unique.len() as f64 / tokens.len() as f64
}

/// Count tokens and order them by descending count.
///
/// The sort is stable over first-occurrence order, so equal counts keep the
/// order in which the words first appeared.
pub fn rank_by_frequency(tokens: &[String]) -> Vec<(&str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.as_str(), counts.len());
                counts.push((token.as_str(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
