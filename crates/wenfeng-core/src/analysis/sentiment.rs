//! Lexicon-based sentiment scoring.
//!
//! Scoring sits behind [`SentimentScorer`] so a model-backed scorer can
//! replace the lexicon without touching the profile or the models that
//! consume it.

use crate::text;
use crate::word_lists::{NEGATIVE_TERMS, POSITIVE_TERMS};

use super::reports::{SentimentProfile, Tone};

/// Scores the emotional polarity of a text.
pub trait SentimentScorer: Send + Sync {
    /// Analyze `text`. Must not fail; text without signal scores 0.
    fn analyze(&self, text: &str) -> SentimentProfile;
}

/// Counts occurrences of positive and negative terms.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(POSITIVE_TERMS, NEGATIVE_TERMS)
    }
}

impl LexiconScorer {
    /// Build a scorer from custom term lists.
    pub fn new<S: AsRef<str>>(positive: &[S], negative: &[S]) -> Self {
        let owned = |terms: &[S]| {
            terms
                .iter()
                .map(|t| t.as_ref().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        };
        Self {
            positive: owned(positive),
            negative: owned(negative),
        }
    }

    /// Total non-overlapping occurrences of each term, summed over terms.
    fn hits(text: &str, terms: &[String]) -> usize {
        terms.iter().map(|term| text.matches(term.as_str()).count()).sum()
    }
}

impl SentimentScorer for LexiconScorer {
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn analyze(&self, text: &str) -> SentimentProfile {
        let positive = Self::hits(text, &self.positive);
        let negative = Self::hits(text, &self.negative);
        let total = positive + negative;

        let score = if total > 0 {
            (positive as f64 - negative as f64) / total as f64
        } else {
            0.0
        };

        SentimentProfile {
            sentiment_score: score,
            emotional_tone: Tone::from_score(score),
            positive_words: positive,
            negative_words: negative,
            neutral_words: text::char_len(text).saturating_sub(total),
        }
    }
}
