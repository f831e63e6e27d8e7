//! Profile structs produced by the analyzers.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! use in both CLI JSON output and MCP tool responses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Full analysis of one text: the three analyzer outputs plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextAnalysis {
    /// Lexical statistics.
    pub vocabulary: LexicalProfile,
    /// Sentence structure statistics.
    pub syntax: SyntacticProfile,
    /// Lexicon-based polarity.
    pub sentiment: SentimentProfile,
    /// When and on how much text the analysis ran.
    pub metadata: AnalysisMetadata,
}

/// Metadata stamped on every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisMetadata {
    /// Length of the analyzed text in characters.
    pub text_length: usize,
    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
}

// -- Lexical ----------------------------------------------------------------

/// Vocabulary statistics for a text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LexicalProfile {
    /// Number of lexical units after filtering punctuation and whitespace.
    pub total_tokens: usize,
    /// Number of distinct lexical units.
    pub unique_tokens: usize,
    /// Most frequent units, most frequent first; ties keep first-occurrence order.
    pub top_words: Vec<String>,
    /// Type-token ratio (`unique_tokens / total_tokens`), 0 for no tokens.
    pub vocabulary_richness: f64,
    /// Count of every lexical unit.
    pub word_frequency: BTreeMap<String, usize>,
}

// -- Syntactic --------------------------------------------------------------

/// Sentence structure statistics for a text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SyntacticProfile {
    /// Number of sentences.
    pub sentence_count: usize,
    /// Mean sentence length in characters.
    pub avg_sentence_length: f64,
    /// Population standard deviation of sentence length.
    pub std_deviation: f64,
    /// Shortest sentence in characters.
    pub min_length: usize,
    /// Longest sentence in characters.
    pub max_length: usize,
    /// Share of short, medium, and long sentences.
    pub length_distribution: LengthDistribution,
    /// Share of each tracked punctuation mark among all tracked marks.
    pub punctuation_style: BTreeMap<String, f64>,
    /// Raw count of each tracked punctuation mark.
    pub punctuation_counts: BTreeMap<String, usize>,
}

/// Fractions of sentences per length bucket.
///
/// Sums to 1 when built from at least one sentence, all zero otherwise.
/// Missing buckets deserialize as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LengthDistribution {
    /// Sentences of at most 10 characters.
    pub short: f64,
    /// Sentences of 11 to 25 characters.
    pub medium: f64,
    /// Sentences longer than 25 characters.
    pub long: f64,
}

impl LengthDistribution {
    /// Sum of absolute per-bucket differences (L1 distance, at most 2).
    pub fn l1_distance(&self, other: &Self) -> f64 {
        (self.short - other.short).abs()
            + (self.medium - other.medium).abs()
            + (self.long - other.long).abs()
    }

    /// The three buckets paired with their share.
    pub const fn buckets(&self) -> [(LengthBucket, f64); 3] {
        [
            (LengthBucket::Short, self.short),
            (LengthBucket::Medium, self.medium),
            (LengthBucket::Long, self.long),
        ]
    }
}

/// Sentence length category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LengthBucket {
    /// At most 10 characters.
    Short,
    /// 11 to 25 characters.
    Medium,
    /// More than 25 characters.
    Long,
}

impl LengthBucket {
    /// Classify a sentence length. Boundaries belong to the shorter bucket.
    pub const fn categorize(length: usize) -> Self {
        if length <= 10 {
            Self::Short
        } else if length <= 25 {
            Self::Medium
        } else {
            Self::Long
        }
    }

    /// Returns the bucket name as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl std::fmt::Display for LengthBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// -- Sentiment --------------------------------------------------------------

/// Lexicon-based polarity of a text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentProfile {
    /// Net polarity in `[-1, 1]`: `(positive - negative) / (positive + negative)`.
    pub sentiment_score: f64,
    /// Categorical tone derived from the score.
    pub emotional_tone: Tone,
    /// Positive lexicon hits.
    pub positive_words: usize,
    /// Negative lexicon hits.
    pub negative_words: usize,
    /// Text length in characters minus all lexicon hits.
    ///
    /// This mixes character and term units. It is a coarse approximation
    /// kept for compatibility with existing profiles, not a token count.
    pub neutral_words: usize,
}

/// Categorical emotional tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Score above 0.3.
    Positive,
    /// Score below -0.3.
    Negative,
    /// Anything in between.
    #[default]
    Neutral,
}

impl Tone {
    /// Map a sentiment score to a tone.
    pub fn from_score(score: f64) -> Self {
        if score > 0.3 {
            Self::Positive
        } else if score < -0.3 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Returns the tone as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_are_inclusive_below() {
        assert_eq!(LengthBucket::categorize(0), LengthBucket::Short);
        assert_eq!(LengthBucket::categorize(10), LengthBucket::Short);
        assert_eq!(LengthBucket::categorize(11), LengthBucket::Medium);
        assert_eq!(LengthBucket::categorize(25), LengthBucket::Medium);
        assert_eq!(LengthBucket::categorize(26), LengthBucket::Long);
    }

    #[test]
    fn tone_thresholds() {
        assert_eq!(Tone::from_score(0.31), Tone::Positive);
        assert_eq!(Tone::from_score(0.3), Tone::Neutral);
        assert_eq!(Tone::from_score(-0.3), Tone::Neutral);
        assert_eq!(Tone::from_score(-0.31), Tone::Negative);
    }

    #[test]
    fn l1_distance_example() {
        let candidate = LengthDistribution {
            short: 0.2,
            medium: 0.6,
            long: 0.2,
        };
        let target = LengthDistribution {
            short: 0.3,
            medium: 0.5,
            long: 0.2,
        };
        assert!((candidate.l1_distance(&target) - 0.2).abs() < 1e-9);
        assert!((target.l1_distance(&candidate) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn tone_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tone::Negative).unwrap(), "\"negative\"");
    }
}
