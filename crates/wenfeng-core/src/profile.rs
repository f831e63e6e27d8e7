//! Persisted style profiles.
//!
//! [`StyleProfile`] is what the learner writes: a complete, typed snapshot of
//! one sample's style. [`TargetProfile`] is what the scoring models read: the
//! same shape with every field optional, so hand-written or older profiles
//! still work. Each missing field resolves to a fixed default through an
//! accessor method.

use std::collections::BTreeMap;

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::analysis::reports::{LengthDistribution, TextAnalysis, Tone};
use crate::confidence::{ConfidenceReport, SampleFeatures, SampleStats};
use crate::error::{ProfileError, ProfileResult};

/// A learned style profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StyleProfile {
    /// Name given when learning.
    pub style_name: String,
    /// When the profile was learned.
    pub analysis_date: DateTime<Utc>,
    /// Length of the sample in characters.
    pub sample_word_count: usize,
    /// Vocabulary features.
    pub vocabulary: VocabularyFeatures,
    /// Sentence structure features.
    pub syntax: SyntaxFeatures,
    /// Sentiment features.
    pub sentiment: SentimentFeatures,
    /// Confidence grade, once calculated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceReport>,
}

/// Vocabulary group of a [`StyleProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VocabularyFeatures {
    /// Most frequent words, most frequent first.
    pub top_words: Vec<String>,
    /// Type-token ratio.
    pub vocabulary_richness: f64,
    /// Token count.
    pub total_tokens: usize,
    /// Distinct token count.
    pub unique_tokens: usize,
    /// Count of every token.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub word_frequency: BTreeMap<String, usize>,
}

/// Syntax group of a [`StyleProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SyntaxFeatures {
    /// Mean sentence length in characters.
    pub avg_sentence_length: f64,
    /// Share of short, medium, and long sentences.
    pub length_distribution: LengthDistribution,
    /// Population standard deviation of sentence length.
    pub std_deviation: f64,
    /// Share of each tracked punctuation mark.
    pub punctuation_style: BTreeMap<String, f64>,
}

/// Sentiment group of a [`StyleProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentFeatures {
    /// Categorical tone.
    pub emotional_tone: Tone,
    /// Net polarity in `[-1, 1]`.
    pub sentiment_score: f64,
}

impl StyleProfile {
    /// Build an unrated profile from an analysis of the sample.
    pub fn from_analysis(style_name: impl Into<String>, analysis: &TextAnalysis) -> Self {
        let vocabulary = &analysis.vocabulary;
        let syntax = &analysis.syntax;
        Self {
            style_name: style_name.into(),
            analysis_date: Utc::now(),
            sample_word_count: analysis.metadata.text_length,
            vocabulary: VocabularyFeatures {
                top_words: vocabulary.top_words.clone(),
                vocabulary_richness: vocabulary.vocabulary_richness,
                total_tokens: vocabulary.total_tokens,
                unique_tokens: vocabulary.unique_tokens,
                word_frequency: vocabulary.word_frequency.clone(),
            },
            syntax: SyntaxFeatures {
                avg_sentence_length: syntax.avg_sentence_length,
                length_distribution: syntax.length_distribution,
                std_deviation: syntax.std_deviation,
                punctuation_style: syntax.punctuation_style.clone(),
            },
            sentiment: SentimentFeatures {
                emotional_tone: analysis.sentiment.emotional_tone,
                sentiment_score: analysis.sentiment.sentiment_score,
            },
            confidence: None,
        }
    }

    /// Sample statistics recorded in this profile, for (re-)grading.
    pub fn sample_stats(&self) -> SampleStats {
        SampleStats {
            word_count: self.sample_word_count,
            features: Some(SampleFeatures {
                vocabulary_richness: Some(self.vocabulary.vocabulary_richness),
                std_deviation: Some(self.syntax.std_deviation),
            }),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> ProfileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the profile to `path` as JSON.
    pub fn save(&self, path: &Utf8Path) -> ProfileResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path, "profile saved");
        Ok(())
    }

    /// Read a profile written by [`StyleProfile::save`].
    pub fn load(path: &Utf8Path) -> ProfileResult<Self> {
        let json = read_profile(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn read_profile(path: &Utf8Path) -> ProfileResult<String> {
    std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize a field, treating any value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// A style profile whose fields may be missing or malformed.
///
/// Accepts full [`StyleProfile`] JSON as well as partial, hand-written, or
/// camelCase profiles. Fields of the wrong type are dropped instead of
/// failing the whole document. Read resolved values through the accessor
/// methods, which supply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Name of the style.
    #[serde(
        default,
        alias = "styleName",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub style_name: Option<String>,
    /// Vocabulary group.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<TargetVocabulary>,
    /// Syntax group.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub syntax: Option<TargetSyntax>,
    /// Sentiment group.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<TargetSentiment>,
}

/// Vocabulary group of a [`TargetProfile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetVocabulary {
    /// Most frequent words.
    #[serde(
        default,
        alias = "topWords",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub top_words: Option<Vec<String>>,
    /// Type-token ratio.
    #[serde(
        default,
        alias = "vocabularyRichness",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub vocabulary_richness: Option<f64>,
}

/// Syntax group of a [`TargetProfile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSyntax {
    /// Mean sentence length.
    #[serde(
        default,
        alias = "avgSentenceLength",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub avg_sentence_length: Option<f64>,
    /// Sentence length distribution.
    #[serde(
        default,
        alias = "lengthDistribution",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub length_distribution: Option<LengthDistribution>,
    /// Standard deviation of sentence length.
    #[serde(
        default,
        alias = "stdDeviation",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub std_deviation: Option<f64>,
}

/// Sentiment group of a [`TargetProfile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSentiment {
    /// Categorical tone.
    #[serde(
        default,
        alias = "emotionalTone",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub emotional_tone: Option<Tone>,
    /// Net polarity.
    #[serde(
        default,
        alias = "sentimentScore",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment_score: Option<f64>,
}

/// Fallback sentence length distribution for targets without one.
pub const DEFAULT_LENGTH_DISTRIBUTION: LengthDistribution = LengthDistribution {
    short: 0.3,
    medium: 0.5,
    long: 0.2,
};

impl TargetProfile {
    /// Parse a target profile from JSON text.
    ///
    /// Fails only when the document is not valid JSON or not a JSON object.
    pub fn from_json(json: &str) -> ProfileResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a target profile from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> ProfileResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read a target profile from a JSON file.
    pub fn load(path: &Utf8Path) -> ProfileResult<Self> {
        let json = read_profile(path)?;
        Self::from_json(&json)
    }

    /// Vocabulary richness, 0.5 when absent.
    pub fn vocabulary_richness(&self) -> f64 {
        self.vocabulary
            .as_ref()
            .and_then(|v| v.vocabulary_richness)
            .unwrap_or(0.5)
    }

    /// Top words, empty when absent.
    pub fn top_words(&self) -> &[String] {
        self.vocabulary
            .as_ref()
            .and_then(|v| v.top_words.as_deref())
            .unwrap_or_default()
    }

    /// Mean sentence length, 15 when absent.
    pub fn avg_sentence_length(&self) -> f64 {
        self.syntax
            .as_ref()
            .and_then(|s| s.avg_sentence_length)
            .unwrap_or(15.0)
    }

    /// Sentence length distribution, `{0.3, 0.5, 0.2}` when absent.
    pub fn length_distribution(&self) -> LengthDistribution {
        self.syntax
            .as_ref()
            .and_then(|s| s.length_distribution)
            .unwrap_or(DEFAULT_LENGTH_DISTRIBUTION)
    }

    /// Sentence length standard deviation, 5 when absent.
    pub fn std_deviation(&self) -> f64 {
        self.syntax
            .as_ref()
            .and_then(|s| s.std_deviation)
            .unwrap_or(5.0)
    }

    /// Emotional tone, neutral when absent.
    pub fn emotional_tone(&self) -> Tone {
        self.sentiment
            .as_ref()
            .and_then(|s| s.emotional_tone)
            .unwrap_or_default()
    }

    /// Sentiment score, 0 when absent.
    pub fn sentiment_score(&self) -> f64 {
        self.sentiment
            .as_ref()
            .and_then(|s| s.sentiment_score)
            .unwrap_or(0.0)
    }
}

impl From<&StyleProfile> for TargetProfile {
    fn from(profile: &StyleProfile) -> Self {
        Self {
            style_name: Some(profile.style_name.clone()),
            vocabulary: Some(TargetVocabulary {
                top_words: Some(profile.vocabulary.top_words.clone()),
                vocabulary_richness: Some(profile.vocabulary.vocabulary_richness),
            }),
            syntax: Some(TargetSyntax {
                avg_sentence_length: Some(profile.syntax.avg_sentence_length),
                length_distribution: Some(profile.syntax.length_distribution),
                std_deviation: Some(profile.syntax.std_deviation),
            }),
            sentiment: Some(TargetSentiment {
                emotional_tone: Some(profile.sentiment.emotional_tone),
                sentiment_score: Some(profile.sentiment.sentiment_score),
            }),
        }
    }
}
