//! Confidence grading for learned style profiles.
//!
//! A profile is only as trustworthy as the sample it came from. The model
//! combines four sub-scores, each in `[0, 1]`:
//!
//! - **S** sample size: how much text the profile was learned from
//! - **C** consistency: how stable the sample's features are
//! - **U** uniqueness: distance from reference profiles
//! - **D** completeness: how many key profile fields are present
//!
//! `overall = 0.30·S + 0.40·C + 0.20·U + 0.10·D` with the default weights.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::profile::TargetProfile;

/// Weight of each sub-score in the overall confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceWeights {
    /// Weight of S.
    pub sample_size: f64,
    /// Weight of C.
    pub consistency: f64,
    /// Weight of U.
    pub uniqueness: f64,
    /// Weight of D.
    pub completeness: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            sample_size: 0.3,
            consistency: 0.4,
            uniqueness: 0.2,
            completeness: 0.1,
        }
    }
}

/// Weights and thresholds for [`ConfidenceModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceConfig {
    /// Sub-score weights.
    pub weights: ConfidenceWeights,
    /// Below this many characters, S rises linearly from 0 to 0.5.
    pub min_words: usize,
    /// Between `min_words` and this, S rises from 0.5 to 0.8.
    pub optimal_words: usize,
    /// Past `optimal_words`, characters needed to go from 0.8 to 1.0.
    pub saturation_span: usize,
    /// Vocabulary richness that earns a full consistency sub-term.
    pub ideal_richness: f64,
    /// Sentence length std-dev at which the stability sub-term reaches 0.
    pub stability_span: f64,
    /// Uniqueness assumed when there is nothing to compare against.
    pub prior_uniqueness: f64,
    /// Lower bound of the excellent level.
    pub excellent: f64,
    /// Lower bound of the good level.
    pub good: f64,
    /// Lower bound of the fair level.
    pub fair: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            weights: ConfidenceWeights::default(),
            min_words: 10_000,
            optimal_words: 50_000,
            saturation_span: 100_000,
            ideal_richness: 0.9,
            stability_span: 20.0,
            prior_uniqueness: 0.7,
            excellent: 0.8,
            good: 0.6,
            fair: 0.4,
        }
    }
}

/// Sample statistics the confidence model grades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SampleStats {
    /// Sample length in characters.
    pub word_count: usize,
    /// Measured features, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<SampleFeatures>,
}

/// Features of the sample used for the consistency sub-score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SampleFeatures {
    /// Type-token ratio of the sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_richness: Option<f64>,
    /// Standard deviation of sentence length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_deviation: Option<f64>,
}

/// Confidence grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// At least 0.8.
    Excellent,
    /// At least 0.6.
    Good,
    /// At least 0.4.
    Fair,
    /// Below 0.4.
    Low,
}

impl ConfidenceLevel {
    /// Returns the level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceBreakdown {
    /// Sample size sufficiency.
    #[serde(rename = "S")]
    pub sample_size: f64,
    /// Feature stability.
    #[serde(rename = "C")]
    pub consistency: f64,
    /// Distance from reference profiles.
    #[serde(rename = "U")]
    pub uniqueness: f64,
    /// Fraction of key fields present.
    #[serde(rename = "D")]
    pub completeness: f64,
}

/// One human-readable sentence per sub-score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceDetails {
    /// Describes S.
    pub sample_size: String,
    /// Describes C.
    pub consistency: String,
    /// Describes U.
    pub uniqueness: String,
    /// Describes D.
    pub completeness: String,
}

/// Result of grading a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceReport {
    /// Weighted combination of the sub-scores, clamped to `[0, 1]`.
    pub overall: f64,
    /// Sub-scores.
    pub breakdown: ConfidenceBreakdown,
    /// Grade of `overall`.
    pub level: ConfidenceLevel,
    /// Sub-score descriptions.
    pub details: ConfidenceDetails,
}

const SAMPLE_SIZE_NOTES: [(f64, &str); 3] = [
    (0.8, "Sample size is ample, above the recommended amount"),
    (0.5, "Sample size is adequate and meets the minimum"),
    (f64::NEG_INFINITY, "Sample is too small; add more text"),
];

const CONSISTENCY_NOTES: [(f64, &str); 3] = [
    (0.8, "Features are highly consistent; the style is stable"),
    (0.6, "Features are mostly consistent; the style is fairly stable"),
    (f64::NEG_INFINITY, "Feature consistency is low; the style is unstable"),
];

const UNIQUENESS_NOTES: [(f64, &str); 3] = [
    (0.7, "Style is highly distinctive"),
    (0.4, "Style is somewhat distinctive"),
    (f64::NEG_INFINITY, "Style closely resembles an existing reference"),
];

const COMPLETENESS_NOTES: [(f64, &str); 3] = [
    (0.9, "Data is complete across all key dimensions"),
    (0.7, "Data is mostly complete"),
    (f64::NEG_INFINITY, "Data is incomplete; some dimensions are missing"),
];

fn describe(score: f64, notes: &[(f64, &'static str)]) -> String {
    notes
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map_or("", |&(_, note)| note)
        .to_string()
}

/// Grades how trustworthy a style profile is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceModel {
    config: ConfidenceConfig,
}

impl ConfidenceModel {
    /// Model with custom weights and thresholds.
    pub const fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &ConfidenceConfig {
        &self.config
    }

    /// Grade `profile`, learned from a sample described by `stats`, against
    /// optional `references`.
    #[tracing::instrument(skip_all, fields(word_count = stats.word_count, references = references.len()))]
    pub fn calculate(
        &self,
        stats: &SampleStats,
        profile: &TargetProfile,
        references: &[TargetProfile],
    ) -> ConfidenceReport {
        let breakdown = ConfidenceBreakdown {
            sample_size: self.sample_size_score(stats.word_count),
            consistency: self.consistency_score(stats.features.as_ref()),
            uniqueness: self.uniqueness_score(profile, references),
            completeness: completeness_score(profile),
        };

        let w = &self.config.weights;
        let overall = (w.sample_size * breakdown.sample_size
            + w.consistency * breakdown.consistency
            + w.uniqueness * breakdown.uniqueness
            + w.completeness * breakdown.completeness)
            .clamp(0.0, 1.0);
        let level = self.level(overall);

        tracing::debug!(overall, level = level.as_str(), "confidence calculated");

        ConfidenceReport {
            overall,
            breakdown,
            level,
            details: ConfidenceDetails {
                sample_size: describe(breakdown.sample_size, &SAMPLE_SIZE_NOTES),
                consistency: describe(breakdown.consistency, &CONSISTENCY_NOTES),
                uniqueness: describe(breakdown.uniqueness, &UNIQUENESS_NOTES),
                completeness: describe(breakdown.completeness, &COMPLETENESS_NOTES),
            },
        }
    }

    /// S: piecewise linear in the sample's character count, capped at 1.
    pub fn sample_size_score(&self, word_count: usize) -> f64 {
        let c = &self.config;
        let words = word_count as f64;
        let min = c.min_words as f64;
        let optimal = c.optimal_words as f64;

        if word_count < c.min_words {
            0.5 * words / min
        } else if word_count < c.optimal_words {
            0.5 + 0.3 * (words - min) / (optimal - min)
        } else {
            (0.8 + 0.2 * (words - optimal) / c.saturation_span as f64).min(1.0)
        }
    }

    /// C: mean of a richness sub-term and a stability sub-term.
    ///
    /// A missing input contributes 0.5; no features at all yields 0.5.
    pub fn consistency_score(&self, features: Option<&SampleFeatures>) -> f64 {
        let Some(features) = features else {
            return 0.5;
        };

        let richness = features
            .vocabulary_richness
            .map_or(0.5, |r| (r / self.config.ideal_richness).min(1.0));
        let stability = features
            .std_deviation
            .map_or(0.5, |sd| (1.0 - sd / self.config.stability_span).max(0.0));

        (richness + stability) / 2.0
    }

    /// U: twice the smallest richness distance to any reference, capped at 1.
    pub fn uniqueness_score(&self, profile: &TargetProfile, references: &[TargetProfile]) -> f64 {
        if references.is_empty() {
            return self.config.prior_uniqueness;
        }

        let richness = profile.vocabulary_richness();
        let min_distance = references
            .iter()
            .map(|r| (richness - r.vocabulary_richness()).abs())
            .fold(1.0_f64, f64::min);

        (2.0 * min_distance).min(1.0)
    }

    /// Grade an overall score.
    pub fn level(&self, score: f64) -> ConfidenceLevel {
        let c = &self.config;
        if score >= c.excellent {
            ConfidenceLevel::Excellent
        } else if score >= c.good {
            ConfidenceLevel::Good
        } else if score >= c.fair {
            ConfidenceLevel::Fair
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// D: fraction of the five key fields present on the profile.
pub fn completeness_score(profile: &TargetProfile) -> f64 {
    let vocabulary = profile.vocabulary.as_ref();
    let syntax = profile.syntax.as_ref();
    let present = [
        vocabulary.is_some_and(|v| v.top_words.is_some()),
        vocabulary.is_some_and(|v| v.vocabulary_richness.is_some()),
        syntax.is_some_and(|s| s.avg_sentence_length.is_some()),
        syntax.is_some_and(|s| s.length_distribution.is_some()),
        profile
            .sentiment
            .as_ref()
            .is_some_and(|s| s.emotional_tone.is_some()),
    ];

    present.iter().filter(|&&p| p).count() as f64 / present.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::reports::{LengthDistribution, Tone};
    use crate::profile::{TargetSentiment, TargetSyntax, TargetVocabulary};

    fn model() -> ConfidenceModel {
        ConfidenceModel::default()
    }

    fn with_richness(richness: f64) -> TargetProfile {
        TargetProfile {
            vocabulary: Some(TargetVocabulary {
                vocabulary_richness: Some(richness),
                ..TargetVocabulary::default()
            }),
            ..TargetProfile::default()
        }
    }

    fn complete_profile() -> TargetProfile {
        TargetProfile {
            style_name: Some("full".to_string()),
            vocabulary: Some(TargetVocabulary {
                top_words: Some(vec!["江湖".to_string()]),
                vocabulary_richness: Some(0.6),
            }),
            syntax: Some(TargetSyntax {
                avg_sentence_length: Some(14.0),
                length_distribution: Some(LengthDistribution {
                    short: 0.3,
                    medium: 0.5,
                    long: 0.2,
                }),
                std_deviation: Some(5.0),
            }),
            sentiment: Some(TargetSentiment {
                emotional_tone: Some(Tone::Neutral),
                sentiment_score: Some(0.0),
            }),
        }
    }

    #[test]
    fn sample_size_reference_points() {
        let m = model();
        assert!((m.sample_size_score(5_000) - 0.25).abs() < 1e-9);
        assert!((m.sample_size_score(10_000) - 0.5).abs() < 1e-9);
        assert!((m.sample_size_score(30_000) - 0.65).abs() < 1e-9);
        assert!((m.sample_size_score(80_000) - 0.86).abs() < 1e-9);
        assert!((m.sample_size_score(1_000_000) - 1.0).abs() < 1e-9);
        assert_eq!(m.sample_size_score(0), 0.0);
    }

    #[test]
    fn overall_is_monotonic_in_word_count() {
        let m = model();
        let profile = complete_profile();
        let mut previous = -1.0;
        for words in [0, 1_000, 9_999, 10_000, 25_000, 49_999, 50_000, 120_000, 400_000] {
            let stats = SampleStats {
                word_count: words,
                features: None,
            };
            let overall = m.calculate(&stats, &profile, &[]).overall;
            assert!(overall >= previous, "{words}: {overall} < {previous}");
            previous = overall;
        }
    }

    #[test]
    fn consistency_defaults() {
        let m = model();
        assert_eq!(m.consistency_score(None), 0.5);
        assert_eq!(m.consistency_score(Some(&SampleFeatures::default())), 0.5);

        let features = SampleFeatures {
            vocabulary_richness: Some(0.45),
            std_deviation: Some(10.0),
        };
        // (0.5 + 0.5) / 2
        assert!((m.consistency_score(Some(&features)) - 0.5).abs() < 1e-9);

        let stable = SampleFeatures {
            vocabulary_richness: Some(0.95),
            std_deviation: Some(0.0),
        };
        assert!((m.consistency_score(Some(&stable)) - 1.0).abs() < 1e-9);

        let erratic = SampleFeatures {
            vocabulary_richness: None,
            std_deviation: Some(40.0),
        };
        assert!((m.consistency_score(Some(&erratic)) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn uniqueness_without_references_is_prior() {
        assert!((model().uniqueness_score(&with_richness(0.4), &[]) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn uniqueness_uses_nearest_reference() {
        let refs = [with_richness(0.9), with_richness(0.5)];
        // Nearest distance 0.1 -> 0.2
        let u = model().uniqueness_score(&with_richness(0.4), &refs);
        assert!((u - 0.2).abs() < 1e-9);

        // Missing richness resolves to 0.5 on both sides.
        let u = model().uniqueness_score(&TargetProfile::default(), &[TargetProfile::default()]);
        assert_eq!(u, 0.0);
    }

    #[test]
    fn completeness_counts_present_fields() {
        assert_eq!(completeness_score(&TargetProfile::default()), 0.0);
        assert!((completeness_score(&with_richness(0.5)) - 0.2).abs() < 1e-9);
        assert!((completeness_score(&complete_profile()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn full_report() {
        let stats = SampleStats {
            word_count: 80_000,
            features: Some(SampleFeatures {
                vocabulary_richness: Some(0.9),
                std_deviation: Some(0.0),
            }),
        };
        let report = model().calculate(&stats, &complete_profile(), &[]);
        // 0.3*0.86 + 0.4*1 + 0.2*0.7 + 0.1*1
        assert!((report.overall - 0.898).abs() < 1e-9);
        assert_eq!(report.level, ConfidenceLevel::Excellent);
        assert_eq!(report.details.uniqueness, "Style is highly distinctive");
        assert!(report.details.sample_size.starts_with("Sample size is ample"));
    }

    #[test]
    fn levels() {
        let m = model();
        assert_eq!(m.level(0.8), ConfidenceLevel::Excellent);
        assert_eq!(m.level(0.79), ConfidenceLevel::Good);
        assert_eq!(m.level(0.4), ConfidenceLevel::Fair);
        assert_eq!(m.level(0.39), ConfidenceLevel::Low);
    }

    #[test]
    fn breakdown_serializes_with_letters() {
        let b = ConfidenceBreakdown {
            sample_size: 0.1,
            consistency: 0.2,
            uniqueness: 0.3,
            completeness: 0.4,
        };
        let json = serde_json::to_value(b).unwrap();
        assert_eq!(json["S"], 0.1);
        assert_eq!(json["D"], 0.4);
    }
}
