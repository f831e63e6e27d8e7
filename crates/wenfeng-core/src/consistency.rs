//! Style consistency scoring.
//!
//! Compares a candidate text against a [`TargetProfile`] on four dimensions:
//!
//! | Dimension  | Weight | Measures                                        |
//! |------------|--------|-------------------------------------------------|
//! | vocabulary | 0.3    | richness gap and top-20 word overlap            |
//! | syntax     | 0.3    | average sentence length and length distribution |
//! | sentiment  | 0.2    | tone agreement and score gap                    |
//! | rhythm     | 0.2    | sentence length standard deviation gap          |
//!
//! Each dimension scores in `[0, 1]`; the overall score is the weighted sum
//! scaled to `[0, 100]`.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::reports::{LengthDistribution, TextAnalysis, Tone};
use crate::error::AnalysisResult;
use crate::profile::TargetProfile;
use crate::profiler::StyleProfiler;

/// Weight of each dimension in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConsistencyWeights {
    /// Vocabulary weight.
    pub vocabulary: f64,
    /// Syntax weight.
    pub syntax: f64,
    /// Sentiment weight.
    pub sentiment: f64,
    /// Rhythm weight.
    pub rhythm: f64,
}

impl Default for ConsistencyWeights {
    fn default() -> Self {
        Self {
            vocabulary: 0.3,
            syntax: 0.3,
            sentiment: 0.2,
            rhythm: 0.2,
        }
    }
}

/// Weights and scales for [`ConsistencyModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConsistencyConfig {
    /// Dimension weights.
    pub weights: ConsistencyWeights,
    /// How many top words each side contributes to the overlap.
    pub overlap_window: usize,
    /// Average sentence length gap (characters) at which the length term reaches 0.
    pub length_span: f64,
    /// Std-dev gap at which the rhythm score reaches 0.
    pub rhythm_span: f64,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            weights: ConsistencyWeights::default(),
            overlap_window: 20,
            length_span: 20.0,
            rhythm_span: 10.0,
        }
    }
}

/// Grade of a single dimension score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    /// At least 0.9.
    Excellent,
    /// At least 0.75.
    Good,
    /// At least 0.6.
    Fair,
    /// At least 0.4.
    Poor,
    /// Below 0.4.
    VeryPoor,
}

impl MatchLevel {
    /// Grade a dimension score.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::Excellent
        } else if score >= 0.75 {
            Self::Good
        } else if score >= 0.6 {
            Self::Fair
        } else if score >= 0.4 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Returns the level as a human-readable string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::VeryPoor => "very poor",
        }
    }
}

impl std::fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    /// At least 90.
    High,
    /// At least 75.
    Substantial,
    /// At least 60.
    Partial,
    /// At least 40.
    Low,
    /// Below 40.
    VeryLow,
}

impl ConsistencyLevel {
    /// Grade an overall percentage.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::High
        } else if percentage >= 75.0 {
            Self::Substantial
        } else if percentage >= 60.0 {
            Self::Partial
        } else if percentage >= 40.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Returns the level as a human-readable string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Substantial => "substantial",
            Self::Partial => "partial",
            Self::Low => "low",
            Self::VeryLow => "very low",
        }
    }
}

impl std::fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One improvement hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    /// The hint.
    pub message: String,
    /// `false` for affirmations that need no action.
    pub actionable: bool,
}

impl Suggestion {
    fn action(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            actionable: true,
        }
    }

    fn affirm(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            actionable: false,
        }
    }
}

/// Per-dimension intermediate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "dimension", rename_all = "snake_case")]
pub enum DimensionDetails {
    /// Vocabulary sub-scores.
    Vocabulary {
        /// `1 - |Δrichness|`.
        richness_score: f64,
        /// Top-word overlap.
        overlap_score: f64,
        /// Candidate richness.
        current_richness: f64,
        /// Resolved target richness.
        target_richness: f64,
    },
    /// Syntax sub-scores.
    Syntax {
        /// Average length term.
        avg_length_score: f64,
        /// Distribution term.
        distribution_score: f64,
        /// Candidate average sentence length.
        current_avg_length: f64,
        /// Resolved target average sentence length.
        target_avg_length: f64,
    },
    /// Sentiment comparison.
    Sentiment {
        /// Candidate tone.
        current_tone: Tone,
        /// Resolved target tone.
        target_tone: Tone,
        /// Whether the tones agree.
        tone_match: bool,
    },
    /// Rhythm comparison.
    Rhythm {
        /// Candidate sentence length std-dev.
        current_std_deviation: f64,
        /// Resolved target std-dev.
        target_std_deviation: f64,
    },
}

/// Score and feedback for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DimensionResult {
    /// Score in `[0, 1]`.
    pub score: f64,
    /// `score` as a percentage with one decimal, e.g. `"87.5%"`.
    pub percentage: String,
    /// Grade of `score`.
    pub level: MatchLevel,
    /// Intermediate values.
    pub details: DimensionDetails,
    /// Ordered hints.
    pub suggestions: Vec<Suggestion>,
}

impl DimensionResult {
    fn new(score: f64, details: DimensionDetails, suggestions: Vec<Suggestion>) -> Self {
        let score = score.clamp(0.0, 1.0);
        Self {
            score,
            percentage: format!("{:.1}%", score * 100.0),
            level: MatchLevel::from_score(score),
            details,
            suggestions,
        }
    }

    /// Summary marker: ✓ at 0.75 and above, ⚠ at 0.6 and above, ✗ below.
    pub fn marker(&self) -> char {
        if self.score >= 0.75 {
            '✓'
        } else if self.score >= 0.6 {
            '⚠'
        } else {
            '✗'
        }
    }
}

/// The four dimension results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dimensions {
    /// Word choice.
    pub vocabulary: DimensionResult,
    /// Sentence structure.
    pub syntax: DimensionResult,
    /// Emotional register.
    pub sentiment: DimensionResult,
    /// Sentence length variation.
    pub rhythm: DimensionResult,
}

impl Dimensions {
    /// Dimensions paired with display names, in reporting order.
    pub fn named(&self) -> [(&'static str, &DimensionResult); 4] {
        [
            ("Vocabulary", &self.vocabulary),
            ("Syntax", &self.syntax),
            ("Sentiment", &self.sentiment),
            ("Rhythm", &self.rhythm),
        ]
    }
}

/// Human-readable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConsistencySummary {
    /// Headline, a blank line, then one marked line per dimension.
    pub text: String,
    /// Actionable suggestions from all dimensions, deduplicated.
    pub suggestions: Vec<String>,
}

/// Result of a consistency check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConsistencyResult {
    /// Weighted score in `[0, 100]`.
    pub overall: f64,
    /// Grade of `overall`.
    pub overall_level: ConsistencyLevel,
    /// Per-dimension results.
    pub dimensions: Dimensions,
    /// Summary text and aggregated suggestions.
    pub summary: ConsistencySummary,
}

/// Scores how closely a text matches a target style.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyModel {
    profiler: StyleProfiler,
    config: ConsistencyConfig,
}

impl ConsistencyModel {
    /// Model using `profiler` to analyze candidate texts.
    pub const fn new(profiler: StyleProfiler, config: ConsistencyConfig) -> Self {
        Self { profiler, config }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &ConsistencyConfig {
        &self.config
    }

    /// Analyze `text` and score it against `target`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnalysisError::InvalidInput`] when `text` is empty or
    /// whitespace-only.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), target = ?target.style_name))]
    pub fn check(&self, text: &str, target: &TargetProfile) -> AnalysisResult<ConsistencyResult> {
        let analysis = self.profiler.analyze(text)?;
        Ok(self.compare(&analysis, target))
    }

    /// Score an existing analysis against `target`.
    pub fn compare(&self, analysis: &TextAnalysis, target: &TargetProfile) -> ConsistencyResult {
        let dimensions = Dimensions {
            vocabulary: self.vocabulary(analysis, target),
            syntax: self.syntax(analysis, target),
            sentiment: sentiment(analysis, target),
            rhythm: self.rhythm(analysis, target),
        };

        let w = &self.config.weights;
        let overall = 100.0
            * (w.vocabulary * dimensions.vocabulary.score
                + w.syntax * dimensions.syntax.score
                + w.sentiment * dimensions.sentiment.score
                + w.rhythm * dimensions.rhythm.score);
        let overall = overall.clamp(0.0, 100.0);
        let overall_level = ConsistencyLevel::from_percentage(overall);

        tracing::info!(overall, level = overall_level.as_str(), "consistency scored");

        let summary = summarize(overall, overall_level, &dimensions);
        ConsistencyResult {
            overall,
            overall_level,
            dimensions,
            summary,
        }
    }

    fn vocabulary(&self, analysis: &TextAnalysis, target: &TargetProfile) -> DimensionResult {
        let current_richness = analysis.vocabulary.vocabulary_richness;
        let target_richness = target.vocabulary_richness();
        let richness_score = 1.0 - (current_richness - target_richness).abs();

        let window = self.config.overlap_window;
        let current_top = head(&analysis.vocabulary.top_words, window);
        let target_top = head(target.top_words(), window);
        let overlap_score = vocabulary_overlap(current_top, target_top);

        let score = 0.4 * richness_score + 0.6 * overlap_score;

        let mut suggestions = Vec::new();
        if score < 0.6 {
            let gap = target_richness - current_richness;
            if gap > 0.1 {
                suggestions.push(Suggestion::action(
                    "Vocabulary richness is low; use more varied wording",
                ));
            } else if gap < -0.1 {
                suggestions.push(Suggestion::action(
                    "Vocabulary is more varied than the target; prefer common expressions",
                ));
            }
            let sample: Vec<&str> = target_top.iter().take(5).map(String::as_str).collect();
            if sample.is_empty() {
                suggestions.push(Suggestion::action(
                    "Draw on the target style's frequent words",
                ));
            } else {
                suggestions.push(Suggestion::action(format!(
                    "Draw on the target style's frequent words: {}",
                    sample.join(", ")
                )));
            }
        } else if score < 0.8 {
            suggestions.push(Suggestion::action(
                "Vocabulary broadly matches; add more of the target's distinctive words",
            ));
        } else {
            suggestions.push(Suggestion::affirm(
                "Vocabulary closely matches the target style",
            ));
        }

        DimensionResult::new(
            score,
            DimensionDetails::Vocabulary {
                richness_score,
                overlap_score,
                current_richness,
                target_richness,
            },
            suggestions,
        )
    }

    fn syntax(&self, analysis: &TextAnalysis, target: &TargetProfile) -> DimensionResult {
        let current_avg_length = analysis.syntax.avg_sentence_length;
        let target_avg_length = target.avg_sentence_length();
        let avg_length_score =
            (1.0 - (current_avg_length - target_avg_length).abs() / self.config.length_span)
                .max(0.0);

        let current_dist = analysis.syntax.length_distribution;
        let target_dist = target.length_distribution();
        let distribution_score = distribution_similarity(&current_dist, &target_dist);

        let score = 0.5 * avg_length_score + 0.5 * distribution_score;

        let mut suggestions = Vec::new();
        if score < 0.6 {
            let gap = target_avg_length - current_avg_length;
            if gap > 3.0 {
                suggestions.push(Suggestion::action(format!(
                    "Average sentence length is {current_avg_length:.1} characters; lengthen toward about {target_avg_length:.1}"
                )));
            } else if gap < -3.0 {
                suggestions.push(Suggestion::action(format!(
                    "Average sentence length is {current_avg_length:.1} characters; shorten toward about {target_avg_length:.1}"
                )));
            } else {
                suggestions.push(distribution_hint(&current_dist, &target_dist));
            }
        } else if score < 0.8 {
            suggestions.push(Suggestion::action(
                "Sentence structure broadly matches; vary sentence patterns further",
            ));
        } else {
            suggestions.push(Suggestion::affirm(
                "Sentence structure closely matches the target style",
            ));
        }

        DimensionResult::new(
            score,
            DimensionDetails::Syntax {
                avg_length_score,
                distribution_score,
                current_avg_length,
                target_avg_length,
            },
            suggestions,
        )
    }

    fn rhythm(&self, analysis: &TextAnalysis, target: &TargetProfile) -> DimensionResult {
        let current = analysis.syntax.std_deviation;
        let expected = target.std_deviation();
        let score = (1.0 - (current - expected).abs() / self.config.rhythm_span).max(0.0);

        let suggestion = if score < 0.6 {
            if current > expected {
                Suggestion::action("Sentence lengths vary too much; use more uniform sentence patterns")
            } else {
                Suggestion::action("Sentence lengths are too uniform; vary sentence patterns more")
            }
        } else if score < 0.8 {
            Suggestion::action("Rhythm broadly matches; refine sentence length variation")
        } else {
            Suggestion::affirm("Rhythm closely matches the target style")
        };

        DimensionResult::new(
            score,
            DimensionDetails::Rhythm {
                current_std_deviation: current,
                target_std_deviation: expected,
            },
            vec![suggestion],
        )
    }
}

fn sentiment(analysis: &TextAnalysis, target: &TargetProfile) -> DimensionResult {
    let current_tone = analysis.sentiment.emotional_tone;
    let target_tone = target.emotional_tone();
    let tone_match = current_tone == target_tone;

    let tone_score = if tone_match { 1.0 } else { 0.5 };
    let score_match =
        (1.0 - (analysis.sentiment.sentiment_score - target.sentiment_score()).abs()).max(0.0);
    let score = 0.6 * tone_score + 0.4 * score_match;

    let suggestion = if !tone_match {
        Suggestion::action(format!(
            "Emotional tone is {current_tone}, target is {target_tone}; adjust the emotional register"
        ))
    } else if score < 0.8 {
        Suggestion::action("Tone matches but its intensity differs; adjust emotional intensity")
    } else {
        Suggestion::affirm("Emotional expression matches the target style")
    };

    DimensionResult::new(
        score,
        DimensionDetails::Sentiment {
            current_tone,
            target_tone,
            tone_match,
        },
        vec![suggestion],
    )
}

fn head(words: &[String], n: usize) -> &[String] {
    &words[..words.len().min(n)]
}

/// Shared distinct words over the larger distinct set.
///
/// Not Jaccard: the denominator is `max(|A|, |B|)`. Two empty sets are
/// identical and score 1; one empty side scores 0.
pub fn vocabulary_overlap(current: &[String], target: &[String]) -> f64 {
    let current: HashSet<&str> = current.iter().map(String::as_str).collect();
    let target: HashSet<&str> = target.iter().map(String::as_str).collect();

    let denominator = current.len().max(target.len());
    if denominator == 0 {
        return 1.0;
    }
    current.intersection(&target).count() as f64 / denominator as f64
}

/// `1 - L1 / 2`, floored at 0.
pub fn distribution_similarity(current: &LengthDistribution, target: &LengthDistribution) -> f64 {
    (1.0 - current.l1_distance(target) / 2.0).max(0.0)
}

/// Point at the bucket whose share is furthest from the target.
fn distribution_hint(current: &LengthDistribution, target: &LengthDistribution) -> Suggestion {
    let gaps = current
        .buckets()
        .into_iter()
        .zip(target.buckets())
        .map(|((bucket, have), (_, want))| (bucket, have, want));

    let widest = gaps.max_by(|a, b| (a.2 - a.1).abs().total_cmp(&(b.2 - b.1).abs()));
    match widest {
        Some((bucket, have, want)) => {
            let direction = if want > have { "more" } else { "fewer" };
            Suggestion::action(format!(
                "Use {direction} {bucket} sentences (target {:.0}%, current {:.0}%)",
                want * 100.0,
                have * 100.0
            ))
        }
        None => Suggestion::action("Rebalance the mix of short, medium, and long sentences"),
    }
}

fn summarize(
    overall: f64,
    overall_level: ConsistencyLevel,
    dimensions: &Dimensions,
) -> ConsistencySummary {
    let mut lines = vec![
        format!("Overall consistency: {overall:.1}% ({overall_level})"),
        String::new(),
    ];
    let mut suggestions: Vec<String> = Vec::new();

    for (name, dim) in dimensions.named() {
        lines.push(format!(
            "{} {name}: {} ({})",
            dim.marker(),
            dim.percentage,
            dim.level
        ));
        for s in dim.suggestions.iter().filter(|s| s.actionable) {
            if !suggestions.contains(&s.message) {
                suggestions.push(s.message.clone());
            }
        }
    }

    ConsistencySummary {
        text: lines.join("\n"),
        suggestions,
    }
}
