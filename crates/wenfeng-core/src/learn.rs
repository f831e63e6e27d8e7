//! Learning a style profile from a sample text.

use crate::confidence::ConfidenceModel;
use crate::error::AnalysisResult;
use crate::profile::{StyleProfile, TargetProfile};
use crate::profiler::StyleProfiler;

/// Turns a sample text into a graded [`StyleProfile`].
#[derive(Debug, Clone, Default)]
pub struct StyleLearner {
    profiler: StyleProfiler,
    confidence: ConfidenceModel,
}

impl StyleLearner {
    /// Learner with a specific profiler and confidence model.
    pub const fn new(profiler: StyleProfiler, confidence: ConfidenceModel) -> Self {
        Self {
            profiler,
            confidence,
        }
    }

    /// Analyze `text`, build a profile named `name`, and grade it against
    /// `references`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnalysisError::InvalidInput`] when `text` is empty or
    /// whitespace-only.
    #[tracing::instrument(skip(self, text, references), fields(text_len = text.len(), references = references.len()))]
    pub fn learn(
        &self,
        name: &str,
        text: &str,
        references: &[TargetProfile],
    ) -> AnalysisResult<StyleProfile> {
        let analysis = self.profiler.analyze(text)?;
        let mut profile = StyleProfile::from_analysis(name, &analysis);
        let report = self.confidence.calculate(
            &profile.sample_stats(),
            &TargetProfile::from(&profile),
            references,
        );

        tracing::info!(
            style = name,
            confidence = report.overall,
            level = report.level.as_str(),
            "style learned"
        );
        profile.confidence = Some(report);
        Ok(profile)
    }

    /// Recalculate the confidence of a saved profile from its recorded
    /// statistics.
    pub fn regrade(&self, profile: &StyleProfile, references: &[TargetProfile]) -> StyleProfile {
        let report = self.confidence.calculate(
            &profile.sample_stats(),
            &TargetProfile::from(profile),
            references,
        );
        StyleProfile {
            confidence: Some(report),
            ..profile.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::ConfidenceLevel;
    use crate::error::AnalysisError;

    const SAMPLE: &str = "山间小路弯弯曲曲，雾气还没有散尽。老人背着柴，一步一步往上走。\
        鸟叫声从林子深处传来，清脆而遥远。";

    #[test]
    fn learn_attaches_confidence() {
        let profile = StyleLearner::default().learn("mountain", SAMPLE, &[]).unwrap();
        assert_eq!(profile.style_name, "mountain");
        assert_eq!(profile.sample_word_count, SAMPLE.chars().count());

        let confidence = profile.confidence.unwrap();
        // Short sample, no references, every key field present.
        assert!((confidence.breakdown.uniqueness - 0.7).abs() < 1e-9);
        assert!((confidence.breakdown.completeness - 1.0).abs() < 1e-9);
        assert!(confidence.breakdown.sample_size < 0.01);
        assert_ne!(confidence.level, ConfidenceLevel::Excellent);
    }

    #[test]
    fn empty_sample_is_invalid() {
        let result = StyleLearner::default().learn("none", "", &[]);
        assert_eq!(result, Err(AnalysisError::InvalidInput));
    }

    #[test]
    fn references_lower_uniqueness() {
        let learner = StyleLearner::default();
        let first = learner.learn("a", SAMPLE, &[]).unwrap();
        let twin = learner
            .learn("b", SAMPLE, &[TargetProfile::from(&first)])
            .unwrap();
        assert_eq!(twin.confidence.unwrap().breakdown.uniqueness, 0.0);
    }

    #[test]
    fn regrade_matches_learn() {
        let learner = StyleLearner::default();
        let mut profile = learner.learn("mountain", SAMPLE, &[]).unwrap();
        let original = profile.confidence.take().unwrap();
        let regraded = learner.regrade(&profile, &[]);
        assert_eq!(regraded.confidence, Some(original));
    }
}
