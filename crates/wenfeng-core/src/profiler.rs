//! Runs the three analyzers over one text and combines their output.

use std::sync::Arc;

use chrono::Utc;

use crate::analysis::reports::{AnalysisMetadata, TextAnalysis};
use crate::analysis::{LexicalAnalyzer, LexiconScorer, SentimentScorer, SyntacticAnalyzer};
use crate::error::{AnalysisError, AnalysisResult};
use crate::text;
use crate::tokenize::{Backend, Tokenizer};

/// Number of top words shown in the markdown report.
const REPORT_TOP_WORDS: usize = 10;

/// Combines lexical, syntactic, and sentiment analysis.
#[derive(Clone)]
pub struct StyleProfiler {
    lexical: LexicalAnalyzer,
    syntactic: SyntacticAnalyzer,
    sentiment: Arc<dyn SentimentScorer>,
}

impl std::fmt::Debug for StyleProfiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleProfiler")
            .field("lexical", &self.lexical)
            .finish_non_exhaustive()
    }
}

impl Default for StyleProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleProfiler {
    /// Profiler with jieba segmentation and the built-in sentiment lexicon.
    pub fn new() -> Self {
        Self::with_backend(Backend::default())
    }

    /// Profiler using the tokenizer selected by `backend`.
    pub fn with_backend(backend: Backend) -> Self {
        Self::with_tokenizer(backend.tokenizer())
    }

    /// Profiler using a caller-supplied tokenizer.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            lexical: LexicalAnalyzer::new(tokenizer),
            syntactic: SyntacticAnalyzer,
            sentiment: Arc::new(LexiconScorer::default()),
        }
    }

    /// Replace the sentiment scorer.
    #[must_use]
    pub fn with_sentiment(mut self, scorer: Arc<dyn SentimentScorer>) -> Self {
        self.sentiment = scorer;
        self
    }

    /// Analyze `text` on all three dimensions.
    ///
    /// The analyzers are independent and run in parallel; the result is the
    /// same as running them one after another.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] when `text` is empty or
    /// whitespace-only.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> AnalysisResult<TextAnalysis> {
        if text.trim().is_empty() {
            return Err(AnalysisError::InvalidInput);
        }

        let (vocabulary, (syntax, sentiment)) = rayon::join(
            || self.lexical.analyze(text),
            || {
                rayon::join(
                    || self.syntactic.analyze(text),
                    || self.sentiment.analyze(text),
                )
            },
        );

        let analysis = TextAnalysis {
            vocabulary: vocabulary?,
            syntax,
            sentiment,
            metadata: AnalysisMetadata {
                text_length: text::char_len(text),
                analyzed_at: Utc::now(),
            },
        };

        tracing::info!(
            tokens = analysis.vocabulary.total_tokens,
            sentences = analysis.syntax.sentence_count,
            tone = %analysis.sentiment.emotional_tone,
            "text profiled"
        );
        Ok(analysis)
    }
}

/// Render a markdown summary of an analysis.
pub fn generate_report(analysis: &TextAnalysis) -> String {
    let vocabulary = &analysis.vocabulary;
    let syntax = &analysis.syntax;
    let sentiment = &analysis.sentiment;
    let distribution = syntax.length_distribution;

    let top_words = vocabulary
        .top_words
        .iter()
        .take(REPORT_TOP_WORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "## Style Analysis Report\n\
         \n\
         ### Vocabulary\n\
         - Total words: {total}\n\
         - Unique words: {unique}\n\
         - Vocabulary richness (TTR): {richness:.3}\n\
         - Top words (first {top_n}): {top_words}\n\
         \n\
         ### Syntax\n\
         - Sentences: {sentences}\n\
         - Average sentence length: {avg:.2} characters\n\
         - Sentence length std deviation: {std:.2}\n\
         - Short sentences: {short:.1}%\n\
         - Medium sentences: {medium:.1}%\n\
         - Long sentences: {long:.1}%\n\
         \n\
         ### Sentiment\n\
         - Sentiment score: {score:.3}\n\
         - Emotional tone: {tone}\n\
         - Positive terms: {positive}\n\
         - Negative terms: {negative}\n",
        total = vocabulary.total_tokens,
        unique = vocabulary.unique_tokens,
        richness = vocabulary.vocabulary_richness,
        top_n = REPORT_TOP_WORDS,
        sentences = syntax.sentence_count,
        avg = syntax.avg_sentence_length,
        std = syntax.std_deviation,
        short = distribution.short * 100.0,
        medium = distribution.medium * 100.0,
        long = distribution.long * 100.0,
        score = sentiment.sentiment_score,
        tone = sentiment.emotional_tone,
        positive = sentiment.positive_words,
        negative = sentiment.negative_words,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::reports::{SentimentProfile, Tone};

    const SAMPLE: &str = "江湖风云变幻，英雄辈出。他很高兴，心中充满希望！可是前路困难重重。";

    #[test]
    fn empty_text_is_invalid() {
        let profiler = StyleProfiler::new();
        assert_eq!(profiler.analyze(""), Err(AnalysisError::InvalidInput));
        assert_eq!(profiler.analyze(" \t\n"), Err(AnalysisError::InvalidInput));
    }

    #[test]
    fn combines_all_dimensions() {
        let analysis = StyleProfiler::new().analyze(SAMPLE).unwrap();
        assert!(analysis.vocabulary.total_tokens > 0);
        assert_eq!(analysis.syntax.sentence_count, 3);
        assert_eq!(analysis.sentiment.positive_words, 2);
        assert_eq!(analysis.sentiment.negative_words, 1);
        assert_eq!(analysis.metadata.text_length, SAMPLE.chars().count());
    }

    #[test]
    fn parallel_matches_sequential() {
        let profiler = StyleProfiler::with_backend(Backend::Char);
        let analysis = profiler.analyze(SAMPLE).unwrap();
        let lexical = LexicalAnalyzer::new(Backend::Char.tokenizer())
            .analyze(SAMPLE)
            .unwrap();
        assert_eq!(analysis.vocabulary, lexical);
        assert_eq!(analysis.syntax, SyntacticAnalyzer.analyze(SAMPLE));
        assert_eq!(analysis.sentiment, LexiconScorer::default().analyze(SAMPLE));
    }

    struct AlwaysPositive;

    impl SentimentScorer for AlwaysPositive {
        fn analyze(&self, _text: &str) -> SentimentProfile {
            SentimentProfile {
                sentiment_score: 1.0,
                emotional_tone: Tone::Positive,
                ..SentimentProfile::default()
            }
        }
    }

    #[test]
    fn custom_sentiment_scorer() {
        let profiler = StyleProfiler::new().with_sentiment(Arc::new(AlwaysPositive));
        let analysis = profiler.analyze("平静的一天。").unwrap();
        assert_eq!(analysis.sentiment.emotional_tone, Tone::Positive);
    }

    #[test]
    fn report_contains_sections() {
        let analysis = StyleProfiler::new().analyze(SAMPLE).unwrap();
        let report = generate_report(&analysis);
        assert!(report.starts_with("## Style Analysis Report"));
        assert!(report.contains("### Vocabulary"));
        assert!(report.contains("### Syntax"));
        assert!(report.contains("### Sentiment"));
        assert!(report.contains("- Sentences: 3"));
    }
}
