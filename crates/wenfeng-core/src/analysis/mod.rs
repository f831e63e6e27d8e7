//! Per-dimension text analyzers.
//!
//! Three independent analyzers, each producing one profile:
//!
//! - [`lexical`] - token frequency and vocabulary richness
//! - [`syntactic`] - sentence length statistics and punctuation habits
//! - [`sentiment`] - lexicon-based polarity
//!
//! [`crate::profiler::StyleProfiler`] runs all three and combines the result
//! into a [`TextAnalysis`].

pub mod lexical;
pub mod reports;
pub mod sentiment;
pub mod syntactic;

pub use lexical::LexicalAnalyzer;
pub use reports::{
    AnalysisMetadata, LengthBucket, LengthDistribution, LexicalProfile, SentimentProfile,
    SyntacticProfile, TextAnalysis, Tone,
};
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use syntactic::SyntacticAnalyzer;
