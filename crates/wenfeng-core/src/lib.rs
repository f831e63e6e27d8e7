//! Core library for wenfeng.
//!
//! This crate extracts writing-style profiles from Chinese prose and scores
//! new text against them. It backs the `wenfeng` CLI and MCP server and can
//! be used directly by downstream consumers.
//!
//! # Modules
//!
//! - [`analysis`] - Lexical, syntactic and sentiment analyzers
//! - [`profiler`] - Runs the analyzers and renders a markdown report
//! - [`profile`] - Saved style profiles and lenient comparison targets
//! - [`confidence`] - How far a learned profile can be trusted
//! - [`consistency`] - Scores text against a target profile
//! - [`learn`] - Sample text to graded profile
//! - [`preprocess`] - Cleans raw samples and rates their quality
//! - [`tokenize`] - Word segmentation backends
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use wenfeng_core::{ConsistencyModel, StyleLearner, TargetProfile};
//!
//! let sample = std::fs::read_to_string("sample.txt").unwrap();
//! let profile = StyleLearner::default()
//!     .learn("my-style", &sample, &[])
//!     .expect("sample is not empty");
//!
//! let draft = "新写的一段文字。";
//! let result = ConsistencyModel::default()
//!     .check(draft, &TargetProfile::from(&profile))
//!     .expect("draft is not empty");
//! println!("{}", result.summary.text);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod confidence;
pub mod config;
pub mod consistency;
pub mod error;
pub mod learn;
pub mod preprocess;
pub mod profile;
pub mod profiler;
pub mod text;
pub mod tokenize;
pub mod word_lists;

pub use analysis::{LengthDistribution, TextAnalysis, Tone};
pub use confidence::{ConfidenceLevel, ConfidenceModel, ConfidenceReport};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use consistency::{ConsistencyModel, ConsistencyResult};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, ProfileError, ProfileResult,
};
pub use learn::StyleLearner;
pub use preprocess::{PreprocessOptions, TextPreprocessor};
pub use profile::{StyleProfile, TargetProfile};
pub use profiler::StyleProfiler;
pub use tokenize::Backend;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
