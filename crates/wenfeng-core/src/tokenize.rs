//! Word segmentation backends.
//!
//! Chinese has no spaces between words, so lexical analysis needs a
//! segmenter. The [`Tokenizer`] trait is the seam: the lexical analyzer only
//! asks for a sequence of lexical units, and any backend that can produce one
//! is acceptable.
//!
//! - [`JiebaTokenizer`] - dictionary + HMM segmentation via `jieba-rs` (default)
//! - [`WhitespaceTokenizer`] - splits on whitespace, for space-delimited text
//! - [`CharTokenizer`] - one unit per non-whitespace character

use std::sync::{Arc, OnceLock};

use jieba_rs::Jieba;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Splits text into lexical units.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`. Output may contain whitespace or punctuation units;
    /// callers filter those.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Selects a tokenizer implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Backend {
    /// Dictionary/HMM segmentation (jieba).
    #[default]
    Jieba,
    /// Whitespace splitting.
    Whitespace,
    /// One unit per character.
    Char,
}

impl Backend {
    /// Returns the backend name as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jieba => "jieba",
            Self::Whitespace => "whitespace",
            Self::Char => "char",
        }
    }

    /// Build a shareable tokenizer for this backend.
    pub fn tokenizer(self) -> Arc<dyn Tokenizer> {
        match self {
            Self::Jieba => Arc::new(JiebaTokenizer),
            Self::Whitespace => Arc::new(WhitespaceTokenizer),
            Self::Char => Arc::new(CharTokenizer),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global Jieba instance. Loading the dictionary is expensive, so it happens
/// once, on first use.
static JIEBA: OnceLock<Jieba> = OnceLock::new();

fn jieba() -> &'static Jieba {
    JIEBA.get_or_init(|| {
        tracing::debug!("loading jieba dictionary");
        Jieba::new()
    })
}

/// Dictionary-based Chinese segmentation with HMM for unknown words.
#[derive(Debug, Clone, Copy, Default)]
pub struct JiebaTokenizer;

impl Tokenizer for JiebaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        jieba()
            .cut(text, true)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Splits on Unicode whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.trim_matches(crate::text::is_punctuation))
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Emits every non-whitespace character as its own unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharTokenizer;

impl Tokenizer for CharTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jieba_segments_chinese() {
        let tokens = JiebaTokenizer.tokenize("我喜欢编程和人工智能");
        assert!(!tokens.is_empty());
        assert!(tokens.iter().any(|t| t.contains("编程")));
        // Segmentation never invents characters.
        assert_eq!(tokens.concat(), "我喜欢编程和人工智能");
    }

    #[test]
    fn whitespace_strips_edge_punctuation() {
        let tokens = WhitespaceTokenizer.tokenize("the cat, the hat.");
        assert_eq!(tokens, vec!["the", "cat", "the", "hat"]);
    }

    #[test]
    fn char_tokenizer_skips_whitespace() {
        let tokens = CharTokenizer.tokenize("江 湖\n");
        assert_eq!(tokens, vec!["江", "湖"]);
    }

    #[test]
    fn backend_round_trips_through_serde() {
        let json = serde_json::to_string(&Backend::Whitespace).unwrap();
        assert_eq!(json, "\"whitespace\"");
        let back: Backend = serde_json::from_str("\"char\"").unwrap();
        assert_eq!(back, Backend::Char);
        assert_eq!(Backend::default(), Backend::Jieba);
    }

    #[test]
    fn backend_builds_matching_tokenizer() {
        let tokens = Backend::Char.tokenizer().tokenize("好人");
        assert_eq!(tokens, vec!["好", "人"]);
    }
}
