//! Syntactic analysis: sentence length statistics and punctuation habits.
//!
//! Never fails. Empty or sentence-less input yields the all-zero profile, so
//! partial profiles can still be compared downstream.

use std::collections::BTreeMap;

use crate::text;
use crate::word_lists::TRACKED_PUNCTUATION;

use super::reports::{LengthBucket, LengthDistribution, SyntacticProfile};

/// Summary statistics over sentence lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LengthStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest value.
    pub min: usize,
    /// Largest value.
    pub max: usize,
}

/// Measures sentence structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticAnalyzer;

impl SyntacticAnalyzer {
    /// Analyze sentence structure and punctuation of `text`.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> SyntacticProfile {
        let sentences = text::split_sentences(text);
        let lengths: Vec<usize> = sentences.iter().map(|s| text::char_len(s)).collect();
        let stats = length_stats(&lengths);
        let (punctuation_counts, punctuation_style) = punctuation_profile(text);

        tracing::debug!(sentences = lengths.len(), "syntactic analysis complete");

        SyntacticProfile {
            sentence_count: lengths.len(),
            avg_sentence_length: stats.mean,
            std_deviation: stats.std_dev,
            min_length: stats.min,
            max_length: stats.max,
            length_distribution: length_distribution(&lengths),
            punctuation_style,
            punctuation_counts,
        }
    }
}

/// Mean, population standard deviation, min, and max of `lengths`.
///
/// All zero for an empty slice.
pub fn length_stats(lengths: &[usize]) -> LengthStats {
    if lengths.is_empty() {
        return LengthStats::default();
    }

    let count = lengths.len() as f64;
    let mean = lengths.iter().sum::<usize>() as f64 / count;
    let variance = lengths
        .iter()
        .map(|&l| (l as f64 - mean).powi(2))
        .sum::<f64>()
        / count;

    LengthStats {
        mean,
        std_dev: variance.sqrt(),
        min: lengths.iter().copied().min().unwrap_or(0),
        max: lengths.iter().copied().max().unwrap_or(0),
    }
}

/// Fraction of sentence lengths falling in each bucket.
pub fn length_distribution(lengths: &[usize]) -> LengthDistribution {
    if lengths.is_empty() {
        return LengthDistribution::default();
    }

    let (mut short, mut medium, mut long) = (0usize, 0usize, 0usize);
    for &len in lengths {
        match LengthBucket::categorize(len) {
            LengthBucket::Short => short += 1,
            LengthBucket::Medium => medium += 1,
            LengthBucket::Long => long += 1,
        }
    }

    let total = lengths.len() as f64;
    LengthDistribution {
        short: short as f64 / total,
        medium: medium as f64 / total,
        long: long as f64 / total,
    }
}

/// Count tracked punctuation marks and their share of all tracked marks.
///
/// Both maps are empty when the text contains none.
pub fn punctuation_profile(text: &str) -> (BTreeMap<String, usize>, BTreeMap<String, f64>) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for c in text.chars().filter(|c| TRACKED_PUNCTUATION.contains(c)) {
        *counts.entry(c.to_string()).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    let frequency = counts
        .iter()
        .map(|(mark, &count)| (mark.clone(), count as f64 / total as f64))
        .collect();

    (counts, frequency)
}
