//! Sample cleanup before learning.
//!
//! Books and web captures carry tables of contents, page numbers, chapter
//! headings, mixed-width punctuation, and ragged whitespace. Left in, these
//! skew sentence statistics and word frequencies. [`TextPreprocessor`] strips
//! or normalizes them, and [`TextPreprocessor::assess_quality`] estimates
//! whether a sample is fit for learning at all.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::consistency::MatchLevel;
use crate::text;

const CHAPTER_NUMERALS: &str = "一二三四五六七八九十百千万";

static TOC_CHAPTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"第[{CHAPTER_NUMERALS}]+章.*?(?:\.{{2,}}|…+|·{{2,}})\s*\d+"
    ))
    .expect("valid regex")
});

static TOC_ENGLISH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Chapter\s+\d+.*?(?:\.{2,}|…+)\s*\d+").expect("valid regex")
});

static TOC_NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\d+\.[ \t]+.*?(?:\.{2,}|…+)\s*\d+[ \t]*$").expect("valid regex")
});

static TOC_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:目[ \t]*录|CONTENTS|Table of Contents)[ \t]*$")
        .expect("valid regex")
});

static PAGE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+[ \t]*$").expect("valid regex"));

static PAGE_DASHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[- \t]*\d+[- \t]*$").expect("valid regex"));

static PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"第\s*\d+\s*页").expect("valid regex"));

static CHAPTER_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)^第([{CHAPTER_NUMERALS}]+)章[ \t]*(.*)$")).expect("valid regex")
});

static EDGE_BLANKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]+|[ \t]+$").expect("valid regex"));

static EXTRA_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

static SPACE_BETWEEN_HAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\x{4e00}-\x{9fa5}])[ \t\x{3000}]+([\x{4e00}-\x{9fa5}])").expect("valid regex")
});

/// Half-width marks converted when they touch a Han character.
const WIDTH_PAIRS: [(char, char); 8] = [
    (',', '，'),
    ('.', '。'),
    ('!', '！'),
    ('?', '？'),
    (':', '：'),
    (';', '；'),
    ('(', '（'),
    (')', '）'),
];

/// A pair of rewrite rules per mark: after a Han character, then before one.
static WIDTH_RULES: LazyLock<Vec<(Regex, String, Regex, String)>> = LazyLock::new(|| {
    WIDTH_PAIRS
        .iter()
        .map(|&(half, full)| {
            let escaped = regex::escape(&half.to_string());
            (
                Regex::new(&format!(r"([\x{{4e00}}-\x{{9fa5}}]){escaped}")).expect("valid regex"),
                format!("${{1}}{full}"),
                Regex::new(&format!(r"{escaped}([\x{{4e00}}-\x{{9fa5}}])")).expect("valid regex"),
                format!("{full}${{1}}"),
            )
        })
        .collect()
});

/// CJK punctuation counted by the quality metrics.
const QUALITY_PUNCTUATION: &[char] = &[
    '，', '。', '！', '？', '；', '：', '、', '“', '”', '‘', '’', '（', '）', '《', '》', '【', '】',
];

/// Which cleanup steps to run. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Remove table-of-contents lines and headings.
    pub remove_toc: bool,
    /// Remove page number lines and `第N页` markers.
    pub remove_page_numbers: bool,
    /// Reformat (or drop) `第X章` chapter headings.
    pub normalize_chapter_titles: bool,
    /// Keep chapter headings when normalizing; `false` drops them.
    pub keep_titles: bool,
    /// Convert half-width punctuation next to Han characters to full-width.
    pub normalize_punctuation: bool,
    /// Trim lines, collapse blank lines, and remove spaces between Han characters.
    pub remove_extra_whitespace: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            remove_toc: true,
            remove_page_numbers: true,
            normalize_chapter_titles: true,
            keep_titles: true,
            normalize_punctuation: true,
            remove_extra_whitespace: true,
        }
    }
}

/// Outcome of [`TextPreprocessor::preprocess`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreprocessReport {
    /// The cleaned text.
    pub text: String,
    /// Input length in characters.
    pub original_length: usize,
    /// Output length in characters.
    pub processed_length: usize,
    /// Characters removed (negative when normalization added characters).
    pub reduction: i64,
    /// `reduction` as a percentage of the input, 0 for empty input.
    pub reduction_rate: f64,
    /// What each step did, in order.
    pub steps: Vec<String>,
}

/// Measurements behind a [`QualityReport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QualityMetrics {
    /// Length in characters.
    pub length: usize,
    /// Share of Han characters.
    pub chinese_ratio: f64,
    /// Share of CJK punctuation.
    pub punctuation_ratio: f64,
    /// Share of whitespace.
    pub whitespace_ratio: f64,
    /// Share of non-blank lines that repeat an earlier line.
    pub repeated_line_ratio: f64,
}

/// Fitness of a sample for style learning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QualityReport {
    /// Score from 0 to 100.
    pub score: u32,
    /// Grade of the score.
    pub level: MatchLevel,
    /// Raw measurements.
    pub metrics: QualityMetrics,
    /// Improvement hints, or a single all-clear message.
    pub suggestions: Vec<String>,
}

/// Cleans raw sample text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPreprocessor;

impl TextPreprocessor {
    /// Run the enabled cleanup steps over `text`.
    #[tracing::instrument(skip_all, fields(text_len = input.len()))]
    pub fn preprocess(&self, input: &str, options: &PreprocessOptions) -> PreprocessReport {
        let mut current = input.to_string();
        let mut steps = Vec::new();

        if options.remove_toc {
            let removed = shrink(&mut current, remove_toc);
            if removed > 0 {
                steps.push(format!("Removed table of contents: {removed} characters"));
            }
        }

        if options.remove_page_numbers {
            let removed = shrink(&mut current, remove_page_numbers);
            if removed > 0 {
                steps.push(format!("Removed page numbers: {removed} characters"));
            }
        }

        if options.normalize_chapter_titles {
            current = normalize_chapter_titles(&current, options.keep_titles);
            steps.push("Normalized chapter titles".to_string());
        }

        if options.normalize_punctuation {
            current = normalize_punctuation(&current);
            steps.push("Converted punctuation to full-width".to_string());
        }

        if options.remove_extra_whitespace {
            let removed = shrink(&mut current, remove_extra_whitespace);
            if removed > 0 {
                steps.push(format!("Removed extra whitespace: {removed} characters"));
            }
        }

        let original_length = text::char_len(input);
        let processed_length = text::char_len(&current);
        let reduction = original_length as i64 - processed_length as i64;
        let reduction_rate = if original_length > 0 {
            reduction as f64 / original_length as f64 * 100.0
        } else {
            0.0
        };

        tracing::debug!(original_length, processed_length, "text preprocessed");

        PreprocessReport {
            text: current,
            original_length,
            processed_length,
            reduction,
            reduction_rate,
            steps,
        }
    }

    /// Score how suitable `text` is as a learning sample.
    #[tracing::instrument(skip_all, fields(text_len = input.len()))]
    pub fn assess_quality(&self, input: &str) -> QualityReport {
        let metrics = quality_metrics(input);

        let mut deduction = 0u32;
        deduction += if metrics.length < 10_000 {
            30
        } else if metrics.length < 50_000 {
            10
        } else {
            0
        };
        deduction += if metrics.chinese_ratio < 0.7 {
            20
        } else if metrics.chinese_ratio < 0.8 {
            10
        } else {
            0
        };
        deduction += if metrics.whitespace_ratio > 0.3 {
            15
        } else if metrics.whitespace_ratio > 0.2 {
            5
        } else {
            0
        };
        deduction += if metrics.repeated_line_ratio > 0.1 {
            10
        } else if metrics.repeated_line_ratio > 0.05 {
            5
        } else {
            0
        };

        let score = 100u32.saturating_sub(deduction);
        QualityReport {
            score,
            level: MatchLevel::from_score(f64::from(score) / 100.0),
            metrics,
            suggestions: quality_suggestions(&metrics),
        }
    }
}

/// Apply `step` and return how many characters it removed.
fn shrink(current: &mut String, step: fn(&str) -> String) -> usize {
    let before = text::char_len(current);
    *current = step(current);
    before.saturating_sub(text::char_len(current))
}

fn remove_toc(input: &str) -> String {
    let out = TOC_CHAPTER.replace_all(input, "");
    let out = TOC_ENGLISH.replace_all(&out, "");
    let out = TOC_NUMBERED.replace_all(&out, "");
    TOC_HEADING.replace_all(&out, "").into_owned()
}

fn remove_page_numbers(input: &str) -> String {
    let out = PAGE_BARE.replace_all(input, "");
    let out = PAGE_DASHED.replace_all(&out, "");
    PAGE_MARKER.replace_all(&out, "").into_owned()
}

fn normalize_chapter_titles(input: &str, keep: bool) -> String {
    let replacement = if keep { "\n第${1}章 ${2}\n" } else { "" };
    CHAPTER_TITLE.replace_all(input, replacement).into_owned()
}

fn normalize_punctuation(input: &str) -> String {
    let mut out = input.to_string();
    for (after_han, after_rep, before_han, before_rep) in WIDTH_RULES.iter() {
        out = after_han.replace_all(&out, after_rep.as_str()).into_owned();
        out = before_han.replace_all(&out, before_rep.as_str()).into_owned();
    }
    out
}

/// Chapter headings keep the space between number and title.
fn remove_extra_whitespace(input: &str) -> String {
    let out = EDGE_BLANKS.replace_all(input, "");
    let out = EXTRA_NEWLINES.replace_all(&out, "\n\n");
    let lines: Vec<String> = out.split('\n').map(join_han_outside_heading).collect();
    lines.join("\n").trim().to_string()
}

fn join_han_outside_heading(line: &str) -> String {
    match CHAPTER_TITLE.captures(line).and_then(|caps| caps.get(2)) {
        Some(title) => format!("{}{}", &line[..title.start()], join_han(title.as_str())),
        None => join_han(line),
    }
}

fn join_han(line: &str) -> String {
    // Two passes: adjacent matches share a character.
    let once = SPACE_BETWEEN_HAN.replace_all(line, "${1}${2}");
    SPACE_BETWEEN_HAN.replace_all(&once, "${1}${2}").into_owned()
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn quality_metrics(input: &str) -> QualityMetrics {
    let length = text::char_len(input);
    let han = input.chars().filter(|&c| text::is_han(c)).count();
    let punctuation = input
        .chars()
        .filter(|c| QUALITY_PUNCTUATION.contains(c))
        .count();
    let whitespace = input.chars().filter(|c| c.is_whitespace()).count();

    let lines: Vec<&str> = input
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    let unique: HashSet<&str> = lines.iter().copied().collect();
    let repeated_line_ratio = if lines.is_empty() {
        0.0
    } else {
        1.0 - unique.len() as f64 / lines.len() as f64
    };

    QualityMetrics {
        length,
        chinese_ratio: ratio(han, length),
        punctuation_ratio: ratio(punctuation, length),
        whitespace_ratio: ratio(whitespace, length),
        repeated_line_ratio,
    }
}

fn quality_suggestions(metrics: &QualityMetrics) -> Vec<String> {
    let mut suggestions = Vec::new();

    if metrics.length < 10_000 {
        suggestions.push("Sample is too small; provide at least 10,000 characters".to_string());
    } else if metrics.length < 50_000 {
        suggestions
            .push("Sample is on the small side; 50,000+ characters learns better".to_string());
    }
    if metrics.chinese_ratio < 0.7 {
        suggestions.push("Low share of Chinese characters; the sample may contain other content".to_string());
    }
    if metrics.whitespace_ratio > 0.3 {
        suggestions.push("Too much whitespace; clean up extra spaces and blank lines".to_string());
    }
    if metrics.repeated_line_ratio > 0.1 {
        suggestions.push("Many repeated lines; check for and remove duplicated content".to_string());
    }
    if suggestions.is_empty() {
        suggestions.push("Sample quality is good and ready for style learning".to_string());
    }

    suggestions
}
