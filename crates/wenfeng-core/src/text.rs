//! Text processing utilities.
//!
//! Provides sentence splitting, character classification, and character
//! counting for use by the analyzers. Lengths are measured in Unicode scalar
//! values, so one Han character counts as one.

use regex::Regex;
use std::sync::LazyLock;

/// Sentence-terminating punctuation, CJK and ASCII variants.
static SENTENCE_ENDERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[。！？；.!?;]").expect("valid regex"));

/// Split text into trimmed, non-empty sentences.
///
/// Splits on every terminator without lookahead, so `3.14` yields two
/// fragments. Fragments that are empty after trimming are dropped.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    SENTENCE_ENDERS
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Whether `c` is a Han ideograph in the basic CJK Unified Ideographs block.
pub const fn is_han(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FA5}')
}

/// Whether `c` is punctuation, ASCII or CJK.
///
/// Covers ASCII punctuation, general punctuation (dashes, quotes, ellipsis),
/// CJK symbols and punctuation, CJK compatibility forms, and the
/// punctuation ranges of the full-width forms block.
pub const fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2010}'..='\u{2027}'
                | '\u{2030}'..='\u{205E}'
                | '\u{3000}'..='\u{303F}'
                | '\u{FE30}'..='\u{FE4F}'
                | '\u{FF01}'..='\u{FF0F}'
                | '\u{FF1A}'..='\u{FF20}'
                | '\u{FF3B}'..='\u{FF40}'
                | '\u{FF5B}'..='\u{FF65}'
                | '\u{00B7}'
        )
}

/// Whether a token carries no lexical content (only whitespace or punctuation).
pub fn is_blank_or_punctuation(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_whitespace() || is_punctuation(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_cjk_terminators() {
        let sentences = split_sentences("江湖风云变幻。英雄辈出！谁与争锋？");
        assert_eq!(sentences, vec!["江湖风云变幻", "英雄辈出", "谁与争锋"]);
    }

    #[test]
    fn splits_on_ascii_terminators_and_semicolons() {
        let sentences = split_sentences("One. Two! Three? Four; 五；六");
        assert_eq!(
            sentences,
            vec!["One", "Two", "Three", "Four", "五", "六"]
        );
    }

    #[test]
    fn drops_empty_fragments() {
        let sentences = split_sentences("。。  。好。\n\n");
        assert_eq!(sentences, vec!["好"]);
    }

    #[test]
    fn empty_text_has_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n").is_empty());
    }

    #[test]
    fn char_len_counts_han_as_one() {
        assert_eq!(char_len("江湖"), 2);
        assert_eq!(char_len("ab江"), 3);
    }

    #[test]
    fn punctuation_classification() {
        for c in ['，', '。', '！', '？', '；', '：', '、', '…', '—', '（', '）', '“', ',', '.'] {
            assert!(is_punctuation(c), "{c} should be punctuation");
        }
        for c in ['江', 'a', '1', ' '] {
            assert!(!is_punctuation(c), "{c} should not be punctuation");
        }
    }

    #[test]
    fn blank_tokens() {
        assert!(is_blank_or_punctuation("，"));
        assert!(is_blank_or_punctuation("  "));
        assert!(is_blank_or_punctuation("……"));
        assert!(!is_blank_or_punctuation("江湖"));
        assert!(!is_blank_or_punctuation("a,"));
    }
}
