//! Curated word lists for sentiment scoring.
//!
//! A deliberately small lexicon: 24 positive and 24 negative two-character
//! terms common in narrative Chinese prose.

/// Terms that push the sentiment score toward positive.
pub const POSITIVE_TERMS: &[&str] = &[
    "喜欢", "高兴", "快乐", "幸福", "美好", "优秀", "成功", "胜利", "欢乐", "愉快", "满意", "开心",
    "兴奋", "激动", "温暖", "感动", "希望", "光明", "美丽", "善良", "友好", "和平", "繁荣", "富强",
];

/// Terms that push the sentiment score toward negative.
pub const NEGATIVE_TERMS: &[&str] = &[
    "悲伤", "痛苦", "难过", "失望", "绝望", "恐惧", "害怕", "担心", "愤怒", "生气", "讨厌", "厌恶",
    "失败", "错误", "困难", "危险", "黑暗", "邪恶", "残酷", "冷漠", "孤独", "寂寞", "贫穷", "疾病",
];

/// CJK punctuation marks tracked by the syntactic analyzer's punctuation profile.
pub const TRACKED_PUNCTUATION: &[char] = &[
    '，', '。', '！', '？', '；', '：', '、', '…', '—', '（', '）',
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lexicons_have_expected_size() {
        assert_eq!(POSITIVE_TERMS.len(), 24);
        assert_eq!(NEGATIVE_TERMS.len(), 24);
    }

    #[test]
    fn lexicons_are_disjoint() {
        let positive: HashSet<_> = POSITIVE_TERMS.iter().collect();
        assert!(NEGATIVE_TERMS.iter().all(|t| !positive.contains(t)));
    }
}
