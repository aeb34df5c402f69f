//! Keyword classification.
//!
//! Tags sentences with every category whose keyword list has a substring match.
//! No tokenization or stemming: keywords are whole multi-character phrases.

use std::collections::BTreeSet;

use super::category::Category;
use super::lexicon::{contains_any, Lexicon};

const DEFAULT_MIN_KEY_POINT_CHARS: usize = 4;
const DEFAULT_MAX_PUNCTUATION_RATIO: f32 = 0.3;

/// Keyword classifier backed by the static lexicon.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    lexicon: &'static Lexicon,
    min_key_point_chars: usize,
    max_punctuation_ratio: f32,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(Lexicon::global())
    }
}

impl KeywordClassifier {
    pub fn new(lexicon: &'static Lexicon) -> Self {
        Self::with_config(
            lexicon,
            DEFAULT_MIN_KEY_POINT_CHARS,
            DEFAULT_MAX_PUNCTUATION_RATIO,
        )
    }

    pub fn with_config(
        lexicon: &'static Lexicon,
        min_key_point_chars: usize,
        max_punctuation_ratio: f32,
    ) -> Self {
        Self {
            lexicon,
            min_key_point_chars,
            max_punctuation_ratio,
        }
    }

    /// All categories with at least one keyword contained in `sentence`.
    pub fn classify(&self, sentence: &str) -> BTreeSet<Category> {
        self.lexicon
            .categories
            .iter()
            .filter(|(_, keywords)| contains_any(sentence, keywords))
            .map(|(category, _)| *category)
            .collect()
    }

    /// Whether a sentence is significant enough to become a key point.
    pub fn is_key_point(&self, sentence: &str) -> bool {
        let total = sentence.chars().count();
        if total < self.min_key_point_chars {
            return false;
        }
        if punctuation_ratio(sentence) > self.max_punctuation_ratio {
            return false;
        }
        !self.classify(sentence).is_empty()
    }

    /// Number of distinct evidence markers referenced by the sentence.
    pub fn evidence_count(&self, sentence: &str) -> u32 {
        self.lexicon
            .evidence
            .iter()
            .filter(|marker| sentence.contains(*marker))
            .count() as u32
    }
}

/// Share of punctuation characters in `text`.
fn punctuation_ratio(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let punct = text
        .chars()
        .filter(|c| c.is_ascii_punctuation() || is_cjk_punctuation(*c))
        .count();
    punct as f32 / total as f32
}

fn is_cjk_punctuation(c: char) -> bool {
    matches!(
        c,
        '，' | '。' | '、' | '；' | '：' | '？' | '！' | '“' | '”' | '‘' | '’' | '（' | '）'
            | '《' | '》' | '【' | '】' | '…' | '—' | '·'
    )
}
