//! Topic extraction.
//!
//! Picks a label for a text: first through an ordered list of topic patterns, then by
//! scoring the sentences of the first paragraph.

use regex::Regex;
use std::sync::LazyLock;

use super::hierarchy::HierarchyDetector;
use super::lexicon::{contains_any, Lexicon};
use super::segmenter::{Segmenter, Sentence};

/// Label used when nothing at all can be extracted.
pub const DEFAULT_TOPIC: &str = "中心主题";

const EMPHASIS_BONUS: u32 = 3;
const LENGTH_BONUS: u32 = 2;
const MIN_TOPIC_CHARS: usize = 5;
const MAX_TOPIC_CHARS: usize = 20;

/// Which rule produced a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicSource {
    /// One of the semantic topic patterns.
    Pattern,
    /// A short first line standing on its own, used as a title.
    TitleLine,
    /// The best scored sentence of the first paragraph.
    Fallback,
    /// Nothing usable; [`DEFAULT_TOPIC`].
    Default,
}

/// A topic label and how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub label: String,
    pub source: TopicSource,
}

// Compile patterns once at startup, in priority order.
static TOPIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"关于([^，。！？；,.!?;\n]{2,20}?)[的地]").expect("Invalid regex: 关于X的 pattern"),
        Regex::new(r"([^，。！？；,.!?;\s]{2,15}?(?:问题|情况|研究))").expect("Invalid regex: X问题 pattern"),
        Regex::new(r"如何([^，。！？；,.!?;\n]{2,20})").expect("Invalid regex: 如何X pattern"),
        Regex::new(r"([^，。！？；,.!?;\s]{2,15}?)的主要内容").expect("Invalid regex: X的主要内容 pattern"),
    ]
});

static TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([^，。！？；：,.!?;:\s]{2,12})[ \t]*\n").expect("Invalid regex: title line pattern")
});

/// Extracts topic labels from text.
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    lexicon: &'static Lexicon,
    hierarchy: HierarchyDetector,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new(Lexicon::global())
    }
}

impl TopicExtractor {
    pub fn new(lexicon: &'static Lexicon) -> Self {
        Self {
            lexicon,
            hierarchy: HierarchyDetector::new(lexicon),
        }
    }

    /// Label of `text`.
    pub fn extract_topic(&self, text: &str) -> String {
        self.extract(text).label
    }

    /// Label of `text` together with the rule that produced it.
    ///
    /// The fallback reads the first paragraph exactly as [`Segmenter`] cuts it.
    pub fn extract(&self, text: &str) -> Topic {
        match Segmenter::new().segment(text) {
            Ok(paragraphs) => {
                let first = paragraphs.first().map_or(&[][..], |p| p.sentences.as_slice());
                self.extract_with(text, first)
            }
            Err(_) => Topic {
                label: DEFAULT_TOPIC.to_string(),
                source: TopicSource::Default,
            },
        }
    }

    /// Like [`extract`](Self::extract), with the sentences of the already segmented
    /// first paragraph of `text` as fallback candidates.
    pub fn extract_with(&self, text: &str, first_paragraph: &[Sentence]) -> Topic {
        let text = text.trim();
        if text.is_empty() {
            return Topic {
                label: DEFAULT_TOPIC.to_string(),
                source: TopicSource::Default,
            };
        }

        for pattern in TOPIC_PATTERNS.iter() {
            if let Some(label) = first_capture(pattern, text) {
                return Topic {
                    label,
                    source: TopicSource::Pattern,
                };
            }
        }

        if let Some(label) = first_capture(&TITLE_LINE, text) {
            return Topic {
                label,
                source: TopicSource::TitleLine,
            };
        }

        match self.best_sentence(first_paragraph) {
            Some(sentence) => Topic {
                label: self.core_sentence(sentence),
                source: TopicSource::Fallback,
            },
            None => Topic {
                label: DEFAULT_TOPIC.to_string(),
                source: TopicSource::Default,
            },
        }
    }

    /// Topic-likelihood score of one sentence.
    pub fn score_sentence(&self, sentence: &str) -> u32 {
        let mut score = 0;
        if contains_any(sentence, self.lexicon.emphasis) {
            score += EMPHASIS_BONUS;
        }
        let len = sentence.chars().count();
        if (MIN_TOPIC_CHARS..=MAX_TOPIC_CHARS).contains(&len) {
            score += LENGTH_BONUS;
        }
        score + self.hierarchy.indicator_count(sentence) as u32
    }

    /// Highest scored sentence; the earliest wins ties.
    fn best_sentence<'a>(&self, sentences: &'a [Sentence]) -> Option<&'a str> {
        let mut best: Option<(u32, &str)> = None;
        for sentence in sentences {
            let score = self.score_sentence(&sentence.content);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, sentence.content.as_str()));
            }
        }
        best.map(|(_, sentence)| sentence)
    }

    /// Strip connective prefixes and a nominalizing suffix from `sentence`.
    ///
    /// Returns the trimmed input unchanged when stripping would leave nothing.
    pub fn core_sentence(&self, sentence: &str) -> String {
        let original = sentence.trim();
        let mut core = original;

        loop {
            let before = core;
            core = core.trim_start_matches(is_separator);
            if let Some(prefix) = self
                .lexicon
                .connective_prefixes
                .iter()
                .find(|p| core.starts_with(*p) && core.len() > p.len())
            {
                core = &core[prefix.len()..];
            }
            if core == before {
                break;
            }
        }

        if let Some(suffix) = self
            .lexicon
            .nominalizing_suffixes
            .iter()
            .find(|s| core.ends_with(*s) && core.len() > s.len())
        {
            core = &core[..core.len() - suffix.len()];
        }

        let core = core.trim_matches(is_separator);
        if core.is_empty() {
            original.to_string()
        } else {
            core.to_string()
        }
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|label| !label.is_empty())
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '，' | '、' | '：' | ',' | ':' | '-' | '—')
}
