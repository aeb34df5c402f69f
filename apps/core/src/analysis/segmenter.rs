//! Sentence segmentation.
//!
//! Splits raw text into paragraphs on blank lines and paragraphs into sentences on
//! terminal punctuation or line breaks.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{MindMapError, Result};

/// Marks that close a sentence. A line break closes one as well.
const TERMINAL_MARKS: &[char] = &['。', '！', '？', '!', '?', '；', ';', '…', '\n'];

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\x{3000}]*\n").expect("Invalid regex: blank line pattern"));

/// A clause between terminal punctuation marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub content: String,
    /// Index of the owning paragraph.
    pub paragraph: usize,
}

impl Sentence {
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// A contiguous block of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub index: usize,
    pub content: String,
    pub sentences: Vec<Sentence>,
}

/// Splits text into paragraphs and sentences.
#[derive(Debug, Default, Clone, Copy)]
pub struct Segmenter;

impl Segmenter {
    pub fn new() -> Self {
        Self
    }

    /// Segment `text` into ordered paragraphs, each holding its ordered sentences.
    ///
    /// Text without any blank line but with several lines is treated as one paragraph
    /// per line, the way a plain outline is usually typed.
    pub fn segment(&self, text: &str) -> Result<Vec<Paragraph>> {
        let normalized = text.replace("\r\n", "\n");
        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            return Err(MindMapError::EmptyInput);
        }

        let mut blocks: Vec<&str> = BLANK_LINES
            .split(trimmed)
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .collect();

        if blocks.len() == 1 {
            let lines: Vec<&str> = trimmed
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();
            if lines.len() > 1 {
                blocks = lines;
            }
        }

        // A block made of terminal marks only stays whole as its single sentence.
        let paragraphs: Vec<Paragraph> = blocks
            .into_iter()
            .enumerate()
            .map(|(index, block)| {
                let mut sentences = split_sentences(block, index);
                if sentences.is_empty() {
                    sentences.push(Sentence {
                        content: block.to_string(),
                        paragraph: index,
                    });
                }
                Paragraph {
                    index,
                    content: block.to_string(),
                    sentences,
                }
            })
            .collect();

        Ok(paragraphs)
    }
}

/// Split a block into sentences; the terminal mark is not part of the content.
pub fn split_sentences(block: &str, paragraph: usize) -> Vec<Sentence> {
    block
        .split(|c: char| TERMINAL_MARKS.contains(&c))
        .map(|s| s.trim_matches(|c: char| c.is_whitespace() || c == '\u{3000}'))
        .filter(|s| !s.is_empty())
        .map(|s| Sentence {
            content: s.to_string(),
            paragraph,
        })
        .collect()
}
