//! Hierarchy detection.
//!
//! A paragraph's level comes from the first indicator group it mentions. Nesting is
//! resolved with an explicit stack of open ancestors keyed by level.

use super::lexicon::{contains_any, Lexicon};

/// Level of paragraphs that carry no indicator.
pub const ROOT_LEVEL: u8 = 1;

/// Assigns nesting levels from indicator phrases.
#[derive(Debug, Clone)]
pub struct HierarchyDetector {
    lexicon: &'static Lexicon,
}

impl Default for HierarchyDetector {
    fn default() -> Self {
        Self::new(Lexicon::global())
    }
}

impl HierarchyDetector {
    pub fn new(lexicon: &'static Lexicon) -> Self {
        Self { lexicon }
    }

    /// Level of the first matching indicator group, or [`ROOT_LEVEL`].
    pub fn detect_level(&self, paragraph: &str) -> u8 {
        self.lexicon
            .level_indicators
            .iter()
            .find(|group| contains_any(paragraph, group.phrases))
            .map(|group| group.level)
            .unwrap_or(ROOT_LEVEL)
    }

    /// Number of indicator phrases (any group) contained in `text`.
    pub fn indicator_count(&self, text: &str) -> usize {
        self.lexicon
            .level_indicators
            .iter()
            .flat_map(|group| group.phrases.iter())
            .filter(|phrase| text.contains(*phrase))
            .count()
    }
}

/// Ordered stack of open ancestors keyed by level.
///
/// The stack never holds two entries where the lower one has an equal or higher level,
/// so its depth is the number of open ancestors of the next item.
#[derive(Debug)]
pub struct LevelStack<T> {
    entries: Vec<(u8, T)>,
}

impl<T> Default for LevelStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LevelStack<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Open `item` at `level` and return its parent (`None` means the root).
    ///
    /// Entries are popped until the top has a strictly lower level, so a paragraph at
    /// an equal or lower level closes its previous siblings and their descendants.
    pub fn attach(&mut self, level: u8, item: T) -> Option<&T> {
        while matches!(self.entries.last(), Some((top, _)) if *top >= level) {
            self.entries.pop();
        }
        self.entries.push((level, item));
        let len = self.entries.len();
        if len >= 2 {
            Some(&self.entries[len - 2].1)
        } else {
            None
        }
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn top_level(&self) -> Option<u8> {
        self.entries.last().map(|(level, _)| *level)
    }
}
