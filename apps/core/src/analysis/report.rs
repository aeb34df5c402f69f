//! Analysis report - intermediate and final results of one pipeline run.

use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::mindmap::MindNode;

/// A sentence judged structurally significant, filed under exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    /// Core content, connective prefixes and suffixes stripped.
    pub content: String,
    pub category: Category,
    /// Index of the owning paragraph.
    pub paragraph: usize,
    pub evidence_count: u32,
    pub priority: u32,
}

/// A paragraph after level detection and topic extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedParagraph {
    pub index: usize,
    pub level: u8,
    pub topic: String,
    /// Key points of this paragraph, highest priority first.
    pub key_points: Vec<KeyPoint>,
}

/// Everything one run of the pipeline produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Root label.
    pub topic: String,
    /// Paragraphs emitted as structural nodes, in original order.
    pub paragraphs: Vec<AnalyzedParagraph>,
    /// All key points of the text, highest priority first.
    pub key_points: Vec<KeyPoint>,
    pub tree: MindNode,
}

impl Analysis {
    /// Key points of one category, in output order.
    pub fn category(&self, category: Category) -> impl Iterator<Item = &KeyPoint> {
        self.key_points
            .iter()
            .filter(move |p| p.category == category)
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        let categories = Category::ALL
            .iter()
            .filter(|c| self.category(**c).next().is_some())
            .count();
        format!(
            "Topic: {}, Paragraphs: {}, Key points: {}, Categories: {}, Nodes: {}",
            self.topic,
            self.paragraphs.len(),
            self.key_points.len(),
            categories,
            self.tree.node_count()
        )
    }
}
