//! Mind-map analyzer - main orchestrator of the lexical pipeline.
//!
//! raw text → segmenter → classifier + hierarchy detector + topic extractor →
//! priority scorer → graph assembler → tree.
//!
//! Every paragraph is analyzed from its own content and the static lexicon only, so the
//! result does not depend on evaluation order.

use std::time::Instant;
use tracing::{debug, info};

use super::assembler::GraphAssembler;
use super::classifier::KeywordClassifier;
use super::hierarchy::HierarchyDetector;
use super::lexicon::Lexicon;
use super::priority::{rank, PriorityScorer};
use super::report::{AnalyzedParagraph, Analysis, KeyPoint};
use super::segmenter::{Paragraph, Segmenter};
use super::topic::{TopicExtractor, TopicSource};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::mindmap::MindNode;

/// Runs the whole lexical pipeline on one input string.
#[derive(Debug, Clone)]
pub struct MindMapAnalyzer {
    segmenter: Segmenter,
    classifier: KeywordClassifier,
    hierarchy: HierarchyDetector,
    topics: TopicExtractor,
    scorer: PriorityScorer,
    assembler: GraphAssembler,
}

impl Default for MindMapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MindMapAnalyzer {
    /// Create an analyzer with default thresholds.
    pub fn new() -> Self {
        Self::with_config(&AnalyzerConfig::default())
    }

    /// Create an analyzer with custom thresholds.
    pub fn with_config(config: &AnalyzerConfig) -> Self {
        let lexicon = Lexicon::global();
        Self {
            segmenter: Segmenter::new(),
            classifier: KeywordClassifier::with_config(
                lexicon,
                config.min_key_point_chars,
                config.max_punctuation_ratio,
            ),
            hierarchy: HierarchyDetector::new(lexicon),
            topics: TopicExtractor::new(lexicon),
            scorer: PriorityScorer::new(lexicon),
            assembler: GraphAssembler::new(),
        }
    }

    /// Build the mind-map tree for `text`.
    pub fn generate(&self, text: &str) -> Result<MindNode> {
        self.analyze(text).map(|analysis| analysis.tree)
    }

    /// Run the pipeline and keep the intermediate results next to the tree.
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        let start = Instant::now();

        // 1. Segment
        let paragraphs = self.segmenter.segment(text)?;

        // 2. Root topic; the fallback reads the segmented first paragraph
        let first = paragraphs.first().map_or(&[][..], |p| p.sentences.as_slice());
        let root = self.topics.extract_with(text, first);

        // A short first line used as the root label is not repeated as a child.
        let absorb_title = root.source == TopicSource::TitleLine && paragraphs.len() > 1;

        // 3. Per-paragraph analysis
        let mut key_points = Vec::new();
        let mut analyzed = Vec::with_capacity(paragraphs.len());
        for paragraph in &paragraphs {
            let points = self.key_points(paragraph);
            key_points.extend(points.iter().cloned());

            if absorb_title && paragraph.index == 0 {
                debug!("Paragraph 0 absorbed into root: {}", root.label);
                continue;
            }
            analyzed.push(self.analyze_paragraph(paragraph, points));
        }

        // 4. Order text-wide
        rank(&mut key_points);

        // 5. Assemble
        let tree = self
            .assembler
            .assemble(&root.label, &analyzed, &key_points)?;

        let analysis = Analysis {
            topic: root.label,
            paragraphs: analyzed,
            key_points,
            tree,
        };

        info!(
            "{} ({} ms)",
            analysis.summary(),
            start.elapsed().as_millis()
        );

        Ok(analysis)
    }

    fn analyze_paragraph(&self, paragraph: &Paragraph, mut points: Vec<KeyPoint>) -> AnalyzedParagraph {
        let level = self.hierarchy.detect_level(&paragraph.content);
        let topic = self
            .topics
            .extract_with(&paragraph.content, &paragraph.sentences)
            .label;
        rank(&mut points);

        debug!(
            "Paragraph {}: level {}, topic '{}', {} key points",
            paragraph.index,
            level,
            topic,
            points.len()
        );

        AnalyzedParagraph {
            index: paragraph.index,
            level,
            topic,
            key_points: points,
        }
    }

    /// One key point per (significant sentence, matched category) pair.
    fn key_points(&self, paragraph: &Paragraph) -> Vec<KeyPoint> {
        let mut points = Vec::new();
        for sentence in &paragraph.sentences {
            if !self.classifier.is_key_point(&sentence.content) {
                continue;
            }
            let content = self.topics.core_sentence(&sentence.content);
            let evidence_count = self.classifier.evidence_count(&sentence.content);
            let priority = self.scorer.score(&sentence.content, evidence_count);

            for category in self.classifier.classify(&sentence.content) {
                points.push(KeyPoint {
                    content: content.clone(),
                    category,
                    paragraph: paragraph.index,
                    evidence_count,
                    priority,
                });
            }
        }
        points
    }
}
