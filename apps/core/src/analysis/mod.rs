//! # Analysis Module
//!
//! Deterministic, non-LLM text analysis that turns free text into a mind-map tree.
//!
//! ## Components
//! - `lexicon`: static keyword tables shared by every component
//! - `segmenter`: paragraph and sentence splitting
//! - `classifier`: keyword categories and key point selection
//! - `hierarchy`: paragraph levels and the open-ancestor stack
//! - `topic`: topic patterns, fallback scoring and core sentences
//! - `priority`: sibling ordering scores
//! - `assembler`: tree construction
//! - `report`: intermediate results of a run
//! - `pipeline`: main orchestrator

pub mod assembler;
pub mod category;
pub mod classifier;
pub mod hierarchy;
pub mod lexicon;
pub mod pipeline;
pub mod priority;
pub mod report;
pub mod segmenter;
pub mod topic;

pub use assembler::GraphAssembler;
pub use category::Category;
pub use classifier::KeywordClassifier;
pub use hierarchy::{HierarchyDetector, LevelStack};
pub use lexicon::Lexicon;
pub use pipeline::MindMapAnalyzer;
pub use priority::PriorityScorer;
pub use report::{AnalyzedParagraph, Analysis, KeyPoint};
pub use segmenter::{Paragraph, Segmenter, Sentence};
pub use topic::{Topic, TopicExtractor, TopicSource};
