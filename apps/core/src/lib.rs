//! mindmap-core
//!
//! Turns free text into a mind-map tree. The lexical pipeline in [`analysis`] is
//! deterministic and needs no network; [`remote`] delegates the same job to an
//! OpenAI-compatible completion service. [`outline`], [`share`] and [`history`] are
//! thin collaborators around the resulting [`MindNode`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod history;
pub mod mindmap;
pub mod outline;
pub mod remote;
pub mod share;

pub use analysis::MindMapAnalyzer;
pub use config::{AnalyzerConfig, RemoteConfig};
pub use error::{MindMapError, Result};
pub use history::{HistoryEntry, HistoryStore};
pub use mindmap::{MindGraph, MindNode, NodeKind};
pub use outline::parse_outline;

#[cfg(test)]
mod tests;
