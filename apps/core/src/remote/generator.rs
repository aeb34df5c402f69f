//! Remote generation: prompt, completion, normalization.

use std::time::Instant;
use tracing::{debug, info};

use super::client::CompletionService;
use super::normalize::normalize_or_recover;
use super::prompt::build_prompt;
use crate::error::{MindMapError, Result};
use crate::mindmap::MindNode;

/// Generates a mind map by delegating to a completion service.
pub struct RemoteGenerator<S: CompletionService> {
    service: S,
}

impl<S: CompletionService> RemoteGenerator<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Blank input never reaches the service.
    pub async fn generate(&self, text: &str) -> Result<MindNode> {
        if text.trim().is_empty() {
            return Err(MindMapError::EmptyInput);
        }

        let start = Instant::now();
        let prompt = build_prompt(text);
        debug!("Prompt built ({} chars)", prompt.chars().count());

        let raw = self.service.complete(prompt).await?;
        let tree = normalize_or_recover(&raw)?;

        info!(
            "Remote mind map '{}' with {} nodes in {}ms",
            tree.label,
            tree.node_count(),
            start.elapsed().as_millis()
        );
        Ok(tree)
    }
}
