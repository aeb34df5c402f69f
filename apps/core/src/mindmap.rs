//! Mind-map tree, the output handed to the rendering collaborator.
//!
//! Children are owned, so a node can never be its own ancestor. The flattened
//! [`MindGraph`] form is derived on demand for renderers that want node and edge lists.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Role of a node in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    /// A paragraph (or outline line) of the source text.
    Topic,
    /// A keyword category grouping key points text-wide.
    Category,
    #[default]
    Point,
}

/// One labeled vertex of the mind map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<MindNode>,
}

impl MindNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MindNode>) -> Self {
        self.children = children;
        self
    }

    /// Total number of nodes, this one included.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Length of the longest root-to-leaf path, counted in nodes.
    pub fn depth(&self) -> usize {
        self.iter_with_depth()
            .map(|(_, depth)| depth + 1)
            .max()
            .unwrap_or(1)
    }

    /// Pre-order traversal.
    pub fn iter(&self) -> impl Iterator<Item = &MindNode> {
        self.iter_with_depth().map(|(node, _)| node)
    }

    /// Pre-order traversal with the depth of each node (root = 0).
    pub fn iter_with_depth(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![(self, 0)],
        }
    }

    /// First node, in pre-order, with the given label.
    pub fn find_by_label(&self, label: &str) -> Option<&MindNode> {
        self.iter().find(|n| n.label == label)
    }

    /// Whether every id in the tree is unique.
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.iter().all(|n| seen.insert(n.id.as_str()))
    }

    /// Flatten into node and edge records.
    pub fn to_graph(&self) -> MindGraph {
        let mut graph = MindGraph::default();
        for (node, depth) in self.iter_with_depth() {
            graph.nodes.push(NodeRecord {
                id: node.id.clone(),
                label: node.label.clone(),
                kind: node.kind,
                depth,
            });
            graph
                .edges
                .extend(node.children.iter().map(|child| EdgeRecord {
                    source: node.id.clone(),
                    target: child.id.clone(),
                }));
        }
        graph
    }
}

/// Iterative pre-order walk over a [`MindNode`] tree.
pub struct PreOrder<'a> {
    stack: Vec<(&'a MindNode, usize)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (&'a MindNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

/// A node of the flattened graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub depth: usize,
}

/// A directed parent to child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
}

/// Node and edge lists for renderers that do not take nested trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindGraph {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}
