//! Graph assembly.
//!
//! Builds the root-labeled tree from analyzed paragraphs and categorized key points.
//! Nesting follows the [`LevelStack`]; nodes live in an index arena and are finished
//! bottom-up, so no recursion is involved and no half-built tree is ever returned.

use std::collections::HashSet;
use tracing::debug;

use super::category::Category;
use super::hierarchy::LevelStack;
use super::priority::rank;
use super::report::{AnalyzedParagraph, KeyPoint};
use crate::error::{MindMapError, Result};
use crate::mindmap::{MindNode, NodeKind};

pub const ROOT_ID: &str = "root";

/// Deterministic positional ids: `node-1`, `node-2`, ... in creation order.
#[derive(Debug, Default)]
struct IdSequence {
    next: usize,
}

impl IdSequence {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("node-{}", self.next)
    }
}

/// A structural node waiting for its nested paragraphs.
struct Slot {
    node: MindNode,
    leaves: Vec<MindNode>,
    nested: Vec<usize>,
}

/// Assembles the mind-map tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphAssembler;

impl GraphAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Build the tree: structural nodes first, then one node per non-empty category.
    ///
    /// Fails with [`MindMapError::NoContentExtracted`] when both lists are empty.
    pub fn assemble(
        &self,
        topic: &str,
        paragraphs: &[AnalyzedParagraph],
        key_points: &[KeyPoint],
    ) -> Result<MindNode> {
        let mut ids = IdSequence::default();

        let structural = self.structural_nodes(paragraphs, &mut ids);
        let categories = self.category_nodes(key_points, &mut ids);

        debug!(
            "Assembled {} structural and {} category nodes",
            structural.len(),
            categories.len()
        );

        if structural.is_empty() && categories.is_empty() {
            return Err(MindMapError::NoContentExtracted);
        }

        let mut children = structural;
        children.extend(categories);
        Ok(MindNode::new(ROOT_ID, topic, NodeKind::Root).with_children(children))
    }

    fn structural_nodes(
        &self,
        paragraphs: &[AnalyzedParagraph],
        ids: &mut IdSequence,
    ) -> Vec<MindNode> {
        let mut slots: Vec<Slot> = Vec::with_capacity(paragraphs.len());
        let mut top_level: Vec<usize> = Vec::new();
        let mut stack: LevelStack<usize> = LevelStack::new();

        for paragraph in paragraphs {
            let index = slots.len();
            let node = MindNode::new(ids.next_id(), paragraph.topic.as_str(), NodeKind::Topic);
            let leaves = paragraph_leaves(paragraph, ids);
            slots.push(Slot {
                node,
                leaves,
                nested: Vec::new(),
            });

            match stack.attach(paragraph.level, index).copied() {
                Some(parent) => slots[parent].nested.push(index),
                None => top_level.push(index),
            }
        }

        // A nested slot always has a higher index than its parent, so walking the
        // arena backwards finishes every child before the node that owns it.
        let mut built: Vec<Option<MindNode>> = vec![None; slots.len()];
        for (index, slot) in slots.into_iter().enumerate().rev() {
            let mut children = slot.leaves;
            children.extend(slot.nested.iter().filter_map(|&j| built[j].take()));
            built[index] = Some(slot.node.with_children(children));
        }

        top_level
            .into_iter()
            .filter_map(|index| built[index].take())
            .collect()
    }

    fn category_nodes(&self, key_points: &[KeyPoint], ids: &mut IdSequence) -> Vec<MindNode> {
        Category::ALL
            .iter()
            .filter_map(|category| {
                let mut members: Vec<KeyPoint> = key_points
                    .iter()
                    .filter(|p| p.category == *category)
                    .cloned()
                    .collect();
                if members.is_empty() {
                    return None;
                }
                rank(&mut members);

                let mut seen = HashSet::new();
                let children = members
                    .iter()
                    .filter(|p| seen.insert(p.content.as_str()))
                    .map(|p| MindNode::new(ids.next_id(), p.content.as_str(), NodeKind::Point))
                    .collect();

                Some(
                    MindNode::new(
                        format!("category-{}", category.key()),
                        category.label(),
                        NodeKind::Category,
                    )
                    .with_children(children),
                )
            })
            .collect()
    }
}

/// Leaf children of a paragraph node, highest priority first.
///
/// A sentence matching several categories yields several key points with the same
/// content; it appears once here. A key point repeating the node's own label is skipped.
fn paragraph_leaves(paragraph: &AnalyzedParagraph, ids: &mut IdSequence) -> Vec<MindNode> {
    let mut points = paragraph.key_points.clone();
    rank(&mut points);

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(paragraph.topic.as_str());
    points
        .iter()
        .filter(|p| seen.insert(p.content.as_str()))
        .map(|p| MindNode::new(ids.next_id(), p.content.as_str(), NodeKind::Point))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(content: &str, category: Category, paragraph: usize, priority: u32) -> KeyPoint {
        KeyPoint {
            content: content.to_string(),
            category,
            paragraph,
            evidence_count: 0,
            priority,
        }
    }

    fn paragraph(index: usize, level: u8, topic: &str) -> AnalyzedParagraph {
        AnalyzedParagraph {
            index,
            level,
            topic: topic.to_string(),
            key_points: Vec::new(),
        }
    }

    fn labels(nodes: &[MindNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.label.as_str()).collect()
    }

    #[test]
    fn test_hierarchy_levels_nest_through_stack() {
        let paragraphs: Vec<AnalyzedParagraph> = [1, 2, 3, 2, 1]
            .iter()
            .enumerate()
            .map(|(i, level)| paragraph(i, *level, &format!("p{}", i + 1)))
            .collect();

        let root = GraphAssembler::new().assemble("主题", &paragraphs, &[]).unwrap();

        assert_eq!(labels(&root.children), vec!["p1", "p5"]);
        let p1 = &root.children[0];
        assert_eq!(labels(&p1.children), vec!["p2", "p4"]);
        assert_eq!(labels(&p1.children[0].children), vec!["p3"]);
        assert!(p1.children[1].children.is_empty());
    }

    #[test]
    fn test_category_priority_order() {
        let points = vec![
            point("五分", Category::Result, 0, 5),
            point("一分", Category::Result, 0, 1),
            point("三分", Category::Result, 0, 3),
        ];

        let root = GraphAssembler::new().assemble("主题", &[], &points).unwrap();

        assert_eq!(root.children.len(), 1);
        let category = &root.children[0];
        assert_eq!(category.id, "category-result");
        assert_eq!(category.label, "结果/成效");
        assert_eq!(labels(&category.children), vec!["五分", "三分", "一分"]);
    }

    #[test]
    fn test_structural_nodes_before_categories_in_fixed_order() {
        let points = vec![
            point("逻辑", Category::Logic, 0, 0),
            point("行动", Category::Action, 0, 0),
        ];
        let paragraphs = vec![paragraph(0, 1, "段落")];

        let root = GraphAssembler::new()
            .assemble("主题", &paragraphs, &points)
            .unwrap();

        assert_eq!(labels(&root.children), vec!["段落", "行动项/方法", "逻辑关系"]);
        assert_eq!(root.children[0].kind, NodeKind::Topic);
        assert_eq!(root.children[1].kind, NodeKind::Category);
    }

    #[test]
    fn test_paragraph_leaves_deduplicated_and_ranked() {
        let mut p = paragraph(0, 1, "段落标题");
        p.key_points = vec![
            point("低", Category::Action, 0, 0),
            point("高", Category::Action, 0, 4),
            point("高", Category::Result, 0, 4),
            point("段落标题", Category::Action, 0, 9),
        ];

        let root = GraphAssembler::new().assemble("主题", &[p], &[]).unwrap();

        assert_eq!(labels(&root.children[0].children), vec!["高", "低"]);
    }

    #[test]
    fn test_leaves_precede_nested_paragraphs() {
        let mut parent = paragraph(0, 1, "父");
        parent.key_points = vec![point("要点", Category::Action, 0, 0)];
        let child = paragraph(1, 2, "子");

        let root = GraphAssembler::new()
            .assemble("主题", &[parent, child], &[])
            .unwrap();

        assert_eq!(labels(&root.children[0].children), vec!["要点", "子"]);
    }

    #[test]
    fn test_ids_are_deterministic_and_unique() {
        let paragraphs = vec![paragraph(0, 1, "甲"), paragraph(1, 2, "乙")];
        let points = vec![point("行动", Category::Action, 1, 0)];
        let assembler = GraphAssembler::new();

        let first = assembler.assemble("主题", &paragraphs, &points).unwrap();
        let second = assembler.assemble("主题", &paragraphs, &points).unwrap();

        assert_eq!(first, second);
        assert!(first.has_unique_ids());
        assert_eq!(first.id, ROOT_ID);
        assert_eq!(first.children[0].id, "node-1");
    }

    #[test]
    fn test_nothing_to_assemble() {
        let result = GraphAssembler::new().assemble("主题", &[], &[]);
        assert!(matches!(result, Err(MindMapError::NoContentExtracted)));
    }
}
