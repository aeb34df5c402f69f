//! Pipeline Tests
//!
//! End-to-end behavior of the lexical pipeline on whole texts.

use crate::analysis::{Category, MindMapAnalyzer};
use crate::error::MindMapError;
use crate::mindmap::{MindNode, NodeKind};
use crate::outline::parse_outline;

fn labels(nodes: &[MindNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.label.as_str()).collect()
}

fn structural(tree: &MindNode) -> Vec<&MindNode> {
    tree.children
        .iter()
        .filter(|n| n.kind == NodeKind::Topic)
        .collect()
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    const STUDY_NOTES: &str = "学习方法\n首先制定计划\n其次执行步骤\n最后总结反思";

    #[test]
    fn test_title_line_becomes_root() {
        let tree = MindMapAnalyzer::new().generate(STUDY_NOTES).unwrap();

        assert_eq!(tree.label, "学习方法");
        assert_eq!(tree.kind, NodeKind::Root);
        let topics: Vec<&str> = structural(&tree).iter().map(|n| n.label.as_str()).collect();
        assert_eq!(topics, vec!["制定计划", "执行步骤", "总结反思"]);
    }

    #[test]
    fn test_action_category_collects_steps() {
        let tree = MindMapAnalyzer::new().generate(STUDY_NOTES).unwrap();

        let actions = tree
            .children
            .iter()
            .find(|n| n.label == Category::Action.label())
            .expect("action category present");
        assert_eq!(actions.kind, NodeKind::Category);
        assert_eq!(actions.id, "category-action");
        assert!(labels(&actions.children).contains(&"制定计划"));
    }

    #[test]
    fn test_structural_nodes_precede_categories() {
        let tree = MindMapAnalyzer::new().generate(STUDY_NOTES).unwrap();
        let first_category = tree
            .children
            .iter()
            .position(|n| n.kind == NodeKind::Category)
            .unwrap();
        assert!(tree.children[..first_category]
            .iter()
            .all(|n| n.kind == NodeKind::Topic));
        assert!(tree.children[first_category..]
            .iter()
            .all(|n| n.kind == NodeKind::Category));
    }

    #[test]
    fn test_analysis_keeps_intermediate_results() {
        let analysis = MindMapAnalyzer::new().analyze(STUDY_NOTES).unwrap();

        assert_eq!(analysis.topic, "学习方法");
        assert_eq!(analysis.paragraphs.len(), 3);
        assert!(analysis.paragraphs.iter().all(|p| p.level == 2));
        assert_eq!(analysis.category(Category::Action).count(), 3);
    }
}

#[cfg(test)]
mod structure_tests {
    use super::*;

    #[test]
    fn test_levels_nest_like_the_stack() {
        // Levels 1, 2, 3, 2, 1.
        let text = "本文讨论学习。\n\n首先阅读教材。\n\n此外多做笔记。\n\n其次复习重点。\n\n结语部分。";
        let tree = MindMapAnalyzer::new().generate(text).unwrap();

        let top = structural(&tree);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label, "本文讨论学习");
        assert_eq!(top[1].label, "结语部分");

        let first = top[0];
        assert_eq!(labels(&first.children), vec!["阅读教材", "复习重点"]);
        assert_eq!(labels(&first.children[0].children), vec!["多做笔记"]);
    }

    #[test]
    fn test_single_plain_paragraph() {
        let tree = MindMapAnalyzer::new().generate("今天天气晴朗").unwrap();

        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].kind, NodeKind::Topic);
    }

    #[test]
    fn test_tree_is_well_formed() {
        let text = "关于团队协作的思考。\n\n首先需要明确目标，因为目标决定方向。\n\n\
                    其次，数据显示沟通不足是主要问题。\n\n例如，每周例会可以解决信息不对称。";
        let tree = MindMapAnalyzer::new().generate(text).unwrap();

        assert_eq!(tree.id, "root");
        assert!(tree.has_unique_ids());

        let graph = tree.to_graph();
        assert_eq!(graph.nodes.len(), tree.node_count());
        // A tree: every node but the root has exactly one incoming edge.
        assert_eq!(graph.edges.len(), graph.nodes.len() - 1);
        for node in graph.nodes.iter().filter(|n| n.id != "root") {
            assert_eq!(graph.edges.iter().filter(|e| e.target == node.id).count(), 1);
        }
    }

    #[test]
    fn test_same_input_same_tree() {
        let text = "关于时间管理的建议。\n\n首先制定计划。\n\n其次，重要的事情一定要优先完成。";
        let analyzer = MindMapAnalyzer::new();
        assert_eq!(analyzer.generate(text).unwrap(), analyzer.generate(text).unwrap());
    }

    #[test]
    fn test_punctuation_only_input_still_builds_tree() {
        let analyzer = MindMapAnalyzer::new();
        for text in ["。。！", "……"] {
            let tree = analyzer.generate(text).unwrap();

            assert_eq!(tree.label, text);
            assert_eq!(tree.children.len(), 1);
            assert_eq!(tree.children[0].kind, NodeKind::Topic);
            assert_eq!(tree.children[0].label, text);
            assert!(tree.has_unique_ids());
        }
    }

    #[test]
    fn test_whitespace_only_input() {
        let analyzer = MindMapAnalyzer::new();
        for text in ["", "   ", "\n\n\t\n", "\u{3000}"] {
            assert!(
                matches!(analyzer.generate(text), Err(MindMapError::EmptyInput)),
                "Expected EmptyInput for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_higher_priority_points_come_first() {
        let text = "我们需要调整。\n\n团队必须重视沟通。\n\n最重要的是一定要坚持标准。";
        let tree = MindMapAnalyzer::new().generate(text).unwrap();

        let criteria = tree
            .children
            .iter()
            .find(|n| n.label == Category::Criterion.label())
            .unwrap();
        assert_eq!(criteria.children[0].label, "最重要的是一定要坚持标准");
    }
}

#[cfg(test)]
mod outline_tests {
    use super::*;

    #[test]
    fn test_outline_and_lexical_agree_on_root() {
        let outline = parse_outline("学习方法\n  制定计划\n  执行步骤").unwrap();
        let lexical = MindMapAnalyzer::new()
            .generate("学习方法\n首先制定计划\n其次执行步骤")
            .unwrap();
        assert_eq!(outline.label, lexical.label);
        assert_eq!(labels(&outline.children), vec!["制定计划", "执行步骤"]);
    }
}
