//! Indented outline import.
//!
//! The first non-empty line is the root; every further line is a node whose level is
//! its indentation (two spaces per level, a tab counts as two spaces). Nesting uses the
//! same [`LevelStack`] as the lexical pipeline.

use crate::analysis::hierarchy::LevelStack;
use crate::analysis::topic::DEFAULT_TOPIC;
use crate::error::{MindMapError, Result};
use crate::mindmap::{MindNode, NodeKind};

const SPACES_PER_LEVEL: usize = 2;

/// Leading list markers stripped from outline lines.
const BULLETS: &[char] = &['-', '*', '+', '•', '·'];

/// Parse an indented outline into a tree.
pub fn parse_outline(text: &str) -> Result<MindNode> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines = normalized.lines().filter(|l| !l.trim().is_empty());

    let root_label = match lines.next() {
        Some(line) => clean_label(line),
        None => return Err(MindMapError::EmptyInput),
    };
    let root_label = if root_label.is_empty() {
        DEFAULT_TOPIC.to_string()
    } else {
        root_label
    };

    // Arena of (node, child indices); index 0 is the root.
    let mut arena: Vec<(MindNode, Vec<usize>)> =
        vec![(MindNode::new("root", root_label, NodeKind::Root), Vec::new())];
    let mut stack: LevelStack<usize> = LevelStack::new();

    for (n, line) in lines.enumerate() {
        let label = clean_label(line);
        if label.is_empty() {
            continue;
        }
        // Top-level lines sit at level 1 so that the stack never pops the root.
        let level = (indentation(line) / SPACES_PER_LEVEL).min(u8::MAX as usize - 1) as u8 + 1;
        let index = arena.len();
        arena.push((
            MindNode::new(format!("node-{}", n + 1), label, NodeKind::Topic),
            Vec::new(),
        ));
        let parent = stack.attach(level, index).copied().unwrap_or(0);
        arena[parent].1.push(index);
    }

    // Children always come after their parent in the arena.
    let mut built: Vec<Option<MindNode>> = vec![None; arena.len()];
    for (index, (node, children)) in arena.into_iter().enumerate().rev() {
        let children = children.iter().filter_map(|&c| built[c].take()).collect();
        built[index] = Some(node.with_children(children));
    }

    built[0].take().ok_or(MindMapError::EmptyInput)
}

fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { SPACES_PER_LEVEL } else { 1 })
        .sum()
}

fn clean_label(line: &str) -> String {
    line.trim()
        .trim_start_matches(BULLETS)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(nodes: &[MindNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.label.as_str()).collect()
    }

    #[test]
    fn test_first_line_is_root() {
        let tree = parse_outline("项目计划\n需求\n设计").unwrap();
        assert_eq!(tree.label, "项目计划");
        assert_eq!(labels(&tree.children), vec!["需求", "设计"]);
    }

    #[test]
    fn test_indentation_nests() {
        let text = "主题\n甲\n  甲一\n    甲一一\n  甲二\n乙";
        let tree = parse_outline(text).unwrap();

        assert_eq!(labels(&tree.children), vec!["甲", "乙"]);
        let a = &tree.children[0];
        assert_eq!(labels(&a.children), vec!["甲一", "甲二"]);
        assert_eq!(labels(&a.children[0].children), vec!["甲一一"]);
        assert!(tree.has_unique_ids());
    }

    #[test]
    fn test_bullets_and_tabs() {
        let tree = parse_outline("主题\n- 甲\n\t* 甲一").unwrap();
        assert_eq!(tree.children[0].label, "甲");
        assert_eq!(tree.children[0].children[0].label, "甲一");
    }

    #[test]
    fn test_deeper_first_line_still_hangs_off_root() {
        let tree = parse_outline("主题\n    深层\n浅层").unwrap();
        assert_eq!(labels(&tree.children), vec!["深层", "浅层"]);
    }

    #[test]
    fn test_blank_outline() {
        assert!(matches!(parse_outline(" \n \n"), Err(MindMapError::EmptyInput)));
    }
}
