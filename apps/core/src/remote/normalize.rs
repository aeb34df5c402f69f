//! Normalization of completion-service output into a [`MindNode`] tree.
//!
//! Model output is often almost-JSON: wrapped in code fences, single quoted, with bare
//! keys, trailing commas or cut off mid-object. [`repair_json`] closes what truncation
//! left open and the result is read as JSON5; [`normalize_or_recover`] never lets a
//! parse failure reach the caller.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::analysis::topic::DEFAULT_TOPIC;
use crate::error::{MindMapError, Result};
use crate::mindmap::{MindNode, NodeKind};

/// Label of the node wrapping whatever could be recovered from a broken response.
pub const RECOVERED_LABEL: &str = "生成内容";
pub const RECOVERED_ID: &str = "category-recovered";
/// Stands in for a reply that held nothing but empty brackets.
pub const EMPTY_REPLY_LABEL: &str = "暂无内容";

const TOPIC_KEYS: &[&str] = &["topic", "title", "label", "name", "root"];
const NODE_LIST_KEYS: &[&str] = &["nodes", "children", "branches", "items"];
const LABEL_KEYS: &[&str] = &["label", "name", "title", "text", "content", "topic"];
const CHILD_KEYS: &[&str] = &["children", "nodes", "items", "points"];

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```[A-Za-z0-9]*[ \t]*\n?([\s\S]*?)```").expect("Invalid regex: code fence pattern")
});

static TOPIC_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']?(?:topic|title)["']?\s*:\s*(?:"([^"]+)"|'([^']+)')"#)
        .expect("Invalid regex: topic field pattern")
});

static LABEL_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']?(?:label|name|text)["']?\s*:\s*(?:"([^"]+)"|'([^']+)')"#)
        .expect("Invalid regex: label field pattern")
});

/// Best-effort repair of a possibly truncated reply.
///
/// Strips code fences, starts at the first `{` or `[`, stops where that container
/// closes, and closes any string or container the reply left open. Relaxed syntax
/// (single quotes, bare keys, trailing commas) is left for the JSON5 reader.
pub fn repair_json(raw: &str) -> String {
    let unfenced = strip_code_fences(raw);
    let body = match unfenced.find(['{', '[']) {
        Some(start) => &unfenced[start..],
        None => unfenced.as_str(),
    };
    TruncationRepair::new(body).run()
}

/// Read repaired text as JSON5, a superset of JSON.
pub fn parse_relaxed(raw: &str) -> Result<Value> {
    json5::from_str::<Value>(&repair_json(raw))
        .map_err(|e| MindMapError::MalformedExternalResult(format!("invalid JSON: {}", e)))
}

/// Strict normalization: the reply must describe a topic with at least one node.
pub fn normalize_response(raw: &str) -> Result<MindNode> {
    if raw.trim().is_empty() {
        return Err(MindMapError::MalformedExternalResult(
            "empty response".to_string(),
        ));
    }

    let value = parse_relaxed(raw)?;
    let root = tree_from_value(&value)?;
    if root.children.is_empty() {
        return Err(MindMapError::MalformedExternalResult(
            "response has no nodes".to_string(),
        ));
    }
    Ok(root)
}

/// Lenient normalization: falls back to a minimal tree instead of failing.
///
/// The fallback root carries the recovered topic (or [`DEFAULT_TOPIC`]) and a single
/// category node wrapping the recovered labels, or the raw text when none were found.
/// Only a blank response is an error.
pub fn normalize_or_recover(raw: &str) -> Result<MindNode> {
    match normalize_response(raw) {
        Ok(tree) => Ok(tree),
        Err(e) if raw.trim().is_empty() => Err(e),
        Err(e) => {
            warn!("Falling back to recovered tree: {}", e);
            Ok(recover(raw))
        }
    }
}

fn recover(raw: &str) -> MindNode {
    let text = strip_code_fences(raw);
    let topic = TOPIC_FIELD
        .captures(&text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TOPIC.to_string());

    let mut labels: Vec<String> = LABEL_FIELD
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|l| !l.is_empty() && *l != topic)
        .collect();
    if labels.is_empty() {
        let raw_text = text.trim();
        let only_brackets = raw_text
            .chars()
            .all(|c| c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']'));
        labels.push(if only_brackets {
            EMPTY_REPLY_LABEL.to_string()
        } else {
            raw_text.to_string()
        });
    }
    debug!("Recovered topic '{}' with {} labels", topic, labels.len());

    let points = labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| MindNode::new(format!("node-{}", i + 1), label, NodeKind::Point))
        .collect();

    MindNode::new("root", topic, NodeKind::Root).with_children(vec![MindNode::new(
        RECOVERED_ID,
        RECOVERED_LABEL,
        NodeKind::Category,
    )
    .with_children(points)])
}

fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(inner) = CODE_FENCE.captures(trimmed).and_then(|caps| caps.get(1)) {
        return inner.as_str().trim().to_string();
    }
    // An opening fence whose closing fence was cut off.
    match trimmed.strip_prefix("```") {
        Some(rest) => rest
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim()
            .to_string(),
        None => trimmed.to_string(),
    }
}

/// Builds the tree from parsed JSON; ids are positional in pre-order.
fn tree_from_value(value: &Value) -> Result<MindNode> {
    let (topic, nodes): (Option<String>, &[Value]) = match value {
        Value::Object(map) => (
            first_string(map, TOPIC_KEYS),
            first_array(map, NODE_LIST_KEYS).unwrap_or(&[]),
        ),
        Value::Array(items) => (None, items.as_slice()),
        _ => {
            return Err(MindMapError::MalformedExternalResult(
                "response is neither an object nor an array".to_string(),
            ))
        }
    };

    if topic.is_none() && nodes.is_empty() {
        return Err(MindMapError::MalformedExternalResult(
            "response has neither topic nor nodes".to_string(),
        ));
    }

    let mut next_id = 0usize;
    let children = convert_nodes(nodes, &mut next_id);
    Ok(MindNode::new(
        "root",
        topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        NodeKind::Root,
    )
    .with_children(children))
}

fn convert_nodes(values: &[Value], next_id: &mut usize) -> Vec<MindNode> {
    let mut out = Vec::new();
    for value in values {
        match value {
            Value::String(s) if !s.trim().is_empty() => {
                out.push(leaf(s.trim(), next_id));
            }
            Value::Number(n) => out.push(leaf(&n.to_string(), next_id)),
            Value::Object(map) => {
                let label = first_string(map, LABEL_KEYS);
                let nested = first_array(map, CHILD_KEYS).unwrap_or(&[]);
                match label {
                    Some(label) => {
                        *next_id += 1;
                        let id = format!("node-{}", next_id);
                        let children = convert_nodes(nested, next_id);
                        let kind = node_kind(map, !children.is_empty());
                        out.push(MindNode::new(id, label, kind).with_children(children));
                    }
                    // No label: lift the children one level up.
                    None => out.extend(convert_nodes(nested, next_id)),
                }
            }
            Value::Array(items) => out.extend(convert_nodes(items, next_id)),
            _ => {}
        }
    }
    out
}

fn leaf(label: &str, next_id: &mut usize) -> MindNode {
    *next_id += 1;
    MindNode::new(format!("node-{}", next_id), label, NodeKind::Point)
}

fn node_kind(map: &Map<String, Value>, has_children: bool) -> NodeKind {
    match map.get("type").and_then(Value::as_str) {
        Some("point") => NodeKind::Point,
        Some("feature") | Some("topic") => NodeKind::Topic,
        Some("category") => NodeKind::Category,
        _ if has_children => NodeKind::Topic,
        _ => NodeKind::Point,
    }
}

fn first_string(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_array<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a [Value]> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find_map(|v| v.as_array().map(Vec::as_slice))
}

/// Closes strings and containers left open by a reply cut off mid-object.
struct TruncationRepair<'a> {
    src: &'a str,
    out: String,
    closers: Vec<char>,
}

impl<'a> TruncationRepair<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            out: String::with_capacity(src.len() + 8),
            closers: Vec::new(),
        }
    }

    fn run(mut self) -> String {
        let mut in_string: Option<char> = None;
        let mut escaped = false;

        for c in self.src.chars() {
            self.out.push(c);
            if let Some(quote) = in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    in_string = None;
                }
                continue;
            }
            match c {
                '"' | '\'' => in_string = Some(c),
                '{' => self.closers.push('}'),
                '[' => self.closers.push(']'),
                '}' | ']' => {
                    if self.closers.last() == Some(&c) {
                        self.closers.pop();
                        // Anything after the outermost container is prose.
                        if self.closers.is_empty() {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(quote) = in_string {
            if escaped {
                self.out.pop();
            }
            self.out.push(quote);
        }
        while let Some(closer) = self.closers.pop() {
            self.trim_dangling();
            self.out.push(closer);
        }
        self.out
    }

    /// Drop a trailing comma or complete a dangling key before closing a container.
    fn trim_dangling(&mut self) {
        let trimmed_len = self.out.trim_end().len();
        self.out.truncate(trimmed_len);
        if self.out.ends_with(',') {
            self.out.pop();
        } else if self.out.ends_with(':') {
            self.out.push_str("null");
        }
    }
}
