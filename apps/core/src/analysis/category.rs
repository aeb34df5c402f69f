use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed semantic bucket a key point is filed under.
///
/// The declaration order is the order category nodes appear in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Action,
    Result,
    Criterion,
    Concept,
    Condition,
    Challenge,
    Solution,
    Evidence,
    Viewpoint,
    Logic,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Action,
        Category::Result,
        Category::Criterion,
        Category::Concept,
        Category::Condition,
        Category::Challenge,
        Category::Solution,
        Category::Evidence,
        Category::Viewpoint,
        Category::Logic,
    ];

    /// Label of the category node in the rendered map.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Action => "行动项/方法",
            Category::Result => "结果/成效",
            Category::Criterion => "标准/要求",
            Category::Concept => "概念/定义",
            Category::Condition => "条件/前提",
            Category::Challenge => "问题/挑战",
            Category::Solution => "解决方案/对策",
            Category::Evidence => "证据/数据",
            Category::Viewpoint => "观点/看法",
            Category::Logic => "逻辑关系",
        }
    }

    /// Stable key used to build node ids.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::Result => "result",
            Category::Criterion => "criterion",
            Category::Concept => "concept",
            Category::Condition => "condition",
            Category::Challenge => "challenge",
            Category::Solution => "solution",
            Category::Evidence => "evidence",
            Category::Viewpoint => "viewpoint",
            Category::Logic => "logic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
