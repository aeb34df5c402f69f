//! Static keyword tables.
//!
//! Every table is a `const` slice of whole multi-character phrases. They are gathered
//! once into a process-wide [`Lexicon`] and handed to the pipeline components by reference.

use std::sync::LazyLock;

use super::category::Category;

const ACTION_KEYWORDS: &[&str] = &[
    "制定", "执行", "实施", "采取", "开展", "推进", "落实", "完成", "建立", "安排", "总结", "练习",
    "操作", "步骤",
];

const RESULT_KEYWORDS: &[&str] = &[
    "结果", "成果", "效果", "成效", "导致", "实现", "达到", "提高", "提升", "产生", "带来",
];

const CRITERION_KEYWORDS: &[&str] = &[
    "标准", "要求", "指标", "规范", "准则", "必须", "应该", "需要", "原则",
];

const CONCEPT_KEYWORDS: &[&str] = &[
    "是指", "定义", "概念", "意味着", "称为", "所谓", "本质", "含义",
];

const CONDITION_KEYWORDS: &[&str] = &[
    "如果", "假如", "只要", "只有", "前提", "条件", "一旦", "除非", "假设",
];

const CHALLENGE_KEYWORDS: &[&str] = &[
    "问题", "挑战", "困难", "难点", "风险", "不足", "障碍", "瓶颈", "缺乏",
];

const SOLUTION_KEYWORDS: &[&str] = &[
    "解决", "方案", "对策", "应对", "改进", "优化", "克服", "建议", "措施",
];

const EVIDENCE_KEYWORDS: &[&str] = &[
    "数据", "研究表明", "调查", "统计", "案例", "证明", "显示", "实验", "报告",
];

const VIEWPOINT_KEYWORDS: &[&str] = &[
    "认为", "观点", "看法", "主张", "相信", "觉得", "指出", "强调", "立场",
];

const LOGIC_KEYWORDS: &[&str] = &[
    "因为", "所以", "因此", "但是", "然而", "而且", "由于", "从而", "不仅", "虽然",
];

// Hierarchy indicators, scanned in this order.
const SEQUENCING_WORDS: &[&str] = &[
    "首先", "其次", "再次", "然后", "最后", "第一", "第二", "第三", "第四", "第五",
];

const ENUMERATION_WORDS: &[&str] = &[
    "一方面", "另一方面", "其一", "其二", "其三", "此外", "另外", "还有", "同时",
];

const ELABORATION_WORDS: &[&str] = &[
    "具体来说", "具体而言", "也就是说", "换句话说", "进一步", "详细来说",
];

const SPECIFICITY_WORDS: &[&str] = &["比如", "例如", "譬如", "特别是", "尤其是", "举例来说"];

const EMPHASIS_MARKERS: &[&str] = &[
    "重要", "关键", "核心", "主要", "重点", "首要", "根本", "核心是",
];

const STRONG_ASSERTION_MARKERS: &[&str] = &[
    "一定", "必然", "显然", "肯定", "确实", "无疑", "务必", "绝对", "毫无疑问",
];

// Longer phrases first so that "但是" is not left half stripped by a shorter entry.
const CONNECTIVE_PREFIXES: &[&str] = &[
    "总而言之", "总的来说", "关于", "对于", "针对", "由于", "因此", "但是", "所以", "然而",
    "而且", "首先", "其次", "再次", "然后", "最后", "此外", "另外", "同时", "总之",
];

const NOMINALIZING_SUFFIXES: &[&str] = &["的是", "地", "的"];

/// One group of hierarchy indicators and the level it assigns.
#[derive(Debug, Clone, Copy)]
pub struct LevelIndicator {
    pub name: &'static str,
    pub level: u8,
    pub phrases: &'static [&'static str],
}

/// Process-wide, read-only keyword configuration.
#[derive(Debug)]
pub struct Lexicon {
    pub categories: Vec<(Category, &'static [&'static str])>,
    pub level_indicators: Vec<LevelIndicator>,
    pub emphasis: &'static [&'static str],
    pub strong_assertion: &'static [&'static str],
    pub evidence: &'static [&'static str],
    pub connective_prefixes: &'static [&'static str],
    pub nominalizing_suffixes: &'static [&'static str],
}

static LEXICON: LazyLock<Lexicon> = LazyLock::new(Lexicon::build);

impl Lexicon {
    /// The shared lexicon, built on first use.
    pub fn global() -> &'static Lexicon {
        &LEXICON
    }

    fn build() -> Self {
        let categories = vec![
            (Category::Action, ACTION_KEYWORDS),
            (Category::Result, RESULT_KEYWORDS),
            (Category::Criterion, CRITERION_KEYWORDS),
            (Category::Concept, CONCEPT_KEYWORDS),
            (Category::Condition, CONDITION_KEYWORDS),
            (Category::Challenge, CHALLENGE_KEYWORDS),
            (Category::Solution, SOLUTION_KEYWORDS),
            (Category::Evidence, EVIDENCE_KEYWORDS),
            (Category::Viewpoint, VIEWPOINT_KEYWORDS),
            (Category::Logic, LOGIC_KEYWORDS),
        ];

        let level_indicators = vec![
            LevelIndicator {
                name: "sequencing",
                level: 2,
                phrases: SEQUENCING_WORDS,
            },
            LevelIndicator {
                name: "enumeration",
                level: 3,
                phrases: ENUMERATION_WORDS,
            },
            LevelIndicator {
                name: "elaboration",
                level: 4,
                phrases: ELABORATION_WORDS,
            },
            LevelIndicator {
                name: "specificity",
                level: 5,
                phrases: SPECIFICITY_WORDS,
            },
        ];

        Self {
            categories,
            level_indicators,
            emphasis: EMPHASIS_MARKERS,
            strong_assertion: STRONG_ASSERTION_MARKERS,
            evidence: EVIDENCE_KEYWORDS,
            connective_prefixes: CONNECTIVE_PREFIXES,
            nominalizing_suffixes: NOMINALIZING_SUFFIXES,
        }
    }

    /// Keyword list of a single category.
    pub fn keywords(&self, category: Category) -> &'static [&'static str] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, words)| *words)
            .unwrap_or(&[])
    }
}

/// Whether `text` contains any of `phrases` as a substring.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}
