//! Priority scoring.
//!
//! Scores only order siblings. No item is ever dropped for a low score.

use super::lexicon::{contains_any, Lexicon};
use super::report::KeyPoint;

const EMPHASIS_WEIGHT: u32 = 3;
const STRONG_ASSERTION_WEIGHT: u32 = 2;

/// Weighted marker scorer.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    lexicon: &'static Lexicon,
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new(Lexicon::global())
    }
}

impl PriorityScorer {
    pub fn new(lexicon: &'static Lexicon) -> Self {
        Self { lexicon }
    }

    /// `3·emphasis + 2·strong assertion + evidence references`.
    pub fn score(&self, text: &str, evidence_count: u32) -> u32 {
        let mut score = evidence_count;
        if contains_any(text, self.lexicon.emphasis) {
            score += EMPHASIS_WEIGHT;
        }
        if contains_any(text, self.lexicon.strong_assertion) {
            score += STRONG_ASSERTION_WEIGHT;
        }
        score
    }
}

/// Sort by descending priority. The sort is stable, so earlier items win ties.
pub fn rank(points: &mut [KeyPoint]) {
    points.sort_by(|a, b| b.priority.cmp(&a.priority));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::category::Category;

    fn point(content: &str, priority: u32) -> KeyPoint {
        KeyPoint {
            content: content.to_string(),
            category: Category::Action,
            paragraph: 0,
            evidence_count: 0,
            priority,
        }
    }

    #[test]
    fn test_weights() {
        let scorer = PriorityScorer::default();
        assert_eq!(scorer.score("普通的一句话", 0), 0);
        assert_eq!(scorer.score("这是关键", 0), 3);
        assert_eq!(scorer.score("这一定有效", 0), 2);
        assert_eq!(scorer.score("关键是一定要坚持", 2), 7);
    }

    #[test]
    fn test_rank_descending() {
        let mut points = vec![point("a", 5), point("b", 1), point("c", 3)];
        rank(&mut points);
        let order: Vec<u32> = points.iter().map(|p| p.priority).collect();
        assert_eq!(order, vec![5, 3, 1]);
    }

    #[test]
    fn test_rank_is_stable() {
        let mut points = vec![point("first", 2), point("second", 2), point("top", 4)];
        rank(&mut points);
        let order: Vec<&str> = points.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(order, vec!["top", "first", "second"]);
    }
}
