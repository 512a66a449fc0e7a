//! Leaf Expansion Analyzer
//!
//! Scores collapsed `detail` content for structural complexity and decides
//! whether a leaf is worth expanding back into typed children.
//!
//! Scores live in `[0, 1]` and never decrease when a block of a fixed type
//! gains elements:
//!
//! | type              | score                                                  |
//! |-------------------|--------------------------------------------------------|
//! | table             | 0.8 + min(0.2, 0.005 per cell)                         |
//! | code              | 0.6 + min(0.3, 0.02 per line)                          |
//! | list              | 0.3 + min(0.4, 0.05 per item)                          |
//! | complex           | 0.3 + min(0.3, 0.05 per span) + 0.1 per extra kind, max 0.8 |
//! | image, link, math | 0.2 + min(0.2, 0.05 per element)                       |
//! | anything else     | 0.1                                                    |

use crate::analysis::detect_content_type;
use crate::models::{ContentAnalysis, ContentType, Element, Node};
use serde::Serialize;
use std::collections::HashSet;

/// Complexity a leaf must exceed to be expanded
pub const DEFAULT_COMPLEXITY_THRESHOLD: f64 = 0.3;

/// Why a leaf was or was not selected for expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionReason {
    NoContent,
    ComplexContent,
    SimpleContent,
}

/// Verdict of [`analyze_leaf_for_expansion`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafAnalysis {
    pub should_expand: bool,
    pub reason: ExpansionReason,
    pub content_type: Option<ContentType>,
    pub complexity: f64,
}

/// Score a detector result
///
/// Returns 0 for `None` and for analyses without elements.
///
/// # Examples
///
/// ```rust
/// use mindtree_core::analysis::{calculate_content_complexity, detect_content_type};
/// use mindtree_core::models::ContentAnalysis;
///
/// assert_eq!(calculate_content_complexity(None), 0.0);
/// assert_eq!(calculate_content_complexity(Some(&ContentAnalysis::default())), 0.0);
///
/// let table = detect_content_type("a | b\nc | d", None);
/// assert!(calculate_content_complexity(Some(&table)) >= 0.8);
/// ```
pub fn calculate_content_complexity(analysis: Option<&ContentAnalysis>) -> f64 {
    let Some(analysis) = analysis else {
        return 0.0;
    };
    if analysis.elements.is_empty() {
        return 0.0;
    }

    let elements = &analysis.elements;
    let count = elements.len() as f64;

    let score = match analysis.content_type {
        ContentType::Table => 0.8 + (0.005 * count).min(0.2),
        ContentType::Code => {
            let lines: usize = elements
                .iter()
                .map(|e| match e {
                    Element::CodeBlock { content, .. } => content.lines().count().max(1),
                    _ => 0,
                })
                .sum();
            0.6 + (0.02 * lines as f64).min(0.3)
        }
        ContentType::List => 0.3 + (0.05 * count).min(0.4),
        ContentType::Complex => {
            let kinds: HashSet<&str> = elements.iter().map(Element::kind).collect();
            let variety = 0.1 * kinds.len().saturating_sub(1) as f64;
            (0.3 + (0.05 * count).min(0.3) + variety).min(0.8)
        }
        ContentType::Image | ContentType::Link | ContentType::Math => {
            0.2 + (0.05 * count).min(0.2)
        }
        _ => 0.1,
    };

    score.clamp(0.0, 1.0)
}

/// Decide whether a leaf's `detail` should be expanded
///
/// `threshold` is exclusive: a leaf expands when its complexity is strictly
/// greater.
pub fn analyze_leaf_for_expansion(node: &Node, threshold: f64) -> LeafAnalysis {
    if node.detail.trim().is_empty() {
        return LeafAnalysis {
            should_expand: false,
            reason: ExpansionReason::NoContent,
            content_type: None,
            complexity: 0.0,
        };
    }

    let analysis = detect_content_type(&node.detail, None);
    let complexity = calculate_content_complexity(Some(&analysis));
    let should_expand = complexity > threshold;

    LeafAnalysis {
        should_expand,
        reason: if should_expand {
            ExpansionReason::ComplexContent
        } else {
            ExpansionReason::SimpleContent
        },
        content_type: Some(analysis.content_type),
        complexity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn leaf(detail: &str) -> Node {
        let mut node = Node::header("Leaf", 2);
        node.detail = detail.to_string();
        node
    }

    fn table_with_rows(rows: usize) -> String {
        let mut md = String::from("| h1 | h2 | h3 |\n|----|----|----|");
        for i in 0..rows {
            md.push_str(&format!("\n| a{i} | b{i} | c{i} |"));
        }
        md
    }

    #[test]
    fn test_zero_for_missing_or_empty_analysis() {
        assert_eq!(calculate_content_complexity(None), 0.0);
        assert_eq!(
            calculate_content_complexity(Some(&ContentAnalysis::default())),
            0.0
        );
        assert_eq!(
            calculate_content_complexity(Some(&ContentAnalysis::new(ContentType::Table, vec![]))),
            0.0
        );
    }

    #[test]
    fn test_table_scores_highest() {
        let table = detect_content_type(&table_with_rows(2), None);
        let code = detect_content_type("```\na\nb\n```", None);
        let list = detect_content_type("- a\n- b", None);
        let text = detect_content_type("just words", None);

        let scores: Vec<f64> = [&table, &code, &list, &text]
            .iter()
            .map(|a| calculate_content_complexity(Some(a)))
            .collect();

        assert!(scores[0] >= 0.8);
        assert!(scores[1] >= 0.6 && scores[1] < scores[0]);
        assert!(scores[2] > 0.3 && scores[2] < scores[1]);
        assert!(scores[3] < DEFAULT_COMPLEXITY_THRESHOLD);
    }

    #[test]
    fn test_monotonic_in_element_count() {
        let one = detect_content_type(&table_with_rows(1), None);
        let five = detect_content_type(&table_with_rows(5), None);
        assert!(calculate_content_complexity(Some(&five)) >= calculate_content_complexity(Some(&one)));

        let mut previous = 0.0;
        for items in 2..20 {
            let md: Vec<String> = (0..items).map(|i| format!("- item {i}")).collect();
            let score = calculate_content_complexity(Some(&detect_content_type(&md.join("\n"), None)));
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_scores_are_clamped() {
        let huge = table_with_rows(500);
        let score = calculate_content_complexity(Some(&detect_content_type(&huge, None)));
        assert!(score <= 1.0);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_complex_scores_in_band() {
        let analysis = detect_content_type("**a** `b` [c](https://c.io) **d**", None);
        let score = calculate_content_complexity(Some(&analysis));
        assert_eq!(analysis.content_type, ContentType::Complex);
        assert!((0.3..=0.8).contains(&score));
    }

    #[test]
    fn test_analyze_leaf_without_detail() {
        let verdict = analyze_leaf_for_expansion(&leaf(""), DEFAULT_COMPLEXITY_THRESHOLD);
        assert!(!verdict.should_expand);
        assert_eq!(verdict.reason, ExpansionReason::NoContent);
        assert_eq!(verdict.content_type, None);
    }

    #[test]
    fn test_analyze_leaf_simple_and_complex() {
        let simple = analyze_leaf_for_expansion(&leaf("this is crazy"), DEFAULT_COMPLEXITY_THRESHOLD);
        assert!(!simple.should_expand);
        assert_eq!(simple.reason, ExpansionReason::SimpleContent);
        assert_eq!(simple.content_type, Some(ContentType::Text));

        let complex = analyze_leaf_for_expansion(&leaf("a | b\nc | d"), DEFAULT_COMPLEXITY_THRESHOLD);
        assert!(complex.should_expand);
        assert_eq!(complex.reason, ExpansionReason::ComplexContent);
        assert_eq!(complex.content_type, Some(ContentType::Table));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let verdict = analyze_leaf_for_expansion(&leaf("plain"), 0.1);
        assert_eq!(verdict.complexity, 0.1);
        assert!(!verdict.should_expand);
    }
}
