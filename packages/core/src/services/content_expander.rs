//! Content Expander
//!
//! Turns the collapsed `detail` of complex filter-leaves back into typed child
//! nodes: one child per embedded table, fenced code block or list.
//!
//! # Block Priority
//!
//! Blocks are ordered by a fixed type precedence, not by source position:
//!
//! 1. table
//! 2. code
//! 3. list
//!
//! Tables and lists inside a fence belong to the code block. A list needs at
//! least two items; a lone bullet stays in `detail`.

use crate::analysis::analyze_leaf_for_expansion;
use crate::analysis::extractor::{extract_list_items, extract_table_cells, parse_table};
use crate::config::ExpansionOptions;
use crate::models::{ContentType, Element, ListType, Node, NodePayload};
use crate::utils::markdown::{is_separator_row, is_table_line, parse_fence, parse_list_line};
use serde::Serialize;

/// Structured data of one extracted block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockData {
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        cells: Vec<String>,
    },
    Code {
        language: Option<String>,
        content: String,
    },
    List {
        items: Vec<String>,
        ordered: bool,
    },
}

/// A sub-block found in a `detail` string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionBlock {
    pub kind: ContentType,
    pub data: BlockData,
    /// Title of the child node created for this block
    pub node_text: String,
    /// Lower sorts first
    pub priority: u8,
}

impl ExpansionBlock {
    fn table(lines: &[&str]) -> Self {
        let table = parse_table(lines);
        Self {
            kind: ContentType::Table,
            data: BlockData::Table {
                headers: table.headers,
                rows: table.rows,
                cells: table.cells,
            },
            node_text: lines.join("\n"),
            priority: 1,
        }
    }

    fn code(language: Option<String>, content: String) -> Self {
        Self {
            kind: ContentType::Code,
            node_text: language.clone().unwrap_or_else(|| "code".to_string()),
            data: BlockData::Code { language, content },
            priority: 2,
        }
    }

    fn list(lines: &[&str]) -> Option<Self> {
        let parsed: Vec<_> = lines.iter().filter_map(|l| parse_list_line(l)).collect();
        if parsed.len() < 2 {
            return None;
        }
        let ordered = parsed[0].list_type == ListType::Ordered;
        Some(Self {
            kind: ContentType::List,
            data: BlockData::List {
                items: parsed.into_iter().map(|item| item.content).collect(),
                ordered,
            },
            node_text: lines.join("\n"),
            priority: 3,
        })
    }

    /// Build the typed child node for this block
    pub fn into_node(self, level: u8) -> Node {
        match self.data {
            BlockData::Table {
                headers,
                rows,
                cells,
            } => {
                let lines: Vec<&str> = self.node_text.lines().collect();
                let elements = extract_table_cells(&lines);
                Node::new(self.node_text, ContentType::Table, level)
                    .with_elements(elements)
                    .with_payload(NodePayload::Table {
                        cells,
                        headers,
                        rows,
                    })
            }
            BlockData::Code { language, content } => {
                let element = Element::CodeBlock {
                    content: content.clone(),
                    language: language.clone(),
                };
                Node::new(self.node_text, ContentType::Code, level)
                    .with_elements(vec![element])
                    .with_payload(NodePayload::Code { language, content })
            }
            BlockData::List { .. } => {
                let lines: Vec<&str> = self.node_text.lines().collect();
                let elements = extract_list_items(&lines);
                Node::new(self.node_text, ContentType::List, level).with_elements(elements)
            }
        }
    }
}

/// Counters reported by [`expand_complex_content`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionStats {
    pub leaves_examined: usize,
    pub leaves_expanded: usize,
    pub nodes_created: usize,
}

/// Find every table, fenced code block and list in `detail`
///
/// # Examples
///
/// ```rust
/// use mindtree_core::models::ContentType;
/// use mindtree_core::services::extract_content_for_expansion;
///
/// let detail = "- a\n- b\n\n```rust\nfn main() {}\n```\n\nx | y\n1 | 2";
/// let kinds: Vec<ContentType> = extract_content_for_expansion(detail)
///     .into_iter()
///     .map(|block| block.kind)
///     .collect();
///
/// assert_eq!(kinds, vec![ContentType::Table, ContentType::Code, ContentType::List]);
/// ```
pub fn extract_content_for_expansion(detail: &str) -> Vec<ExpansionBlock> {
    let lines: Vec<&str> = detail.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(fence) = parse_fence(line) {
            let mut content = String::new();
            i += 1;
            while i < lines.len() && !fence.is_closed_by(lines[i]) {
                content.push_str(lines[i]);
                content.push('\n');
                i += 1;
            }
            // Skip the closing fence when present
            i += 1;
            blocks.push(ExpansionBlock::code(fence.info, content));
            continue;
        }

        if is_table_line(line) {
            let start = i;
            while i < lines.len() && (is_table_line(lines[i]) || is_separator_row(lines[i])) {
                i += 1;
            }
            blocks.push(ExpansionBlock::table(&lines[start..i]));
            continue;
        }

        if parse_list_line(line).is_some() {
            let start = i;
            while i < lines.len() && parse_list_line(lines[i]).is_some() {
                i += 1;
            }
            if let Some(block) = ExpansionBlock::list(&lines[start..i]) {
                blocks.push(block);
            }
            continue;
        }

        i += 1;
    }

    // Stable: same-kind blocks keep source order
    blocks.sort_by_key(|block| block.priority);
    blocks
}

/// Expand complex filter-leaves of `root` in place
///
/// A non-root node without header children is expanded when its depth is
/// below `max_expansion_depth`, its `detail` scores above the threshold, its
/// detected type is enabled and at least one block can be extracted. The
/// expanded node gets one child per block and an empty `detail`.
pub fn expand_complex_content(root: &mut Node, options: &ExpansionOptions) -> ExpansionStats {
    let mut stats = ExpansionStats::default();
    let within_depth = |depth: usize| options.max_expansion_depth.map_or(true, |max| depth < max);

    let mut stack: Vec<(&mut Node, usize)> = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        if depth > 0 && !node.has_header_child() && !node.detail.is_empty() {
            stats.leaves_examined += 1;
            expand_leaf(node, options, &mut stats);
        }

        if within_depth(depth + 1) {
            stack.extend(node.children.iter_mut().rev().map(|child| (child, depth + 1)));
        }
    }

    tracing::debug!(
        "Expanded {} of {} leaves into {} nodes",
        stats.leaves_expanded,
        stats.leaves_examined,
        stats.nodes_created
    );

    stats
}

fn expand_leaf(node: &mut Node, options: &ExpansionOptions, stats: &mut ExpansionStats) {
    let verdict = analyze_leaf_for_expansion(node, options.min_complexity_threshold);

    let enabled = verdict
        .content_type
        .is_some_and(|content_type| options.is_enabled(content_type));

    if !verdict.should_expand || !enabled {
        log_decision(
            options,
            format_args!(
                "Leaving '{}' collapsed ({:?}, complexity {:.2}, enabled: {})",
                node.text, verdict.reason, verdict.complexity, enabled
            ),
        );
        return;
    }

    let blocks = extract_content_for_expansion(&node.detail);
    if blocks.is_empty() {
        log_decision(
            options,
            format_args!("No expandable blocks in '{}'", node.text),
        );
        return;
    }

    let level = node.level;
    let created = blocks.len();
    for block in blocks {
        node.add_child(block.into_node(level));
    }
    node.detail.clear();

    stats.leaves_expanded += 1;
    stats.nodes_created += created;

    log_decision(
        options,
        format_args!(
            "Expanded '{}' into {} children (complexity {:.2})",
            node.text, created, verdict.complexity
        ),
    );
}

fn log_decision(options: &ExpansionOptions, message: std::fmt::Arguments<'_>) {
    if options.enable_expansion_logging {
        tracing::info!("{}", message);
    } else {
        tracing::trace!("{}", message);
    }
}

#[cfg(test)]
#[path = "content_expander_test.rs"]
mod content_expander_test;
