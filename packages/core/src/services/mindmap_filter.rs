//! Mindmap Filter
//!
//! Collapses non-structural content so that only headers remain as visible
//! tree structure. A *filter-leaf* is a node without any header child:
//!
//! - a filter-leaf folds the markdown of its non-header children into
//!   `detail` (in source order, newline-joined) and drops them
//! - a node with header children discards its non-header children
//! - header children are always kept, subject to `include_types`
//!
//! The synthetic root never receives `detail`. When the whole document has
//! no headers the root keeps its content children as they are.
//!
//! Nodes are finished bottom-up: a node is reassembled only after all of its
//! header children are done. The walk uses an owned frame stack, so nesting
//! depth is bounded by heap, not by the call stack.

use crate::models::{ContentType, Node};
use serde::Serialize;
use std::mem;

/// Counters reported by [`filter_for_mindmap`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    /// Nodes removed from the tree, descendants included
    pub removed: usize,
    /// Leaves that received aggregated `detail`
    pub aggregated_leaves: usize,
}

/// A node whose header children are still being filtered
struct Frame {
    node: Node,
    pending: std::vec::IntoIter<Node>,
    finished: Vec<Node>,
}

/// Filter `root` in place into mindmap shape
///
/// # Examples
///
/// ```rust
/// use mindtree_core::services::{filter_for_mindmap, TreeBuilder};
///
/// let mut root = TreeBuilder::new().build("# A\nnote\n- x\n- y");
/// let stats = filter_for_mindmap(&mut root, None);
///
/// assert_eq!(root.children[0].detail, "note\n- x\n- y");
/// assert!(root.children[0].children.is_empty());
/// assert_eq!(stats.removed, 2);
/// ```
pub fn filter_for_mindmap(root: &mut Node, include_types: Option<&[ContentType]>) -> FilterStats {
    let mut stats = FilterStats::default();

    let owned_root = mem::replace(root, Node::root());
    let mut stack = vec![open_frame(owned_root, true, include_types, &mut stats)];

    while let Some(top) = stack.last_mut() {
        if let Some(child) = top.pending.next() {
            let frame = open_frame(child, false, include_types, &mut stats);
            stack.push(frame);
            continue;
        }

        let Some(done) = stack.pop() else { break };
        let mut node = done.node;
        node.children = done.finished;

        match stack.last_mut() {
            Some(parent) => parent.finished.push(node),
            None => *root = node,
        }
    }

    tracing::debug!(
        "Mindmap filter removed {} nodes and aggregated {} leaves",
        stats.removed,
        stats.aggregated_leaves
    );

    stats
}

/// Apply the leaf rules to `node`'s direct children and queue its headers
fn open_frame(
    mut node: Node,
    is_root: bool,
    include_types: Option<&[ContentType]>,
    stats: &mut FilterStats,
) -> Frame {
    let mut children = mem::take(&mut node.children);

    if let Some(allowed) = include_types {
        let (kept, dropped): (Vec<Node>, Vec<Node>) = children
            .into_iter()
            .partition(|child| allowed.contains(&child.content_type));
        stats.removed += dropped.iter().map(Node::count_nodes).sum::<usize>();
        children = kept;
    }

    let (headers, content): (Vec<Node>, Vec<Node>) =
        children.into_iter().partition(Node::is_header);
    let is_leaf = headers.is_empty();

    let mut finished = Vec::new();

    if is_leaf && is_root {
        // Headerless document: nothing to fold into
        finished = content;
    } else if is_leaf {
        if !content.is_empty() {
            let aggregated = content
                .iter()
                .map(render_subtree)
                .collect::<Vec<_>>()
                .join("\n");
            if node.detail.is_empty() {
                node.detail = aggregated;
            } else {
                node.detail = format!("{}\n{}", node.detail, aggregated);
            }
            stats.removed += content.iter().map(Node::count_nodes).sum::<usize>();
            stats.aggregated_leaves += 1;
        }
    } else {
        if !content.is_empty() {
            tracing::trace!(
                "Discarding {} non-header children of '{}'",
                content.len(),
                node.text
            );
        }
        stats.removed += content.iter().map(Node::count_nodes).sum::<usize>();
        node.detail.clear();
    }

    Frame {
        node,
        pending: headers.into_iter(),
        finished,
    }
}

/// Markdown of a content node and anything nested under it
fn render_subtree(node: &Node) -> String {
    node.descendants()
        .map(|(n, _)| n.to_markdown())
        .collect::<Vec<_>>()
        .join("\n")
}
