//! Tree Builder
//!
//! Single pass over a markdown document producing a header-nested node tree.
//!
//! # Hierarchy Rules
//!
//! 1. **Headers nest by level**: H1 → H2 → H3; a header closes every open
//!    header of the same or deeper level
//! 2. **Content belongs to the nearest open header**: every non-header block
//!    becomes a child of the header above it (or of the root)
//! 3. **Blocks, not lines**: consecutive table lines form one table node,
//!    consecutive list lines one list node, consecutive prose lines one
//!    paragraph node
//! 4. **Fences swallow**: a fenced block runs to its closing fence or to the
//!    end of input
//!
//! # Examples
//!
//! ```rust
//! use mindtree_core::services::TreeBuilder;
//!
//! let root = TreeBuilder::new().build("# A\ntext\n## B\n# C");
//! let titles: Vec<&str> = root.children.iter().map(|n| n.text.as_str()).collect();
//! assert_eq!(titles, vec!["A", "C"]);
//! assert_eq!(root.children[0].children[1].text, "B");
//! ```

use crate::analysis::detect_content_type;
use crate::analysis::extractor::{
    extract_code_block, extract_list_items, extract_table_cells, parse_table,
};
use crate::models::{ContentType, Element, ListType, Node, NodePayload};
use crate::utils::markdown::{
    is_separator_row, is_table_line, parse_fence, parse_header, parse_list_line,
};

/// Builds mindmap trees from markdown
#[derive(Debug, Default, Clone)]
pub struct TreeBuilder {}

/// Stack of open header nodes during a build
///
/// `stack[0]` is always the synthetic root; deeper entries are headers of
/// strictly increasing level. A node is attached to its parent when it is
/// popped, which keeps document order.
struct ParserContext {
    stack: Vec<Node>,
    nodes_created: usize,
}

impl ParserContext {
    fn new() -> Self {
        Self {
            stack: vec![Node::root()],
            nodes_created: 0,
        }
    }

    /// Level content nodes inherit from the current parent
    fn current_level(&self) -> u8 {
        self.stack.last().map_or(0, |n| n.level)
    }

    /// Pop headers at same or deeper level, attaching each to its parent
    fn pop_headers_for_level(&mut self, level: u8) {
        while self.stack.len() > 1 && self.stack.last().is_some_and(|top| top.level >= level)
        {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(done) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.add_child(done);
            }
        }
    }

    fn push_header(&mut self, text: String, level: u8) {
        self.pop_headers_for_level(level);
        self.stack.push(Node::header(text, level));
        self.nodes_created += 1;
    }

    fn attach(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.add_child(node);
            self.nodes_created += 1;
        }
    }

    fn finish(mut self) -> (Node, usize) {
        while self.stack.len() > 1 {
            self.close_top();
        }
        let root = self.stack.pop().unwrap_or_else(Node::root);
        (root, self.nodes_created)
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// Build a tree from `markdown`
    ///
    /// Never fails: empty input yields a root without children and malformed
    /// blocks degrade to the closest sensible node.
    pub fn build(&self, markdown: &str) -> Node {
        let lines: Vec<&str> = markdown.lines().collect();
        let mut context = ParserContext::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if line.trim().is_empty() {
                i += 1;
                continue;
            }

            if let Some(header) = parse_header(line) {
                context.push_header(header.text, header.level);
                i += 1;
                continue;
            }

            let level = context.current_level();

            if let Some(fence) = parse_fence(line) {
                // Collect until the closing fence or end of input
                let start = i;
                i += 1;
                while i < lines.len() && !fence.is_closed_by(lines[i]) {
                    i += 1;
                }
                let end = (i + 1).min(lines.len());
                if i >= lines.len() {
                    tracing::debug!(
                        "Unterminated code fence at line {} runs to end of input",
                        start + 1
                    );
                }
                context.attach(code_node(&lines[start..end], level));
                i = end;
                continue;
            }

            if is_table_line(line) {
                let start = i;
                while i < lines.len() && (is_table_line(lines[i]) || is_separator_row(lines[i])) {
                    i += 1;
                }
                context.attach(table_node(&lines[start..i], level));
                continue;
            }

            if parse_list_line(line).is_some() {
                let start = i;
                while i < lines.len() && parse_list_line(lines[i]).is_some() {
                    i += 1;
                }
                context.attach(list_node(&lines[start..i], level));
                continue;
            }

            let start = i;
            i += 1;
            while i < lines.len() && !starts_new_block(lines[i]) {
                i += 1;
            }
            context.attach(paragraph_node(&lines[start..i], level));
        }

        let (root, nodes_created) = context.finish();
        tracing::debug!(
            "Built tree with {} nodes from {} lines",
            nodes_created,
            lines.len()
        );
        root
    }
}

/// Whether a line ends the current paragraph
fn starts_new_block(line: &str) -> bool {
    line.trim().is_empty()
        || parse_header(line).is_some()
        || parse_fence(line).is_some()
        || is_table_line(line)
        || parse_list_line(line).is_some()
}

fn code_node(lines: &[&str], level: u8) -> Node {
    let element = extract_code_block(&lines.join("\n"), None);
    let (language, content) = match &element {
        Element::CodeBlock { language, content } => (language.clone(), content.clone()),
        _ => (None, String::new()),
    };
    let title = language.clone().unwrap_or_else(|| "code".to_string());

    Node::new(title, ContentType::Code, level)
        .with_elements(vec![element])
        .with_payload(NodePayload::Code { language, content })
}

fn table_node(lines: &[&str], level: u8) -> Node {
    let table = parse_table(lines);
    let elements = extract_table_cells(lines);

    Node::new(lines.join("\n"), ContentType::Table, level)
        .with_elements(elements)
        .with_payload(NodePayload::Table {
            cells: table.cells,
            headers: table.headers,
            rows: table.rows,
        })
}

fn list_node(lines: &[&str], level: u8) -> Node {
    let elements = extract_list_items(lines);
    let text = lines
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    if lines.len() == 1 {
        let list_type = parse_list_line(lines[0])
            .map(|item| item.list_type)
            .unwrap_or(ListType::Unordered);
        return Node::new(text, ContentType::ListItem, level)
            .with_elements(elements)
            .with_payload(NodePayload::ListItem { list_type });
    }

    Node::new(text, ContentType::List, level).with_elements(elements)
}

fn paragraph_node(lines: &[&str], level: u8) -> Node {
    let text = lines
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n");
    let analysis = detect_content_type(&text, None);

    let payload = match analysis.content_type {
        ContentType::Math => analysis
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Formula { content, .. } => Some(NodePayload::Math {
                    formula: content.clone(),
                }),
                _ => None,
            })
            .unwrap_or_default(),
        _ => NodePayload::None,
    };

    Node::new(text, analysis.content_type, level)
        .with_elements(analysis.elements)
        .with_payload(payload)
}

#[cfg(test)]
#[path = "tree_builder_test.rs"]
mod tree_builder_test;
