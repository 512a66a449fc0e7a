//! Node Data Structures
//!
//! This module defines the `Node` struct, the single entity of a mindmap tree,
//! and its plain-object JSON mirror `NodeRecord`.
//!
//! # Architecture
//!
//! - **Owned tree**: a node exclusively owns its `children`, in document order
//! - **Back-reference by id**: `parent_id` is set only by the owning parent
//! - **Typed payload**: type-specific fields live in the `NodePayload` union
//! - **JSON mirror**: `to_json` / `from_json` flatten the payload into
//!   `language`, `content`, `formula`, `listType`, `cells`, `headers`, `rows`
//!
//! # Examples
//!
//! ```rust
//! use mindtree_core::models::{ContentType, Node};
//!
//! let mut root = Node::root();
//! let chapter = Node::header("Chapter 1", 1);
//! root.add_child(chapter);
//!
//! assert_eq!(root.children[0].parent_id.as_deref(), Some(root.id.as_str()));
//! assert_eq!(root.children[0].node_type, ContentType::Header);
//! ```

use crate::models::{ContentType, Element, ListType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Display title given to the synthetic root
pub const ROOT_TEXT: &str = "Root";

/// Metadata key written by the pipeline orchestrator
pub const DETAIL_ANALYSIS_KEY: &str = "detailAnalysis";

/// Metadata key holding the orchestrator report on the root
pub const ANALYSIS_METRICS_KEY: &str = "analysisMetrics";

/// Deepest node chain [`Node::from_json_str`] is guaranteed to accept
pub const MAX_JSON_STR_DEPTH: usize = 60;

/// Structural errors found by [`Node::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate node ID: {0}")]
    DuplicateId(String),

    #[error("Invalid parent reference on node {child_id}: expected {expected}")]
    InvalidParent { child_id: String, expected: String },

    #[error("Invalid header level {level} on node {node_id}")]
    InvalidLevel { node_id: String, level: u8 },

    #[error("Leaf invariant violated: node {0} has both children and detail")]
    DetailOnBranch(String),
}

/// Type-specific node fields.
///
/// Only the variant matching the node's content type carries data; every
/// other node uses `NodePayload::None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodePayload {
    #[default]
    None,

    /// Fenced code block
    Code {
        language: Option<String>,
        content: String,
    },

    /// First formula of a math paragraph
    Math { formula: String },

    /// A lone bullet or numbered line
    ListItem { list_type: ListType },

    /// Table cells (row-major), header row and data rows
    Table {
        cells: Vec<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Node of a mindmap tree.
///
/// # Fields
///
/// - `id`: UUID v4 generated at construction
/// - `text`: display title
/// - `detail`: aggregated markdown of collapsed children (filter-leaves only)
/// - `level`: 0 for the synthetic root, 1-6 for headers; content nodes inherit
///   the level of the node they were attached to
/// - `node_type`: legacy single-type tag, serialized as `type`
/// - `content_type`: current classification, serialized as `contentType`
/// - `elements`: typed element records in document order
/// - `children`: owned children in document order
/// - `parent_id`: non-owning back-reference, maintained by [`Node::add_child`]
/// - `collapsed`: UI scratch flag, never touched by this crate
/// - `metadata`: free-form map (`detailAnalysis`, `analysisMetrics`)
/// - `payload`: type-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "NodeRecord", from = "NodeRecord")]
pub struct Node {
    pub id: String,
    pub text: String,
    pub detail: String,
    pub level: u8,
    pub node_type: ContentType,
    pub content_type: ContentType,
    pub elements: Vec<Element>,
    pub children: Vec<Node>,
    pub parent_id: Option<String>,
    pub collapsed: bool,
    pub metadata: Map<String, Value>,
    pub payload: NodePayload,
}

impl Node {
    /// Create a new Node with auto-generated UUID
    ///
    /// `content_type` starts equal to `node_type`.
    pub fn new(text: impl Into<String>, node_type: ContentType, level: u8) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            detail: String::new(),
            level,
            node_type,
            content_type: node_type,
            elements: Vec::new(),
            children: Vec::new(),
            parent_id: None,
            collapsed: false,
            metadata: Map::new(),
            payload: NodePayload::None,
        }
    }

    /// Create the synthetic level-0 root
    pub fn root() -> Self {
        Self::new(ROOT_TEXT, ContentType::Header, 0)
    }

    /// Create a header node of the given level
    pub fn header(text: impl Into<String>, level: u8) -> Self {
        Self::new(text, ContentType::Header, level)
    }

    /// Set the element records
    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    /// Set the type-specific payload
    pub fn with_payload(mut self, payload: NodePayload) -> Self {
        self.payload = payload;
        self
    }

    /// Override the current classification, keeping the legacy type
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Append a child, taking ownership and setting its back-reference
    pub fn add_child(&mut self, mut child: Node) {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
    }

    /// Whether this node is the synthetic root
    pub fn is_root(&self) -> bool {
        self.level == 0 && self.parent_id.is_none()
    }

    /// Whether this node is a structural header
    pub fn is_header(&self) -> bool {
        self.node_type == ContentType::Header
    }

    /// Whether any direct child is a header
    ///
    /// A node without header children is a *filter-leaf*.
    pub fn has_header_child(&self) -> bool {
        self.children.iter().any(Node::is_header)
    }

    /// Iterate over this node and all descendants, depth-first in document
    /// order, together with their depth relative to `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![(self, 0)],
        }
    }

    /// Total number of nodes in this subtree, `self` included
    pub fn count_nodes(&self) -> usize {
        self.descendants().count()
    }

    /// Find a node in this subtree by id
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.descendants()
            .map(|(node, _)| node)
            .find(|node| node.id == id)
    }

    /// Render this node back to markdown-ish source
    ///
    /// Code blocks keep their fences; headers get their `#` markers back;
    /// every other node already stores its source block in `text`.
    pub fn to_markdown(&self) -> String {
        match &self.payload {
            NodePayload::Code { language, content } => {
                let mut out = String::from("```");
                if let Some(language) = language {
                    out.push_str(language);
                }
                out.push('\n');
                out.push_str(content);
                if !content.is_empty() && !content.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```");
                out
            }
            _ if self.is_header() && self.level > 0 => {
                format!("{} {}", "#".repeat(self.level as usize), self.text)
            }
            _ => self.text.clone(),
        }
    }

    /// Check tree invariants: unique ids, consistent back-references, header
    /// levels within 0-6 and no `detail` on nodes with children
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen: HashSet<&str> = HashSet::new();

        for (node, _) in self.descendants() {
            if !seen.insert(node.id.as_str()) {
                return Err(ValidationError::DuplicateId(node.id.clone()));
            }

            if node.is_header() && node.level > 6 {
                return Err(ValidationError::InvalidLevel {
                    node_id: node.id.clone(),
                    level: node.level,
                });
            }

            if !node.children.is_empty() && !node.detail.is_empty() {
                return Err(ValidationError::DetailOnBranch(node.id.clone()));
            }

            for child in &node.children {
                if child.parent_id.as_deref() != Some(node.id.as_str()) {
                    return Err(ValidationError::InvalidParent {
                        child_id: child.id.clone(),
                        expected: node.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Serialize to the plain-object JSON mirror
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Rebuild a tree from its JSON mirror, restoring back-references
    pub fn from_json(value: Value) -> serde_json::Result<Node> {
        serde_json::from_value(value)
    }

    /// Serialize to a JSON string
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a tree from a JSON string
    ///
    /// The parser keeps serde_json's nesting limit of 128, and every node
    /// costs two levels (object plus `children` array). Chains up to
    /// [`MAX_JSON_STR_DEPTH`] deep always parse; much deeper ones fail with a
    /// "recursion limit exceeded" error instead of exhausting the stack. [`Node::from_json`] takes an
    /// already parsed value and has no such limit.
    pub fn from_json_str(json: &str) -> serde_json::Result<Node> {
        serde_json::from_str(json)
    }
}

/// Depth-first iterator over a subtree, see [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

/// Plain-object JSON mirror of [`Node`]
///
/// Missing `id`s are regenerated on the way in; `parent_id` is never
/// serialized and is rebuilt from the nesting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub level: u8,
    #[serde(rename = "type")]
    pub node_type: ContentType,
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub children: Vec<NodeRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_type: Option<ListType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<String>>>,
}

impl From<Node> for NodeRecord {
    fn from(node: Node) -> Self {
        let mut record = NodeRecord {
            id: Some(node.id),
            text: node.text,
            detail: node.detail,
            level: node.level,
            node_type: node.node_type,
            content_type: Some(node.content_type),
            elements: node.elements,
            collapsed: node.collapsed,
            metadata: node.metadata,
            children: node.children.into_iter().map(NodeRecord::from).collect(),
            language: None,
            content: None,
            formula: None,
            list_type: None,
            cells: None,
            headers: None,
            rows: None,
        };

        match node.payload {
            NodePayload::None => {}
            NodePayload::Code { language, content } => {
                record.language = language;
                record.content = Some(content);
            }
            NodePayload::Math { formula } => record.formula = Some(formula),
            NodePayload::ListItem { list_type } => record.list_type = Some(list_type),
            NodePayload::Table {
                cells,
                headers,
                rows,
            } => {
                record.cells = Some(cells);
                record.headers = Some(headers);
                record.rows = Some(rows);
            }
        }

        record
    }
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        let content_type = record.content_type.unwrap_or(record.node_type);

        // The legacy type decides which payload fields are meaningful
        let payload = match record.node_type {
            ContentType::Code if record.content.is_some() || record.language.is_some() => {
                NodePayload::Code {
                    language: record.language,
                    content: record.content.unwrap_or_default(),
                }
            }
            ContentType::Math if record.formula.is_some() => NodePayload::Math {
                formula: record.formula.unwrap_or_default(),
            },
            ContentType::ListItem if record.list_type.is_some() => NodePayload::ListItem {
                list_type: record.list_type.unwrap_or(ListType::Unordered),
            },
            ContentType::Table
                if record.cells.is_some() || record.headers.is_some() || record.rows.is_some() =>
            {
                NodePayload::Table {
                    cells: record.cells.unwrap_or_default(),
                    headers: record.headers.unwrap_or_default(),
                    rows: record.rows.unwrap_or_default(),
                }
            }
            _ => NodePayload::None,
        };

        let mut node = Node {
            id: record.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            text: record.text,
            detail: record.detail,
            level: record.level,
            node_type: record.node_type,
            content_type,
            elements: record.elements,
            children: Vec::with_capacity(record.children.len()),
            parent_id: None,
            collapsed: record.collapsed,
            metadata: record.metadata,
            payload,
        };

        for child in record.children {
            node.add_child(Node::from(child));
        }

        node
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
