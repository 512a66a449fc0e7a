//! Content Classification Types
//!
//! Coarse content types, element records and the detector's analysis result.
//!
//! Every variant carries only its own fields, so a cell can never hold a
//! language and a code block can never hold an index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse classification of a node or a span of content.
///
/// Serialized in kebab-case (`"list-item"`, `"code"`, ...) to match the JSON
/// shape consumed by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Text,
    Header,
    Code,
    Table,
    List,
    ListItem,
    Image,
    Link,
    Math,
    Complex,
}

impl ContentType {
    /// Every content type, in declaration order.
    pub const ALL: [ContentType; 10] = [
        ContentType::Text,
        ContentType::Header,
        ContentType::Code,
        ContentType::Table,
        ContentType::List,
        ContentType::ListItem,
        ContentType::Image,
        ContentType::Link,
        ContentType::Math,
        ContentType::Complex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Header => "header",
            ContentType::Code => "code",
            ContentType::Table => "table",
            ContentType::List => "list",
            ContentType::ListItem => "list-item",
            ContentType::Image => "image",
            ContentType::Link => "link",
            ContentType::Math => "math",
            ContentType::Complex => "complex",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown content type: {}", s))
    }
}

/// Marker style of a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// `-`, `*` or `+`
    Unordered,
    /// `1.`, `2.`, ...
    Ordered,
}

/// Structured sub-record produced by the element extractor.
///
/// Serialized with an internal `type` tag, e.g.
/// `{"type": "cell", "content": "Name", "index": 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    /// One pipe-delimited table field, row-major
    Cell { content: String, index: usize },

    /// One bullet or numbered line; `indent` counts leading whitespace
    ListItem {
        content: String,
        indent: usize,
        index: usize,
    },

    /// Whole code block
    CodeBlock {
        content: String,
        language: Option<String>,
    },

    /// `![alt](src)`
    Image {
        alt: String,
        src: String,
        index: usize,
    },

    /// `[text](url)`
    Link {
        text: String,
        url: String,
        index: usize,
    },

    /// `$...$` or `$$...$$`, delimiters stripped
    Formula { content: String, index: usize },

    /// `**bold**` span inside mixed content
    Bold { content: String, index: usize },

    /// `` `code` `` span inside mixed content
    InlineCode { content: String, index: usize },

    /// Fallback for plain text
    Text { content: String, length: usize },
}

impl Element {
    /// Kind tag as it appears in JSON
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Cell { .. } => "cell",
            Element::ListItem { .. } => "list-item",
            Element::CodeBlock { .. } => "code-block",
            Element::Image { .. } => "image",
            Element::Link { .. } => "link",
            Element::Formula { .. } => "formula",
            Element::Bold { .. } => "bold",
            Element::InlineCode { .. } => "inline-code",
            Element::Text { .. } => "text",
        }
    }
}

/// Result of classifying a content string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub elements: Vec<Element>,
}

impl ContentAnalysis {
    pub fn new(content_type: ContentType, elements: Vec<Element>) -> Self {
        Self {
            content_type,
            elements,
        }
    }

    /// Whether the analysis found nothing to work with
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for ContentAnalysis {
    fn default() -> Self {
        Self::new(ContentType::Text, Vec::new())
    }
}
