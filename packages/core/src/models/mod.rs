//! Data Models
//!
//! This module contains the data structures shared by every pipeline stage:
//!
//! - `Node` - the mindmap tree node and its JSON mirror `NodeRecord`
//! - `ContentType`, `Element`, `ContentAnalysis` - content classification types

mod content;
mod node;

pub use content::{ContentAnalysis, ContentType, Element, ListType};
pub use node::{
    Descendants, Node, NodePayload, NodeRecord, ValidationError, ANALYSIS_METRICS_KEY,
    DETAIL_ANALYSIS_KEY, MAX_JSON_STR_DEPTH, ROOT_TEXT,
};
