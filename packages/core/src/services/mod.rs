//! Tree Services
//!
//! This module contains the tree-shaping phases and their orchestration:
//!
//! - `TreeBuilder` - markdown to header-nested node tree
//! - `filter_for_mindmap` - collapse content into leaf `detail`
//! - `expand_complex_content` - re-expand complex leaves into typed children
//! - `enhance_tree_with_content_analysis` - cached `detailAnalysis` metadata
//! - `parse_markdown_to_tree` - the phases in order, driven by `ParseOptions`
//!
//! Every phase takes `&mut Node` and works in place.

pub mod analysis_cache;
pub mod content_expander;
pub mod error;
pub mod mindmap_filter;
pub mod pipeline;
pub mod tree_builder;

pub use analysis_cache::{content_hash, AnalysisCache, CachedAnalysis};
pub use content_expander::{
    expand_complex_content, extract_content_for_expansion, BlockData, ExpansionBlock,
    ExpansionStats,
};
pub use error::{Result, TreeError};
pub use mindmap_filter::{filter_for_mindmap, FilterStats};
pub use pipeline::{
    enhance_tree_with_content_analysis, get_pipeline_stats, parse_markdown_to_tree,
    AnalysisReport, ContentAnalysisStats, DetailAnalysis, PipelineStats, StructureStats,
};
pub use tree_builder::TreeBuilder;
