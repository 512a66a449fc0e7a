//! Mindtree Core
//!
//! This crate turns markdown documents into hierarchical mindmap trees: header
//! nesting becomes structure, other content is classified, collapsed into leaf
//! `detail` and, where it is complex enough, re-expanded into typed children.
//!
//! # Architecture
//!
//! - **Owned tree**: every `Node` owns its children; phases mutate in place
//! - **Fixed detection order**: content types resolve through one documented
//!   priority table
//! - **Graceful degradation**: only absent input and invalid options are
//!   errors; malformed markdown always yields a tree
//! - **Per-run caching**: analysis results are cached per call, never globally
//!
//! # Modules
//!
//! - [`models`] - Node, content types and elements
//! - [`analysis`] - Detector, extractor and complexity scoring
//! - [`services`] - Tree builder, mindmap filter, expander and orchestrator
//! - [`config`] - Pipeline options
//! - [`utils`] - Markdown line patterns and the advisory validator

pub mod analysis;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use analysis::{
    analyze_leaf_for_expansion, calculate_content_complexity, classify, detect_content_type,
    extract_elements, ExpansionReason, LeafAnalysis,
};
pub use config::{AnalysisDepth, AnalysisOptions, ExpansionOptions, ParseOptions};
pub use models::*;
pub use services::*;
pub use utils::validate_markdown;
