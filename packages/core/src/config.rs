//! Configuration for the markdown-to-tree pipeline

use crate::analysis::DEFAULT_COMPLEXITY_THRESHOLD;
use crate::models::ContentType;
use serde::{Deserialize, Serialize};

/// Default capacity of the per-invocation analysis cache
pub const DEFAULT_ANALYSIS_CACHE_CAPACITY: usize = 1024;

/// Depth bound used when `AnalysisDepth::Moderate` is selected
pub const MODERATE_ANALYSIS_DEPTH: usize = 5;

/// Depth bound used when `AnalysisDepth::Surface` is selected
pub const SURFACE_ANALYSIS_DEPTH: usize = 2;

/// How far down the tree the orchestrator analyses `detail` content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    /// Root and its first two levels
    Surface,
    #[default]
    Moderate,
    /// Whole tree
    Deep,
}

impl AnalysisDepth {
    /// Deepest node depth visited (root = 0), `None` for unlimited
    pub fn max_depth(&self) -> Option<usize> {
        match self {
            AnalysisDepth::Surface => Some(SURFACE_ANALYSIS_DEPTH),
            AnalysisDepth::Moderate => Some(MODERATE_ANALYSIS_DEPTH),
            AnalysisDepth::Deep => None,
        }
    }
}

/// Options accepted by `parse_markdown_to_tree`
///
/// Every field is optional in serialized form; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Collapse non-structural content into leaf `detail`
    pub filter_for_mindmap: bool,

    /// Content types allowed to survive filtering (`None` = all)
    pub include_types: Option<Vec<ContentType>>,

    /// Re-expand complex leaves into typed children
    pub expand_complex_content: bool,

    /// Leaves at this depth or deeper are not expanded (`None` = unlimited)
    pub max_expansion_depth: Option<usize>,

    /// Detected types eligible for expansion (`None` = all)
    pub enabled_types: Option<Vec<ContentType>>,

    /// Complexity a leaf must exceed to be expanded
    pub min_complexity_threshold: f64,

    /// Store `detailAnalysis` metadata on nodes with detail
    pub enable_content_analysis: bool,

    /// Depth bound of the content analysis walk
    pub analysis_depth: AnalysisDepth,

    /// Write the analysis report to the root's metadata
    pub include_analysis_metrics: bool,

    /// Reuse analyses of identical detail strings within one run
    pub cache_analysis_results: bool,

    /// Capacity of the per-run analysis cache
    pub analysis_cache_capacity: usize,

    /// Log every expansion decision at info level
    pub enable_expansion_logging: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            filter_for_mindmap: false,
            include_types: None,
            expand_complex_content: false,
            max_expansion_depth: None,
            enabled_types: None,
            min_complexity_threshold: DEFAULT_COMPLEXITY_THRESHOLD,
            enable_content_analysis: false,
            analysis_depth: AnalysisDepth::Moderate,
            include_analysis_metrics: false,
            cache_analysis_results: true,
            analysis_cache_capacity: DEFAULT_ANALYSIS_CACHE_CAPACITY,
            enable_expansion_logging: false,
        }
    }
}

impl ParseOptions {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_complexity_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.min_complexity_threshold)
        {
            return Err(format!(
                "min_complexity_threshold must be within [0, 1] (got {})",
                self.min_complexity_threshold
            ));
        }

        if self.cache_analysis_results && self.analysis_cache_capacity == 0 {
            return Err("analysis_cache_capacity must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Options for the content expander
    pub fn expansion_options(&self) -> ExpansionOptions {
        ExpansionOptions {
            max_expansion_depth: self.max_expansion_depth,
            enabled_types: self.enabled_types.clone(),
            min_complexity_threshold: self.min_complexity_threshold,
            enable_expansion_logging: self.enable_expansion_logging,
        }
    }

    /// Options for the pipeline orchestrator
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            analysis_depth: self.analysis_depth,
            cache_analysis_results: self.cache_analysis_results,
            cache_capacity: self.analysis_cache_capacity,
            include_analysis_metrics: self.include_analysis_metrics,
        }
    }
}

/// Options for `expand_complex_content`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpansionOptions {
    pub max_expansion_depth: Option<usize>,
    pub enabled_types: Option<Vec<ContentType>>,
    pub min_complexity_threshold: f64,
    pub enable_expansion_logging: bool,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        ParseOptions::default().expansion_options()
    }
}

impl ExpansionOptions {
    /// Whether `content_type` may be expanded
    pub fn is_enabled(&self, content_type: ContentType) -> bool {
        self.enabled_types
            .as_ref()
            .map_or(true, |types| types.contains(&content_type))
    }
}

/// Options for `enhance_tree_with_content_analysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOptions {
    pub analysis_depth: AnalysisDepth,
    pub cache_analysis_results: bool,
    pub cache_capacity: usize,
    pub include_analysis_metrics: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        ParseOptions::default().analysis_options()
    }
}
