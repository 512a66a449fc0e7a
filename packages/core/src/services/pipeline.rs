//! Pipeline Orchestrator
//!
//! Runs the phases in order (build, filter, expand, analyse) and summarises
//! the resulting tree.
//!
//! Every phase mutates the tree through `&mut Node`, so exactly one phase
//! writes at a time. The analysis cache lives only as long as one call to
//! [`enhance_tree_with_content_analysis`].

use crate::config::{AnalysisOptions, ParseOptions};
use crate::models::{ContentType, Node, ANALYSIS_METRICS_KEY, DETAIL_ANALYSIS_KEY};
use crate::services::analysis_cache::{content_hash, AnalysisCache, CachedAnalysis};
use crate::services::error::{Result, TreeError};
use crate::services::{expand_complex_content, filter_for_mindmap, TreeBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

/// Complexity above which a node counts as complex in [`PipelineStats`]
const COMPLEX_NODE_THRESHOLD: f64 = 0.3;

/// Analysis stored under `metadata.detailAnalysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailAnalysis {
    pub content_type: ContentType,
    pub complexity: f64,
    pub content_hash: String,
}

impl DetailAnalysis {
    /// Read the analysis stored on `node`, if any
    pub fn from_node(node: &Node) -> Option<Self> {
        node.metadata
            .get(DETAIL_ANALYSIS_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Outcome of [`enhance_tree_with_content_analysis`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub nodes_analyzed: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
}

impl AnalysisReport {
    /// Share of cache lookups that were hits, 0 when nothing was looked up
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

/// Content section of [`PipelineStats`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysisStats {
    pub types_detected: BTreeMap<ContentType, usize>,
    pub complex_nodes: usize,
    pub elements_extracted: usize,
}

/// Structure section of [`PipelineStats`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureStats {
    pub max_depth: usize,
    pub leaf_nodes: usize,
}

/// Summary of a tree, see [`get_pipeline_stats`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub total_nodes: usize,
    pub content_analysis: ContentAnalysisStats,
    pub structure: StructureStats,
}

/// Parse `markdown` into a tree, running the phases selected by `options`
///
/// # Errors
///
/// - `TreeError::InvalidArgument` when `markdown` is `None`
/// - `TreeError::Configuration` when `options` fail validation
///
/// # Examples
///
/// ```rust
/// use mindtree_core::{parse_markdown_to_tree, ParseOptions};
///
/// let options = ParseOptions {
///     filter_for_mindmap: true,
///     ..Default::default()
/// };
/// let root = parse_markdown_to_tree("# Title\nsome text", &options).unwrap();
///
/// assert_eq!(root.children[0].detail, "some text");
/// assert!(parse_markdown_to_tree(None::<&str>, &options).is_err());
/// ```
pub fn parse_markdown_to_tree<'a>(
    markdown: impl Into<Option<&'a str>>,
    options: &ParseOptions,
) -> Result<Node> {
    let markdown = markdown
        .into()
        .ok_or_else(|| TreeError::InvalidArgument("markdown input is required".to_string()))?;
    options.validate().map_err(TreeError::Configuration)?;

    let mut root = TreeBuilder::new().build(markdown);

    if options.filter_for_mindmap {
        filter_for_mindmap(&mut root, options.include_types.as_deref());
    }

    if options.expand_complex_content {
        expand_complex_content(&mut root, &options.expansion_options());
    }

    if options.enable_content_analysis {
        enhance_tree_with_content_analysis(&mut root, &options.analysis_options());
    }

    tracing::info!(
        "Parsed markdown ({} bytes) into {} nodes",
        markdown.len(),
        root.count_nodes()
    );

    Ok(root)
}

/// Store `detailAnalysis` on every node with `detail` within the depth bound
///
/// With caching enabled, duplicate `detail` strings are analysed once and a
/// node whose stored `contentHash` already matches its `detail` is left
/// untouched and counted as a hit, which makes repeated calls idempotent.
pub fn enhance_tree_with_content_analysis(
    root: &mut Node,
    options: &AnalysisOptions,
) -> AnalysisReport {
    let max_depth = options.analysis_depth.max_depth();
    let mut cache = options
        .cache_analysis_results
        .then(|| AnalysisCache::new(options.cache_capacity));
    let mut report = AnalysisReport::default();

    let mut stack: Vec<(&mut Node, usize)> = vec![(&mut *root, 0)];

    while let Some((node, depth)) = stack.pop() {
        if !node.detail.is_empty() {
            analyze_node(node, cache.as_mut());
            report.nodes_analyzed += 1;
        }

        if max_depth.map_or(true, |max| depth < max) {
            stack.extend(node.children.iter_mut().map(|child| (child, depth + 1)));
        }
    }

    if let Some(cache) = &cache {
        report.cache_hits = cache.hits();
        report.cache_misses = cache.misses();
    }

    tracing::debug!(
        "Analysed {} nodes ({} hits, {} misses)",
        report.nodes_analyzed,
        report.cache_hits,
        report.cache_misses
    );

    if options.include_analysis_metrics {
        root.metadata.insert(
            ANALYSIS_METRICS_KEY.to_string(),
            json!({
                "nodesAnalyzed": report.nodes_analyzed,
                "cacheHits": report.cache_hits,
                "cacheMisses": report.cache_misses,
                "cacheHitRate": report.cache_hit_rate(),
            }),
        );
    }

    report
}

fn analyze_node(node: &mut Node, cache: Option<&mut AnalysisCache>) {
    let hash = content_hash(&node.detail);

    let analysis = match cache {
        Some(cache) => {
            let up_to_date = DetailAnalysis::from_node(node)
                .is_some_and(|existing| existing.content_hash == hash);
            if up_to_date {
                cache.record_hit();
                return;
            }
            cache.get_or_compute(&hash, &node.detail)
        }
        None => CachedAnalysis::compute(&node.detail),
    };

    let detail_analysis = DetailAnalysis {
        content_type: analysis.content_type,
        complexity: analysis.complexity,
        content_hash: hash,
    };

    match serde_json::to_value(&detail_analysis) {
        Ok(value) => {
            node.metadata.insert(DETAIL_ANALYSIS_KEY.to_string(), value);
        }
        Err(e) => tracing::warn!("Failed to store analysis for node {}: {}", node.id, e),
    }
}

/// Summarise node counts, detected types and shape of a tree
pub fn get_pipeline_stats(root: &Node) -> PipelineStats {
    let mut stats = PipelineStats::default();

    for (node, depth) in root.descendants() {
        stats.total_nodes += 1;
        stats.structure.max_depth = stats.structure.max_depth.max(depth);

        if node.children.is_empty() {
            stats.structure.leaf_nodes += 1;
        }

        stats.content_analysis.elements_extracted += node.elements.len();

        if depth > 0 {
            *stats
                .content_analysis
                .types_detected
                .entry(node.content_type)
                .or_insert(0) += 1;
        }

        let complex_detail = DetailAnalysis::from_node(node)
            .is_some_and(|analysis| analysis.complexity > COMPLEX_NODE_THRESHOLD);
        if complex_detail || node.content_type == ContentType::Complex {
            stats.content_analysis.complex_nodes += 1;
        }
    }

    stats
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
