//! Pipeline Scenario Tests
//!
//! End-to-end tests of `parse_markdown_to_tree` through the public API.
//!
//! ## Test Coverage
//! - Mindmap filtering of a chapter/section document
//! - Single-block documents (table, fenced code, empty input)
//! - JSON round trip of fully processed trees
//! - Idempotent content analysis
//! - Expansion ordering and the leaf/detail invariant

#[cfg(test)]
mod pipeline_scenarios_tests {
    use anyhow::Result;
    use mindtree_core::{
        detect_content_type, enhance_tree_with_content_analysis, parse_markdown_to_tree,
        validate_markdown, AnalysisOptions, ContentAnalysis, ContentType, Node, ParseOptions,
    };
    use serde_json::json;
    use tracing_subscriber::EnvFilter;

    const CHAPTER: &str =
        "# Chapter 1\nthis is crazy\n- Item 1\n- Item 2\n- Item 3\n\n## Section 1.1\nthis is crazy";

    const MIXED: &str = "# Guide\nIntro with a [link](https://example.com).\n\n## Install\n\
```sh\ncargo install mindtree\n```\n\n| OS | Supported |\n|----|-----------|\n| Linux | yes |\n\n\
## Usage\n- parse\n- filter\n- expand\n\n### Math\n$a^2 + b^2 = c^2$\n\n# Appendix\nplain";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }

    fn mindmap_options() -> ParseOptions {
        ParseOptions {
            filter_for_mindmap: true,
            ..Default::default()
        }
    }

    fn full_options() -> ParseOptions {
        ParseOptions {
            filter_for_mindmap: true,
            expand_complex_content: true,
            enable_content_analysis: true,
            include_analysis_metrics: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_chapter_document_filtered() -> Result<()> {
        init_tracing();
        let root = parse_markdown_to_tree(CHAPTER, &mindmap_options())?;

        assert_eq!(root.children.len(), 1);
        let chapter = &root.children[0];
        assert_eq!(chapter.text, "Chapter 1");
        assert_eq!(chapter.detail, "");
        assert_eq!(chapter.children.len(), 1);

        let section = &chapter.children[0];
        assert_eq!(section.text, "Section 1.1");
        assert_eq!(section.detail, "this is crazy");
        assert!(section.children.is_empty());
        Ok(())
    }

    #[test]
    fn test_single_table_line() -> Result<()> {
        init_tracing();
        let root = parse_markdown_to_tree("Name | Age | City", &ParseOptions::default())?;

        assert_eq!(root.children.len(), 1);
        let json = root.to_json()?;
        assert_eq!(json["children"][0]["type"], "table");
        assert_eq!(json["children"][0]["cells"], json!(["Name", "Age", "City"]));
        Ok(())
    }

    #[test]
    fn test_single_code_block() -> Result<()> {
        init_tracing();
        let root = parse_markdown_to_tree(
            "```javascript\nconsole.log('hi');\n```",
            &ParseOptions::default(),
        )?;

        assert_eq!(root.children.len(), 1);
        let json = root.to_json()?;
        let code = &json["children"][0];
        assert_eq!(code["type"], "code");
        assert_eq!(code["language"], "javascript");
        assert_eq!(code["content"], "console.log('hi');\n");
        Ok(())
    }

    #[test]
    fn test_empty_document_for_any_options() -> Result<()> {
        init_tracing();
        let variants = [
            ParseOptions::default(),
            mindmap_options(),
            full_options(),
            ParseOptions {
                include_types: Some(vec![ContentType::Header]),
                filter_for_mindmap: true,
                ..Default::default()
            },
        ];

        for options in &variants {
            let root = parse_markdown_to_tree("", options)?;
            assert!(root.children.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_empty_content_detection() {
        assert_eq!(detect_content_type("", None), ContentAnalysis::default());
        assert_eq!(
            detect_content_type("", None),
            ContentAnalysis::new(ContentType::Text, vec![])
        );
    }

    #[test]
    fn test_json_round_trip() -> Result<()> {
        init_tracing();
        for options in [ParseOptions::default(), full_options()] {
            let root = parse_markdown_to_tree(MIXED, &options)?;

            let restored = Node::from_json(root.to_json()?)?;
            assert_eq!(restored, root);

            let restored = Node::from_json_str(&root.to_json_string()?)?;
            assert_eq!(restored, root);
            assert!(restored.validate().is_ok());
        }
        Ok(())
    }

    #[test]
    fn test_filtering_reduces_node_count() -> Result<()> {
        init_tracing();
        for markdown in [CHAPTER, MIXED, "# A\nx"] {
            let raw = parse_markdown_to_tree(markdown, &ParseOptions::default())?;
            let filtered = parse_markdown_to_tree(markdown, &mindmap_options())?;
            assert!(filtered.count_nodes() < raw.count_nodes());
        }
        Ok(())
    }

    #[test]
    fn test_leaf_detail_invariant() -> Result<()> {
        init_tracing();
        for options in [mindmap_options(), full_options()] {
            let root = parse_markdown_to_tree(MIXED, &options)?;
            for (node, _) in root.descendants() {
                if !node.children.is_empty() {
                    assert_eq!(node.detail, "", "node '{}' has children and detail", node.text);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_expansion_orders_table_before_code() -> Result<()> {
        init_tracing();
        let options = ParseOptions {
            filter_for_mindmap: true,
            expand_complex_content: true,
            ..Default::default()
        };
        let root = parse_markdown_to_tree(
            "# Data\n```rust\nfn x() {}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |",
            &options,
        )?;

        let data = &root.children[0];
        let kinds: Vec<ContentType> = data.children.iter().map(|n| n.node_type).collect();
        assert_eq!(kinds, vec![ContentType::Table, ContentType::Code]);
        assert_eq!(data.detail, "");
        Ok(())
    }

    #[test]
    fn test_analysis_idempotent_with_cache() -> Result<()> {
        init_tracing();
        let mut root = parse_markdown_to_tree(MIXED, &mindmap_options())?;
        let options = AnalysisOptions::default();

        enhance_tree_with_content_analysis(&mut root, &options);
        let after_first = root.clone();

        let second = enhance_tree_with_content_analysis(&mut root, &options);
        assert_eq!(root, after_first);
        assert!(second.cache_hit_rate() > 0.0);
        Ok(())
    }

    #[test]
    fn test_validator_warnings() {
        assert!(validate_markdown("").is_empty());
        assert!(validate_markdown("# Fine\n```\ncode\n```").is_empty());
        assert_eq!(
            validate_markdown("####### Seven\n```\nopen"),
            vec![
                "Line 1: Header level 7 exceeds maximum of 6".to_string(),
                "Line 2: Unclosed code block".to_string(),
            ]
        );
    }
}
