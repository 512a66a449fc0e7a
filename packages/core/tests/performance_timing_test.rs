//! Performance Timing Tests
//!
//! Coarse timings for the soft targets of the pipeline. Durations are printed,
//! not asserted: debug builds on shared CI runners vary too much. Use
//! `cargo bench -p mindtree-core` for real measurements.
//!
//! Run with: `cargo test -p mindtree-core --test performance_timing_test -- --nocapture`

#[cfg(test)]
mod performance_timing_tests {
    use anyhow::Result;
    use mindtree_core::{
        calculate_content_complexity, detect_content_type, get_pipeline_stats,
        parse_markdown_to_tree, ContentType, ParseOptions,
    };
    use std::time::Instant;

    fn generate_sections(count: usize) -> String {
        let mut md = String::new();
        for i in 0..count {
            md.push_str(&format!("{} Section {}\n\n", "#".repeat(i % 3 + 1), i + 1));
            md.push_str("Some *prose* with `code`.\n\n");
            if i % 2 == 0 {
                md.push_str("| a | b |\n|---|---|\n| 1 | 2 |\n\n");
            } else {
                md.push_str("```js\nlet x = 1;\n```\n\n");
            }
        }
        md
    }

    #[test]
    fn test_pipeline_over_100_sections() -> Result<()> {
        let markdown = generate_sections(100);
        let options = ParseOptions {
            filter_for_mindmap: true,
            expand_complex_content: true,
            enable_content_analysis: true,
            ..Default::default()
        };

        let start = Instant::now();
        let root = parse_markdown_to_tree(markdown.as_str(), &options)?;
        let elapsed = start.elapsed();

        let stats = get_pipeline_stats(&root);
        println!(
            "Pipeline over 100 sections: {:?} ({} nodes, max depth {})",
            elapsed, stats.total_nodes, stats.structure.max_depth
        );

        assert!(stats.total_nodes > 100);
        Ok(())
    }

    #[test]
    fn test_large_table_analysis() {
        let mut table = String::from("| id | value |\n|----|-------|\n");
        for i in 0..100 {
            table.push_str(&format!("| {} | {} |\n", i, i * 3));
        }

        let start = Instant::now();
        let analysis = detect_content_type(&table, None);
        let complexity = calculate_content_complexity(Some(&analysis));
        let elapsed = start.elapsed();

        println!("100-row table analysis: {:?}", elapsed);
        assert_eq!(analysis.content_type, ContentType::Table);
        assert_eq!(analysis.elements.len(), 202);
        assert_eq!(complexity, 1.0);
    }

    #[test]
    fn test_repeated_classification() {
        let samples = ["plain", "- a\n- b", "`x`", "[l](u)", "$m$", "a | b"];

        let start = Instant::now();
        for i in 0..100 {
            detect_content_type(samples[i % samples.len()], None);
        }
        println!("100 classifications: {:?}", start.elapsed());
    }
}
