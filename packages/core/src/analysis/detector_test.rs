//! Tests for the content-type detector, including the pairwise priority matrix

#[cfg(test)]
mod tests {
    use crate::analysis::detector::{classify, detect_content_type};
    use crate::models::{ContentAnalysis, ContentType, Element};

    /// One representative sample per priority rule
    const SAMPLES: [(&str, &str); 8] = [
        ("table", "a | b"),
        ("list", "- x\n- y"),
        ("fence", "```\ncode\n```"),
        ("inline-code", "`c`"),
        ("image", "![alt](i.png)"),
        ("link", "[k](https://k.io)"),
        ("math", "$x^2$"),
        ("text", "plain words"),
    ];

    fn sample_type(name: &str) -> ContentType {
        match name {
            "table" => ContentType::Table,
            "list" => ContentType::List,
            "fence" | "inline-code" => ContentType::Code,
            "image" => ContentType::Image,
            "link" => ContentType::Link,
            "math" => ContentType::Math,
            _ => ContentType::Text,
        }
    }

    fn block_rank(name: &str) -> Option<usize> {
        match name {
            "table" => Some(1),
            "list" => Some(2),
            "fence" => Some(3),
            _ => None,
        }
    }

    /// Expected winner when two samples share one content string
    fn expected_pair(a: &str, b: &str) -> ContentType {
        if a == b {
            return sample_type(a);
        }
        match (block_rank(a), block_rank(b)) {
            (Some(ra), Some(rb)) => sample_type(if ra < rb { a } else { b }),
            (Some(_), None) => sample_type(a),
            (None, Some(_)) => sample_type(b),
            (None, None) if a == "text" => sample_type(b),
            (None, None) if b == "text" => sample_type(a),
            (None, None) => ContentType::Complex,
        }
    }

    #[test]
    fn test_pairwise_priority_matrix() {
        for (a, sample_a) in SAMPLES {
            for (b, sample_b) in SAMPLES {
                let content = format!("{}\n{}", sample_a, sample_b);
                assert_eq!(
                    classify(&content),
                    expected_pair(a, b),
                    "{} + {} => {:?}",
                    a,
                    b,
                    content
                );
            }
        }
    }

    #[test]
    fn test_each_sample_alone() {
        for (name, sample) in SAMPLES {
            assert_eq!(classify(sample), sample_type(name), "{}", name);
        }
    }

    #[test]
    fn test_empty_content_is_text_without_elements() {
        assert_eq!(detect_content_type("", None), ContentAnalysis::default());
        assert_eq!(
            detect_content_type("  \n\t", None),
            ContentAnalysis::new(ContentType::Text, vec![])
        );
    }

    #[test]
    fn test_table_without_separator() {
        let analysis = detect_content_type("Name | Age | City", None);

        assert_eq!(analysis.content_type, ContentType::Table);
        let cells: Vec<&str> = analysis
            .elements
            .iter()
            .map(|e| match e {
                Element::Cell { content, .. } => content.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(cells, vec!["Name", "Age", "City"]);
    }

    #[test]
    fn test_single_bullet_is_not_a_list() {
        assert_eq!(classify("- only one"), ContentType::Text);
        assert_eq!(classify("- one\n- two"), ContentType::List);
        assert_eq!(classify("1. one\n2. two"), ContentType::List);
    }

    #[test]
    fn test_pipes_inside_fences_do_not_make_a_table() {
        let md = "```sh\ncat file | grep x\n```";
        assert_eq!(classify(md), ContentType::Code);
    }

    #[test]
    fn test_lines_after_a_closed_fence_count_again() {
        assert_eq!(classify("~~~\n- a\n- b\n~~~"), ContentType::Code);
        assert_eq!(classify("~~~\nx\n~~~\nName | Age"), ContentType::Table);
        assert_eq!(classify("````\n```\n- a\n````\n- b\n- c"), ContentType::List);
    }

    #[test]
    fn test_hint_short_circuits() {
        let analysis = detect_content_type("a | b", Some(ContentType::Code));

        assert_eq!(analysis.content_type, ContentType::Code);
        assert_eq!(
            analysis.elements,
            vec![Element::CodeBlock {
                content: "a | b".to_string(),
                language: None
            }]
        );
    }

    #[test]
    fn test_fenced_code_carries_language() {
        let analysis = detect_content_type("```rust\nfn main() {}\n```", None);

        assert_eq!(analysis.content_type, ContentType::Code);
        assert_eq!(
            analysis.elements,
            vec![Element::CodeBlock {
                content: "fn main() {}\n".to_string(),
                language: Some("rust".to_string())
            }]
        );
    }

    #[test]
    fn test_mixed_inline_markers_are_complex() {
        let analysis = detect_content_type("**Bold** with `code` and [a link](https://a.io)", None);

        assert_eq!(analysis.content_type, ContentType::Complex);
        let kinds: Vec<&str> = analysis.elements.iter().map(Element::kind).collect();
        assert_eq!(kinds, vec!["bold", "inline-code", "link"]);
    }

    #[test]
    fn test_bold_and_italic_are_complex() {
        assert_eq!(classify("**bold** and *italic*"), ContentType::Complex);
        assert_eq!(classify("**bold** only"), ContentType::Text);
        assert_eq!(classify("snake_case_name here"), ContentType::Text);
    }

    #[test]
    fn test_image_is_not_counted_as_link() {
        assert_eq!(classify("![a](1.png) and ![b](2.png)"), ContentType::Image);
    }

    #[test]
    fn test_repeated_classification_is_deterministic() {
        let md = "| a | b |\n|---|---|\n| 1 | 2 |";
        let first = detect_content_type(md, None);
        for _ in 0..100 {
            assert_eq!(detect_content_type(md, None), first);
        }
    }
}
