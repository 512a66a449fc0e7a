//! Content-Type Detector
//!
//! Classifies a content string into one coarse [`ContentType`] and extracts
//! its elements.
//!
//! # Priority table
//!
//! The first rule that matches wins. The order is fixed and covered by a
//! pairwise golden test matrix in `detector_test.rs`.
//!
//! | # | type    | rule                                                             |
//! |---|---------|------------------------------------------------------------------|
//! | 1 | table   | a line outside fences splits on `\|` into at least two cells     |
//! | 2 | list    | at least two `-`/`*`/`+`/`N.` lines outside fences               |
//! | 3 | code    | a fence line                                                     |
//! | 4 | complex | two or more distinct inline marker kinds                          |
//! | 5 | code    | a single inline back-tick span kind                              |
//! | 6 | image   | `![alt](src)`                                                    |
//! | 7 | link    | `[text](url)`                                                    |
//! | 8 | math    | `$...$` / `$$...$$`                                              |
//! | 9 | text    | fallback                                                         |
//!
//! Inline marker kinds counted by rule 4: inline code, image, link, math,
//! bold, italic, strikethrough.
//!
//! Complex is checked before the single-kind rules 5-8. Checked after them,
//! any string holding inline code or a link could never be complex, so
//! mixed prose like ``Run `x` then see [docs](u)`` would classify as code.

use crate::analysis::extractor::{
    extract_code_block, extract_elements, link_matches, IMAGE_RE, INLINE_CODE_RE, MATH_RE,
};
use crate::models::{ContentAnalysis, ContentType};
use crate::utils::markdown::{is_table_line, parse_fence, parse_list_line, FenceLine};
use regex::Regex;
use std::sync::LazyLock;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*[^*\n]+\*\*|__[^_\n]+__").unwrap());

/// Single-star emphasis; bold runs are removed before matching
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*[^*\s][^*\n]*\*|\b_[^_\s][^_\n]*_\b").unwrap());

static STRIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~[^~\n]+~~").unwrap());

/// Classify `content` and extract its elements
///
/// A `hint` short-circuits the priority table and extracts directly for
/// that type. Blank content is plain text with no elements.
///
/// # Examples
///
/// ```rust
/// use mindtree_core::analysis::detect_content_type;
/// use mindtree_core::models::ContentType;
///
/// let analysis = detect_content_type("Name | Age | City", None);
/// assert_eq!(analysis.content_type, ContentType::Table);
/// assert_eq!(analysis.elements.len(), 3);
///
/// assert_eq!(detect_content_type("", None), Default::default());
/// ```
pub fn detect_content_type(content: &str, hint: Option<ContentType>) -> ContentAnalysis {
    if content.trim().is_empty() {
        return ContentAnalysis::default();
    }

    if let Some(hint) = hint {
        return ContentAnalysis::new(hint, extract_elements(content, hint));
    }

    let content_type = classify(content);
    let elements = match content_type {
        ContentType::Code => vec![extract_code_block(content, None)],
        other => extract_elements(content, other),
    };

    ContentAnalysis::new(content_type, elements)
}

/// Apply the priority table without extracting
pub fn classify(content: &str) -> ContentType {
    if content.trim().is_empty() {
        return ContentType::Text;
    }

    let prose = prose_lines(content);

    if prose.iter().any(|line| is_table_line(line)) {
        return ContentType::Table;
    }

    if prose.iter().filter(|line| parse_list_line(line).is_some()).count() >= 2 {
        return ContentType::List;
    }

    if content.lines().any(|line| parse_fence(line).is_some()) {
        return ContentType::Code;
    }

    let markers = InlineMarkers::scan(content);
    if markers.distinct_kinds() >= 2 {
        return ContentType::Complex;
    }

    if markers.inline_code {
        ContentType::Code
    } else if markers.image {
        ContentType::Image
    } else if markers.link {
        ContentType::Link
    } else if markers.math {
        ContentType::Math
    } else {
        ContentType::Text
    }
}

/// Lines that are not inside a fenced block (fence lines excluded)
fn prose_lines(content: &str) -> Vec<&str> {
    let mut prose = Vec::new();
    let mut open_fence: Option<FenceLine> = None;

    for line in content.lines() {
        match &open_fence {
            Some(fence) => {
                if fence.is_closed_by(line) {
                    open_fence = None;
                }
            }
            None => match parse_fence(line) {
                Some(fence) => open_fence = Some(fence),
                None => prose.push(line),
            },
        }
    }

    prose
}

/// Which inline marker kinds appear in a string
#[derive(Debug, Default, Clone, Copy)]
struct InlineMarkers {
    inline_code: bool,
    image: bool,
    link: bool,
    math: bool,
    bold: bool,
    italic: bool,
    strike: bool,
}

impl InlineMarkers {
    fn scan(content: &str) -> Self {
        // Spans are stripped as they are recognised so the delimiters of one
        // kind cannot be mistaken for another (`**` for two `*`, `![..](..)`
        // for a link)
        let without_code = INLINE_CODE_RE.replace_all(content, " ");
        let without_images = IMAGE_RE.replace_all(&without_code, " ");
        let without_bold = BOLD_RE.replace_all(&without_images, " ");

        Self {
            inline_code: INLINE_CODE_RE.is_match(content),
            image: IMAGE_RE.is_match(&without_code),
            link: !link_matches(&without_images).is_empty(),
            math: MATH_RE.is_match(&without_code),
            bold: BOLD_RE.is_match(&without_images),
            italic: ITALIC_RE.is_match(&without_bold),
            strike: STRIKE_RE.is_match(&without_code),
        }
    }

    fn distinct_kinds(&self) -> usize {
        [
            self.inline_code,
            self.image,
            self.link,
            self.math,
            self.bold,
            self.italic,
            self.strike,
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod detector_test;
