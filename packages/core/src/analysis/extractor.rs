//! Element Extractor
//!
//! Type-specific structured extraction: table cells, list items, the code
//! block, image/link/formula references, inline fragments of mixed content.
//!
//! Extraction never fails. Empty input yields no elements and content that
//! does not fit the requested type yields whatever matches (possibly none).

use crate::models::{ContentType, Element};
use crate::utils::markdown::{is_separator_row, parse_fence, parse_list_line, split_table_row};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;
use std::sync::LazyLock;

/// `![alt](src "title")`
pub(crate) static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(([^)\s]*)(?:\s+"[^"]*")?\)"#).unwrap()
});

/// `[text](url "title")`; image matches are filtered out by the caller
pub(crate) static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([^\]]+)\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).unwrap()
});

/// `$$display$$` or `$inline$`
pub(crate) static MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$([^$]+)\$\$|\$([^$\n]+)\$").unwrap());

/// `` `code` ``
pub(crate) static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Content handed to the extractor: a raw string or pre-split lines
#[derive(Debug, Clone)]
pub enum ExtractInput<'a> {
    Text(&'a str),
    Lines(Vec<&'a str>),
}

impl<'a> ExtractInput<'a> {
    fn lines(&self) -> Vec<&'a str> {
        match self {
            ExtractInput::Text(text) => text.lines().collect(),
            ExtractInput::Lines(lines) => lines.clone(),
        }
    }

    fn joined(&self) -> String {
        match self {
            ExtractInput::Text(text) => (*text).to_string(),
            ExtractInput::Lines(lines) => lines.join("\n"),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            ExtractInput::Text(text) => text.trim().is_empty(),
            ExtractInput::Lines(lines) => lines.iter().all(|l| l.trim().is_empty()),
        }
    }
}

impl<'a> From<&'a str> for ExtractInput<'a> {
    fn from(text: &'a str) -> Self {
        ExtractInput::Text(text)
    }
}

impl<'a> From<&'a String> for ExtractInput<'a> {
    fn from(text: &'a String) -> Self {
        ExtractInput::Text(text.as_str())
    }
}

impl<'a> From<&'a [&'a str]> for ExtractInput<'a> {
    fn from(lines: &'a [&'a str]) -> Self {
        ExtractInput::Lines(lines.to_vec())
    }
}

impl<'a> From<&'a [String]> for ExtractInput<'a> {
    fn from(lines: &'a [String]) -> Self {
        ExtractInput::Lines(lines.iter().map(String::as_str).collect())
    }
}

/// Header row, data rows and row-major cells of a pipe table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub cells: Vec<String>,
}

/// Extract typed elements from `content` according to `content_type`
///
/// # Examples
///
/// ```rust
/// use mindtree_core::analysis::extract_elements;
/// use mindtree_core::models::{ContentType, Element};
///
/// let cells = extract_elements("a | b", ContentType::Table);
/// assert_eq!(
///     cells[1],
///     Element::Cell { content: "b".to_string(), index: 1 }
/// );
/// ```
pub fn extract_elements<'a>(
    content: impl Into<ExtractInput<'a>>,
    content_type: ContentType,
) -> Vec<Element> {
    let input = content.into();
    if input.is_blank() {
        return Vec::new();
    }

    match content_type {
        ContentType::Table => extract_table_cells(&input.lines()),
        ContentType::List => extract_list_items(&input.lines()),
        ContentType::Code => vec![extract_code_block(&input.joined(), None)],
        ContentType::Image => extract_images(&input.joined()),
        ContentType::Link => extract_links(&input.joined()),
        ContentType::Math => extract_formulas(&input.joined()),
        ContentType::Complex => extract_inline_fragments(&input.joined()),
        _ => vec![text_element(&input.joined())],
    }
}

/// One `Cell` per pipe-delimited field, row-major; separator rows skipped
pub fn extract_table_cells(lines: &[&str]) -> Vec<Element> {
    parse_table(lines)
        .cells
        .into_iter()
        .enumerate()
        .map(|(index, content)| Element::Cell { content, index })
        .collect()
}

/// Split table lines into header row, data rows and cells
///
/// Lines without a pipe and separator rows are skipped; a malformed row is
/// still split on its delimiter.
pub fn parse_table(lines: &[&str]) -> TableData {
    let mut table = TableData::default();

    for line in lines {
        if !line.contains('|') || is_separator_row(line) {
            continue;
        }
        let row = split_table_row(line);
        table.cells.extend(row.iter().cloned());
        if table.headers.is_empty() {
            table.headers = row;
        } else {
            table.rows.push(row);
        }
    }

    table
}

/// One `ListItem` per bullet or numbered line
pub fn extract_list_items(lines: &[&str]) -> Vec<Element> {
    lines
        .iter()
        .filter_map(|line| parse_list_line(line))
        .enumerate()
        .map(|(index, item)| Element::ListItem {
            content: item.content,
            indent: item.indent,
            index,
        })
        .collect()
}

/// Exactly one `CodeBlock`
///
/// A fenced block yields its inner lines (each terminated by `\n`) and the
/// fence's info string as language. Unfenced content with an inline span
/// yields the span's text. `language_hint` wins over the info string.
pub fn extract_code_block(content: &str, language_hint: Option<&str>) -> Element {
    let lines: Vec<&str> = content.lines().collect();
    let fence_start = lines.iter().position(|l| parse_fence(l).is_some());

    let (body, fence_language) = match fence_start {
        Some(start) => {
            let mut body = String::new();
            let mut language = None;
            if let Some(fence) = parse_fence(lines[start]) {
                language = fence.info.clone();
                for line in &lines[start + 1..] {
                    if fence.is_closed_by(line) {
                        break;
                    }
                    body.push_str(line);
                    body.push('\n');
                }
            }
            (body, language)
        }
        None => {
            let body = INLINE_CODE_RE
                .captures(content)
                .and_then(|caps| caps.get(1))
                .map_or_else(|| content.to_string(), |m| m.as_str().to_string());
            (body, None)
        }
    };

    Element::CodeBlock {
        content: body,
        language: language_hint.map(str::to_string).or(fence_language),
    }
}

/// One `Image` per `![alt](src)` match
pub fn extract_images(content: &str) -> Vec<Element> {
    IMAGE_RE
        .captures_iter(content)
        .enumerate()
        .map(|(index, caps)| Element::Image {
            alt: caps[1].to_string(),
            src: caps[2].to_string(),
            index,
        })
        .collect()
}

/// One `Link` per `[text](url)` match that is not an image
pub fn extract_links(content: &str) -> Vec<Element> {
    link_matches(content)
        .into_iter()
        .enumerate()
        .map(|(index, (text, url))| Element::Link { text, url, index })
        .collect()
}

/// `(text, url)` pairs of non-image links in document order
pub(crate) fn link_matches(content: &str) -> Vec<(String, String)> {
    LINK_RE
        .captures_iter(content)
        .filter(|caps| {
            let start = caps.get(0).map_or(0, |m| m.start());
            start == 0 || content.as_bytes()[start - 1] != b'!'
        })
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// One `Formula` per `$...$` / `$$...$$` match, delimiters stripped
pub fn extract_formulas(content: &str) -> Vec<Element> {
    MATH_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .enumerate()
        .map(|(index, m)| Element::Formula {
            content: m.as_str().trim().to_string(),
            index,
        })
        .collect()
}

/// Bold, inline-code and link spans of mixed content, in document order
///
/// Falls back to a single text element when no span is found.
pub fn extract_inline_fragments(content: &str) -> Vec<Element> {
    enum Frame {
        Strong { start: usize, text: String },
        Link { start: usize, url: String, text: String },
    }

    // (source offset, element) pairs; nested spans finish before their
    // parents, so order is restored by offset at the end
    let mut found: Vec<(usize, Element)> = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();

    for (event, range) in Parser::new(content).into_offset_iter() {
        match event {
            Event::Start(Tag::Strong) => frames.push(Frame::Strong {
                start: range.start,
                text: String::new(),
            }),
            Event::Start(Tag::Link { dest_url, .. }) => frames.push(Frame::Link {
                start: range.start,
                url: dest_url.to_string(),
                text: String::new(),
            }),
            Event::Text(text) => append_to_frames(&mut frames, &text),
            Event::Code(code) => {
                append_to_frames(&mut frames, &code);
                found.push((
                    range.start,
                    Element::InlineCode {
                        content: code.to_string(),
                        index: 0,
                    },
                ));
            }
            Event::End(TagEnd::Strong) => {
                if let Some(Frame::Strong { start, text }) = frames.pop() {
                    found.push((
                        start,
                        Element::Bold {
                            content: text,
                            index: 0,
                        },
                    ));
                }
            }
            Event::End(TagEnd::Link) => {
                if let Some(Frame::Link { start, url, text }) = frames.pop() {
                    found.push((start, Element::Link { text, url, index: 0 }));
                }
            }
            _ => {}
        }
    }

    fn append_to_frames(frames: &mut [Frame], text: &str) {
        for frame in frames.iter_mut() {
            match frame {
                Frame::Strong { text: buf, .. } | Frame::Link { text: buf, .. } => {
                    buf.push_str(text)
                }
            }
        }
    }

    if found.is_empty() {
        return vec![text_element(content)];
    }

    found.sort_by_key(|(start, _)| *start);
    found
        .into_iter()
        .enumerate()
        .map(|(i, (_, element))| match element {
            Element::Bold { content, .. } => Element::Bold { content, index: i },
            Element::InlineCode { content, .. } => Element::InlineCode { content, index: i },
            Element::Link { text, url, .. } => Element::Link { text, url, index: i },
            other => other,
        })
        .collect()
}

/// Fallback element for plain text
pub fn text_element(content: &str) -> Element {
    Element::Text {
        content: content.to_string(),
        length: content.chars().count(),
    }
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod extractor_test;
