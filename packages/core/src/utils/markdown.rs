//! Markdown line patterns shared by the tree builder, detector and expander
//!
//! Every block-level decision in this crate is line based. The patterns here
//! are compiled once and the helpers never fail: lines that do not match
//! simply return `None` / empty results.

use crate::models::ListType;
use regex::Regex;
use std::sync::LazyLock;

/// ATX header: 1-6 `#`, whitespace, text, optional closing `#` run
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ ]{0,3}(#{1,6})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").unwrap()
});

/// Fence opener/closer: ``` or ~~~ (3+), optional info string
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ ]{0,3}(`{3,}|~{3,})[ \t]*([^`\s]*)").unwrap());

/// Bullet (`-`, `*`, `+`) or numbered (`N.`) list line
static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)([-*+]|\d+\.)[ \t]+(.*)$").unwrap());

/// Table separator cell: `---`, `:---`, `---:`, `:---:`
static SEPARATOR_CELL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^:?-+:?$").unwrap());

/// A parsed ATX header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    pub level: u8,
    pub text: String,
}

/// A parsed fence line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceLine {
    pub marker: char,
    pub length: usize,
    pub info: Option<String>,
}

impl FenceLine {
    /// Whether `line` closes a block opened by this fence
    pub fn is_closed_by(&self, line: &str) -> bool {
        match parse_fence(line) {
            Some(close) => {
                close.marker == self.marker && close.length >= self.length && close.info.is_none()
            }
            None => false,
        }
    }
}

/// A parsed list line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    pub indent: usize,
    pub list_type: ListType,
    pub content: String,
}

pub fn parse_header(line: &str) -> Option<HeaderLine> {
    let caps = HEADER_RE.captures(line)?;
    let text = caps.get(2).map_or("", |m| m.as_str()).trim();
    if text.is_empty() {
        return None;
    }
    Some(HeaderLine {
        level: caps[1].len() as u8,
        text: text.to_string(),
    })
}

pub fn parse_fence(line: &str) -> Option<FenceLine> {
    let caps = FENCE_RE.captures(line)?;
    let marker_run = &caps[1];
    let info = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Some(FenceLine {
        marker: marker_run.chars().next().unwrap_or('`'),
        length: marker_run.len(),
        info,
    })
}

pub fn parse_list_line(line: &str) -> Option<ListLine> {
    let caps = LIST_RE.captures(line)?;
    let list_type = if caps[2].ends_with('.') {
        ListType::Ordered
    } else {
        ListType::Unordered
    };
    Some(ListLine {
        indent: indent_width(&caps[1]),
        list_type,
        content: caps[3].trim_end().to_string(),
    })
}

/// Width of leading whitespace, a tab counting as 4 columns
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Split a pipe-delimited row into trimmed cells
///
/// Leading and trailing pipes do not produce empty edge cells. Lines without
/// a pipe yield no cells.
pub fn split_table_row(line: &str) -> Vec<String> {
    if !line.contains('|') {
        return Vec::new();
    }
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Whether the line is a table row with at least two cells
pub fn is_table_line(line: &str) -> bool {
    split_table_row(line).len() >= 2
}

/// Whether the line is a `| --- | :---: |` separator row
pub fn is_separator_row(line: &str) -> bool {
    let cells = split_table_row(line);
    !cells.is_empty() && cells.iter().all(|c| SEPARATOR_CELL_RE.is_match(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("## Section 1.1"),
            Some(HeaderLine {
                level: 2,
                text: "Section 1.1".to_string()
            })
        );
        assert_eq!(parse_header("# Title ##").unwrap().text, "Title");
        assert_eq!(parse_header("# C#").unwrap().text, "C#");
        assert!(parse_header("####### Too deep").is_none());
        assert!(parse_header("#hashtag").is_none());
        assert!(parse_header("#").is_none());
    }

    #[test]
    fn test_parse_fence() {
        let fence = parse_fence("```javascript").unwrap();
        assert_eq!(fence.marker, '`');
        assert_eq!(fence.length, 3);
        assert_eq!(fence.info.as_deref(), Some("javascript"));

        let bare = parse_fence("~~~~").unwrap();
        assert_eq!(bare.marker, '~');
        assert!(bare.info.is_none());

        assert!(parse_fence("``inline``").is_none());
    }

    #[test]
    fn test_fence_closing_rules() {
        let open = parse_fence("````md").unwrap();
        assert!(!open.is_closed_by("```"));
        assert!(open.is_closed_by("````"));
        assert!(open.is_closed_by("`````"));
        assert!(!open.is_closed_by("~~~~"));
    }

    #[test]
    fn test_parse_list_line() {
        let item = parse_list_line("  - nested item").unwrap();
        assert_eq!(item.indent, 2);
        assert_eq!(item.list_type, ListType::Unordered);
        assert_eq!(item.content, "nested item");

        let numbered = parse_list_line("12. twelfth").unwrap();
        assert_eq!(numbered.list_type, ListType::Ordered);
        assert_eq!(numbered.content, "twelfth");

        assert_eq!(parse_list_line("\t* tabbed").unwrap().indent, 4);
        assert!(parse_list_line("-not a list").is_none());
        assert!(parse_list_line("plain").is_none());
    }

    #[test]
    fn test_split_table_row() {
        assert_eq!(split_table_row("Name | Age | City"), vec!["Name", "Age", "City"]);
        assert_eq!(split_table_row("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_table_row("| a |"), vec!["a"]);
        assert!(split_table_row("no pipes").is_empty());
        assert!(is_table_line("a|b"));
        assert!(!is_table_line("| lonely |"));
    }

    #[test]
    fn test_separator_row() {
        assert!(is_separator_row("|---|:---:|"));
        assert!(is_separator_row("--- | ---"));
        assert!(!is_separator_row("| a | --- |"));
        assert!(!is_separator_row("---"));
    }
}
