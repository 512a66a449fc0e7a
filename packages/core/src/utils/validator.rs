//! Advisory markdown linter
//!
//! Reports unclosed code fences and header marker runs deeper than six.
//! Never fails; the result is a list of human-readable warnings.
//!
//! The fence check is a naive toggle: a line starting with three backticks
//! or three tildes opens a block, and the next line starting with the same
//! three characters closes it, whatever its info string or marker length. A
//! fence containing a nested ```` ``` ```` line (for example inside a
//! ```` ```` ```` block) is therefore reported as unclosed. Existing
//! consumers compare warning output verbatim, so the toggle stays.

/// Maximum ATX header depth
const MAX_HEADER_LEVEL: usize = 6;

const FENCE_MARKERS: [&str; 2] = ["```", "~~~"];

/// Lint `markdown` and return 1-indexed warnings
///
/// # Examples
///
/// ```rust
/// use mindtree_core::utils::validate_markdown;
///
/// let warnings = validate_markdown("```rust\nfn main() {}\n");
/// assert_eq!(warnings, vec!["Line 1: Unclosed code block".to_string()]);
///
/// assert!(validate_markdown("# Fine\n\ntext").is_empty());
/// ```
pub fn validate_markdown(markdown: &str) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut open_fence: Option<&str> = None;
    let mut open_line = 0;

    for (idx, line) in markdown.lines().enumerate() {
        let line_number = idx + 1;
        let trimmed = line.trim_start();

        match open_fence {
            Some(marker) => {
                if trimmed.starts_with(marker) {
                    open_fence = None;
                }
                continue;
            }
            None => {
                let opened = FENCE_MARKERS
                    .iter()
                    .copied()
                    .find(|m| trimmed.starts_with(*m));
                if let Some(marker) = opened {
                    open_fence = Some(marker);
                    open_line = line_number;
                    continue;
                }
            }
        }

        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        if hashes > MAX_HEADER_LEVEL {
            warnings.push(format!(
                "Line {}: Header level {} exceeds maximum of {}",
                line_number, hashes, MAX_HEADER_LEVEL
            ));
        }
    }

    if open_fence.is_some() {
        warnings.push(format!("Line {}: Unclosed code block", open_line));
    }

    if !warnings.is_empty() {
        tracing::debug!("Markdown validation produced {} warning(s)", warnings.len());
    }

    warnings
}
