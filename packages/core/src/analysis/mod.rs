//! Content Analysis
//!
//! Pure, stateless classification of content strings:
//!
//! - `detector` - priority-ordered content-type detection
//! - `extractor` - type-specific element extraction
//! - `complexity` - complexity scoring and leaf expansion verdicts

mod complexity;
mod detector;
pub mod extractor;

pub use complexity::{
    analyze_leaf_for_expansion, calculate_content_complexity, ExpansionReason, LeafAnalysis,
    DEFAULT_COMPLEXITY_THRESHOLD,
};
pub use detector::{classify, detect_content_type};
pub use extractor::{extract_elements, ExtractInput, TableData};
