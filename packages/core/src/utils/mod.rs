//! Utility functions for Mindtree Core
//!
//! Line-level markdown patterns shared across the pipeline and the
//! advisory validator.

pub mod markdown;
mod validator;

pub use validator::validate_markdown;
