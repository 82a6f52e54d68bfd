//! Application-facing helpers around the engine.
//!
//! This module provides URL extraction from free text, reply formatting and
//! statistics printing used by the main application.

pub mod extract;
pub mod report;
pub mod statistics;

// Re-export public API
pub use extract::extract_urls;
pub use report::{format_entry, format_report};
pub use statistics::{print_batch_summary, print_error_statistics};
