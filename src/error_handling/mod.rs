//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (`InitializationError`, `FetchError`, `ResolveError`)
//! - Error categorization for statistics
//! - Processing statistics tracking (fetch errors and resolution events)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, categorize_status};
pub use stats::ProcessingStats;
pub use types::{ErrorType, FetchError, InfoType, InitializationError, ResolveError};
