//! Rendering batch results as reply text.

use crate::engine::{BatchEntry, Outcome};

/// Renders one entry.
pub fn format_entry(entry: &BatchEntry) -> String {
    match &entry.outcome {
        Outcome::Failed(_) => format!("❌ Failed to bypass: {}", entry.original),
        Outcome::Resolved(resolved) if *resolved == entry.original => {
            format!("ℹ️ Already bypassed or not a shortener: {}", entry.original)
        }
        Outcome::Resolved(resolved) => format!("🔗 {}\n✅ {}", entry.original, resolved),
    }
}

/// Renders a batch, one blank line between entries. Empty batches render as "".
pub fn format_report(entries: &[BatchEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}
