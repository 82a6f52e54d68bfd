//! Batch resolution.

use futures::future::join_all;
use log::{error, warn};
use serde::Serialize;

use super::Resolver;

/// Result of resolving one batch input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Final destination (may equal the input).
    Resolved(String),
    /// Why the input could not be resolved at all.
    Failed(String),
}

/// One input URL and what became of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub original: String,
    pub outcome: Outcome,
}

impl BatchEntry {
    /// Resolved URL, if resolution succeeded.
    pub fn resolved(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Resolved(url) => Some(url),
            Outcome::Failed(_) => None,
        }
    }

    /// True when the input resolved to itself.
    pub fn is_direct(&self) -> bool {
        self.resolved() == Some(self.original.as_str())
    }
}

impl Resolver {
    /// Resolves every URL concurrently, bounded by the admission gate.
    ///
    /// Results come back in input order. A failing or panicking resolution
    /// only marks its own entry as [`Outcome::Failed`]. Duplicate inputs are
    /// resolved independently.
    pub async fn resolve_batch<I, S>(&self, urls: I) -> Vec<BatchEntry>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (originals, tasks): (Vec<String>, Vec<_>) = urls
            .into_iter()
            .map(|url| {
                let url: String = url.into();
                let resolver = self.clone();
                let target = url.clone();
                let task = tokio::spawn(async move { resolver.resolve(&target).await });
                (url, task)
            })
            .unzip();

        let results = join_all(tasks).await;

        originals
            .into_iter()
            .zip(results)
            .map(|(original, joined)| {
                let outcome = match joined {
                    Ok(Ok(resolved)) => Outcome::Resolved(resolved),
                    Ok(Err(e)) => {
                        warn!("Could not resolve {}: {}", original, e);
                        Outcome::Failed(e.to_string())
                    }
                    Err(e) => {
                        error!("Resolution task for {} failed: {}", original, e);
                        Outcome::Failed(format!("resolution task failed: {e}"))
                    }
                };
                BatchEntry { original, outcome }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_direct() {
        let direct = BatchEntry {
            original: "https://a.test/".into(),
            outcome: Outcome::Resolved("https://a.test/".into()),
        };
        let resolved = BatchEntry {
            original: "https://bit.ly/x".into(),
            outcome: Outcome::Resolved("https://a.test/".into()),
        };
        let failed = BatchEntry {
            original: "nope".into(),
            outcome: Outcome::Failed("invalid".into()),
        };
        assert!(direct.is_direct());
        assert!(!resolved.is_direct());
        assert!(!failed.is_direct());
        assert_eq!(failed.resolved(), None);
    }

    #[test]
    fn test_entry_serializes() {
        let entry = BatchEntry {
            original: "https://bit.ly/x".into(),
            outcome: Outcome::Resolved("https://a.test/".into()),
        };
        let json = serde_json::to_value(&entry).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "original": "https://bit.ly/x",
                "outcome": { "resolved": "https://a.test/" }
            })
        );
    }
}
