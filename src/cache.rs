//! Session-lifetime resolution cache.

use std::collections::HashMap;
use std::sync::RwLock;

/// Maps an original URL (as first submitted) to its resolved URL.
///
/// Unbounded, no eviction; lives as long as the owning resolver. Concurrent
/// writers for the same key are allowed and the last write wins.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, String>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure lookup, no side effects on a miss.
    pub fn get(&self, original_url: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(original_url).cloned()
    }

    /// Stores (or overwrites) the resolution for `original_url`.
    pub fn insert(&self, original_url: impl Into<String>, resolved_url: impl Into<String>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(original_url.into(), resolved_url.into());
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_miss_then_hit() {
        let cache = ResolutionCache::new();
        assert_eq!(cache.get("http://bit.ly/a"), None);
        assert!(cache.is_empty());

        cache.insert("http://bit.ly/a", "https://dest.test/a");
        assert_eq!(
            cache.get("http://bit.ly/a").as_deref(),
            Some("https://dest.test/a")
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_does_not_insert() {
        let cache = ResolutionCache::new();
        let _ = cache.get("http://bit.ly/a");
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_last_writer_wins() {
        let cache = ResolutionCache::new();
        cache.insert("k", "first");
        cache.insert("k", "second");
        assert_eq!(cache.get("k").as_deref(), Some("second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = Arc::new(ResolutionCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        cache.insert(format!("url-{j}"), format!("dest-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer panicked");
        }
        assert_eq!(cache.len(), 50);
        let value = cache.get("url-0").expect("key written");
        assert!(value.starts_with("dest-"));
    }
}
