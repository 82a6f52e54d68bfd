//! Domain membership sets.
//!
//! Backs both the shortener registry and the list of hosts that need browser
//! automation. Matching is a pure function of the configured entries and the
//! URL's host; nothing here touches the network.

use std::collections::HashSet;

/// A read-only set of domain entries.
///
/// A host matches an entry when it equals the entry or is a subdomain of it, so
/// `bit.ly` matches `bit.ly` and `www.bit.ly` but not `notbit.ly`. Entries and
/// hosts are compared case-insensitively, and a leading `www.` or dot on an
/// entry is ignored.
#[derive(Debug, Clone, Default)]
pub struct DomainSet {
    entries: HashSet<String>,
}

impl DomainSet {
    /// Builds a set from configured entries, dropping blanks.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|entry| normalize_entry(entry.as_ref()))
            .collect();
        Self { entries }
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tests a bare host name (no scheme, port or path).
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }
        // Walk the host's suffixes at label boundaries: a.b.c -> b.c -> c
        let mut candidate = host.as_str();
        loop {
            if self.entries.contains(candidate) {
                return true;
            }
            match candidate.split_once('.') {
                Some((_, rest)) => candidate = rest,
                None => return false,
            }
        }
    }

    /// Tests a URL by its host. Unparseable URLs never match.
    pub fn matches_url(&self, url: &str) -> bool {
        host_of(url).is_some_and(|host| self.matches_host(&host))
    }

    /// Entries in sorted order, for display.
    pub fn sorted_entries(&self) -> Vec<&str> {
        let mut entries: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        entries.sort_unstable();
        entries
    }
}

/// Extracts the host of an absolute URL.
pub fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

fn normalize_entry(entry: &str) -> Option<String> {
    let entry = entry.trim().trim_start_matches('.').to_ascii_lowercase();
    let entry = entry.strip_prefix("www.").unwrap_or(&entry);
    if entry.is_empty() {
        None
    } else {
        Some(entry.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shorteners() -> DomainSet {
        DomainSet::new(["bit.ly", "t.co", "www.TinyURL.com", " ", ".ouo.io"])
    }

    #[test]
    fn test_blank_entries_dropped() {
        assert_eq!(shorteners().len(), 4);
        assert!(DomainSet::new(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_exact_and_subdomain_match() {
        let set = shorteners();
        assert!(set.matches_host("bit.ly"));
        assert!(set.matches_host("www.bit.ly"));
        assert!(set.matches_host("BIT.LY"));
        assert!(set.matches_host("tinyurl.com"));
        assert!(set.matches_host("ouo.io"));
        assert!(set.matches_host("bit.ly."));
    }

    #[test]
    fn test_no_partial_label_match() {
        let set = shorteners();
        assert!(!set.matches_host("notbit.ly"));
        assert!(!set.matches_host("bit.ly.evil.test"));
        assert!(!set.matches_host("ly"));
        assert!(!set.matches_host(""));
    }

    #[test]
    fn test_matches_url() {
        let set = shorteners();
        assert!(set.matches_url("http://bit.ly/abc"));
        assert!(set.matches_url("https://t.co:443/x?y=1"));
        assert!(!set.matches_url("https://example.com/bit.ly"));
        assert!(!set.matches_url("not a url"));
    }

    #[test]
    fn test_ip_host() {
        let set = DomainSet::new(["127.0.0.1"]);
        assert!(set.matches_url("http://127.0.0.1:8080/a"));
        assert!(!set.matches_url("http://localhost:8080/a"));
    }

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://Example.com:8443/path").as_deref(),
            Some("example.com")
        );
        assert_eq!(host_of("example.com/path"), None);
    }

    #[test]
    fn test_sorted_entries() {
        let set = DomainSet::new(["t.co", "bit.ly"]);
        assert_eq!(set.sorted_entries(), vec!["bit.ly", "t.co"]);
    }
}
