//! URL extraction from free text.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::utils::compile_regex_unsafe;

/// Maximum URL length (2048 characters); longer matches are skipped.
const MAX_URL_LENGTH: usize = 2048;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r#"(?i)\bhttps?://[^\s<>"'`]+"#, "URL_PATTERN")
});

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '*', '_', '~'];

fn trim_match(candidate: &str) -> &str {
    let mut url = candidate;
    loop {
        let trimmed = url.trim_end_matches(TRAILING_PUNCTUATION);
        // Drop a closing bracket only when it has no partner inside the URL
        let trimmed = match trimmed.chars().last() {
            Some(close @ (')' | ']' | '}')) => {
                let open = match close {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                let opens = trimmed.matches(open).count();
                let closes = trimmed.matches(close).count();
                if closes > opens {
                    &trimmed[..trimmed.len() - 1]
                } else {
                    trimmed
                }
            }
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

/// Returns the `http(s)://` URLs in `text`, in order of appearance.
///
/// Trailing sentence punctuation and unbalanced closing brackets are not part
/// of the URL. Duplicates are kept.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| trim_match(m.as_str()))
        .filter(|url| url.contains("://") && !url.ends_with("://"))
        .filter(|url| {
            if url.len() > MAX_URL_LENGTH {
                warn!(
                    "Skipping URL exceeding maximum length ({} > {}): {}...",
                    url.len(),
                    MAX_URL_LENGTH,
                    url.chars().take(50).collect::<String>()
                );
                false
            } else {
                true
            }
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_order() {
        let text = "first https://bit.ly/abc then http://tinyurl.com/xyz?q=1 done";
        assert_eq!(
            extract_urls(text),
            vec!["https://bit.ly/abc", "http://tinyurl.com/xyz?q=1"]
        );
    }

    #[test]
    fn test_trailing_punctuation_trimmed() {
        assert_eq!(
            extract_urls("Check this: https://bit.ly/abc."),
            vec!["https://bit.ly/abc"]
        );
        assert_eq!(
            extract_urls("(see https://bit.ly/abc), ok?"),
            vec!["https://bit.ly/abc"]
        );
    }

    #[test]
    fn test_balanced_brackets_kept() {
        assert_eq!(
            extract_urls("https://en.wikipedia.org/wiki/Rust_(programming_language)"),
            vec!["https://en.wikipedia.org/wiki/Rust_(programming_language)"]
        );
    }

    #[test]
    fn test_no_urls() {
        assert!(extract_urls("nothing here, not even www.example.com").is_empty());
        assert!(extract_urls("https://").is_empty());
    }

    #[test]
    fn test_duplicates_kept() {
        assert_eq!(
            extract_urls("https://bit.ly/a https://bit.ly/a").len(),
            2
        );
    }

    #[test]
    fn test_overlong_url_skipped() {
        let long = format!("https://bit.ly/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(extract_urls(&long).is_empty());
    }
}
