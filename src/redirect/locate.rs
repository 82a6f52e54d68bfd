//! Embedded redirect extraction from HTML bodies.
//!
//! Shortener landing pages that answer 200 usually carry the destination in a
//! `<meta http-equiv="refresh">` tag or in an inline script that assigns
//! `window.location`. Meta-refresh takes priority.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error_handling::InfoType;
use crate::utils::{compile_regex_unsafe, parse_selector_unsafe};

const META_URL_PATTERN: &str = r"(?i)url\s*=\s*(.*)";
const SCRIPT_LOCATION_PATTERN: &str = r#"(?i)(?:window\.location(?:\.href)?|document\.location(?:\.href)?|location\.href)\s*=\s*["']([^"']+)["']"#;

static META_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(META_URL_PATTERN, "META_URL_RE"));
static SCRIPT_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(SCRIPT_LOCATION_PATTERN, "SCRIPT_LOCATION_RE"));

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("meta[http-equiv][content]", "META_SELECTOR"));
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script", "SCRIPT_SELECTOR"));

/// A redirect target found inside a page body, tagged by technique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedRedirect {
    /// `<meta http-equiv="refresh" content="N;url=...">`
    MetaRefresh(String),
    /// Inline script assigning the page location to a string literal
    Script(String),
}

impl EmbeddedRedirect {
    /// The raw (not yet normalized) target.
    pub fn target(&self) -> &str {
        match self {
            EmbeddedRedirect::MetaRefresh(target) | EmbeddedRedirect::Script(target) => target,
        }
    }

    pub(crate) fn info_type(&self) -> InfoType {
        match self {
            EmbeddedRedirect::MetaRefresh(_) => InfoType::MetaRefreshRedirect,
            EmbeddedRedirect::Script(_) => InfoType::ScriptRedirect,
        }
    }
}

/// Searches an HTML body for an embedded redirect, meta-refresh first.
pub fn find_embedded_redirect(body: &str) -> Option<EmbeddedRedirect> {
    let document = Html::parse_document(body);
    if let Some(target) = find_meta_refresh(&document) {
        return Some(EmbeddedRedirect::MetaRefresh(target));
    }
    find_script_redirect(&document).map(EmbeddedRedirect::Script)
}

/// Returns everything after `url=` in the first refresh meta tag that has one.
///
/// Surrounding whitespace and quotes are stripped (`content="0; url='x'"` is common).
pub fn find_meta_refresh(document: &Html) -> Option<String> {
    document
        .select(&META_SELECTOR)
        .filter(|element| {
            element
                .value()
                .attr("http-equiv")
                .is_some_and(|equiv| equiv.trim().eq_ignore_ascii_case("refresh"))
        })
        .filter_map(|element| element.value().attr("content"))
        .find_map(|content| {
            let captured = META_URL_RE.captures(content)?.get(1)?.as_str();
            let target = captured.trim().trim_matches(|c| c == '\'' || c == '"').trim();
            (!target.is_empty()).then(|| target.to_string())
        })
}

/// Returns the first location literal assigned by an inline script.
pub fn find_script_redirect(document: &Html) -> Option<String> {
    document
        .select(&SCRIPT_SELECTOR)
        .filter(|element| element.value().attr("src").is_none())
        .find_map(|element| {
            let text = element.text().collect::<String>();
            SCRIPT_LOCATION_RE
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}
