//! Per-hop fetch strategy selection.

use crate::registry::DomainSet;

/// How a single hop is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Async HTTP client, redirects disabled.
    Plain,
    /// Blocking client that waits out anti-bot interstitials.
    ChallengeBypass,
    /// Real browser session; the page address after settling is the next URL.
    BrowserAutomation,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Plain => "plain",
            Strategy::ChallengeBypass => "challenge-bypass",
            Strategy::BrowserAutomation => "browser",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to [`StrategySelector::select`] that come from configuration.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    enable_challenge_bypass: bool,
    enable_browser: bool,
    browser_domains: DomainSet,
}

impl StrategySelector {
    pub fn new(
        enable_challenge_bypass: bool,
        enable_browser: bool,
        browser_domains: DomainSet,
    ) -> Self {
        Self {
            enable_challenge_bypass,
            enable_browser,
            browser_domains,
        }
    }

    /// Picks the strategy for a host.
    ///
    /// Browser automation wins only for listed hosts. The challenge client is a
    /// valid plain client too, so when enabled it takes every other host.
    /// There is no fallback between strategies within a hop.
    pub fn select(&self, host: &str) -> Strategy {
        if self.enable_browser && self.browser_domains.matches_host(host) {
            Strategy::BrowserAutomation
        } else if self.enable_challenge_bypass {
            Strategy::ChallengeBypass
        } else {
            Strategy::Plain
        }
    }

    /// Hosts routed to browser automation when it is enabled.
    pub fn browser_domains(&self) -> &DomainSet {
        &self.browser_domains
    }

    /// Picks the strategy for a URL; unparseable URLs use the host-less rules.
    pub fn select_for_url(&self, url: &str) -> Strategy {
        let host = crate::registry::host_of(url).unwrap_or_default();
        self.select(&host)
    }
}
