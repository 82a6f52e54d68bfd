// Shared test helpers for building resolvers against local mock servers.
//
// Mock servers listen on 127.0.0.1, so listing that host as a shortener makes
// every mock path behave like a shortener hop.

use link_bypass::{Config, LogFormat, LogLevel, Resolver};

pub const TEST_USER_AGENT: &str = "link_bypass_test/1.0";

/// Plain-HTTP config treating the mock server host as a shortener.
#[allow(dead_code)] // Used by other test files
pub fn test_config(max_depth: usize) -> Config {
    Config {
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        max_depth,
        timeout_seconds: 5,
        max_concurrency: 4,
        enable_challenge_bypass: false,
        enable_browser: false,
        shorteners: vec!["127.0.0.1".to_string()],
        browser_domains: Vec::new(),
        user_agents: vec![TEST_USER_AGENT.to_string()],
        ..Default::default()
    }
}

/// Builds a resolver, panicking on configuration errors.
#[allow(dead_code)] // Used by other test files
pub fn resolver(config: &Config) -> Resolver {
    Resolver::from_config(config).expect("Failed to build resolver")
}
