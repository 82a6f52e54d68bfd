//! User-Agent rotation.
//!
//! Each request draws a random agent from the configured pool. This only
//! reduces trivial fingerprint blocking; correctness never depends on it.

use rand::seq::IndexedRandom;

use crate::config::DEFAULT_USER_AGENT;

/// Pool of User-Agent strings.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    /// Builds a pool, dropping blank entries.
    ///
    /// An empty pool falls back to [`DEFAULT_USER_AGENT`].
    pub fn new<I, S>(agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut agents: Vec<String> = agents
            .into_iter()
            .map(Into::into)
            .filter(|agent: &String| !agent.trim().is_empty())
            .collect();
        if agents.is_empty() {
            log::debug!("Empty User-Agent pool, using default: {}", DEFAULT_USER_AGENT);
            agents.push(DEFAULT_USER_AGENT.to_string());
        }
        Self { agents }
    }

    /// Picks an agent uniformly at random.
    pub fn random(&self) -> &str {
        self.agents
            .choose(&mut rand::rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_USER_AGENTS.iter().copied())
    }
}
