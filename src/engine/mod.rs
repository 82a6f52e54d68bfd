//! Resolution engine.
//!
//! [`Resolver`] owns the shared pieces (cache, admission gate, fetch adapters,
//! statistics) and runs the bounded-depth redirect loop for each URL. It is
//! cheap to clone; clones share all state.

mod batch;
mod hop;

use std::sync::Arc;

use log::{debug, info, warn};

use crate::admission::AdmissionController;
use crate::cache::ResolutionCache;
use crate::config::{Config, BROWSER_NAVIGATION_TIMEOUT};
use crate::error_handling::{FetchError, InfoType, InitializationError, ProcessingStats, ResolveError};
use crate::fetch::{
    BrowserFetcher, BrowserOptions, ChallengeFetcher, FetchAdapters, PlainFetcher,
};
use crate::initialization::init_redirect_client;
use crate::registry::DomainSet;
use crate::strategy::StrategySelector;
use crate::user_agent::UserAgentPool;

pub use batch::{BatchEntry, Outcome};
pub use hop::{interpret_fetch, interpret_response, HopOutcome, Interpretation};

/// Immutable per-engine settings shared by every resolution.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub max_depth: usize,
    pub max_concurrency: usize,
    pub shorteners: DomainSet,
    pub selector: StrategySelector,
}

impl ResolverSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_depth: config.max_depth,
            max_concurrency: config.max_concurrency,
            shorteners: DomainSet::new(&config.shorteners),
            selector: StrategySelector::new(
                config.enable_challenge_bypass,
                config.enable_browser,
                DomainSet::new(&config.browser_domains),
            ),
        }
    }
}

/// Progress of one resolution.
#[derive(Debug)]
pub struct ResolutionState {
    pub original_url: String,
    pub current_url: String,
    pub hops_taken: usize,
    /// The fetch failure that ended the loop, if one did.
    pub last_error: Option<FetchError>,
    /// Answered from the cache without any fetch.
    pub cache_hit: bool,
}

impl ResolutionState {
    fn new(original_url: &str) -> Self {
        Self {
            original_url: original_url.to_string(),
            current_url: original_url.to_string(),
            hops_taken: 0,
            last_error: None,
            cache_hit: false,
        }
    }

    fn from_cache(original_url: &str, resolved_url: String) -> Self {
        Self {
            current_url: resolved_url,
            cache_hit: true,
            ..Self::new(original_url)
        }
    }
}

/// The URL resolution engine.
#[derive(Clone)]
pub struct Resolver {
    settings: Arc<ResolverSettings>,
    adapters: FetchAdapters,
    cache: Arc<ResolutionCache>,
    admission: AdmissionController,
    stats: Arc<ProcessingStats>,
}

impl Resolver {
    /// Builds a resolver with the real fetch adapters.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        config.validate()?;

        let stats = Arc::new(ProcessingStats::new());
        let user_agents = UserAgentPool::new(config.user_agents.iter().cloned());
        let client = init_redirect_client(config)?;

        let adapters = FetchAdapters {
            plain: Arc::new(PlainFetcher::new(client, user_agents.clone())),
            challenge: Arc::new(ChallengeFetcher::new(
                config.timeout(),
                user_agents.clone(),
                Arc::clone(&stats),
            )),
            browser: Arc::new(BrowserFetcher::new(
                BrowserOptions {
                    headless: config.headless,
                    executable: config.browser_executable.clone(),
                    settle: config.browser_settle(),
                    navigation_timeout: BROWSER_NAVIGATION_TIMEOUT,
                    command_timeout: config.timeout(),
                },
                user_agents,
            )),
        };

        let settings = ResolverSettings::from_config(config);
        debug!(
            "Resolver ready: {} shortener domains, browser domains [{}], max depth {}, {} slots",
            settings.shorteners.len(),
            settings.selector.browser_domains().sorted_entries().join(", "),
            settings.max_depth,
            settings.max_concurrency
        );
        Ok(Self::new(settings, adapters, stats))
    }

    /// Builds a resolver over caller-supplied adapters.
    pub fn new(
        settings: ResolverSettings,
        adapters: FetchAdapters,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        let admission = AdmissionController::new(settings.max_concurrency);
        Self {
            settings: Arc::new(settings),
            adapters,
            cache: Arc::new(ResolutionCache::new()),
            admission,
            stats,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn admission(&self) -> &AdmissionController {
        &self.admission
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Resolves `url` to its final destination.
    ///
    /// Fetch failures never surface here: resolution stops and the last good
    /// URL is returned (and cached).
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` only when the input is not an absolute
    /// http(s) URL or the admission gate is closed.
    pub async fn resolve(&self, url: &str) -> Result<String, ResolveError> {
        Ok(self.resolve_traced(url).await?.current_url)
    }

    /// Like [`resolve`](Self::resolve), returning the full resolution state.
    pub async fn resolve_traced(&self, url: &str) -> Result<ResolutionState, ResolveError> {
        check_input(url)?;
        let _permit = self.admission.admit().await?;

        if let Some(resolved) = self.cache.get(url) {
            debug!("Cache hit for {} -> {}", url, resolved);
            self.stats.increment_info(InfoType::CacheHit);
            return Ok(ResolutionState::from_cache(url, resolved));
        }

        let mut state = ResolutionState::new(url);
        let mut settled = false;

        while state.hops_taken < self.settings.max_depth {
            let strategy = self.settings.selector.select_for_url(&state.current_url);
            debug!(
                "Hop {}/{} for {}: fetching {} ({})",
                state.hops_taken + 1,
                self.settings.max_depth,
                state.original_url,
                state.current_url,
                strategy
            );

            let fetched = self
                .adapters
                .for_strategy(strategy)
                .fetch(&state.current_url)
                .await;
            state.hops_taken += 1;

            let step = interpret_fetch(&state.current_url, fetched, &self.settings.shorteners);
            if let Some(event) = step.event {
                if event == InfoType::AmbiguousRedirect {
                    warn!("Redirect from {} has no Location header, stopping", state.current_url);
                }
                self.stats.increment_info(event);
            }
            match step.outcome {
                HopOutcome::Continue(next) => {
                    debug!("{} -> {}", state.current_url, next);
                    state.current_url = next;
                }
                HopOutcome::Stop(final_url) => {
                    state.current_url = final_url;
                    settled = true;
                    break;
                }
                HopOutcome::Failed(error) => {
                    warn!(
                        "Fetching {} ({}) failed, keeping it as result for {}: {}",
                        state.current_url, strategy, state.original_url, error
                    );
                    self.stats.increment_error(error.error_type());
                    state.last_error = Some(error);
                    settled = true;
                    break;
                }
            }
        }

        if !settled {
            info!(
                "Hop budget of {} exhausted for {}, stopping at {}",
                self.settings.max_depth, state.original_url, state.current_url
            );
            self.stats.increment_info(InfoType::DepthExhausted);
        }

        self.cache.insert(url, state.current_url.clone());
        Ok(state)
    }
}

fn check_input(url: &str) -> Result<(), ResolveError> {
    let parsed = url::Url::parse(url).map_err(|source| ResolveError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ResolveError::UnsupportedScheme(other.to_string())),
    }
}
