//! Challenge-bypass adapter.
//!
//! Anti-bot interstitials (Cloudflare "Just a moment...", DDoS-Guard) answer the
//! first request with 403/429/503 and a cookie. A client that keeps the cookie,
//! waits and asks again is usually let through. Pages that ask for a CAPTCHA
//! are reported as such; nothing here tries to solve them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, SERVER};

use super::response::read_body_blocking;
use super::{FetchOutcome, FetchedResponse, Fetcher};
use crate::config::{CHALLENGE_MAX_ATTEMPTS, CHALLENGE_RETRY_DELAY};
use crate::error_handling::{FetchError, InfoType, ProcessingStats};
use crate::initialization::init_challenge_client;
use crate::user_agent::UserAgentPool;

const INTERSTITIAL_STATUSES: &[u16] = &[403, 429, 503];

const INTERSTITIAL_MARKERS: &[&str] = &[
    "just a moment...",
    "checking your browser",
    "cf-browser-verification",
    "cf-chl-",
    "/cdn-cgi/challenge-platform/",
    "ddos-guard",
];

const CAPTCHA_MARKERS: &[&str] = &["cf-turnstile", "g-recaptcha", "h-captcha", "hcaptcha.com"];

/// What a protection page asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Challenge {
    /// Wait-and-retry interstitial.
    Interstitial,
    /// Needs a human.
    Captcha,
}

/// Classifies a response as a protection page, if it is one.
pub(crate) fn detect_challenge(
    status: u16,
    headers: &HeaderMap,
    body: Option<&str>,
) -> Option<Challenge> {
    if !INTERSTITIAL_STATUSES.contains(&status) {
        return None;
    }

    let mitigated = headers
        .get("cf-mitigated")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("challenge"));
    let body = body.map(str::to_ascii_lowercase).unwrap_or_default();

    if CAPTCHA_MARKERS.iter().any(|marker| body.contains(marker)) {
        return Some(Challenge::Captcha);
    }
    if mitigated || INTERSTITIAL_MARKERS.iter().any(|marker| body.contains(marker)) {
        return Some(Challenge::Interstitial);
    }

    // A bare 503 from a protection front-end without a recognisable body
    let server = headers
        .get(SERVER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if status == 503 && (server.contains("cloudflare") || server.contains("ddos-guard")) {
        return Some(Challenge::Interstitial);
    }
    None
}

/// Fetches through anti-bot interstitials with a cookie-keeping blocking client.
///
/// The blocking client runs on tokio's blocking pool so it never stalls the
/// async workers; the client is created and dropped on that thread.
pub struct ChallengeFetcher {
    timeout: Duration,
    user_agents: UserAgentPool,
    stats: Arc<ProcessingStats>,
    max_attempts: usize,
    retry_delay: Duration,
}

impl ChallengeFetcher {
    pub fn new(timeout: Duration, user_agents: UserAgentPool, stats: Arc<ProcessingStats>) -> Self {
        Self {
            timeout,
            user_agents,
            stats,
            max_attempts: CHALLENGE_MAX_ATTEMPTS,
            retry_delay: CHALLENGE_RETRY_DELAY,
        }
    }

    /// Overrides the attempt count (at least one) and the delay between attempts.
    pub fn with_retry(mut self, max_attempts: usize, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// Upper bound on one whole fetch, every attempt and delay included.
    fn deadline(&self) -> Duration {
        let attempts = u32::try_from(self.max_attempts).unwrap_or(u32::MAX);
        self.timeout.saturating_mul(attempts)
            + self.retry_delay.saturating_mul(attempts.saturating_sub(1))
    }
}

struct Attempt {
    response: FetchedResponse,
    attempts: usize,
}

fn fetch_through_challenge(
    url: &str,
    user_agent: &str,
    timeout: Duration,
    max_attempts: usize,
    retry_delay: Duration,
) -> Result<Attempt, FetchError> {
    let client = init_challenge_client(timeout, user_agent)?;

    for attempt in 1..=max_attempts {
        let response = client.get(url).send()?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = if status == 200 || INTERSTITIAL_STATUSES.contains(&status) {
            read_body_blocking(response)?
        } else {
            None
        };

        match detect_challenge(status, &headers, body.as_deref()) {
            Some(Challenge::Captcha) => return Err(FetchError::CaptchaRequired),
            Some(Challenge::Interstitial) => {
                debug!(
                    "Interstitial from {} (status {}), attempt {}/{}",
                    url, status, attempt, max_attempts
                );
                if attempt < max_attempts {
                    std::thread::sleep(retry_delay);
                }
            }
            None if status >= 400 => return Err(FetchError::Status(status)),
            None => {
                return Ok(Attempt {
                    response: FetchedResponse {
                        status,
                        headers,
                        body: if status == 200 { body } else { None },
                    },
                    attempts: attempt,
                });
            }
        }
    }

    Err(FetchError::ChallengeUnsolved(max_attempts))
}

#[async_trait]
impl Fetcher for ChallengeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let owned_url = url.to_string();
        let user_agent = self.user_agents.random().to_string();
        let (timeout, max_attempts, retry_delay) =
            (self.timeout, self.max_attempts, self.retry_delay);

        let worker = tokio::task::spawn_blocking(move || {
            fetch_through_challenge(&owned_url, &user_agent, timeout, max_attempts, retry_delay)
        });

        let deadline = self.deadline();
        let attempt = match tokio::time::timeout(deadline, worker).await {
            Err(_) => return Err(FetchError::Timeout(deadline)),
            Ok(Err(join_error)) => return Err(FetchError::Worker(join_error.to_string())),
            Ok(Ok(result)) => result?,
        };

        if attempt.attempts > 1 {
            info!("Cleared interstitial for {} after {} attempts", url, attempt.attempts);
            self.stats.increment_info(InfoType::ChallengeCleared);
        }
        Ok(FetchOutcome::Response(attempt.response))
    }
}
