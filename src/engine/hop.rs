//! Interpretation of a single fetched hop.

use crate::error_handling::{FetchError, InfoType};
use crate::fetch::{web_address, FetchOutcome, FetchedResponse};
use crate::redirect::{find_embedded_redirect, is_redirect_status, normalize_location};
use crate::registry::DomainSet;

/// What the engine does after one hop.
#[derive(Debug)]
pub enum HopOutcome {
    /// Follow this URL next.
    Continue(String),
    /// Resolution ends on this URL.
    Stop(String),
    /// The fetch failed; resolution ends on the current URL.
    Failed(FetchError),
}

/// A hop outcome plus the notable event it produced, if any.
#[derive(Debug)]
pub struct Interpretation {
    pub outcome: HopOutcome,
    pub event: Option<InfoType>,
}

impl Interpretation {
    fn new(outcome: HopOutcome, event: Option<InfoType>) -> Self {
        Self { outcome, event }
    }
}

/// Decides the next step from the result of fetching `current_url`.
///
/// Pure: no I/O, no shared state.
pub fn interpret_fetch(
    current_url: &str,
    fetched: Result<FetchOutcome, FetchError>,
    shorteners: &DomainSet,
) -> Interpretation {
    match fetched {
        Err(error) => Interpretation::new(HopOutcome::Failed(error), None),
        // The browser already followed whatever the page did
        Ok(FetchOutcome::Navigated(address)) => match web_address(&address) {
            Ok(address) => Interpretation::new(
                HopOutcome::Continue(address),
                Some(InfoType::BrowserNavigation),
            ),
            Err(error) => Interpretation::new(HopOutcome::Failed(error), None),
        },
        Ok(FetchOutcome::Response(response)) => {
            interpret_response(current_url, &response, shorteners)
        }
    }
}

/// Decides the next step from a raw HTTP response.
pub fn interpret_response(
    current_url: &str,
    response: &FetchedResponse,
    shorteners: &DomainSet,
) -> Interpretation {
    if is_redirect_status(response.status) {
        let Some(location) = response.location() else {
            return Interpretation::new(
                HopOutcome::Stop(current_url.to_string()),
                Some(InfoType::AmbiguousRedirect),
            );
        };
        let next = normalize_location(&location, current_url);
        let outcome = if shorteners.matches_url(&next) {
            HopOutcome::Continue(next)
        } else {
            HopOutcome::Stop(next)
        };
        return Interpretation::new(outcome, Some(InfoType::HttpRedirect));
    }

    if response.status == 200 {
        if !shorteners.matches_url(current_url) {
            return Interpretation::new(HopOutcome::Stop(current_url.to_string()), None);
        }
        // Embedded targets are followed without re-checking membership
        return match response.body.as_deref().and_then(find_embedded_redirect) {
            Some(embedded) => Interpretation::new(
                HopOutcome::Continue(normalize_location(embedded.target(), current_url)),
                Some(embedded.info_type()),
            ),
            None => Interpretation::new(HopOutcome::Stop(current_url.to_string()), None),
        };
    }

    Interpretation::new(HopOutcome::Stop(current_url.to_string()), None)
}
