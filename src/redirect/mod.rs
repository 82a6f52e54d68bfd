//! Locating the next hop of a redirect chain.
//!
//! - `locate`: embedded redirects in HTML bodies (meta-refresh, script location assignment)
//! - `normalize`: turning `Location`-style targets into absolute URLs

mod locate;
mod normalize;

pub use locate::{find_embedded_redirect, find_meta_refresh, find_script_redirect, EmbeddedRedirect};
pub use normalize::normalize_location;

/// True for the redirect statuses the engine interprets (301/302/303/307/308).
pub fn is_redirect_status(status: u16) -> bool {
    crate::config::REDIRECT_STATUS_CODES.contains(&status)
}
