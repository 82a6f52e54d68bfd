//! Redirect target normalization.

/// Turns a redirect target into an absolute URL.
///
/// - `http://` / `https://` targets are returned unchanged (scheme matched
///   case-insensitively).
/// - Protocol-relative `//host/path` becomes `https://host/path`.
/// - Absolute paths (`/path`) are joined onto `current_url`.
/// - Anything else is treated as a bare host and prefixed with `https://`.
///
/// # Arguments
///
/// * `target` - Raw `Location` header value or embedded redirect literal
/// * `current_url` - URL of the response the target came from
pub fn normalize_location(target: &str, current_url: &str) -> String {
    let target = target.trim();
    let lower = target.get(..8).unwrap_or(target).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return target.to_string();
    }

    if let Some(rest) = target.strip_prefix("//") {
        return format!("https://{rest}");
    }

    if target.starts_with('/') {
        if let Ok(joined) = url::Url::parse(current_url).and_then(|base| base.join(target)) {
            return joined.to_string();
        }
        log::debug!("Could not join {target} onto {current_url}, treating as host-relative");
        return format!("https://{}", target.trim_start_matches('/'));
    }

    format!("https://{target}")
}
