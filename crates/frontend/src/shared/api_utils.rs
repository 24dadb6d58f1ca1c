//! API utilities for storefront-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// A configured base (e.g. "https://shop.example") wins. Otherwise the
/// current window origin is used, so the shop talks to the server that
/// served the page.
///
/// # Returns
/// - API base URL without a trailing slash
/// - Empty string if no base is configured and window is not available
///   (relative URLs are then used as-is)
pub fn api_base(configured: &str) -> String {
    let configured = configured.trim();
    if !configured.is_empty() {
        return configured.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url(&config.api.base, &config.api.products);
/// ```
pub fn api_url(configured_base: &str, path: &str) -> String {
    join_url(&api_base(configured_base), path)
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
