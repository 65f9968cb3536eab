//! API utilities for reaching the analytics backend
//!
//! Provides helper functions for constructing request URLs.

/// Get the base URL for analytics requests
///
/// Constructs the base URL from the current window location, using port 8000
/// for the analytics server.
///
/// # Returns
/// - Base URL like "http://localhost:8000" or "https://example.com:8000"
/// - Empty string if window is not available
pub fn analytics_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8000", protocol, hostname)
}

/// Build a full analytics URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn analytics_url(path: &str) -> String {
    format!("{}{}", analytics_base(), path)
}
