//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with a
//! fallback name (e.g. the tool-specific name first, then a generic one).

/// Get an environment variable with fallback to a secondary name
///
/// If the primary variable is set, returns its value.
/// Otherwise returns the value of the fallback variable, if set.
///
/// # Example
/// ```
/// use nina_status::config::get_env_with_fallback;
///
/// let level = get_env_with_fallback("NINA_STATUS_LOG_LEVEL", "RUST_LOG");
/// ```
pub fn get_env_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    if let Ok(val) = std::env::var(primary) {
        return Some(val);
    }
    std::env::var(fallback).ok()
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(primary: &str, fallback: &str, default: &str) -> String {
    get_env_with_fallback(primary, fallback).unwrap_or_else(|| default.to_string())
}

/// 環境変数がフラグとして有効かを判定
///
/// 値が空でなければ有効とみなす（`NO_COLOR` の慣習に合わせる）。
pub fn is_env_flag_set(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|value| !value.is_empty())
}
