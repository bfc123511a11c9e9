//! Storage key derivation.
//!
//! Keys look like `20240501_100000_cat.png`: a second-precision local
//! timestamp, an underscore, then the client's filename. Because the
//! timestamp is fixed-width, lexicographic key order is upload order.

use chrono::{Local, NaiveDateTime};

/// Substituted when nothing usable is left of the client's filename.
const FALLBACK_NAME: &str = "unnamed";

/// Build the storage key for `filename` uploaded at `timestamp`.
pub fn storage_key(timestamp: NaiveDateTime, filename: &str) -> String {
    format!(
        "{}_{}",
        timestamp.format("%Y%m%d_%H%M%S"),
        sanitize_filename(filename)
    )
}

/// Build the storage key for `filename` using the current local time.
pub fn storage_key_now(filename: &str) -> String {
    storage_key(Local::now().naive_local(), filename)
}

/// Reduce a client-supplied filename to a single safe path component.
///
/// Directory components (either separator style) are dropped and control
/// characters removed. Plain names pass through untouched.
pub fn sanitize_filename(filename: &str) -> String {
    let last = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();

    match cleaned.as_str() {
        "" | "." | ".." => FALLBACK_NAME.to_string(),
        _ => cleaned,
    }
}
