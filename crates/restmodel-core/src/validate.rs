//! Runtime validation helpers for field constraints.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use regex::Regex;

/// Thread-safe regex cache for compiled patterns.
///
/// Field patterns are static strings declared once per model, so compiled
/// regexes are cached for the lifetime of the program.
struct RegexCache {
    cache: RwLock<HashMap<String, Regex>>,
}

impl RegexCache {
    fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn get_or_compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        // Fast path: check if already cached
        // Use unwrap_or_else to recover from poisoned lock (another thread panicked)
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(regex) = cache.get(pattern) {
                return Ok(regex.clone());
            }
        }

        // Slow path: compile and cache
        let regex = Regex::new(pattern)?;
        {
            let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
            cache.insert(pattern.to_string(), regex.clone());
        }
        Ok(regex)
    }
}

/// Global regex cache singleton.
fn regex_cache() -> &'static RegexCache {
    static CACHE: OnceLock<RegexCache> = OnceLock::new();
    CACHE.get_or_init(RegexCache::new)
}

/// Check if a string matches a regex pattern.
///
/// Returns `false` if the pattern is invalid (logs a warning).
pub fn matches_pattern(value: &str, pattern: &str) -> bool {
    match regex_cache().get_or_compile(pattern) {
        Ok(regex) => regex.is_match(value),
        Err(e) => {
            // Log the error but don't panic - validation should be resilient
            tracing::warn!(
                pattern = pattern,
                error = %e,
                "Invalid regex pattern in field constraint, treating as non-match"
            );
            false
        }
    }
}

/// Validate a regex pattern ahead of use.
///
/// Returns an error message if the pattern is invalid, None if valid.
pub fn validate_pattern(pattern: &str) -> Option<String> {
    match Regex::new(pattern) {
        Ok(_) => None,
        Err(e) => Some(format!("invalid regex pattern: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_simple_pattern() {
        assert!(matches_pattern("red", r"^[a-z]+$"));
        assert!(!matches_pattern("Red1", r"^[a-z]+$"));
    }

    #[test]
    fn repeated_calls_reuse_the_cache() {
        // Same pattern twice exercises the cached branch
        assert!(matches_pattern("abc", r"^a.+$"));
        assert!(matches_pattern("axe", r"^a.+$"));
    }

    #[test]
    fn invalid_pattern_is_non_match() {
        assert!(!matches_pattern("anything", r"(unclosed"));
    }

    #[test]
    fn validate_pattern_reports_errors() {
        assert!(validate_pattern(r"^[a-z]+$").is_none());
        assert!(validate_pattern(r"(unclosed").is_some());
    }
}
