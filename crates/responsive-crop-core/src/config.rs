//! Editor configuration.
//!
//! Settings arrive as JSON from the host page. Every field has a default and
//! unknown fields are ignored, so a partial or stale config still works.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default media library root searched by the media picker.
pub const DEFAULT_MEDIA_ROOT: &str = "/sitecore/media library";

/// Default content language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default number of media search results.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Settings for one editor instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Media library path searches are restricted to.
    pub media_root_path: String,
    /// Language used for media searches until the host reports one.
    pub language: String,
    /// Maximum media search results.
    pub search_limit: u32,
    /// Host client initialization retries.
    pub retry: RetryPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            media_root_path: DEFAULT_MEDIA_ROOT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            retry: RetryPolicy::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config strictly. Blank text gives the defaults.
    pub fn try_from_json_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text).map_err(ConfigError::Parse)
    }

    /// Parse a JSON config, falling back to defaults on invalid input.
    pub fn from_json_str(text: &str) -> Self {
        Self::try_from_json_str(text).unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to parse editor config; using defaults");
            Self::default()
        })
    }

    /// Copy of this config with the language the host reported, if any.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        if let Some(language) = language.filter(|l| !l.is_empty()) {
            self.language = language;
        }
        self
    }
}

/// How often and how patiently to retry host client initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub attempts: u32,
    /// Delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay_ms: 750,
        }
    }
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.media_root_path, "/sitecore/media library");
        assert_eq!(config.language, "en");
        assert_eq!(config.search_limit, 20);
        assert_eq!(config.retry.attempts, 3);
        assert_eq!(config.retry.delay(), Duration::from_millis(750));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{"language":"de","retry":{"attempts":5}}"#);
        assert_eq!(config.language, "de");
        assert_eq!(config.retry.attempts, 5);
        assert_eq!(config.retry.delay_ms, 750);
        assert_eq!(config.media_root_path, DEFAULT_MEDIA_ROOT);
    }

    #[test]
    fn test_try_from_json_str_reports_errors() {
        assert!(matches!(
            EditorConfig::try_from_json_str("{oops"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EditorConfig::try_from_json_str(r#"{"searchLimit":"many"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(EditorConfig::try_from_json_str("  ").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_invalid_config_falls_back() {
        assert_eq!(EditorConfig::from_json_str("{oops"), EditorConfig::default());
        assert_eq!(EditorConfig::from_json_str(""), EditorConfig::default());
        assert_eq!(EditorConfig::from_json_str("[]"), EditorConfig::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config = EditorConfig::from_json_str(r#"{"searchLimit":5,"theme":"dark"}"#);
        assert_eq!(config.search_limit, 5);
    }

    #[test]
    fn test_with_language() {
        let config = EditorConfig::default().with_language(Some("fr".into()));
        assert_eq!(config.language, "fr");
        let config = config.with_language(Some(String::new()));
        assert_eq!(config.language, "fr");
        let config = config.with_language(None);
        assert_eq!(config.language, "fr");
    }
}
