//! Generative service configuration.
//!
//! The credential comes from the environment. A missing key is not an
//! error here; it only disables generation when a request is attempted.

use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Fallback variable name used by Google's own tooling.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "FG_GEMINI_MODEL";
pub const ENDPOINT_VAR: &str = "FG_GEMINI_ENDPOINT";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL up to and including the API version.
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    /// Read `API_KEY` (or `GEMINI_API_KEY`), `FG_GEMINI_MODEL` and
    /// `FG_GEMINI_ENDPOINT` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            api_key: get(API_KEY_VAR).or_else(|| get(GEMINI_API_KEY_VAR)),
            model: get(MODEL_VAR).unwrap_or(defaults.model),
            endpoint: get(ENDPOINT_VAR).unwrap_or(defaults.endpoint),
            timeout: defaults.timeout,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// `{endpoint}/models/{model}:generateContent`
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}
