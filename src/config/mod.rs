//! Configuration for the OctoAI adapter
//!
//! Required values are resolved in two stages:
//! 1. Explicit value (CLI flag, settings file, or code)
//! 2. Named environment variable (`ENDPOINT_URL`, `OCTOAI_API_TOKEN`)
//!
//! Anything still missing is a [`OctoAiError::Configuration`].

pub mod settings;

use std::{fmt, time::Duration};

use serde_json::{Map, Value};

pub use self::settings::AdapterSettings;
use crate::error::{OctoAiError, Result};

/// Environment variable holding the bearer token
pub const API_TOKEN_ENV: &str = "OCTOAI_API_TOKEN";

/// Environment variable holding the endpoint URL
pub const ENDPOINT_URL_ENV: &str = "ENDPOINT_URL";

/// Resolve a required value: explicit first, then `env_var` through `lookup`
///
/// Empty strings count as absent in both stages.
///
/// # Errors
///
/// Returns [`OctoAiError::Configuration`] if neither stage yields a value
pub fn resolve_required<F>(
    explicit: Option<String>,
    field: &'static str,
    env_var: &'static str,
    lookup: F,
) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .filter(|value| !value.is_empty())
        .or_else(|| lookup(env_var).filter(|value| !value.is_empty()))
        .ok_or(OctoAiError::Configuration { field, env_var })
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolved, immutable adapter configuration
#[derive(Clone, PartialEq)]
pub struct AdapterConfig {
    endpoint_url: String,
    api_token: String,
    task: Option<String>,
    model_kwargs: Option<Map<String, Value>>,
    timeout: Option<Duration>,
}

impl AdapterConfig {
    /// Build from explicit values only
    ///
    /// # Errors
    ///
    /// Returns an error if either value is empty
    pub fn new(endpoint_url: impl Into<String>, api_token: impl Into<String>) -> Result<Self> {
        Self::from_settings_with(
            AdapterSettings {
                endpoint_url: Some(endpoint_url.into()),
                api_token: Some(api_token.into()),
                ..Default::default()
            },
            |_| None,
        )
    }

    /// Resolve settings against the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL or token is missing from both sources
    pub fn from_settings(settings: AdapterSettings) -> Result<Self> {
        Self::from_settings_with(settings, process_env)
    }

    /// Resolve settings against an arbitrary environment lookup
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL or token is missing from both sources
    pub fn from_settings_with<F>(settings: AdapterSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = resolve_required(settings.api_token, "api_token", API_TOKEN_ENV, &lookup)?;
        let endpoint_url =
            resolve_required(settings.endpoint_url, "endpoint_url", ENDPOINT_URL_ENV, &lookup)?;

        Ok(Self {
            endpoint_url,
            api_token,
            task: settings.task,
            model_kwargs: settings.model_kwargs,
            timeout: settings.timeout_secs.map(Duration::from_secs),
        })
    }

    /// Set the model keyword arguments
    #[must_use]
    pub fn with_model_kwargs(mut self, model_kwargs: Map<String, Value>) -> Self {
        self.model_kwargs = Some(model_kwargs);
        self
    }

    /// Set the task metadata
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Set a request timeout (default: none)
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    #[must_use]
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    #[must_use]
    pub fn task(&self) -> Option<&str> {
        self.task.as_deref()
    }

    /// Model keyword arguments, empty when unset
    #[must_use]
    pub fn model_kwargs(&self) -> Map<String, Value> {
        self.model_kwargs.clone().unwrap_or_default()
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_token", &"<redacted>")
            .field("task", &self.task)
            .field("model_kwargs", &self.model_kwargs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_explicit_values_ignore_environment() {
        let settings = AdapterSettings {
            endpoint_url: Some("https://explicit".to_string()),
            api_token: Some("explicit-token".to_string()),
            ..Default::default()
        };
        let lookup = env(&[(ENDPOINT_URL_ENV, "https://env"), (API_TOKEN_ENV, "env-token")]);

        let config = AdapterConfig::from_settings_with(settings, lookup).unwrap();
        assert_eq!(config.endpoint_url(), "https://explicit");
        assert_eq!(config.api_token(), "explicit-token");
    }

    #[test]
    fn test_environment_fallback() {
        let lookup = env(&[(ENDPOINT_URL_ENV, "https://env"), (API_TOKEN_ENV, "env-token")]);

        let config = AdapterConfig::from_settings_with(AdapterSettings::default(), lookup).unwrap();
        assert_eq!(config.endpoint_url(), "https://env");
        assert_eq!(config.api_token(), "env-token");
        assert!(config.model_kwargs().is_empty());
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_missing_token_fails() {
        let lookup = env(&[(ENDPOINT_URL_ENV, "https://env")]);

        let err = AdapterConfig::from_settings_with(AdapterSettings::default(), lookup).unwrap_err();
        assert!(matches!(
            err,
            OctoAiError::Configuration {
                field: "api_token",
                env_var: API_TOKEN_ENV
            }
        ));
    }

    #[test]
    fn test_missing_endpoint_fails() {
        let settings = AdapterSettings {
            api_token: Some("token".to_string()),
            ..Default::default()
        };

        let err = AdapterConfig::from_settings_with(settings, env(&[])).unwrap_err();
        assert!(matches!(
            err,
            OctoAiError::Configuration {
                field: "endpoint_url",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        assert!(AdapterConfig::new("", "token").is_err());
        assert!(AdapterConfig::new("https://x", "").is_err());

        let settings = AdapterSettings {
            endpoint_url: Some(String::new()),
            api_token: Some("token".to_string()),
            ..Default::default()
        };
        let config =
            AdapterConfig::from_settings_with(settings, env(&[(ENDPOINT_URL_ENV, "https://env")]))
                .unwrap();
        assert_eq!(config.endpoint_url(), "https://env");
    }

    #[test]
    fn test_builders_and_timeout() {
        let mut kwargs = Map::new();
        kwargs.insert("temperature".to_string(), json!(0.1));

        let config = AdapterConfig::new("https://x", "token")
            .unwrap()
            .with_task("text-generation")
            .with_model_kwargs(kwargs.clone())
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.task(), Some("text-generation"));
        assert_eq!(config.model_kwargs(), kwargs);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));

        let from_file = AdapterConfig::from_settings_with(
            AdapterSettings {
                endpoint_url: Some("https://x".to_string()),
                api_token: Some("token".to_string()),
                timeout_secs: Some(7),
                ..Default::default()
            },
            env(&[]),
        )
        .unwrap();
        assert_eq!(from_file.timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = AdapterConfig::new("https://x", "super-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("https://x"));
    }
}
