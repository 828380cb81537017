//! Environment-derived settings, read once and injected into the services
//! that need them.
//!
//! Every loader has a `from_lookup` form taking a key → value function so
//! tests never touch the process environment; `from_env` just passes
//! `std::env::var`.

use std::time::Duration;

/// Where committed changes are announced when no URL is configured.
pub const DEFAULT_WEBHOOK_URL: &str = "https://api.github.com/repos/lcdb-dev/Front-End/dispatches";

/// Translation endpoint used when `DEEPL_API_URL` is unset.
pub const DEFAULT_DEEPL_URL: &str = "https://api.deepl.com/v2/translate";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Reads `key`, treating empty values as unset.
fn non_empty(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.is_empty())
}

fn timeout_from(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Duration {
    let secs = non_empty(lookup, key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Settings for the post-commit rebuild webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// `NODE_ENV=production` or `VERCEL_ENV=production`.
    pub production: bool,
    /// `FORCE_WEBHOOKS=true` dispatches outside production.
    pub force: bool,
    /// `ASTRO_WEBHOOK_URL`, defaulting to [`DEFAULT_WEBHOOK_URL`].
    pub url: String,
    /// `GITHUB_DISPATCH_TOKEN`; required for non-loopback destinations.
    pub token: Option<String>,
    /// `WEBHOOK_TIMEOUT_SECS`, default 10.
    pub timeout: Duration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            production: false,
            force: false,
            url: DEFAULT_WEBHOOK_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl WebhookConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let production = ["NODE_ENV", "VERCEL_ENV"]
            .into_iter()
            .any(|key| lookup(key).as_deref() == Some("production"));

        Self {
            production,
            force: lookup("FORCE_WEBHOOKS").as_deref() == Some("true"),
            url: non_empty(&lookup, "ASTRO_WEBHOOK_URL")
                .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string()),
            token: non_empty(&lookup, "GITHUB_DISPATCH_TOKEN"),
            timeout: timeout_from(&lookup, "WEBHOOK_TIMEOUT_SECS"),
        }
    }

    /// A production configuration pointing at `url`.
    pub fn production(url: impl Into<String>) -> Self {
        Self {
            production: true,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Dispatch happens in production or when forced.
    pub fn dispatch_enabled(&self) -> bool {
        self.production || self.force
    }
}

/// Settings for the translation proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateConfig {
    /// `DEEPL_API_KEY`.
    pub api_key: Option<String>,
    /// `DEEPL_API_URL`, defaulting to [`DEFAULT_DEEPL_URL`].
    pub api_url: String,
    /// `TRANSLATE_TIMEOUT_SECS`, default 10.
    pub timeout: Duration,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_DEEPL_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TranslateConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: non_empty(&lookup, "DEEPL_API_KEY"),
            api_url: non_empty(&lookup, "DEEPL_API_URL")
                .unwrap_or_else(|| DEFAULT_DEEPL_URL.to_string()),
            timeout: timeout_from(&lookup, "TRANSLATE_TIMEOUT_SECS"),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = WebhookConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, WebhookConfig::default());
        assert!(!config.dispatch_enabled());
    }

    #[test]
    fn either_production_variable_enables_dispatch() {
        let config = WebhookConfig::from_lookup(lookup_from(&[("VERCEL_ENV", "production")]));
        assert!(config.production);
        let config = WebhookConfig::from_lookup(lookup_from(&[("NODE_ENV", "development")]));
        assert!(!config.production);
    }

    #[test]
    fn force_flag_requires_literal_true() {
        let forced = WebhookConfig::from_lookup(lookup_from(&[("FORCE_WEBHOOKS", "true")]));
        assert!(forced.dispatch_enabled());
        let not_forced = WebhookConfig::from_lookup(lookup_from(&[("FORCE_WEBHOOKS", "1")]));
        assert!(!not_forced.dispatch_enabled());
    }

    #[test]
    fn empty_values_are_unset() {
        let config = WebhookConfig::from_lookup(lookup_from(&[
            ("ASTRO_WEBHOOK_URL", ""),
            ("GITHUB_DISPATCH_TOKEN", ""),
        ]));
        assert_eq!(config.url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.token, None);
    }

    #[test]
    fn whitespace_token_is_kept() {
        let config = WebhookConfig::from_lookup(lookup_from(&[("GITHUB_DISPATCH_TOKEN", " ")]));
        assert_eq!(config.token.as_deref(), Some(" "));
    }

    #[test]
    fn url_token_and_timeout_are_read() {
        let config = WebhookConfig::from_lookup(lookup_from(&[
            ("ASTRO_WEBHOOK_URL", "http://localhost:4321/rebuild"),
            ("GITHUB_DISPATCH_TOKEN", "ghp_x"),
            ("WEBHOOK_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.url, "http://localhost:4321/rebuild");
        assert_eq!(config.token.as_deref(), Some("ghp_x"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_timeout_falls_back() {
        let config = WebhookConfig::from_lookup(lookup_from(&[("WEBHOOK_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn translate_config_reads_key_and_url() {
        let config = TranslateConfig::from_lookup(lookup_from(&[
            ("DEEPL_API_KEY", "k"),
            ("DEEPL_API_URL", "https://api-free.deepl.com/v2/translate"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.api_url, "https://api-free.deepl.com/v2/translate");
        let empty = TranslateConfig::from_lookup(lookup_from(&[]));
        assert_eq!(empty, TranslateConfig::default());
    }
}
