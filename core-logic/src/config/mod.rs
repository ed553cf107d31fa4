use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Display for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.username {
            Some(user) => write!(f, "{} (user: {}, password: ***)", self.url, user),
            None => write!(f, "{}", self.url),
        }
    }
}

/// Runtime settings for a checker run.
///
/// Everything has a default so a bare invocation with `wallets.txt` and
/// `proxy.txt` in the working directory just works. Overrides come from the
/// process environment only; no settings file is read.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub wallets_file: PathBuf,
    pub proxies_file: PathBuf,
    pub eligibility_url: String,
    pub stagger: Duration,
    pub request_timeout: Duration,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            wallets_file: PathBuf::from(Self::DEFAULT_WALLETS_FILE),
            proxies_file: PathBuf::from(Self::DEFAULT_PROXIES_FILE),
            eligibility_url: Self::DEFAULT_ELIGIBILITY_URL.to_string(),
            stagger: Duration::from_millis(Self::DEFAULT_STAGGER_MS),
            request_timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CheckerConfig {
    pub const DEFAULT_WALLETS_FILE: &'static str = "wallets.txt";
    pub const DEFAULT_PROXIES_FILE: &'static str = "proxy.txt";
    pub const DEFAULT_ELIGIBILITY_URL: &'static str = "https://api.clusters.xyz";
    pub const DEFAULT_STAGGER_MS: u64 = 50;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub const ENV_WALLETS_FILE: &'static str = "PENGU_WALLETS_FILE";
    pub const ENV_PROXIES_FILE: &'static str = "PENGU_PROXY_FILE";
    pub const ENV_ELIGIBILITY_URL: &'static str = "PENGU_ELIGIBILITY_URL";
    pub const ENV_STAGGER_MS: &'static str = "PENGU_STAGGER_MS";
    pub const ENV_TIMEOUT_SECS: &'static str = "PENGU_TIMEOUT_SECS";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings from an arbitrary key lookup; unset or blank keys
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(path) = get(Self::ENV_WALLETS_FILE) {
            config.wallets_file = PathBuf::from(path);
        }
        if let Some(path) = get(Self::ENV_PROXIES_FILE) {
            config.proxies_file = PathBuf::from(path);
        }
        if let Some(url) = get(Self::ENV_ELIGIBILITY_URL) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: Self::ENV_ELIGIBILITY_URL.to_string(),
                    reason: format!("'{}' is not an http(s) URL", url),
                });
            }
            config.eligibility_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(Self::ENV_STAGGER_MS) {
            config.stagger = Duration::from_millis(parse_u64(Self::ENV_STAGGER_MS, &raw)?);
        }
        if let Some(raw) = get(Self::ENV_TIMEOUT_SECS) {
            let secs = parse_u64(Self::ENV_TIMEOUT_SECS, &raw)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: Self::ENV_TIMEOUT_SECS.to_string(),
                    reason: "request timeout must be at least 1 second".to_string(),
                });
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_u64(field: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|source| ConfigError::ParseError {
        field: field.to_string(),
        source,
    })
}
