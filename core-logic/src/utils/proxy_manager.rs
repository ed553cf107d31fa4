use crate::config::ProxyConfig;
use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

pub struct ProxyManager;

impl ProxyManager {
    /// Loads proxies from a file.
    /// Format expected: independent lines of ip:port:username:password
    pub fn load_proxies(path: impl AsRef<Path>) -> Result<Vec<ProxyConfig>, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: shown });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: shown.clone(),
            msg: e.to_string(),
        })?;

        let proxies = Self::parse_proxies(&content);
        info!("Loaded {} proxies from {}", proxies.len(), shown);
        Ok(proxies)
    }

    pub fn parse_proxies(content: &str) -> Vec<ProxyConfig> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let parsed = Self::parse_proxy_line(line);
                if parsed.is_none() {
                    warn!("Skipping invalid proxy line: {}", redact_line(line));
                }
                parsed
            })
            .collect()
    }

    /// host:port:user:pass -> exactly 4 parts, anything else is rejected
    pub fn parse_proxy_line(line: &str) -> Option<ProxyConfig> {
        let parts: Vec<&str> = line.trim().split(':').collect();
        if parts.len() != 4 {
            return None;
        }

        let (host, port) = (parts[0].trim(), parts[1].trim());
        if host.is_empty() || port.parse::<u16>().is_err() {
            return None;
        }

        Some(ProxyConfig {
            url: format!("http://{}:{}", host, port),
            username: Some(parts[2].to_string()),
            password: Some(parts[3].to_string()),
        })
    }
}

// Proxy lines carry credentials; only the host part goes to the logs.
fn redact_line(line: &str) -> String {
    let fields = line.split(':').count();
    let host = line.split(':').next().unwrap_or_default();
    format!("{}:<{} fields>", host, fields)
}

/// Uniform random pick over a read-only proxy pool.
///
/// The random source is owned by the selector and created once; use
/// [`ProxySelector::seeded`] or [`ProxySelector::with_rng`] for reproducible
/// sequences.
pub struct ProxySelector<R = StdRng> {
    proxies: Vec<ProxyConfig>,
    rng: Mutex<R>,
}

impl ProxySelector<StdRng> {
    pub fn new(proxies: Vec<ProxyConfig>) -> Self {
        Self::with_rng(proxies, StdRng::from_entropy())
    }

    pub fn seeded(proxies: Vec<ProxyConfig>, seed: u64) -> Self {
        Self::with_rng(proxies, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> ProxySelector<R> {
    pub fn with_rng(proxies: Vec<ProxyConfig>, rng: R) -> Self {
        Self {
            proxies,
            rng: Mutex::new(rng),
        }
    }

    /// `None` means the pool is empty and the caller should go direct.
    pub fn pick(&self) -> Option<&ProxyConfig> {
        if self.proxies.is_empty() {
            return None;
        }
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let index = rng.gen_range(0..self.proxies.len());
        self.proxies.get(index)
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
