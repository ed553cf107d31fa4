//! Clusters eligibility client.
//!
//! Every query gets its own `rquest::Client`: own cookie jar, own proxy, and
//! a browser TLS/HTTP2 handshake (see [`crate::profile::emulation`]). The
//! proxy is chosen once per client, so a request never hops between exits
//! mid-flight.

use crate::profile::{browser_headers, emulation};
use anyhow::Result;
use async_trait::async_trait;
use core_logic::{
    AllocationRecord, AllocationSource, CheckerConfig, NetworkError, ProxyConfig, ProxySelector,
};
use rquest::cookie::Jar;
use rquest::redirect::Policy;
use rquest::{Client, Proxy};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub const ELIGIBILITY_PATH: &str = "/v0.1/airdrops/pengu/eligibility";

pub struct ClustersClient {
    proxies: Arc<ProxySelector>,
    base_url: String,
    timeout: Duration,
}

impl ClustersClient {
    pub fn new(proxies: Arc<ProxySelector>) -> Self {
        Self {
            proxies,
            base_url: CheckerConfig::DEFAULT_ELIGIBILITY_URL.to_string(),
            timeout: Duration::from_secs(CheckerConfig::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self, public_key: &str) -> String {
        format!("{}{}/{}", self.base_url, ELIGIBILITY_PATH, public_key)
    }

    fn build_client(&self, proxy: Option<&ProxyConfig>) -> Result<Client, NetworkError> {
        let mut builder = Client::builder()
            .emulation(emulation())
            .timeout(self.timeout)
            .redirect(Policy::none())
            .cookie_provider(Arc::new(Jar::default()));

        builder = match proxy {
            Some(proxy_conf) => {
                let mut proxy =
                    Proxy::all(&proxy_conf.url).map_err(|e| NetworkError::InvalidProxy {
                        proxy: proxy_conf.url.clone(),
                        reason: e.to_string(),
                    })?;
                if let (Some(u), Some(p)) = (&proxy_conf.username, &proxy_conf.password) {
                    proxy = proxy.basic_auth(u, p);
                }
                builder.proxy(proxy)
            }
            // No pool: go direct, ignoring any HTTP(S)_PROXY in the environment
            None => builder.no_proxy(),
        };

        builder.build().map_err(|e| NetworkError::ClientBuild {
            reason: e.to_string(),
        })
    }

    fn request_error(&self, endpoint: &str, err: rquest::Error) -> NetworkError {
        if err.is_timeout() {
            NetworkError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
                endpoint: endpoint.to_string(),
            }
        } else {
            NetworkError::Request {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl AllocationSource for ClustersClient {
    async fn fetch_allocation(&self, public_key: &str) -> Result<AllocationRecord> {
        let proxy = self.proxies.pick();
        match proxy {
            Some(p) => debug!("Using proxy {} for {}", p, public_key),
            None => debug!("No proxies available, connecting directly for {}", public_key),
        }

        let client = self.build_client(proxy)?;
        let endpoint = self.endpoint(public_key);

        let request = client
            .get(&endpoint)
            .headers(browser_headers())
            .build()
            .map_err(|e| NetworkError::Request {
                endpoint: endpoint.clone(),
                reason: format!("failed to create request: {}", e),
            })?;

        let response = client
            .execute(request)
            .await
            .map_err(|e| self.request_error(&endpoint, e))?;

        info!("Status code: {} for {}", response.status().as_u16(), public_key);

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                self.request_error(&endpoint, e)
            } else {
                NetworkError::Body {
                    endpoint: endpoint.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        let record: AllocationRecord =
            serde_json::from_slice(&body).map_err(|e| NetworkError::Decode {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        info!("Allocation Size for {}: {:?}", public_key, record);
        Ok(record)
    }
}
