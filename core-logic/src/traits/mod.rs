use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Decoded eligibility answer for one public key.
///
/// Missing fields decode to zero/empty and unknown fields are ignored, so a
/// "not eligible" body such as `{}` is a successful zero allocation.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_unclaimed: u64,
    #[serde(default)]
    pub categories: Vec<serde_json::Value>,
    #[serde(default)]
    pub addresses: Vec<String>,
}

#[async_trait]
pub trait AllocationSource: Send + Sync {
    /// Queries the allocation for a single public key.
    ///
    /// Any error is a transient request failure as far as the runner is
    /// concerned; the wallet becomes a retry candidate.
    async fn fetch_allocation(&self, public_key: &str) -> Result<AllocationRecord>;
}
