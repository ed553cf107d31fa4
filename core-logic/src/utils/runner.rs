use crate::traits::AllocationSource;
use crate::utils::logger::SUCCESS_TARGET;
use crate::utils::wallet_manager::WalletCredential;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{error, info};

const NOT_PROCESSED: &str = "not processed";

/// Outcome for one input wallet, addressed by its position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletResult {
    pub index: usize,
    pub public_key: String,
    pub unclaimed: u64,
    pub failure: Option<String>,
}

impl WalletResult {
    /// Slot value before any attempt has written to it.
    pub fn pending(index: usize) -> Self {
        Self::failed(index, format!("<wallet #{}>", index + 1), NOT_PROCESSED)
    }

    pub fn success(index: usize, public_key: impl Into<String>, unclaimed: u64) -> Self {
        Self {
            index,
            public_key: public_key.into(),
            unclaimed,
            failure: None,
        }
    }

    pub fn failed(index: usize, public_key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            public_key: public_key.into(),
            unclaimed: 0,
            failure: Some(reason.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

fn placeholder_key(index: usize) -> String {
    format!("<invalid wallet #{}>", index + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Round {
    First,
    Retry,
}

impl Round {
    fn name(&self) -> &'static str {
        match self {
            Round::First => "initial",
            Round::Retry => "retry",
        }
    }
}

/// Two-round wallet dispatcher.
///
/// Round one launches every wallet; round two relaunches exactly the slots
/// that failed. Each round ends on a barrier that observes every launched
/// task once, so no retry starts before round one is fully drained.
pub struct WorkerRunner {
    source: Arc<dyn AllocationSource>,
    stagger: Duration,
}

impl WorkerRunner {
    pub fn new(source: Arc<dyn AllocationSource>, stagger: Duration) -> Self {
        Self { source, stagger }
    }

    /// Runs both rounds and returns one result per wallet, sorted for the
    /// report.
    pub async fn run(&self, wallets: &[WalletCredential]) -> Vec<WalletResult> {
        let mut results: Vec<WalletResult> = (0..wallets.len()).map(WalletResult::pending).collect();

        info!("Beginning to process {} wallets", wallets.len());
        self.dispatch_round(Round::First, wallets, 0..wallets.len(), &mut results)
            .await;

        let retry: Vec<usize> = results
            .iter()
            .filter(|r| r.is_failed())
            .map(|r| r.index)
            .collect();

        if retry.is_empty() {
            info!("No failed wallets, skipping retry round");
        } else {
            info!("Retrying {} failed wallets", retry.len());
            self.dispatch_round(Round::Retry, wallets, retry, &mut results)
                .await;
        }

        sort_results(&mut results);
        results
    }

    async fn dispatch_round<I>(
        &self,
        round: Round,
        wallets: &[WalletCredential],
        indices: I,
        results: &mut [WalletResult],
    ) where
        I: IntoIterator<Item = usize>,
    {
        let start_time = Instant::now();
        let mut set = JoinSet::new();

        for index in indices {
            tokio::time::sleep(self.stagger).await;

            let public_key = match wallets[index].public_key() {
                Ok(pk) => pk,
                Err(e) => {
                    error!("Wallet {}: cannot derive public key: {}", index + 1, e);
                    results[index] = WalletResult::failed(index, placeholder_key(index), e.to_string());
                    continue;
                }
            };

            if round == Round::Retry {
                info!("Retrying failed wallet {}: {}", index + 1, public_key);
            }

            let source = Arc::clone(&self.source);
            set.spawn(check_wallet(index, public_key, source));
        }

        info!(
            "Waiting for {} {} tasks to complete",
            set.len(),
            round.name()
        );

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => {
                    let index = result.index;
                    results[index] = result;
                }
                Err(e) => {
                    error!("A wallet task panicked or failed to join: {:?}", e);
                }
            }
        }

        info!(
            "Finished {} round in {:.1}s",
            round.name(),
            start_time.elapsed().as_secs_f64()
        );
    }
}

/// Queries one wallet. Never retries; the runner decides that for the batch.
pub async fn check_wallet(
    index: usize,
    public_key: String,
    source: Arc<dyn AllocationSource>,
) -> WalletResult {
    info!("Processing wallet {}: {}", index + 1, public_key);

    let start_time = Instant::now();
    match source.fetch_allocation(&public_key).await {
        Ok(record) => {
            info!(
                target: SUCCESS_TARGET,
                "Result from wallet {}: {}, unclaimed: {}, processing time: {:.2?}",
                index + 1,
                public_key,
                record.total_unclaimed,
                start_time.elapsed()
            );
            WalletResult::success(index, public_key, record.total_unclaimed)
        }
        Err(e) => {
            error!(
                "Error processing wallet {}: {}. Error: {:#}",
                index + 1,
                public_key,
                e
            );
            WalletResult::failed(index, public_key, format!("{:#}", e))
        }
    }
}

/// Descending by unclaimed amount; equal amounts keep input order.
pub fn sort_results(results: &mut [WalletResult]) {
    results.sort_by(|a, b| b.unclaimed.cmp(&a.unclaimed).then(a.index.cmp(&b.index)));
}
