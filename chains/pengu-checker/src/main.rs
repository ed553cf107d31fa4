use anyhow::Result;
use core_logic::{
    exit_fatal, setup_logger, CheckerConfig, ProxyManager, ProxySelector, WalletManager,
    WorkerRunner,
};
use pengu_checker::{render_table, ClustersClient, ReportSummary};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let guard = setup_logger();
    info!("Starting the application");

    let config = match CheckerConfig::from_env() {
        Ok(c) => c,
        Err(e) => exit_fatal(format!("Failed to load config: {}", e), guard),
    };

    let proxies = match ProxyManager::load_proxies(&config.proxies_file) {
        Ok(p) => p,
        Err(e) => exit_fatal(format!("Failed to load proxies: {}", e), guard),
    };
    info!("Proxies set up. Total proxies: {}", proxies.len());

    let wallets = match WalletManager::load_wallets(&config.wallets_file) {
        Ok(w) => w,
        Err(e) => exit_fatal(format!("Failed to load wallets: {}", e), guard),
    };
    info!("Wallets set up. Total wallets: {}", wallets.len());

    let selector = Arc::new(ProxySelector::new(proxies));
    let client = ClustersClient::new(selector)
        .with_base_url(config.eligibility_url.as_str())
        .with_timeout(config.request_timeout);

    let runner = WorkerRunner::new(Arc::new(client), config.stagger);
    let results = runner.run(&wallets).await;

    info!("All tasks completed. Generating result table.");
    print!("{}", render_table(&results));

    info!("{}", ReportSummary::from_results(&results));
    info!("Application finished.");

    drop(guard);
    Ok(())
}
