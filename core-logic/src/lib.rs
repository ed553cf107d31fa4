//! # Core Logic - Shared Machinery for Airdrop Checkers
//!
//! This crate provides the pieces every eligibility checker needs: loading
//! wallets and proxies, picking a proxy per request, and the two-round
//! concurrent runner that turns a batch of wallets into a sorted report.
//!
//! ## Modules
//!
//! - [`config`] - Runtime settings and proxy endpoint type
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - The [`AllocationSource`] seam implemented by HTTP clients
//! - [`utils`] - Logger, proxy/wallet loading, and the worker runner

// Module declarations - internal modules marked pub(crate)
pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

// Selective exports - only public API types
pub use config::{CheckerConfig, ProxyConfig};
pub use error::{ConfigError, NetworkError, WalletError};
pub use traits::{AllocationRecord, AllocationSource};

// Utils are pub(crate) - only export specific public utilities
pub use utils::{
    check_wallet, exit_fatal, format_line, setup_logger, sort_results, ProxyManager,
    ProxySelector, Severity, WalletCredential, WalletManager, WalletResult, WorkerRunner,
    FATAL_TARGET, SUCCESS_TARGET,
};
