//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

// Internal modules - not part of public API
pub(crate) mod logger;
pub(crate) mod proxy_manager;
pub(crate) mod runner;
pub(crate) mod wallet_manager;

// Selective exports - only public utilities
pub use logger::{exit_fatal, format_line, setup_logger, Severity, FATAL_TARGET, SUCCESS_TARGET};
pub use proxy_manager::{ProxyManager, ProxySelector};
pub use runner::{check_wallet, sort_results, WalletResult, WorkerRunner};
pub use wallet_manager::{WalletCredential, WalletManager};
