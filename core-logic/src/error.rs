//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Setup errors. Any of these ends the run before a wallet is dispatched.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Parse error for '{field}': {source}")]
    ParseError {
        field: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error reading {path}: {msg}")]
    IoError { path: String, msg: String },
}

/// Credential derivation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Invalid private key format: expected base58 string")]
    InvalidKeyFormat,

    #[error("Invalid keypair length: expected 64 bytes, got {length}")]
    InvalidKeyLength { length: usize },

    #[error("Wallet address mismatch: expected {expected}, got {actual}")]
    AddressMismatch { expected: String, actual: String },
}

/// Eligibility request errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Failed to create HTTP client: {reason}")]
    ClientBuild { reason: String },

    #[error("Invalid proxy {proxy}: {reason}")]
    InvalidProxy { proxy: String, reason: String },

    #[error("Request timeout after {timeout_ms}ms to {endpoint}")]
    Timeout { timeout_ms: u64, endpoint: String },

    #[error("Failed to send request to {endpoint}: {reason}")]
    Request { endpoint: String, reason: String },

    #[error("Failed to read response body from {endpoint}: {reason}")]
    Body { endpoint: String, reason: String },

    #[error("Failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}
