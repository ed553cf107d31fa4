//! Pengu Checker - PENGU airdrop eligibility for a batch of Solana wallets
//!
//! Wallets are read from `wallets.txt`, proxies from `proxy.txt`. Each wallet
//! is checked against the clusters.xyz eligibility API through a randomly
//! picked proxy, failed wallets get one more try, and the result is printed
//! as a table sorted by unclaimed tokens.
//!
//! - [`client`] - the [`ClustersClient`] eligibility client
//! - [`profile`] - browser headers sent with every query
//! - [`report`] - result table and summary

pub mod client;
pub mod profile;
pub mod report;

pub use client::ClustersClient;
pub use report::{render_table, ReportSummary};
