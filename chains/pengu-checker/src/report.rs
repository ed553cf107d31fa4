use core_logic::WalletResult;
use std::fmt::Write;

const RULE: &str = "----------------------------------------------------";
const FAILED: &str = "Failed";

/// Renders the final table. Rows are printed in the order given, so pass
/// results that have already been sorted by the runner.
pub fn render_table(results: &[WalletResult]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "\nWallet Results Table:");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{:<42} | {:<15}", "Wallet Public Key", "Unclaimed Tokens");
    let _ = writeln!(out, "{}", RULE);
    for result in results {
        if result.is_failed() {
            let _ = writeln!(out, "{:<42} | {:<15}", result.public_key, FAILED);
        } else {
            let _ = writeln!(out, "{:<42} | {:<15}", result.public_key, result.unclaimed);
        }
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub eligible: usize,
    pub zero: usize,
    pub failed: usize,
    pub total_unclaimed: u64,
}

impl ReportSummary {
    pub fn from_results(results: &[WalletResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Default::default()
            },
            |mut acc, r| {
                if r.is_failed() {
                    acc.failed += 1;
                } else if r.unclaimed > 0 {
                    acc.eligible += 1;
                    acc.total_unclaimed = acc.total_unclaimed.saturating_add(r.unclaimed);
                } else {
                    acc.zero += 1;
                }
                acc
            },
        )
    }
}

impl std::fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wallets: {} | Eligible: {} | Zero: {} | Failed: {} | Total Unclaimed: {}",
            self.total, self.eligible, self.zero, self.failed, self.total_unclaimed
        )
    }
}
