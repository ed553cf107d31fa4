use crate::error::{ConfigError, WalletError};
use ed25519_dalek::SigningKey;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const KEYPAIR_LEN: usize = 64;
const SECRET_LEN: usize = 32;

/// Base58-encoded Solana keypair (32-byte secret followed by the 32-byte
/// public key), as exported by Phantom and `solana-keygen`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletCredential {
    secret: String,
}

impl fmt::Debug for WalletCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCredential")
            .field("secret", &"***REDACTED***")
            .finish()
    }
}

impl WalletCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Derives the base58 public key and checks it against the public half
    /// embedded in the keypair.
    pub fn public_key(&self) -> Result<String, WalletError> {
        let bytes = Zeroizing::new(
            bs58::decode(self.secret.trim())
                .into_vec()
                .map_err(|_| WalletError::InvalidKeyFormat)?,
        );

        if bytes.len() != KEYPAIR_LEN {
            return Err(WalletError::InvalidKeyLength {
                length: bytes.len(),
            });
        }

        let mut seed = Zeroizing::new([0u8; SECRET_LEN]);
        seed.copy_from_slice(&bytes[..SECRET_LEN]);
        let derived = SigningKey::from_bytes(&seed).verifying_key().to_bytes();

        let embedded = &bytes[SECRET_LEN..];
        if derived.as_slice() != embedded {
            return Err(WalletError::AddressMismatch {
                expected: bs58::encode(embedded).into_string(),
                actual: bs58::encode(derived).into_string(),
            });
        }

        Ok(bs58::encode(derived).into_string())
    }
}

pub struct WalletManager;

impl WalletManager {
    /// Reads one credential per line, keeping file order.
    ///
    /// Lines are not validated here: a bad key still occupies its slot and
    /// shows up as a failed wallet in the report.
    pub fn load_wallets(path: impl AsRef<Path>) -> Result<Vec<WalletCredential>, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: shown });
        }

        let content = Zeroizing::new(fs::read_to_string(path).map_err(|e| {
            ConfigError::IoError {
                path: shown.clone(),
                msg: e.to_string(),
            }
        })?);

        let wallets = Self::parse_wallets(&content);
        info!("Loaded {} wallets from {}", wallets.len(), shown);
        Ok(wallets)
    }

    pub fn parse_wallets(content: &str) -> Vec<WalletCredential> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(WalletCredential::new)
            .collect()
    }
}
