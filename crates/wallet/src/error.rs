//! Wallet error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    /// The entropy source failed or produced an unusable scalar.
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Malformed hex, wrong length, or a scalar outside `1..n`.
    #[error("Invalid private key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// A stored record that cannot describe a valid wallet.
    #[error("Wallet record decode failed: {0}")]
    RecordDecodeFailed(String),

    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),
}

pub type Result<T> = std::result::Result<T, WalletError>;
