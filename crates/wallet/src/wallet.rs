//! Wallet key management and signing.
//!
//! A [`Wallet`] owns one secp256k1 private key and the address derived from
//! it. It signs exchange digests with the personal-message convention and
//! attaches the results to orders and trades.

use std::fmt;

use alloy_primitives::{Address, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use exchange_core::config::WALLET_PRIVATE_KEY_VAR;
use exchange_core::{personal_message_hash, Order, Signable, Signature, Trade};
use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, WalletError};

/// An exchange identity: a private key, its address, and role flags.
///
/// The address is always derived from the key; there is no way to set one
/// without the other.
#[derive(Clone)]
pub struct Wallet {
    id: Option<Uuid>,
    address: Address,
    signer: PrivateKeySigner,
    admin: bool,
    operator: bool,
}

impl Wallet {
    /// Create a wallet with a fresh key from the operating system's CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::KeyGenerationFailed`] if the OS entropy source
    /// is unavailable.
    pub fn new() -> Result<Self> {
        Self::random_with(&mut OsRng)
    }

    /// Create a wallet with a key drawn from `rng`.
    ///
    /// The 32 bytes drawn must form a valid scalar; a zero or out-of-range
    /// value is reported as a generation failure rather than retried, since
    /// it only happens with a broken entropy source.
    pub fn random_with<R: TryRngCore>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; 32];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| WalletError::KeyGenerationFailed(e.to_string()))?;

        let signer = PrivateKeySigner::from_bytes(&B256::from(bytes)).map_err(|_| {
            WalletError::KeyGenerationFailed(
                "entropy source produced an invalid secp256k1 scalar".to_string(),
            )
        })?;

        let wallet = Self::from_signer(signer);
        debug!(address = %wallet.address, "Generated wallet");
        Ok(wallet)
    }

    /// Create a wallet from a hex-encoded private key.
    ///
    /// # Arguments
    ///
    /// * `key` - Up to 64 hex characters, optionally prefixed with "0x".
    ///   Shorter keys are read as big-endian with leading zeros omitted.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidKeyFormat`] if the string is not an
    /// even-length hex string of at most 32 bytes, or if the scalar is zero
    /// or not below the curve order.
    pub fn from_private_key(key: &str) -> Result<Self> {
        let signer = parse_private_key(key)?;
        let wallet = Self::from_signer(signer);
        debug!(address = %wallet.address, "Loaded wallet from private key");
        Ok(wallet)
    }

    /// Load a wallet from the `WALLET_PRIVATE_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let key = std::env::var(WALLET_PRIVATE_KEY_VAR)
            .map_err(|_| WalletError::MissingEnv(WALLET_PRIVATE_KEY_VAR))?;

        Self::from_private_key(&key)
    }

    pub(crate) fn from_signer(signer: PrivateKeySigner) -> Self {
        Self {
            id: None,
            address: signer.address(),
            signer,
            admin: false,
            operator: false,
        }
    }

    /// Set the storage id.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the role flags.
    pub fn with_roles(mut self, admin: bool, operator: bool) -> Self {
        self.admin = admin;
        self.operator = operator;
        self
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the wallet address as an EIP-55 checksummed hex string.
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Hex encoding of the private key, without a `0x` prefix and with
    /// leading zero bytes stripped.
    pub fn private_key(&self) -> String {
        let bytes = self.signer.to_bytes();
        let start = bytes.iter().position(|b| *b != 0).unwrap_or(0);
        hex::encode(&bytes[start..])
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn is_operator(&self) -> bool {
        self.operator
    }

    /// Hook for wallet-level invariant checks. Currently nothing can be
    /// invalid once a wallet is constructed.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Sign a 32-byte digest.
    ///
    /// The digest is wrapped as `keccak256("\x19Ethereum Signed Message:\n32" ‖ digest)`
    /// before signing, and `v` is returned as the recovery id plus 27.
    pub fn sign_hash(&self, digest: B256) -> Result<Signature> {
        let message = personal_message_hash(digest);

        let raw = self
            .signer
            .sign_hash_sync(&message)
            .map_err(|e| WalletError::SigningFailed(e.to_string()))?;

        let signature = Signature::from_parts(
            B256::from(raw.r().to_be_bytes::<32>()),
            B256::from(raw.s().to_be_bytes::<32>()),
            raw.v(),
        );

        debug!(address = %self.address, digest = %digest, v = signature.v(), "Signed digest");
        Ok(signature)
    }

    /// Sign a [`Signable`] and attach its hash and signature.
    ///
    /// Either both fields are set or, on error, the item is left untouched.
    pub fn sign<S: Signable>(&self, item: &mut S) -> Result<()> {
        let hash = item.compute_hash();
        let signature = self.sign_hash(hash)?;
        item.attach_signature(hash, signature);
        Ok(())
    }

    /// Sign an order in place.
    pub fn sign_order(&self, order: &mut Order) -> Result<()> {
        self.sign(order)
    }

    /// Sign a trade in place.
    pub fn sign_trade(&self, trade: &mut Trade) -> Result<()> {
        self.sign(trade)
    }

    /// Check that `signature` over `digest` was made by this wallet.
    pub fn verify(&self, digest: B256, signature: &Signature) -> bool {
        exchange_core::verify(self.address, digest, signature)
    }
}

/// Parse a hex private key into a signer, left-padding to 32 bytes.
pub(crate) fn parse_private_key(key: &str) -> Result<PrivateKeySigner> {
    let key = key.trim();
    let digits = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);

    if digits.is_empty() || digits.len() > 64 {
        return Err(WalletError::InvalidKeyFormat(format!(
            "expected 1 to 64 hex characters, got {}",
            digits.len()
        )));
    }

    let bytes = hex::decode(digits).map_err(|e| WalletError::InvalidKeyFormat(e.to_string()))?;

    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);

    PrivateKeySigner::from_bytes(&B256::from(padded)).map_err(|_| {
        WalletError::InvalidKeyFormat("scalar must be non-zero and below the curve order".to_string())
    })
}

#[derive(Serialize)]
struct PublicView {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    address: String,
    admin: bool,
    operator: bool,
}

impl fmt::Display for Wallet {
    /// Pretty-printed JSON of the public fields, for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = PublicView {
            id: self.id,
            address: self.address_string(),
            admin: self.admin,
            operator: self.operator,
        };
        let json = serde_json::to_string_pretty(&view).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose the private key in debug output
        f.debug_struct("Wallet")
            .field("id", &self.id)
            .field("address", &self.address_string())
            .field("admin", &self.admin)
            .field("operator", &self.operator)
            .finish()
    }
}
