//! Conversion between [`Wallet`] and its storage record.

use alloy_primitives::Address;
use exchange_core::WalletRecord;

use crate::error::{Result, WalletError};
use crate::wallet::{parse_private_key, Wallet};

impl Wallet {
    /// Project the wallet into its flat storage form.
    pub fn to_record(&self) -> WalletRecord {
        WalletRecord {
            id: self.id(),
            address: self.address_string(),
            private_key: self.private_key(),
            admin: self.is_admin(),
            operator: self.is_operator(),
        }
    }

    /// Rebuild a wallet from a stored record.
    ///
    /// The stored address is parsed without checksum validation, but it must
    /// be the address of the stored key.
    ///
    /// # Errors
    ///
    /// [`WalletError::InvalidKeyFormat`] for a bad key,
    /// [`WalletError::RecordDecodeFailed`] for a malformed address or one
    /// that belongs to a different key.
    pub fn from_record(record: &WalletRecord) -> Result<Self> {
        let signer = parse_private_key(&record.private_key)?;
        let stored = parse_address(&record.address)?;
        let mut wallet = Wallet::from_signer(signer).with_roles(record.admin, record.operator);

        if wallet.address() != stored {
            return Err(WalletError::RecordDecodeFailed(format!(
                "stored address {} does not match key address {}",
                record.address,
                wallet.address_string()
            )));
        }

        if let Some(id) = record.id {
            wallet = wallet.with_id(id);
        }

        Ok(wallet)
    }
}

const ADDRESS_LEN: usize = 20;

fn parse_address(value: &str) -> Result<Address> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    let bytes = hex::decode(digits)
        .map_err(|e| WalletError::RecordDecodeFailed(format!("invalid address hex: {}", e)))?;

    if bytes.len() != ADDRESS_LEN {
        return Err(WalletError::RecordDecodeFailed(format!(
            "address must be 20 bytes, got {}",
            bytes.len()
        )));
    }

    Ok(Address::from_slice(&bytes))
}

impl From<&Wallet> for WalletRecord {
    fn from(wallet: &Wallet) -> Self {
        wallet.to_record()
    }
}

impl TryFrom<&WalletRecord> for Wallet {
    type Error = WalletError;

    fn try_from(record: &WalletRecord) -> Result<Self> {
        Wallet::from_record(record)
    }
}
