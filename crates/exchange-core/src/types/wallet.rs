//! Storage-facing wallet record.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flat projection of a wallet as it is stored.
///
/// Only the persistence boundary deals in records; signing always goes
/// through a decoded wallet.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Checksummed hex address.
    pub address: String,
    /// Hex-encoded private key scalar.
    pub private_key: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub operator: bool,
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("id", &self.id)
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .field("admin", &self.admin)
            .field("operator", &self.operator)
            .finish()
    }
}
