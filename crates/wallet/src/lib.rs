//! Exchange Wallet
//!
//! A signing identity for exchange orders and trades: key generation and
//! import, personal-message signatures, and the storage record codec.

pub mod codec;
pub mod error;
pub mod wallet;

pub use error::{Result, WalletError};
pub use wallet::Wallet;
