//! Exchange Core Library
//!
//! Shared order and trade types, personal-message signing helpers, and
//! storage for wallet records.

pub mod config;
pub mod db;
pub mod error;
pub mod signing;
pub mod types;

pub use error::{Error, Result};
pub use signing::{personal_message_hash, verify, Signable};
pub use types::{Order, Signature, Trade, WalletRecord};
