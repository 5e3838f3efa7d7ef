//! Exchange Wallet: signing identity for exchange orders and trades
//!
//! This is the root crate that provides benchmark and integration-test
//! access to the workspace. For actual functionality, use the individual
//! crates directly:
//!
//! - `exchange-core`: Orders, trades, signatures, wallet records, storage
//! - `wallet`: Key lifecycle, signing, record codec
//! - `wallet-cli`: Command-line tooling

// Re-export for benchmarks
pub use exchange_core as core;
pub use wallet;
