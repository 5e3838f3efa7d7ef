//! Core domain types for the exchange.

pub mod order;
pub mod signature;
pub mod trade;
pub mod wallet;

pub use order::*;
pub use signature::*;
pub use trade::*;
pub use wallet::*;
