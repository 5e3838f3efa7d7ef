//! Personal-message signing helpers.
//!
//! Wallets never sign a domain digest directly. The digest is wrapped in the
//! `"\x19Ethereum Signed Message:\n32"` preamble and hashed again, so any
//! verifier that follows the personal-message convention can recover the
//! signer from the signature alone.
//!
//! # Flow
//!
//! ```text
//! Order / Trade ── compute_hash ──► digest
//!                                     │
//!                    personal_message_hash(digest)
//!                                     │
//!                                     ▼
//!                          secp256k1 sign / recover
//! ```

pub mod signable;

use alloy_primitives::{keccak256, Address, B256};

pub use signable::Signable;

use crate::types::Signature;

/// Preamble prepended to a 32-byte digest before signing.
pub const PERSONAL_MESSAGE_PREFIX: &[u8; 28] = b"\x19Ethereum Signed Message:\n32";

/// Hash of the preamble followed by `digest`. This is the value actually
/// passed to ECDSA.
pub fn personal_message_hash(digest: B256) -> B256 {
    let mut buf = [0u8; 60];
    buf[..28].copy_from_slice(PERSONAL_MESSAGE_PREFIX);
    buf[28..].copy_from_slice(digest.as_slice());
    keccak256(buf)
}

/// Check that `signature` over `digest` was produced by `address`.
pub fn verify(address: Address, digest: B256, signature: &Signature) -> bool {
    match signature.recover_address(digest) {
        Ok(recovered) => recovered == address,
        Err(e) => {
            tracing::debug!(error = %e, "Signature recovery failed");
            false
        }
    }
}
