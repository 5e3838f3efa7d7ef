//! Capability shared by every artifact a wallet can sign.

use alloy_primitives::{Address, B256};

use crate::types::Signature;

/// An exchange artifact with a canonical hash and slots for the signer's
/// output.
///
/// Implementors only store what they are given; the wallet decides when
/// both slots are filled, and fills them together.
pub trait Signable {
    /// Canonical digest of the artifact's content.
    fn compute_hash(&self) -> B256;

    /// Hash recorded at signing time, if signed.
    fn hash(&self) -> Option<B256>;

    /// Signature recorded at signing time, if signed.
    fn signature(&self) -> Option<&Signature>;

    /// Store a hash and its signature. Called once signing has succeeded.
    fn attach_signature(&mut self, hash: B256, signature: Signature);

    /// Whether the artifact carries a signature.
    fn is_signed(&self) -> bool {
        self.signature().is_some()
    }

    /// Check the stored hash still matches the content and the stored
    /// signature was made by `signer`.
    fn is_signed_by(&self, signer: Address) -> bool {
        match (self.hash(), self.signature()) {
            (Some(hash), Some(signature)) => {
                hash == self.compute_hash() && super::verify(signer, hash, signature)
            }
            _ => false,
        }
    }
}
