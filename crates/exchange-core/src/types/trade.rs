//! Trades filling a signed order.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};

use crate::signing::Signable;
use crate::types::{Order, Signature};

/// A taker's fill of `amount` against the order identified by `order_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub order_hash: B256,
    pub amount: U256,
    pub trade_nonce: U256,
    pub taker: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<Signature>,
}

impl Trade {
    pub fn new(order_hash: B256, amount: U256, trade_nonce: U256, taker: Address) -> Self {
        Self {
            order_hash,
            amount,
            trade_nonce,
            taker,
            hash: None,
            signature: None,
        }
    }

    /// Create a trade against `order`, referencing its recorded hash when
    /// signed and its content hash otherwise.
    pub fn for_order(order: &Order, amount: U256, trade_nonce: U256, taker: Address) -> Self {
        let order_hash = order.hash().unwrap_or_else(|| order.compute_hash());
        Self::new(order_hash, amount, trade_nonce, taker)
    }
}

impl Signable for Trade {
    fn compute_hash(&self) -> B256 {
        let encoded = (self.order_hash, self.amount, self.trade_nonce, self.taker).abi_encode_packed();
        keccak256(&encoded)
    }

    fn hash(&self) -> Option<B256> {
        self.hash
    }

    fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    fn attach_signature(&mut self, hash: B256, signature: Signature) {
        self.hash = Some(hash);
        self.signature = Some(signature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trade() -> Trade {
        Trade::new(
            B256::repeat_byte(0x42),
            U256::from(100u64),
            U256::from(1u64),
            Address::repeat_byte(0x07),
        )
    }

    #[test]
    fn test_hash_matches_packed_layout() {
        let trade = sample_trade();

        let mut packed = Vec::with_capacity(116);
        packed.extend_from_slice(trade.order_hash.as_slice());
        packed.extend_from_slice(&trade.amount.to_be_bytes::<32>());
        packed.extend_from_slice(&trade.trade_nonce.to_be_bytes::<32>());
        packed.extend_from_slice(trade.taker.as_slice());

        assert_eq!(packed.len(), 116);
        assert_eq!(trade.compute_hash(), keccak256(&packed));
    }

    #[test]
    fn test_hash_changes_with_amount() {
        let a = sample_trade();
        let mut b = a.clone();
        b.amount = U256::from(101u64);
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_for_order_uses_order_hash() {
        let order = Order::new(
            Address::repeat_byte(0xee),
            Address::repeat_byte(0x01),
            Address::repeat_byte(0x02),
            U256::from(10u64),
            Address::repeat_byte(0x03),
            U256::from(20u64),
        );

        let trade = Trade::for_order(&order, U256::from(5u64), U256::ZERO, Address::repeat_byte(0x09));
        assert_eq!(trade.order_hash, order.compute_hash());
        assert!(!trade.is_signed());
    }

    #[test]
    fn test_unsigned_trade_is_not_signed_by_anyone() {
        assert!(!sample_trade().is_signed_by(Address::repeat_byte(0x07)));
    }
}
