//! Exchange orders.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};

use crate::signing::Signable;
use crate::types::Signature;

/// A maker order offering `amount_sell` of `token_sell` for `amount_buy`
/// of `token_buy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Exchange contract the order is valid on.
    pub exchange_address: Address,
    /// Account placing the order.
    pub maker: Address,
    pub token_buy: Address,
    pub token_sell: Address,
    /// Amount of `token_buy` wanted, in base units.
    pub amount_buy: U256,
    /// Amount of `token_sell` offered, in base units.
    pub amount_sell: U256,
    /// Expiry as a unix timestamp; zero never expires.
    pub expires: U256,
    pub nonce: U256,
    pub fee_make: U256,
    pub fee_take: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<Signature>,
}

impl Order {
    /// Create an unsigned order with zero expiry, nonce and fees.
    pub fn new(
        exchange_address: Address,
        maker: Address,
        token_buy: Address,
        amount_buy: U256,
        token_sell: Address,
        amount_sell: U256,
    ) -> Self {
        Self {
            exchange_address,
            maker,
            token_buy,
            token_sell,
            amount_buy,
            amount_sell,
            expires: U256::ZERO,
            nonce: U256::ZERO,
            fee_make: U256::ZERO,
            fee_take: U256::ZERO,
            hash: None,
            signature: None,
        }
    }

    pub fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn with_expires(mut self, expires: U256) -> Self {
        self.expires = expires;
        self
    }

    pub fn with_fees(mut self, fee_make: U256, fee_take: U256) -> Self {
        self.fee_make = fee_make;
        self.fee_take = fee_take;
        self
    }
}

impl Signable for Order {
    /// `keccak256` over the packed exchange address, both legs, expiry,
    /// nonce and maker. Fees are settled by the exchange and are not signed.
    fn compute_hash(&self) -> B256 {
        let encoded = (
            self.exchange_address,
            self.token_buy,
            self.amount_buy,
            self.token_sell,
            self.amount_sell,
            self.expires,
            self.nonce,
            self.maker,
        )
            .abi_encode_packed();

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

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn sample_order() -> Order {
        Order::new(
            addr(0xee),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap(),
            addr(0x01),
            U256::from(1_000u64),
            addr(0x02),
            U256::from(250u64),
        )
        .with_nonce(U256::from(7u64))
    }

    #[test]
    fn test_new_order_is_unsigned() {
        let order = sample_order();
        assert!(order.hash().is_none());
        assert!(!order.is_signed());
        assert_eq!(order.expires, U256::ZERO);
        assert_eq!(order.fee_make, U256::ZERO);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let order = sample_order();
        assert_eq!(order.compute_hash(), order.clone().compute_hash());
        assert_ne!(order.compute_hash(), B256::ZERO);
    }

    #[test]
    fn test_hash_covers_signed_fields() {
        let base = sample_order();

        let other_nonce = base.clone().with_nonce(U256::from(8u64));
        assert_ne!(base.compute_hash(), other_nonce.compute_hash());

        let mut other_amount = base.clone();
        other_amount.amount_sell = U256::from(251u64);
        assert_ne!(base.compute_hash(), other_amount.compute_hash());
    }

    #[test]
    fn test_fees_are_not_signed() {
        let base = sample_order();
        let with_fees = base.clone().with_fees(U256::from(5u64), U256::from(10u64));
        assert_eq!(base.compute_hash(), with_fees.compute_hash());
    }

    #[test]
    fn test_hash_matches_packed_layout() {
        let order = sample_order();

        let mut packed = Vec::new();
        packed.extend_from_slice(order.exchange_address.as_slice());
        packed.extend_from_slice(order.token_buy.as_slice());
        packed.extend_from_slice(&order.amount_buy.to_be_bytes::<32>());
        packed.extend_from_slice(order.token_sell.as_slice());
        packed.extend_from_slice(&order.amount_sell.to_be_bytes::<32>());
        packed.extend_from_slice(&order.expires.to_be_bytes::<32>());
        packed.extend_from_slice(&order.nonce.to_be_bytes::<32>());
        packed.extend_from_slice(order.maker.as_slice());

        assert_eq!(order.compute_hash(), keccak256(&packed));
    }

    #[test]
    fn test_attach_signature_sets_both_fields() {
        let mut order = sample_order();
        let hash = order.compute_hash();
        let signature = Signature::from_parts(B256::repeat_byte(1), B256::repeat_byte(2), false);

        order.attach_signature(hash, signature);

        assert_eq!(order.hash(), Some(hash));
        assert_eq!(order.signature(), Some(&signature));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_string(&sample_order()).unwrap();
        assert!(json.contains("exchangeAddress"));
        assert!(json.contains("amountBuy"));
        assert!(!json.contains("signature"));
    }
}
