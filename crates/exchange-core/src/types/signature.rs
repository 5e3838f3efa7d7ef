//! Recoverable secp256k1 signatures in the `(r, s, v)` form.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::signing::personal_message_hash;
use crate::{Error, Result};

/// A recoverable ECDSA signature over a personal-message hash.
///
/// `v` carries the recovery id with the legacy offset of 27, so it is
/// always 27 or 28 for signatures produced by a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    r: B256,
    s: B256,
    v: u8,
}

impl Signature {
    /// Offset added to the recovery id.
    pub const V_OFFSET: u8 = 27;

    /// Length of the `r ‖ s ‖ v` byte form.
    pub const LEN: usize = 65;

    /// Build a signature from its components and the recovery parity.
    pub fn from_parts(r: B256, s: B256, y_parity: bool) -> Self {
        Self {
            r,
            s,
            v: y_parity as u8 + Self::V_OFFSET,
        }
    }

    /// Decode a 65-byte `r ‖ s ‖ v` signature.
    ///
    /// Both the offset form (27/28) and the raw recovery id (0/1) are
    /// accepted for `v`; the result always stores the offset form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LEN {
            return Err(Error::Signature {
                message: format!("expected {} bytes, got {}", Self::LEN, bytes.len()),
            });
        }

        let y_parity = parity_from_v(bytes[64])?;
        Ok(Self::from_parts(
            B256::from_slice(&bytes[0..32]),
            B256::from_slice(&bytes[32..64]),
            y_parity,
        ))
    }

    pub fn r(&self) -> B256 {
        self.r
    }

    pub fn s(&self) -> B256 {
        self.s
    }

    pub fn v(&self) -> u8 {
        self.v
    }

    /// Recovery id without the offset (0 or 1).
    pub fn recovery_id(&self) -> Result<u8> {
        parity_from_v(self.v).map(u8::from)
    }

    /// The 65-byte `r ‖ s ‖ v` form.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }

    /// Recover the address that signed `digest` under the personal-message
    /// convention.
    pub fn recover_address(&self, digest: B256) -> Result<Address> {
        let y_parity = parity_from_v(self.v)?;
        let inner = alloy_primitives::Signature::new(
            U256::from_be_bytes(self.r.0),
            U256::from_be_bytes(self.s.0),
            y_parity,
        );

        inner
            .recover_address_from_prehash(&personal_message_hash(digest))
            .map_err(|e| Error::Signature {
                message: format!("failed to recover signer: {}", e),
            })
    }
}

fn parity_from_v(v: u8) -> Result<bool> {
    match v {
        0 | 27 => Ok(false),
        1 | 28 => Ok(true),
        _ => Err(Error::Signature {
            message: format!("invalid recovery id: {}", v),
        }),
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Signature {
        Signature::from_parts(B256::repeat_byte(0x11), B256::repeat_byte(0x22), true)
    }

    #[test]
    fn test_v_carries_offset() {
        assert_eq!(sample().v(), 28);
        assert_eq!(sample().recovery_id().unwrap(), 1);

        let even = Signature::from_parts(B256::ZERO, B256::ZERO, false);
        assert_eq!(even.v(), 27);
    }

    #[test]
    fn test_byte_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), Signature::LEN);
        assert!(bytes[0..32].iter().all(|b| *b == 0x11));
        assert!(bytes[32..64].iter().all(|b| *b == 0x22));
        assert_eq!(bytes[64], 28);
    }

    #[test]
    fn test_from_bytes_accepts_raw_recovery_id() {
        let mut bytes = sample().to_bytes();
        bytes[64] = 1;
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), sample());
    }

    #[test]
    fn test_from_bytes_rejects_bad_input() {
        assert!(Signature::from_bytes(&[0u8; 64]).is_err());

        let mut bytes = sample().to_bytes();
        bytes[64] = 35;
        assert!(Signature::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_hex_display_parses_back() {
        let text = sample().to_string();
        assert!(text.starts_with("0x"));
        assert_eq!(text.len(), 132);
        assert_eq!(text.parse::<Signature>().unwrap(), sample());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["v"], 28);
        assert!(json["r"].as_str().unwrap().starts_with("0x1111"));
    }
}
