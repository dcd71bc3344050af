//! Transaction identifiers.
//!
//! A txid is the double SHA-256 of a serialized transaction. It is stored in
//! internal (little-endian) byte order, which is what appears on the wire in
//! an input's outpoint, and displayed byte-reversed as 64 hex characters,
//! which is what block explorers and UTXO endpoints report.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Size of a transaction id in bytes.
pub const TXID_SIZE: usize = 32;

/// A 32-byte transaction id in internal byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TxId([u8; TXID_SIZE]);

impl TxId {
    /// Wrap bytes that are already in internal order.
    pub fn new(bytes: [u8; TXID_SIZE]) -> Self {
        TxId(bytes)
    }

    /// Build from an internal-order slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; TXID_SIZE] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidTxId(format!(
                "expected {} bytes, got {}",
                TXID_SIZE,
                bytes.len()
            ))
        })?;
        Ok(TxId(arr))
    }

    /// Parse the display form: 64 hex characters, byte-reversed.
    ///
    /// Unlike block hashes, txids coming from a UTXO source are always
    /// full length, so short strings are rejected rather than padded.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() != TXID_SIZE * 2 {
            return Err(PrimitivesError::InvalidTxId(format!(
                "expected {} hex characters, got {}",
                TXID_SIZE * 2,
                hex_str.len()
            )));
        }
        let mut bytes = hex::decode(hex_str)?;
        bytes.reverse();
        Self::from_slice(&bytes)
    }

    /// Txid of a serialized transaction.
    pub fn of_transaction_bytes(raw_tx: &[u8]) -> Self {
        TxId(sha256d(raw_tx))
    }

    /// Internal-order bytes, as written into an outpoint.
    pub fn as_bytes(&self) -> &[u8; TXID_SIZE] {
        &self.0
    }

    /// Display-order bytes. SLP token ids are pushed in this order.
    pub fn to_display_bytes(&self) -> [u8; TXID_SIZE] {
        let mut out = self.0;
        out.reverse();
        out
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_display_bytes()))
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self)
    }
}

impl FromStr for TxId {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TxId::from_hex(s)
    }
}

impl Serialize for TxId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TxId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS_COINBASE_TXID: &str =
        "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    #[test]
    fn test_display_is_byte_reversed() {
        let id = TxId::from_hex(GENESIS_COINBASE_TXID).unwrap();
        assert_eq!(id.as_bytes()[0], 0x3b);
        assert_eq!(id.as_bytes()[31], 0x4a);
        assert_eq!(id.to_string(), GENESIS_COINBASE_TXID);
        assert_eq!(hex::encode(id.to_display_bytes()), GENESIS_COINBASE_TXID);
    }

    #[test]
    fn test_rejects_short_and_bad_hex() {
        assert!(TxId::from_hex("19d6689c085ae165831e934ff763ae46").is_err());
        assert!(TxId::from_hex(&"zz".repeat(32)).is_err());
        assert!(TxId::from_slice(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_serde_uses_display_form() {
        #[derive(Serialize, Deserialize)]
        struct Utxo {
            txid: TxId,
        }

        let json = format!(r#"{{"txid":"{}"}}"#, GENESIS_COINBASE_TXID);
        let utxo: Utxo = serde_json::from_str(&json).unwrap();
        assert_eq!(utxo.txid.to_string(), GENESIS_COINBASE_TXID);
        assert_eq!(serde_json::to_string(&utxo).unwrap(), json);
    }
}
