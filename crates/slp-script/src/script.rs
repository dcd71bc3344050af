//! Script type.
//!
//! A script is a byte vector newtype. Locking scripts built by this
//! workspace are either P2PKH or null-data (`OP_RETURN <pushes...>`); the
//! classification helpers here recognise exactly those shapes.

use std::fmt;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// Largest null-data script relayed as standard, in bytes.
pub const MAX_NULL_DATA_SIZE: usize = 223;

/// A script, represented as raw bytes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Build `OP_DUP OP_HASH160 <pkh> OP_EQUALVERIFY OP_CHECKSIG`.
    pub fn p2pkh(public_key_hash: &[u8; 20]) -> Self {
        let mut b = Vec::with_capacity(25);
        b.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
        b.extend_from_slice(public_key_hash);
        b.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        Script(b)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Human-readable assembly. Empty for an empty or malformed script.
    pub fn to_asm(&self) -> String {
        match self.chunks() {
            Ok(chunks) => chunks
                .iter()
                .map(ScriptChunk::to_asm_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        }
    }

    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    /// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Whether every chunk is a push. Malformed scripts are not push-only.
    pub fn is_push_only(&self) -> bool {
        match decode_script(&self.0) {
            Ok(chunks) => chunks.iter().all(|c| is_push_op(c.op)),
            Err(_) => false,
        }
    }

    /// `OP_RETURN` followed only by well-formed pushes.
    pub fn is_null_data(&self) -> bool {
        match self.0.split_first() {
            Some((&OP_RETURN, rest)) => Script::from_bytes(rest).is_push_only(),
            _ => false,
        }
    }

    // -----------------------------------------------------------------------
    // Data extraction
    // -----------------------------------------------------------------------

    /// The 20-byte hash committed to by a P2PKH script.
    pub fn public_key_hash(&self) -> Result<[u8; 20], ScriptError> {
        if self.0.is_empty() {
            return Err(ScriptError::EmptyScript);
        }
        if !self.is_p2pkh() {
            return Err(ScriptError::NotP2PKH);
        }
        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&self.0[3..23]);
        Ok(pkh)
    }

    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Append data with its minimal push prefix.
    ///
    /// # Arguments
    /// * `data` - Bytes to push. An empty slice appends OP_0.
    ///
    /// # Returns
    /// `Ok(())`, or `DataTooBig` for payloads beyond OP_PUSHDATA4.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append non-push opcodes. Push opcodes are rejected; use
    /// `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        if let Some(&op) = opcodes
            .iter()
            .find(|&&op| (OP_DATA_1..=OP_PUSHDATA4).contains(&op))
        {
            return Err(ScriptError::InvalidOpcodeType(opcode_to_string(op)));
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }

    /// Append bytes verbatim.
    pub fn append_raw(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P2PKH_HEX: &str = "76a914e2a623699e81b291c0327f408fea765d534baa2a88ac";

    #[test]
    fn test_p2pkh_constructor_matches_known_script() {
        let pkh: [u8; 20] = hex::decode("e2a623699e81b291c0327f408fea765d534baa2a")
            .unwrap()
            .try_into()
            .unwrap();
        let script = Script::p2pkh(&pkh);
        assert_eq!(script.to_hex(), P2PKH_HEX);
        assert!(script.is_p2pkh());
        assert_eq!(script.public_key_hash().unwrap(), pkh);
    }

    #[test]
    fn test_to_asm_p2pkh() {
        let script = Script::from_hex(P2PKH_HEX).unwrap();
        assert_eq!(
            script.to_asm(),
            "OP_DUP OP_HASH160 e2a623699e81b291c0327f408fea765d534baa2a OP_EQUALVERIFY OP_CHECKSIG"
        );
        assert_eq!(Script::new().to_asm(), "");
        assert_eq!(Script::from_bytes(&[0x05, 0x01]).to_asm(), "");
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Script::from_hex("ZZZZ").is_err());
        assert!(Script::from_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_public_key_hash_errors() {
        assert!(matches!(Script::new().public_key_hash(), Err(ScriptError::EmptyScript)));
        let data = Script::from_hex("6a0401020304").unwrap();
        assert!(matches!(data.public_key_hash(), Err(ScriptError::NotP2PKH)));
    }

    #[test]
    fn test_null_data_classification() {
        assert!(Script::from_hex("6a").unwrap().is_null_data());
        assert!(Script::from_hex("6a04534c500001014c00").unwrap().is_null_data());
        // OP_RETURN OP_DUP
        assert!(!Script::from_hex("6a76").unwrap().is_null_data());
        // truncated push
        assert!(!Script::from_hex("6a0501").unwrap().is_null_data());
        assert!(!Script::from_hex(P2PKH_HEX).unwrap().is_null_data());
        assert!(!Script::from_hex("").unwrap().is_null_data());
    }

    #[test]
    fn test_append_push_data_and_opcodes() {
        let mut script = Script::new();
        script.append_opcodes(&[OP_RETURN]).unwrap();
        script.append_push_data(b"SLP\0").unwrap();
        script.append_push_data(&[0xaa; 80]).unwrap();
        assert_eq!(&script.to_bytes()[..6], &[0x6a, 0x04, b'S', b'L', b'P', 0x00]);
        assert_eq!(&script.to_bytes()[6..8], &[OP_PUSHDATA1, 80]);
        assert!(script.is_null_data());

        assert!(matches!(
            script.append_opcodes(&[OP_DATA_20]),
            Err(ScriptError::InvalidOpcodeType(_))
        ));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let script = Script::from_hex(P2PKH_HEX).unwrap();
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(json, format!("\"{}\"", P2PKH_HEX));
        let back: Script = serde_json::from_str(&json).unwrap();
        assert_eq!(back, script);
    }
}
