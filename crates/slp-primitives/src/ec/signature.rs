//! ECDSA signatures with DER serialization.
//!
//! Signing uses RFC6979 deterministic nonces and always yields a low-S
//! signature, which is the only form BCH nodes relay.

use k256::ecdsa;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// A secp256k1 ECDSA signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: ecdsa::Signature,
}

impl Signature {
    /// Sign a 32-byte digest.
    ///
    /// # Arguments
    /// * `digest` - The message digest; for a transaction input this is its sighash.
    /// * `priv_key` - The signing key.
    ///
    /// # Returns
    /// A low-S normalized signature, or `InvalidSignature` if k256 rejects the digest.
    pub fn sign(digest: &[u8; 32], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let sig: ecdsa::Signature = priv_key
            .signing_key()
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let inner = sig.normalize_s().unwrap_or(sig);
        Ok(Signature { inner })
    }

    /// Parse a strict DER encoding.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let inner = ecdsa::Signature::from_der(bytes)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Signature { inner })
    }

    /// DER encoding: `0x30 <len> 0x02 <r> 0x02 <s>`.
    pub fn to_der(&self) -> Vec<u8> {
        self.inner.to_der().as_bytes().to_vec()
    }

    /// Whether the S component is in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        self.inner.normalize_s().is_none()
    }

    pub fn verify(&self, digest: &[u8; 32], pub_key: &PublicKey) -> bool {
        pub_key
            .verifying_key()
            .verify_prehash(digest, &self.inner)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    /// RFC6979 vectors shared by the Trezor and CoreBitcoin test suites.
    #[test]
    fn test_rfc6979_vectors() {
        let vectors = [
            (
                "cca9fbcc1b41e5a95d369eaa6ddcff73b61a4efaa279cfc6567e8daa39cbaf50",
                "sample",
                "3045022100af340daf02cc15c8d5d08d7735dfe6b98a474ed373bdb5fbecf7571be52b384202205009fb27f37034a9b24b707b7c6b79ca23ddef9e25f7282e8a797efe53a8f124",
            ),
            (
                "0000000000000000000000000000000000000000000000000000000000000001",
                "Satoshi Nakamoto",
                "3045022100934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d802202442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5",
            ),
            (
                "f8b8af8ce3c7cca5e300d33939540c10d45ce001b8f252bfbc57ba0342904181",
                "Alan Turing",
                "304402207063ae83e7f62bbb171798131b4a0564b956930092b33b07b395615d9ec7e15c022058dfcc1e00a35e1572f366ffe34ba0fc47db1e7189759b9fb233c5b05ab388ea",
            ),
        ];

        for (key_hex, msg, expected_der) in vectors {
            let key = PrivateKey::from_hex(key_hex).unwrap();
            let digest = sha256(msg.as_bytes());
            let sig = key.sign(&digest).unwrap();

            assert_eq!(hex::encode(sig.to_der()), expected_der, "message {:?}", msg);
            assert!(sig.is_low_s());
            assert!(key.pub_key().verify(&digest, &sig));
        }
    }

    #[test]
    fn test_der_round_trip_and_tamper() {
        let key = PrivateKey::new();
        let digest = sha256(b"spend");
        let sig = key.sign(&digest).unwrap();

        let parsed = Signature::from_der(&sig.to_der()).unwrap();
        assert_eq!(parsed, sig);

        let other = sha256(b"other spend");
        assert!(!key.pub_key().verify(&other, &sig));
        assert!(!PrivateKey::new().pub_key().verify(&digest, &sig));
    }

    #[test]
    fn test_from_der_rejects_garbage() {
        assert!(Signature::from_der(&[]).is_err());
        assert!(Signature::from_der(&[0x30, 0x02, 0x02, 0x00]).is_err());
    }
}
