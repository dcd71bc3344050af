//! secp256k1 keys and ECDSA signatures.
//!
//! Thin wrappers over `k256` that speak the encodings a P2PKH spend needs:
//! WIF private keys, compressed SEC1 public keys and DER signatures.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
