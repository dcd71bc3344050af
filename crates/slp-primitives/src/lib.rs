/// SLP transaction primitives - hashing, keys, signatures, and wire encoding.
///
/// The building blocks shared by the script, transaction and builder crates:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Transaction identifiers with display-order hex conversion
/// - secp256k1 private/public keys and DER-encoded ECDSA signatures
/// - VarInt encoding plus little-endian byte reader and writer

pub mod hash;
pub mod txid;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;
pub use txid::TxId;
