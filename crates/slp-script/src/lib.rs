//! Scripts, opcodes and addresses.
//!
//! Covers what a P2PKH spend with an OP_RETURN metadata output needs: the
//! script newtype with push-data encoding and classification, and legacy
//! and CashAddr P2PKH addresses.

pub mod address;
pub mod cashaddr;
pub mod chunk;
pub mod opcodes;
pub mod script;

mod error;
pub use address::{Address, AddressFormat, Network};
pub use cashaddr::CashAddrPrefix;
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use script::Script;
