#![deny(missing_docs)]

//! SLP transaction SDK.
//!
//! Re-exports the workspace crates for single-dependency use: keys and
//! hashing, scripts and addresses, the transaction wire format, and the
//! construction engine.

pub use slp_builder as builder;
pub use slp_primitives as primitives;
pub use slp_script as script;
pub use slp_transaction as transaction;

pub use slp_builder::{EngineConfig, EngineError, PaymentRequest, TransactionEngine};
