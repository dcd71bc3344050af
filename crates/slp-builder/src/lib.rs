//! # slp-builder
//!
//! Builds, funds and signs transactions that pay coin amounts and optionally
//! carry SLP token metadata in a leading zero-value OP_RETURN output.
//!
//! One construction call runs, in order:
//!
//! 1. destination and metadata validation ([`outputs`])
//! 2. input selection with the fee recomputed per input ([`selector`], [`fee`])
//! 3. output planning with the dust rule ([`outputs`])
//! 4. assembly of the unsigned transaction ([`assembler`])
//! 5. fork-id signing and serialization ([`signer`])
//!
//! [`engine::TransactionEngine`] wires the steps together from an
//! [`config::EngineConfig`]. Broadcasting the result is left to a
//! [`broadcaster::Broadcaster`] supplied by the caller.
//!
//! ```no_run
//! use slp_builder::{EngineConfig, KeyStore, PaymentRequest, TransactionEngine};
//!
//! # fn run(pool: Vec<slp_builder::SpendableOutput>) -> Result<(), slp_builder::EngineError> {
//! let engine = TransactionEngine::new(EngineConfig::default())?;
//! let mut keys = KeyStore::new();
//! keys.insert_wif("m/44'/145'/0'/0/0", "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn")?;
//!
//! let request = PaymentRequest::new(
//!     vec![("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", "0.001").try_into()?],
//!     "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
//! );
//! let signed = engine.construct(&request, &pool, &keys)?;
//! println!("{} pays fee {}", signed.txid(), signed.fee());
//! # Ok(())
//! # }
//! ```

pub mod amount;
pub mod assembler;
pub mod broadcaster;
pub mod config;
pub mod engine;
pub mod fee;
pub mod outputs;
pub mod selector;
pub mod signer;
pub mod slp;

mod error;


pub use amount::MonetaryValue;
pub use assembler::DraftTransaction;
pub use broadcaster::{AsyncBroadcaster, BroadcastFailure, BroadcastSuccess, Broadcaster};
pub use config::EngineConfig;
pub use engine::TransactionEngine;
pub use error::{EngineError, ErrorKind};
pub use fee::{ByteCostModel, FeeParameters};
pub use outputs::{MetadataPayload, OutputPlan, Payment, PaymentRequest, ResolvedRequest};
pub use selector::{KeyRef, OutPoint, Selection, SelectionOrder, SpendableOutput, UtxoSelector};
pub use signer::{KeyProvider, KeyStore, SignedTransaction};
