//! Script templates.
//!
//! `p2pkh` locks to and spends from a public key hash; `null_data` builds
//! the zero-value OP_RETURN outputs that carry token metadata.

pub mod null_data;
pub mod p2pkh;

use slp_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

/// Something that can produce the unlocking script for one input.
pub trait UnlockingScriptTemplate {
    /// Sign input `input_index` of `tx` and return its unlocking script.
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError>;

    /// Upper bound on the unlocking script length, for size estimates.
    fn estimate_length(&self) -> usize;
}
