//! Transaction wire format and signing.
//!
//! `Transaction` with its inputs and outputs, the replay-protected
//! (fork-id) signature hash, and script templates for P2PKH spends and
//! OP_RETURN data outputs.

pub mod input;
pub mod output;
pub mod sighash;
pub mod template;
pub mod transaction;

mod error;
pub use error::TransactionError;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use transaction::Transaction;
