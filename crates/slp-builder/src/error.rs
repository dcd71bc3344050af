//! Engine errors.

use slp_transaction::TransactionError;

use crate::selector::KeyRef;

/// Every way a construction call can fail.
///
/// Callers branch on [`EngineError::kind`] rather than on message text; the
/// `Display` output is for logs, [`EngineError::user_message`] for people.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The pool cannot cover the payments plus the fee.
    #[error("insufficient funds: requested {requested}, available {available}, fee {fee}")]
    InsufficientFunds {
        /// Sum of the payments, in atomic units.
        requested: u64,
        /// Sum of the candidate pool.
        available: u64,
        /// Fee computed on the last selection step.
        fee: u64,
    },

    /// A payment or change address is malformed or on the wrong network.
    #[error("invalid destination {address}: {reason}")]
    InvalidDestination { address: String, reason: String },

    /// The key provider had nothing for an input's key reference.
    #[error("no signing key for input {input_index} ({key_ref})")]
    SigningKeyUnavailable { input_index: usize, key_ref: KeyRef },

    #[error("malformed metadata payload: {reason}")]
    MalformedMetadataPayload { reason: String },

    #[error("cannot assemble a transaction without inputs")]
    EmptyInputSet,

    #[error("payment request has no payments and no metadata")]
    EmptyPaymentRequest,

    /// Negative, or too large to express in atomic units.
    #[error("invalid amount {amount}: {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Sighash or serialization failure below the engine.
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Tag of an [`EngineError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InsufficientFunds,
    InvalidDestination,
    SigningKeyUnavailable,
    MalformedMetadataPayload,
    EmptyInputSet,
    EmptyPaymentRequest,
    InvalidAmount,
    InvalidConfig,
    Transaction,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            EngineError::InvalidDestination { .. } => ErrorKind::InvalidDestination,
            EngineError::SigningKeyUnavailable { .. } => ErrorKind::SigningKeyUnavailable,
            EngineError::MalformedMetadataPayload { .. } => ErrorKind::MalformedMetadataPayload,
            EngineError::EmptyInputSet => ErrorKind::EmptyInputSet,
            EngineError::EmptyPaymentRequest => ErrorKind::EmptyPaymentRequest,
            EngineError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            EngineError::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            EngineError::Transaction(_) => ErrorKind::Transaction,
        }
    }

    /// How much more the pool would need to hold, for `InsufficientFunds`.
    pub fn shortfall(&self) -> Option<u64> {
        match self {
            EngineError::InsufficientFunds {
                requested,
                available,
                fee,
            } => Some(requested.saturating_add(*fee).saturating_sub(*available)),
            _ => None,
        }
    }

    /// Text suitable for showing to a wallet user.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::InsufficientFunds { .. } => match self.shortfall() {
                Some(missing) if missing > 0 => format!(
                    "Insufficient funds: {} more satoshis are needed to cover the amount and fee.",
                    missing
                ),
                _ => "Insufficient funds.".to_string(),
            },
            EngineError::InvalidDestination { address, .. } => {
                format!("Invalid address: {}", address)
            }
            EngineError::SigningKeyUnavailable { .. } => {
                "The wallet could not find the key for one of the coins being spent.".to_string()
            }
            EngineError::MalformedMetadataPayload { .. } => {
                "The token data attached to this transaction is invalid.".to_string()
            }
            EngineError::EmptyInputSet => "There are no coins available to spend.".to_string(),
            EngineError::EmptyPaymentRequest => "Nothing to send.".to_string(),
            EngineError::InvalidAmount { amount, .. } => format!("Invalid amount: {}", amount),
            EngineError::InvalidConfig { .. } => "The wallet is misconfigured.".to_string(),
            EngineError::Transaction(_) => "Transaction failed.".to_string(),
        }
    }
}
