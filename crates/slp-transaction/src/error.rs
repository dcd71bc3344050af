/// Errors from transaction encoding, decoding and signing.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Structurally unusable transaction, e.g. an input index out of range.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// Signing could not proceed, e.g. the spent output is unknown.
    #[error("signing error: {0}")]
    SigningError(String),
    #[error("serialization error: {0}")]
    SerializationError(String),
    #[error("script error: {0}")]
    Script(#[from] slp_script::ScriptError),
    #[error("primitives error: {0}")]
    Primitives(#[from] slp_primitives::PrimitivesError),
}
