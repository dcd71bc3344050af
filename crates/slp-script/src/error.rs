/// Errors from script construction, parsing and address decoding.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Attempted to append a push opcode through `append_opcodes`.
    #[error("use append_push_data for push data funcs: {0}")]
    InvalidOpcodeType(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Decoded address payload has the wrong length.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Well-formed address that is not P2PKH.
    #[error("address not supported {0}")]
    UnsupportedAddress(String),

    #[error("invalid cashaddr {0}")]
    InvalidCashAddr(String),

    #[error("checksum failed")]
    EncodingChecksumFailed,

    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("script is empty")]
    EmptyScript,

    #[error("not a P2PKH")]
    NotP2PKH,

    /// A push runs past the end of the script.
    #[error("not enough data")]
    DataTooSmall,

    #[error("data too big")]
    DataTooBig,

    /// Part `n` of a multi-push is too large to encode.
    #[error("part too big '{0}'")]
    PartTooBig(usize),

    #[error("primitives error: {0}")]
    Primitives(#[from] slp_primitives::PrimitivesError),
}
