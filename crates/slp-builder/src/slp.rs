//! SLP token type 1 metadata.
//!
//! Each message is an OP_RETURN script:
//!
//! ```text
//! OP_RETURN <"SLP\0"> <0x01> <"GENESIS" | "MINT" | "SEND"> <fields...>
//! ```
//!
//! Quantities are 8-byte big-endian, token ids are the genesis txid in
//! display order, and empty fields are pushed as `OP_PUSHDATA1 0x00`.
//! Output indexes referenced by a message (token receivers, the baton) are
//! the transaction's own outputs, with the OP_RETURN itself at index 0.

use slp_primitives::TxId;
use slp_transaction::template::null_data;

use crate::amount::MonetaryValue;
use crate::outputs::{MetadataPayload, Payment, PaymentRequest};
use crate::selector::SpendableOutput;
use crate::EngineError;

pub const LOKAD_ID: &[u8; 4] = b"SLP\0";
pub const TOKEN_TYPE_1: u8 = 0x01;
pub const MAX_DECIMALS: u8 = 9;
/// Outputs 1..=19 can receive tokens in one SEND.
pub const MAX_SEND_OUTPUTS: usize = 19;
/// Baton output used by [`PaymentRequest::token_genesis`] and
/// [`PaymentRequest::token_mint`].
pub const DEFAULT_BATON_VOUT: u8 = 2;

fn malformed(reason: impl Into<String>) -> EngineError {
    EngineError::MalformedMetadataPayload {
        reason: reason.into(),
    }
}

fn check_baton(vout: Option<u8>) -> Result<Vec<u8>, EngineError> {
    match vout {
        Some(v) if v < 2 => Err(malformed(format!("mint baton vout must be at least 2, got {}", v))),
        Some(v) => Ok(vec![v]),
        None => Ok(Vec::new()),
    }
}

fn encode(transaction_type: &[u8], fields: &[&[u8]]) -> Result<MetadataPayload, EngineError> {
    let token_type = [TOKEN_TYPE_1];
    let mut parts: Vec<&[u8]> = vec![LOKAD_ID.as_slice(), token_type.as_slice(), transaction_type];
    parts.extend_from_slice(fields);
    let script = null_data::lock(&parts)?;
    MetadataPayload::new(script)
}

/// Creates a new token.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Genesis {
    pub ticker: String,
    pub name: String,
    pub document_url: String,
    pub document_hash: Option<[u8; 32]>,
    pub decimals: u8,
    pub mint_baton_vout: Option<u8>,
    /// Issued to output 1.
    pub initial_quantity: u64,
}

impl Genesis {
    pub fn to_payload(&self) -> Result<MetadataPayload, EngineError> {
        if self.decimals > MAX_DECIMALS {
            return Err(malformed(format!(
                "decimals must be at most {}, got {}",
                MAX_DECIMALS, self.decimals
            )));
        }
        let baton = check_baton(self.mint_baton_vout)?;
        let hash: &[u8] = match &self.document_hash {
            Some(h) => h,
            None => &[],
        };
        let decimals = [self.decimals];
        let quantity = self.initial_quantity.to_be_bytes();
        encode(
            b"GENESIS",
            &[
                self.ticker.as_bytes(),
                self.name.as_bytes(),
                self.document_url.as_bytes(),
                hash,
                decimals.as_slice(),
                baton.as_slice(),
                quantity.as_slice(),
            ],
        )
    }
}

/// Issues more of an existing token; requires the current baton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mint {
    pub token_id: TxId,
    /// `None` ends minting for good.
    pub mint_baton_vout: Option<u8>,
    pub additional_quantity: u64,
}

impl Mint {
    pub fn to_payload(&self) -> Result<MetadataPayload, EngineError> {
        let baton = check_baton(self.mint_baton_vout)?;
        let token_id = self.token_id.to_display_bytes();
        let quantity = self.additional_quantity.to_be_bytes();
        encode(b"MINT", &[token_id.as_slice(), baton.as_slice(), quantity.as_slice()])
    }
}

/// Moves tokens; `amounts[i]` goes to output `i + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Send {
    pub token_id: TxId,
    pub amounts: Vec<u64>,
}

impl Send {
    pub fn to_payload(&self) -> Result<MetadataPayload, EngineError> {
        if self.amounts.is_empty() || self.amounts.len() > MAX_SEND_OUTPUTS {
            return Err(malformed(format!(
                "SEND needs 1 to {} amounts, got {}",
                MAX_SEND_OUTPUTS,
                self.amounts.len()
            )));
        }
        let token_id = self.token_id.to_display_bytes();
        let amounts: Vec<[u8; 8]> = self.amounts.iter().map(|a| a.to_be_bytes()).collect();
        let mut fields: Vec<&[u8]> = vec![token_id.as_slice()];
        fields.extend(amounts.iter().map(|a| a.as_slice()));
        encode(b"SEND", &fields)
    }
}

/// Receiver outputs at output 1 and, when a baton is passed, output 2.
fn token_outputs(
    baton_vout: Option<u8>,
    token_receiver: &str,
    baton_receiver: Option<&str>,
    dust_threshold: u64,
) -> Result<Vec<Payment>, EngineError> {
    let dust = MonetaryValue::from_atomic_units(dust_threshold);
    let mut payments = vec![Payment::new(token_receiver, dust)];
    match (baton_vout, baton_receiver) {
        (Some(DEFAULT_BATON_VOUT), Some(receiver)) => payments.push(Payment::new(receiver, dust)),
        (None, None) => {}
        (Some(v), Some(_)) => {
            return Err(malformed(format!(
                "baton receiver is placed at output {}, message names {}",
                DEFAULT_BATON_VOUT, v
            )))
        }
        (Some(_), None) => return Err(malformed("mint baton vout given without a baton receiver")),
        (None, Some(_)) => return Err(malformed("baton receiver given without a mint baton vout")),
    }
    Ok(payments)
}

impl PaymentRequest {
    /// Request creating a token.
    ///
    /// Output 0 carries the GENESIS message, output 1 pays the token
    /// receiver and output 2, when `genesis.mint_baton_vout` is `Some(2)`,
    /// the baton receiver. Both are funded with `dust_threshold`.
    pub fn token_genesis(
        genesis: &Genesis,
        token_receiver: &str,
        baton_receiver: Option<&str>,
        change_address: &str,
        dust_threshold: u64,
    ) -> Result<Self, EngineError> {
        let payments = token_outputs(genesis.mint_baton_vout, token_receiver, baton_receiver, dust_threshold)?;
        Ok(PaymentRequest::new(payments, change_address).with_metadata(genesis.to_payload()?))
    }

    /// Request minting more of a token, laid out like [`Self::token_genesis`].
    ///
    /// A MINT is only valid when it spends the token's current baton, so
    /// `baton` is always the first input of the resulting transaction.
    pub fn token_mint(
        mint: &Mint,
        baton: SpendableOutput,
        token_receiver: &str,
        baton_receiver: Option<&str>,
        change_address: &str,
        dust_threshold: u64,
    ) -> Result<Self, EngineError> {
        let payments = token_outputs(mint.mint_baton_vout, token_receiver, baton_receiver, dust_threshold)?;
        Ok(PaymentRequest::new(payments, change_address)
            .with_metadata(mint.to_payload()?)
            .with_required_input(baton))
    }
}
