//! Transaction input spending a previous output.

use slp_primitives::util::{ByteReader, ByteWriter};
use slp_primitives::TxId;
use slp_script::Script;

use crate::output::TransactionOutput;
use crate::TransactionError;

/// Final sequence number; no relative lock time.
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input.
///
/// The spent output (amount and locking script) is not part of the wire
/// format, but the fork-id signature hash commits to both, so it is carried
/// alongside the input for signing.
///
/// | Field               | Size          |
/// |---------------------|---------------|
/// | source_txid         | 32 bytes      |
/// | source_output_index | 4 bytes (LE)  |
/// | script length       | VarInt        |
/// | unlocking_script    | variable      |
/// | sequence_number     | 4 bytes (LE)  |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    pub source_txid: TxId,
    pub source_output_index: u32,
    pub sequence_number: u32,
    /// `None` until signed.
    pub unlocking_script: Option<Script>,
    source_output: Option<TransactionOutput>,
}

impl TransactionInput {
    /// An unsigned, final input spending `source_txid:source_output_index`.
    pub fn new(source_txid: TxId, source_output_index: u32) -> Self {
        TransactionInput {
            source_txid,
            source_output_index,
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            unlocking_script: None,
            source_output: None,
        }
    }

    /// Attach the output being spent.
    pub fn with_source_output(mut self, output: TransactionOutput) -> Self {
        self.source_output = Some(output);
        self
    }

    pub fn set_source_output(&mut self, output: Option<TransactionOutput>) {
        self.source_output = output;
    }

    pub fn source_output(&self) -> Option<&TransactionOutput> {
        self.source_output.as_ref()
    }

    pub fn source_satoshis(&self) -> Option<u64> {
        self.source_output.as_ref().map(|o| o.satoshis)
    }

    /// Decode one input. Source output information is never on the wire,
    /// so decoded inputs come back without it.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let txid_bytes = reader.read_array::<32>().map_err(|e| {
            TransactionError::SerializationError(format!("reading source txid: {}", e))
        })?;
        let source_output_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;
        let script_bytes = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;
        let sequence_number = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        let unlocking_script = if script_bytes.is_empty() {
            None
        } else {
            Some(Script::from_bytes(script_bytes))
        };

        Ok(TransactionInput {
            source_txid: TxId::new(txid_bytes),
            source_output_index,
            sequence_number,
            unlocking_script,
            source_output: None,
        })
    }

    pub fn write_to(&self, writer: &mut ByteWriter) {
        self.write_outpoint(writer);
        match &self.unlocking_script {
            Some(script) => writer.write_var_bytes(script.to_bytes()),
            None => writer.write_var_bytes(&[]),
        }
        writer.write_u32_le(self.sequence_number);
    }

    /// Txid and index, as hashed into `hashPrevouts`.
    pub fn write_outpoint(&self, writer: &mut ByteWriter) {
        writer.write_bytes(self.source_txid.as_bytes());
        writer.write_u32_le(self.source_output_index);
    }
}
