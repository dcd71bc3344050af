//! Replay-protected signature hash.
//!
//! BCH-family chains sign a BIP-143 style digest with the FORKID bit set in
//! the sighash type. Unlike the legacy algorithm, the digest commits to the
//! amount of the output being spent, so a signer must know it.

use slp_primitives::hash::sha256d;
use slp_primitives::util::ByteWriter;

use crate::transaction::Transaction;
use crate::TransactionError;

pub const SIGHASH_ALL: u32 = 0x01;
pub const SIGHASH_NONE: u32 = 0x02;
pub const SIGHASH_SINGLE: u32 = 0x03;
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Must be set on every signature; the fork-id value itself is zero.
pub const SIGHASH_FORKID: u32 = 0x40;

/// ALL | FORKID (0x41), the only type this workspace signs with.
pub const SIGHASH_ALL_FORKID: u32 = SIGHASH_ALL | SIGHASH_FORKID;

/// Mask extracting the base type (ALL, NONE, SINGLE).
pub const SIGHASH_MASK: u32 = 0x1f;

/// Double SHA-256 of the preimage built by [`calc_preimage`].
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `script_code` - Locking script of the spent output.
/// * `sighash_type` - Combined flags; FORKID must be set.
/// * `satoshis` - Amount of the spent output.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    sighash_type: u32,
    satoshis: u64,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(tx, input_index, script_code, sighash_type, satoshis)?;
    Ok(sha256d(&preimage))
}

/// Build the signature hash preimage.
///
/// 1. nVersion (4 LE)
/// 2. hashPrevouts (32)
/// 3. hashSequence (32)
/// 4. outpoint (32 + 4 LE)
/// 5. scriptCode (VarInt + script)
/// 6. amount (8 LE)
/// 7. nSequence (4 LE)
/// 8. hashOutputs (32)
/// 9. nLocktime (4 LE)
/// 10. sighash type (4 LE)
pub fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    sighash_type: u32,
    satoshis: u64,
) -> Result<Vec<u8>, TransactionError> {
    let input = tx.inputs.get(input_index).ok_or_else(|| {
        TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;
    if sighash_type & SIGHASH_FORKID == 0 {
        return Err(TransactionError::SigningError(format!(
            "sighash type 0x{:02x} lacks FORKID",
            sighash_type
        )));
    }

    let base_type = sighash_type & SIGHASH_MASK;
    let anyone_can_pay = sighash_type & SIGHASH_ANYONECANPAY != 0;

    let hash_prevouts = if anyone_can_pay {
        [0u8; 32]
    } else {
        prevouts_hash(tx)
    };

    let hash_sequence =
        if anyone_can_pay || base_type == SIGHASH_SINGLE || base_type == SIGHASH_NONE {
            [0u8; 32]
        } else {
            sequence_hash(tx)
        };

    let hash_outputs = match base_type {
        SIGHASH_SINGLE if input_index < tx.outputs.len() => outputs_hash(tx, Some(input_index)),
        SIGHASH_SINGLE | SIGHASH_NONE => [0u8; 32],
        _ => outputs_hash(tx, None),
    };

    let mut writer = ByteWriter::with_capacity(160 + script_code.len());
    writer.write_u32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    input.write_outpoint(&mut writer);
    writer.write_var_bytes(script_code);
    writer.write_u64_le(satoshis);
    writer.write_u32_le(input.sequence_number);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);

    Ok(writer.into_bytes())
}

fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        input.write_outpoint(&mut writer);
    }
    sha256d(writer.as_bytes())
}

fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence_number);
    }
    sha256d(writer.as_bytes())
}

/// All outputs, or only the one at `single`.
fn outputs_hash(tx: &Transaction, single: Option<usize>) -> [u8; 32] {
    let mut writer = ByteWriter::new();
    match single {
        Some(i) => tx.outputs[i].write_to(&mut writer),
        None => tx.outputs.iter().for_each(|o| o.write_to(&mut writer)),
    }
    sha256d(writer.as_bytes())
}
