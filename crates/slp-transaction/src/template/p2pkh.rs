//! Pay-to-public-key-hash template.
//!
//! Lock: `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`.
//! Unlock: `<DER signature || sighash byte> <compressed public key>`.

use slp_primitives::ec::PrivateKey;
use slp_script::{Address, Script};

use crate::sighash::SIGHASH_ALL_FORKID;
use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Push of a worst-case 72-byte DER signature plus the sighash byte, then
/// a push of a 33-byte compressed key.
pub const UNLOCKING_SCRIPT_MAX_LEN: usize = 1 + 72 + 1 + 1 + 33;

/// Locking script paying `address`.
pub fn lock(address: &Address) -> Script {
    Script::p2pkh(&address.public_key_hash)
}

/// Unlocker for inputs locked to `private_key`'s address.
///
/// # Arguments
/// * `private_key` - Signing key.
/// * `sighash_flag` - Defaults to `SIGHASH_ALL_FORKID` (0x41).
pub fn unlock(private_key: PrivateKey, sighash_flag: Option<u32>) -> P2PKH {
    P2PKH {
        private_key,
        sighash_flag: sighash_flag.unwrap_or(SIGHASH_ALL_FORKID),
    }
}

/// P2PKH signing template.
pub struct P2PKH {
    private_key: PrivateKey,
    sighash_flag: u32,
}

impl P2PKH {
    /// The locking script this key can spend.
    pub fn locking_script(&self) -> Script {
        Script::p2pkh(&self.private_key.pub_key().hash160())
    }
}

impl UnlockingScriptTemplate for P2PKH {
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError> {
        let sig_hash = tx.calc_input_signature_hash(input_index, self.sighash_flag)?;
        let signature = self.private_key.sign(&sig_hash)?;

        let mut sig_buf = signature.to_der();
        sig_buf.push(self.sighash_flag as u8);

        let mut script = Script::new();
        script.append_push_data(&sig_buf)?;
        script.append_push_data(&self.private_key.pub_key().to_compressed())?;
        Ok(script)
    }

    fn estimate_length(&self) -> usize {
        UNLOCKING_SCRIPT_MAX_LEN
    }
}
