//! Key lookup and input signing.
//!
//! Every input is a P2PKH spend signed with `SIGHASH_ALL | SIGHASH_FORKID`.
//! Keys for all inputs are resolved before the first signature is made, so
//! a missing key never leaves a half-signed transaction behind.

use std::collections::HashMap;

use log::{debug, trace};
use slp_primitives::ec::PrivateKey;
use slp_primitives::TxId;
use slp_transaction::template::p2pkh::{self, P2PKH};
use slp_transaction::template::UnlockingScriptTemplate;
use slp_transaction::{Transaction, TransactionError, TransactionOutput};

use crate::assembler::DraftTransaction;
use crate::outputs::OutputPlan;
use crate::selector::{KeyRef, OutPoint, SpendableOutput};
use crate::EngineError;

/// Source of signing keys.
pub trait KeyProvider {
    fn signing_key(&self, key_ref: &KeyRef) -> Option<PrivateKey>;
}

/// In-memory key provider.
#[derive(Default)]
pub struct KeyStore {
    keys: HashMap<KeyRef, PrivateKey>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key_ref: impl Into<KeyRef>, key: PrivateKey) {
        self.keys.insert(key_ref.into(), key);
    }

    /// Decode a WIF string and store it under `key_ref`.
    pub fn insert_wif(&mut self, key_ref: impl Into<KeyRef>, wif: &str) -> Result<(), EngineError> {
        let key = PrivateKey::from_wif(wif).map_err(TransactionError::from)?;
        self.insert(key_ref, key);
        Ok(())
    }

    pub fn contains(&self, key_ref: &KeyRef) -> bool {
        self.keys.contains_key(key_ref)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyProvider for KeyStore {
    fn signing_key(&self, key_ref: &KeyRef) -> Option<PrivateKey> {
        self.keys.get(key_ref).cloned()
    }
}

/// A fully signed transaction, ready to broadcast.
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    tx: Transaction,
    inputs: Vec<SpendableOutput>,
    plan: OutputPlan,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.tx.to_bytes()
    }

    pub fn to_hex(&self) -> String {
        self.tx.to_hex()
    }

    pub fn txid(&self) -> TxId {
        self.tx.tx_id()
    }

    pub fn fee(&self) -> u64 {
        self.input_total().saturating_sub(self.output_total())
    }

    pub fn input_total(&self) -> u64 {
        self.inputs.iter().map(|u| u.satoshis).sum()
    }

    pub fn output_total(&self) -> u64 {
        self.tx.total_output_satoshis()
    }

    pub fn plan(&self) -> &OutputPlan {
        &self.plan
    }

    /// Outputs this transaction spends.
    pub fn spent_outpoints(&self) -> Vec<OutPoint> {
        self.inputs.iter().map(SpendableOutput::outpoint).collect()
    }
}

/// Sign every input of `draft`.
///
/// # Returns
/// The signed transaction, or `SigningKeyUnavailable` naming the first input
/// whose key the provider does not have.
pub fn sign(draft: DraftTransaction, keys: &dyn KeyProvider) -> Result<SignedTransaction, EngineError> {
    let (mut tx, inputs, plan) = draft.into_parts();

    let unlockers: Vec<P2PKH> = inputs
        .iter()
        .enumerate()
        .map(|(input_index, utxo)| {
            keys.signing_key(&utxo.key_ref)
                .map(|key| p2pkh::unlock(key, None))
                .ok_or_else(|| EngineError::SigningKeyUnavailable {
                    input_index,
                    key_ref: utxo.key_ref.clone(),
                })
        })
        .collect::<Result<_, _>>()?;

    for ((input, utxo), unlocker) in tx.inputs.iter_mut().zip(&inputs).zip(&unlockers) {
        if input.source_output().is_none() {
            input.set_source_output(Some(TransactionOutput::new(
                utxo.satoshis,
                unlocker.locking_script(),
            )));
        }
    }

    // The fork-id digest does not cover unlocking scripts, so every input
    // can be signed against the same unsigned transaction.
    let scripts = unlockers
        .iter()
        .enumerate()
        .map(|(i, unlocker)| unlocker.sign(&tx, i))
        .collect::<Result<Vec<_>, _>>()?;

    for (i, (input, script)) in tx.inputs.iter_mut().zip(scripts).enumerate() {
        trace!("signed input {} ({} bytes)", i, script.len());
        input.unlocking_script = Some(script);
    }

    debug!("signed transaction {} ({} bytes)", tx.tx_id(), tx.size());
    Ok(SignedTransaction { tx, inputs, plan })
}
