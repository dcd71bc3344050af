//! Input selection.
//!
//! Inputs are accumulated one at a time from a caller-ordered pool. The fee
//! depends on the input count, so it is recomputed after every addition and
//! selection stops at the first prefix that covers the target plus fee.
//! Required inputs, such as a mint baton, are placed first and count toward
//! the total before the pool is walked.

use std::collections::HashSet;
use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};
use slp_primitives::TxId;
use slp_script::Script;

use crate::fee::{self, FeeParameters};
use crate::EngineError;

/// Opaque reference to the key that can spend an output, such as a
/// derivation path or an address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyRef(String);

impl KeyRef {
    pub fn new(key_ref: impl Into<String>) -> Self {
        KeyRef(key_ref.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyRef {
    fn from(s: &str) -> Self {
        KeyRef(s.to_string())
    }
}

impl From<String> for KeyRef {
    fn from(s: String) -> Self {
        KeyRef(s)
    }
}

/// Reference to a previous transaction output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutPoint {
    pub txid: TxId,
    pub vout: u32,
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.vout)
    }
}

/// An unspent output the wallet can spend.
///
/// Deserializes from the UTXO endpoint shape
/// `{ "txid", "vout", "satoshis", "confirmations", "keyRef" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendableOutput {
    pub txid: TxId,
    pub vout: u32,
    pub satoshis: u64,
    #[serde(default)]
    pub confirmations: u32,
    pub key_ref: KeyRef,
    /// Script of the spent output. When absent the signer uses the P2PKH
    /// script of the resolved key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locking_script: Option<Script>,
}

impl SpendableOutput {
    pub fn new(txid: TxId, vout: u32, satoshis: u64, key_ref: impl Into<KeyRef>) -> Self {
        SpendableOutput {
            txid,
            vout,
            satoshis,
            confirmations: 0,
            key_ref: key_ref.into(),
            locking_script: None,
        }
    }

    pub fn with_confirmations(mut self, confirmations: u32) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn with_locking_script(mut self, script: Script) -> Self {
        self.locking_script = Some(script);
        self
    }

    pub fn outpoint(&self) -> OutPoint {
        OutPoint {
            txid: self.txid,
            vout: self.vout,
        }
    }
}

/// Inputs chosen to fund a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// In selection order, which is also input order.
    pub inputs: Vec<SpendableOutput>,
    /// Sum of `inputs`.
    pub total: u64,
    /// Fee for these inputs with a change output assumed present.
    pub fee: u64,
}

impl Selection {
    /// Outpoints to remove from the pool once the transaction is accepted.
    pub fn outpoints(&self) -> Vec<OutPoint> {
        self.inputs.iter().map(SpendableOutput::outpoint).collect()
    }
}

/// Order in which the pool is walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// As supplied by the caller.
    #[default]
    PoolOrder,
    /// By value, descending. Equal values keep pool order.
    LargestFirst,
}

/// Deterministic accumulating selector.
#[derive(Clone, Copy, Debug, Default)]
pub struct UtxoSelector {
    order: SelectionOrder,
}

impl UtxoSelector {
    pub fn new(order: SelectionOrder) -> Self {
        UtxoSelector { order }
    }

    pub fn order(&self) -> SelectionOrder {
        self.order
    }

    /// Pick inputs covering `target` plus fee.
    ///
    /// # Arguments
    /// * `pool` - Candidate outputs.
    /// * `required` - Outputs that must be spent, in input order. Pool
    ///   entries with the same outpoint are skipped.
    /// * `target` - Sum of the payments, in atomic units.
    /// * `params` - Fee rate and size model.
    /// * `metadata_len` - Length of the metadata script, 0 if none.
    /// * `outputs_excluding_change` - Payment outputs plus the metadata output.
    ///
    /// # Returns
    /// The required inputs followed by the shortest covering prefix of the
    /// ordered pool, or `InsufficientFunds` when everything falls short.
    pub fn select(
        &self,
        pool: &[SpendableOutput],
        required: &[SpendableOutput],
        target: u64,
        params: &FeeParameters,
        metadata_len: usize,
        outputs_excluding_change: usize,
    ) -> Result<Selection, EngineError> {
        let ordered: Vec<&SpendableOutput> = match self.order {
            SelectionOrder::PoolOrder => pool.iter().collect(),
            SelectionOrder::LargestFirst => {
                let mut sorted: Vec<&SpendableOutput> = pool.iter().collect();
                // sort_by is stable
                sorted.sort_by(|a, b| b.satoshis.cmp(&a.satoshis));
                sorted
            }
        };

        let output_count = outputs_excluding_change + 1;
        let covers = |total: u64, fee: u64| total as u128 >= target as u128 + fee as u128;

        let mut spent: HashSet<OutPoint> = HashSet::new();
        let mut inputs = Vec::with_capacity(required.len());
        let mut total: u64 = 0;
        for input in required {
            if spent.insert(input.outpoint()) {
                inputs.push(input.clone());
                total = total.saturating_add(input.satoshis);
            }
        }
        let mut fee = fee::estimate(inputs.len().max(1), output_count, metadata_len, params);
        if !inputs.is_empty() {
            trace!(
                "seeded {} required inputs: total={} fee={}",
                inputs.len(),
                total,
                fee
            );
            if covers(total, fee) {
                return Ok(Selection { inputs, total, fee });
            }
        }

        for candidate in ordered {
            if !spent.insert(candidate.outpoint()) {
                continue;
            }
            inputs.push(candidate.clone());
            total = total.saturating_add(candidate.satoshis);
            fee = fee::estimate(inputs.len(), output_count, metadata_len, params);

            trace!(
                "selected {} ({} sat): total={} fee={} needed={}",
                candidate.outpoint(),
                candidate.satoshis,
                total,
                fee,
                target as u128 + fee as u128
            );
            if covers(total, fee) {
                return Ok(Selection { inputs, total, fee });
            }
        }

        Err(EngineError::InsufficientFunds {
            requested: target,
            available: total,
            fee,
        })
    }
}
