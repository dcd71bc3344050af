//! Size and fee estimation from output counts.
//!
//! The transaction does not exist yet when its fee is needed, so size is
//! modelled from the number of inputs and outputs of standard compressed-key
//! P2PKH shape plus the length of any metadata script.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use slp_script::Network;

use crate::EngineError;

/// Per-component byte costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteCostModel {
    /// Version, locktime and the two count prefixes.
    pub base_overhead: u64,
    /// Outpoint, signature/pubkey unlocking script and sequence.
    pub per_input: u64,
    /// Amount plus a P2PKH locking script.
    pub per_output: u64,
}

impl ByteCostModel {
    pub const P2PKH: ByteCostModel = ByteCostModel {
        base_overhead: 10,
        per_input: 148,
        per_output: 34,
    };
}

impl Default for ByteCostModel {
    fn default() -> Self {
        Self::P2PKH
    }
}

/// Fee rate, network and size model for one engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeParameters {
    rate: Decimal,
    network: Network,
    cost_model: ByteCostModel,
}

impl FeeParameters {
    /// # Arguments
    /// * `rate` - Atomic units per byte; must be positive.
    /// * `network` - Network destinations are checked against.
    pub fn new(rate: Decimal, network: Network) -> Result<Self, EngineError> {
        if rate <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                reason: format!("fee rate must be positive, got {}", rate),
            });
        }
        Ok(FeeParameters {
            rate,
            network,
            cost_model: ByteCostModel::default(),
        })
    }

    pub fn with_cost_model(mut self, cost_model: ByteCostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn cost_model(&self) -> &ByteCostModel {
        &self.cost_model
    }
}

/// Estimated serialized size in bytes.
///
/// A metadata output counts once in `output_count`; its script length is
/// added on top as `metadata_len`.
pub fn estimate_size(
    input_count: usize,
    output_count: usize,
    metadata_len: usize,
    model: &ByteCostModel,
) -> u64 {
    model
        .base_overhead
        .saturating_add((input_count as u64).saturating_mul(model.per_input))
        .saturating_add((output_count as u64).saturating_mul(model.per_output))
        .saturating_add(metadata_len as u64)
}

/// `floor(rate * size)` in atomic units.
pub fn estimate(
    input_count: usize,
    output_count: usize,
    metadata_len: usize,
    params: &FeeParameters,
) -> u64 {
    let bytes = estimate_size(input_count, output_count, metadata_len, &params.cost_model);
    params
        .rate
        .checked_mul(Decimal::from(bytes))
        .and_then(|fee| fee.floor().to_u64())
        .unwrap_or(u64::MAX)
}
