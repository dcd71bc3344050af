//! Engine configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use slp_script::Network;

use crate::fee::FeeParameters;
use crate::selector::SelectionOrder;
use crate::EngineError;

/// Smallest output the relay policy accepts, in atomic units.
pub const DEFAULT_DUST_THRESHOLD: u64 = 546;

/// 1.01 atomic units per byte.
pub fn default_fee_rate() -> Decimal {
    Decimal::new(101, 2)
}

/// Settings for a [`crate::TransactionEngine`].
///
/// ```json
/// { "network": "testnet", "fee_rate_per_byte": "1.01", "dust_threshold": 546 }
/// ```
///
/// Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub network: Network,
    pub fee_rate_per_byte: Decimal,
    pub dust_threshold: u64,
    pub selection_order: SelectionOrder,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            network: Network::Mainnet,
            fee_rate_per_byte: default_fee_rate(),
            dust_threshold: DEFAULT_DUST_THRESHOLD,
            selection_order: SelectionOrder::PoolOrder,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.fee_rate_per_byte <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                reason: format!("fee_rate_per_byte must be positive, got {}", self.fee_rate_per_byte),
            });
        }
        Ok(())
    }

    pub fn fee_parameters(&self) -> Result<FeeParameters, EngineError> {
        FeeParameters::new(self.fee_rate_per_byte, self.network)
    }
}
