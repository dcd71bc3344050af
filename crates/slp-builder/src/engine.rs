//! One-call transaction construction.

use log::debug;

use crate::amount::MonetaryValue;
use crate::assembler::{self, DraftTransaction};
use crate::config::EngineConfig;
use crate::fee::{self, FeeParameters};
use crate::outputs::{self, PaymentRequest};
use crate::selector::{SpendableOutput, UtxoSelector};
use crate::signer::{self, KeyProvider, SignedTransaction};
use crate::EngineError;

/// Validates, funds, lays out and signs payment requests under one
/// configuration.
///
/// The engine holds no pool state. After a successful call the caller
/// should drop [`SignedTransaction::spent_outpoints`] from its pool before
/// building the next transaction.
#[derive(Clone, Debug)]
pub struct TransactionEngine {
    config: EngineConfig,
    fee_params: FeeParameters,
    selector: UtxoSelector,
}

impl TransactionEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let fee_params = config.fee_parameters()?;
        let selector = UtxoSelector::new(config.selection_order);
        Ok(TransactionEngine {
            config,
            fee_params,
            selector,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fee_parameters(&self) -> &FeeParameters {
        &self.fee_params
    }

    /// Build the unsigned transaction for `request` funded from its
    /// required inputs and then `pool`.
    pub fn build(
        &self,
        request: &PaymentRequest,
        pool: &[SpendableOutput],
    ) -> Result<DraftTransaction, EngineError> {
        let resolved = request.validate(self.config.network)?;

        let selection = self.selector.select(
            pool,
            &request.required_inputs,
            resolved.payment_total(),
            &self.fee_params,
            request.metadata_len(),
            request.output_count(),
        )?;
        debug!(
            "selected {} inputs ({} required) from a pool of {}: total {} sat, fee {}",
            selection.inputs.len(),
            request.required_inputs.len(),
            pool.len(),
            selection.total,
            selection.fee
        );

        let plan = outputs::build(
            &resolved,
            selection.total,
            selection.fee,
            self.config.dust_threshold,
        )?;
        assembler::assemble(&selection.inputs, &plan)
    }

    /// Build and sign.
    pub fn construct(
        &self,
        request: &PaymentRequest,
        pool: &[SpendableOutput],
        keys: &dyn KeyProvider,
    ) -> Result<SignedTransaction, EngineError> {
        let draft = self.build(request, pool)?;
        signer::sign(draft, keys)
    }

    /// Fee for spending `input_count` outputs to one payee plus change.
    pub fn estimate_fee(&self, input_count: usize) -> MonetaryValue {
        MonetaryValue::from_atomic_units(fee::estimate(input_count, 2, 0, &self.fee_params))
    }
}
