//! Payment requests and output planning.
//!
//! Output order is fixed: the metadata output (if any) at index 0, then the
//! payments in request order, then change. Change below the dust threshold
//! is not created; it is left to the miner as extra fee.

use log::{debug, warn};
use slp_script::opcodes::OP_RETURN;
use slp_script::script::MAX_NULL_DATA_SIZE;
use slp_script::{Address, Network, Script};
use slp_transaction::template::p2pkh;

use crate::amount::MonetaryValue;
use crate::selector::SpendableOutput;
use crate::EngineError;

/// One payee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    /// Legacy or CashAddr P2PKH address.
    pub destination: String,
    pub amount: MonetaryValue,
}

impl Payment {
    pub fn new(destination: impl Into<String>, amount: MonetaryValue) -> Self {
        Payment {
            destination: destination.into(),
            amount,
        }
    }
}

impl TryFrom<(&str, &str)> for Payment {
    type Error = EngineError;

    /// `(address, decimal coin amount)`.
    fn try_from((destination, amount): (&str, &str)) -> Result<Self, Self::Error> {
        Ok(Payment::new(destination, amount.parse()?))
    }
}

/// A null-data script carried in a zero-value output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataPayload(Script);

impl MetadataPayload {
    /// Validate a complete `OP_RETURN <push>...` script.
    ///
    /// # Returns
    /// The payload, or `MalformedMetadataPayload` if the script is longer
    /// than 223 bytes, does not start with OP_RETURN, or contains anything
    /// but pushes after it.
    pub fn new(script: Script) -> Result<Self, EngineError> {
        let malformed = |reason: String| EngineError::MalformedMetadataPayload { reason };
        if script.len() > MAX_NULL_DATA_SIZE {
            return Err(malformed(format!(
                "{} bytes exceeds the {} byte limit",
                script.len(),
                MAX_NULL_DATA_SIZE
            )));
        }
        if script.to_bytes().first() != Some(&OP_RETURN) {
            return Err(malformed("does not start with OP_RETURN".to_string()));
        }
        if !script.is_null_data() {
            return Err(malformed("data after OP_RETURN is not push-only".to_string()));
        }
        Ok(MetadataPayload(script))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, EngineError> {
        let script = Script::from_hex(hex_str).map_err(|e| EngineError::MalformedMetadataPayload {
            reason: e.to_string(),
        })?;
        Self::new(script)
    }

    pub fn script(&self) -> &Script {
        &self.0
    }

    /// Script length in bytes, as charged by the fee model.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the caller wants paid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    pub payments: Vec<Payment>,
    pub metadata: Option<MetadataPayload>,
    pub change_address: String,
    /// Outputs that must be spent whatever the pool holds, such as a mint
    /// baton. They lead the input list and their value funds the request.
    pub required_inputs: Vec<SpendableOutput>,
}

impl PaymentRequest {
    pub fn new(payments: Vec<Payment>, change_address: impl Into<String>) -> Self {
        PaymentRequest {
            payments,
            metadata: None,
            change_address: change_address.into(),
            required_inputs: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: MetadataPayload) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_required_input(mut self, input: SpendableOutput) -> Self {
        self.required_inputs.push(input);
        self
    }

    /// Outputs other than change: payments plus the metadata output.
    pub fn output_count(&self) -> usize {
        self.payments.len() + usize::from(self.metadata.is_some())
    }

    pub fn metadata_len(&self) -> usize {
        self.metadata.as_ref().map_or(0, MetadataPayload::len)
    }

    /// Check shape, every address and every amount against `network`.
    ///
    /// Nothing is selected or built until this passes. The decoded
    /// addresses and atomic amounts are carried forward so output planning
    /// does not parse them again.
    pub fn validate(&self, network: Network) -> Result<ResolvedRequest<'_>, EngineError> {
        if self.payments.is_empty() && self.metadata.is_none() {
            return Err(EngineError::EmptyPaymentRequest);
        }
        let mut payments = Vec::with_capacity(self.payments.len());
        let mut total: u64 = 0;
        for payment in &self.payments {
            let address = parse_destination(&payment.destination, network)?;
            let units = payment_units(payment)?;
            total = total.checked_add(units).ok_or_else(|| EngineError::InvalidAmount {
                amount: payment.amount.to_string(),
                reason: "payment total overflows".to_string(),
            })?;
            payments.push((address, units));
        }
        let change = parse_destination(&self.change_address, network)?;
        Ok(ResolvedRequest {
            request: self,
            payments,
            change,
            total,
        })
    }
}

/// A request whose destinations and amounts have been decoded for one
/// network.
#[derive(Clone, Debug)]
pub struct ResolvedRequest<'a> {
    request: &'a PaymentRequest,
    payments: Vec<(Address, u64)>,
    change: Address,
    total: u64,
}

impl<'a> ResolvedRequest<'a> {
    pub fn request(&self) -> &'a PaymentRequest {
        self.request
    }

    /// Payees with their amounts in atomic units, in request order.
    pub fn payments(&self) -> &[(Address, u64)] {
        &self.payments
    }

    pub fn change_address(&self) -> &Address {
        &self.change
    }

    /// Sum of the payments in atomic units.
    pub fn payment_total(&self) -> u64 {
        self.total
    }
}

fn payment_units(payment: &Payment) -> Result<u64, EngineError> {
    let units = payment.amount.to_atomic_units()?;
    if units == 0 {
        return Err(EngineError::InvalidAmount {
            amount: payment.amount.to_string(),
            reason: "payment amount must be positive".to_string(),
        });
    }
    Ok(units)
}

/// Parse a P2PKH destination and check it belongs to `network`.
pub fn parse_destination(address: &str, network: Network) -> Result<Address, EngineError> {
    let parsed = Address::from_string(address).map_err(|e| EngineError::InvalidDestination {
        address: address.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.network != network {
        return Err(EngineError::InvalidDestination {
            address: address.to_string(),
            reason: format!("address is for {:?}, engine is on {:?}", parsed.network, network),
        });
    }
    Ok(parsed)
}

/// Role of a planned output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    Metadata,
    Payment,
    Change,
}

/// Where a planned output's value goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    Address(Address),
    Metadata(MetadataPayload),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedOutput {
    pub kind: OutputKind,
    pub target: OutputTarget,
    pub satoshis: u64,
}

impl PlannedOutput {
    pub fn locking_script(&self) -> Script {
        match &self.target {
            OutputTarget::Address(address) => p2pkh::lock(address),
            OutputTarget::Metadata(payload) => payload.script().clone(),
        }
    }
}

/// Ordered outputs plus the fee they leave behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPlan {
    outputs: Vec<PlannedOutput>,
    fee: u64,
    absorbed_remainder: u64,
}

impl OutputPlan {
    pub fn outputs(&self) -> &[PlannedOutput] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Sum of all output values.
    pub fn total(&self) -> u64 {
        self.outputs.iter().map(|o| o.satoshis).sum()
    }

    pub fn change(&self) -> Option<&PlannedOutput> {
        self.outputs.iter().find(|o| o.kind == OutputKind::Change)
    }

    /// Fee actually paid: the estimate plus any absorbed remainder.
    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// Sub-dust remainder given up to the fee, 0 when change was created.
    pub fn absorbed_remainder(&self) -> u64 {
        self.absorbed_remainder
    }
}

/// Lay out the outputs for a funded request.
///
/// # Arguments
/// * `resolved` - The validated request.
/// * `inputs_total` - Sum of the selected inputs.
/// * `fee` - Fee estimate from selection.
/// * `dust_threshold` - Smallest change output worth creating.
///
/// # Returns
/// The plan, or `InsufficientFunds` if the inputs do not cover payments and fee.
pub fn build(
    resolved: &ResolvedRequest<'_>,
    inputs_total: u64,
    fee: u64,
    dust_threshold: u64,
) -> Result<OutputPlan, EngineError> {
    let request = resolved.request();
    let mut outputs = Vec::with_capacity(request.output_count() + 1);
    if let Some(metadata) = &request.metadata {
        outputs.push(PlannedOutput {
            kind: OutputKind::Metadata,
            target: OutputTarget::Metadata(metadata.clone()),
            satoshis: 0,
        });
    }
    for (address, units) in resolved.payments() {
        outputs.push(PlannedOutput {
            kind: OutputKind::Payment,
            target: OutputTarget::Address(address.clone()),
            satoshis: *units,
        });
    }

    let requested = resolved.payment_total();
    let remainder = inputs_total as i128 - requested as i128 - fee as i128;
    if remainder < 0 {
        return Err(EngineError::InsufficientFunds {
            requested,
            available: inputs_total,
            fee,
        });
    }
    let remainder = remainder as u64;

    let mut plan = OutputPlan {
        outputs,
        fee,
        absorbed_remainder: 0,
    };
    if remainder >= dust_threshold && remainder > 0 {
        plan.outputs.push(PlannedOutput {
            kind: OutputKind::Change,
            target: OutputTarget::Address(resolved.change_address().clone()),
            satoshis: remainder,
        });
    } else if remainder > 0 {
        warn!(
            "change of {} sat is below dust threshold {}; adding it to the fee",
            remainder, dust_threshold
        );
        plan.absorbed_remainder = remainder;
        plan.fee = fee + remainder;
    }

    debug!(
        "planned {} outputs totalling {} sat, fee {}",
        plan.len(),
        plan.total(),
        plan.fee
    );
    Ok(plan)
}
