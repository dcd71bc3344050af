//! Unsigned transaction assembly.

use slp_transaction::{Transaction, TransactionInput, TransactionOutput};

use crate::outputs::OutputPlan;
use crate::selector::SpendableOutput;
use crate::EngineError;

/// Selected inputs and planned outputs composed into an unsigned transaction.
#[derive(Clone, Debug)]
pub struct DraftTransaction {
    tx: Transaction,
    inputs: Vec<SpendableOutput>,
    plan: OutputPlan,
}

impl DraftTransaction {
    /// The unsigned transaction. Inputs carry their spent outputs where the
    /// locking script is known.
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    pub fn inputs(&self) -> &[SpendableOutput] {
        &self.inputs
    }

    pub fn plan(&self) -> &OutputPlan {
        &self.plan
    }

    pub fn input_total(&self) -> u64 {
        self.inputs.iter().map(|u| u.satoshis).sum()
    }

    pub(crate) fn into_parts(self) -> (Transaction, Vec<SpendableOutput>, OutputPlan) {
        (self.tx, self.inputs, self.plan)
    }
}

/// Compose inputs (in selection order) and outputs (in plan order).
///
/// Version 2, lock time 0, every input final.
pub fn assemble(inputs: &[SpendableOutput], plan: &OutputPlan) -> Result<DraftTransaction, EngineError> {
    if inputs.is_empty() {
        return Err(EngineError::EmptyInputSet);
    }

    let mut tx = Transaction::new();
    for utxo in inputs {
        let mut input = TransactionInput::new(utxo.txid, utxo.vout);
        if let Some(script) = &utxo.locking_script {
            input.set_source_output(Some(TransactionOutput::new(utxo.satoshis, script.clone())));
        }
        tx.add_input(input);
    }
    for planned in plan.outputs() {
        tx.add_output(TransactionOutput::new(planned.satoshis, planned.locking_script()));
    }

    Ok(DraftTransaction {
        tx,
        inputs: inputs.to_vec(),
        plan: plan.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::MonetaryValue;
    use crate::outputs::{self, Payment, PaymentRequest};
    use slp_primitives::TxId;
    use slp_script::{Network, Script};
    use slp_transaction::input::DEFAULT_SEQUENCE_NUMBER;

    const ADDR: &str = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH";

    fn plan() -> OutputPlan {
        let request = PaymentRequest::new(
            vec![Payment::new(ADDR, MonetaryValue::from_atomic_units(1_000))],
            ADDR,
        );
        outputs::build(&request.validate(Network::Mainnet).unwrap(), 10_000, 374, 546).unwrap()
    }

    #[test]
    fn test_structure() {
        let known = Script::p2pkh(&[7u8; 20]);
        let inputs = vec![
            SpendableOutput::new(TxId::new([1; 32]), 0, 6_000, "a").with_locking_script(known.clone()),
            SpendableOutput::new(TxId::new([2; 32]), 5, 4_000, "b"),
        ];
        let draft = assemble(&inputs, &plan()).unwrap();
        let tx = draft.transaction();

        assert_eq!(tx.version, 2);
        assert_eq!(tx.lock_time, 0);
        assert_eq!(tx.input_count(), 2);
        assert_eq!(tx.inputs[1].source_output_index, 5);
        assert!(tx.inputs.iter().all(|i| i.sequence_number == DEFAULT_SEQUENCE_NUMBER));
        assert!(tx.inputs.iter().all(|i| i.unlocking_script.is_none()));
        assert_eq!(tx.inputs[0].source_output().unwrap().locking_script, known);
        assert!(tx.inputs[1].source_output().is_none());

        assert_eq!(tx.output_count(), 2);
        assert_eq!(tx.outputs[0].satoshis, 1_000);
        assert!(tx.outputs[0].locking_script.is_p2pkh());
        assert_eq!(tx.outputs[1].satoshis, 10_000 - 1_000 - 374);
        assert_eq!(draft.input_total(), 10_000);
    }

    #[test]
    fn test_no_inputs() {
        assert!(matches!(assemble(&[], &plan()), Err(EngineError::EmptyInputSet)));
    }
}
