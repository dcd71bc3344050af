use proptest::prelude::*;

use slp_primitives::TxId;
use slp_script::Script;
use slp_transaction::{Transaction, TransactionInput, TransactionOutput};

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    let arb_input = (
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 0..64),
        any::<u32>(),
    )
        .prop_map(|(txid, vout, script_bytes, seq)| {
            let mut input = TransactionInput::new(TxId::new(txid), vout);
            input.unlocking_script = Some(Script::from_bytes(&script_bytes));
            input.sequence_number = seq;
            input
        });

    let arb_output = (any::<u64>(), prop::collection::vec(any::<u8>(), 0..64))
        .prop_map(|(satoshis, script_bytes)| {
            TransactionOutput::new(satoshis, Script::from_bytes(&script_bytes))
        });

    (
        any::<u32>(),
        prop::collection::vec(arb_input, 1..4),
        prop::collection::vec(arb_output, 1..4),
        any::<u32>(),
    )
        .prop_map(|(version, inputs, outputs, lock_time)| {
            let mut tx = Transaction::new();
            tx.version = version;
            tx.lock_time = lock_time;
            inputs.into_iter().for_each(|i| tx.add_input(i));
            outputs.into_iter().for_each(|o| tx.add_output(o));
            tx
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_bytes_reparse_identically(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let reparsed = Transaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(reparsed.to_bytes(), bytes);
        prop_assert_eq!(reparsed.tx_id(), tx.tx_id());
        prop_assert_eq!(reparsed.size(), tx.size());
    }

    #[test]
    fn truncated_transaction_is_rejected(tx in arb_transaction(), cut in 1usize..8) {
        let bytes = tx.to_bytes();
        let end = bytes.len().saturating_sub(cut);
        prop_assert!(Transaction::from_bytes(&bytes[..end]).is_err());
    }
}
