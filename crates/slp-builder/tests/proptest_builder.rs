use proptest::prelude::*;
use rust_decimal::Decimal;

use slp_builder::outputs::OutputKind;
use slp_builder::{
    fee, EngineConfig, EngineError, MetadataPayload, MonetaryValue, Payment, PaymentRequest,
    SelectionOrder, SpendableOutput, TransactionEngine,
};
use slp_primitives::TxId;

const PAYEES: [&str; 3] = [
    "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu",
    "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
    "bitcoincash:qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2",
];
const CHANGE: &str = "bitcoincash:qp63uahgrxged4z5jswyt5dn5v3lzsem6cy4spdc2h";

fn arb_pool() -> impl Strategy<Value = Vec<SpendableOutput>> {
    prop::collection::vec(1u64..2_000_000, 1..12).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| SpendableOutput::new(TxId::new([i as u8; 32]), i as u32, v, "k"))
            .collect()
    })
}

fn arb_request() -> impl Strategy<Value = PaymentRequest> {
    (
        prop::collection::vec((0usize..3, 546u64..500_000), 1..4),
        any::<bool>(),
    )
        .prop_map(|(payments, with_metadata)| {
            let payments = payments
                .into_iter()
                .map(|(p, v)| Payment::new(PAYEES[p], MonetaryValue::from_atomic_units(v)))
                .collect();
            let request = PaymentRequest::new(payments, CHANGE);
            if with_metadata {
                request.with_metadata(
                    MetadataPayload::from_hex("6a04534c500001010453454e44").unwrap(),
                )
            } else {
                request
            }
        })
}

fn arb_engine() -> impl Strategy<Value = TransactionEngine> {
    (1i64..500, any::<bool>()).prop_map(|(hundredths, largest_first)| {
        TransactionEngine::new(EngineConfig {
            fee_rate_per_byte: Decimal::new(hundredths, 2),
            selection_order: if largest_first {
                SelectionOrder::LargestFirst
            } else {
                SelectionOrder::PoolOrder
            },
            ..Default::default()
        })
        .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn built_transactions_conserve_value(
        engine in arb_engine(),
        pool in arb_pool(),
        request in arb_request(),
    ) {
        let dust = engine.config().dust_threshold;
        match engine.build(&request, &pool) {
            Ok(draft) => {
                let plan = draft.plan();
                let requested = request.validate(engine.config().network).unwrap().payment_total();
                let tx = draft.transaction();

                // coverage and conservation
                prop_assert!(draft.input_total() >= requested + plan.fee());
                prop_assert_eq!(draft.input_total(), tx.total_output_satoshis() + plan.fee());
                prop_assert_eq!(plan.total(), tx.total_output_satoshis());

                // dust
                if let Some(change) = plan.change() {
                    prop_assert!(change.satoshis >= dust);
                    prop_assert_eq!(plan.absorbed_remainder(), 0);
                } else {
                    prop_assert!(plan.absorbed_remainder() < dust);
                }

                // metadata, then payments in request order, then change
                let kinds: Vec<OutputKind> = plan.outputs().iter().map(|o| o.kind).collect();
                let mut expected = Vec::new();
                if request.metadata.is_some() {
                    expected.push(OutputKind::Metadata);
                }
                expected.extend(request.payments.iter().map(|_| OutputKind::Payment));
                if plan.change().is_some() {
                    expected.push(OutputKind::Change);
                }
                prop_assert_eq!(kinds, expected);

                let offset = usize::from(request.metadata.is_some());
                for (i, payment) in request.payments.iter().enumerate() {
                    prop_assert_eq!(
                        tx.outputs[offset + i].satoshis,
                        payment.amount.to_atomic_units().unwrap()
                    );
                }

                // no input before the last one could have covered alone
                let est = fee::estimate(
                    draft.inputs().len() - 1,
                    request.output_count() + 1,
                    request.metadata_len(),
                    engine.fee_parameters(),
                );
                let before_last: u64 = draft.inputs()[..draft.inputs().len() - 1]
                    .iter()
                    .map(|u| u.satoshis)
                    .sum();
                prop_assert!(draft.inputs().len() == 1 || before_last < requested + est);
            }
            Err(EngineError::InsufficientFunds { requested, available, .. }) => {
                prop_assert_eq!(requested, request.validate(engine.config().network).unwrap().payment_total());
                prop_assert_eq!(available, pool.iter().map(|u| u.satoshis).sum::<u64>());
                let all_inputs_fee = fee::estimate(
                    pool.len(),
                    request.output_count() + 1,
                    request.metadata_len(),
                    engine.fee_parameters(),
                );
                prop_assert!(available < requested + all_inputs_fee);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn output_order_ignores_pool_order(
        pool in arb_pool(),
        request in arb_request(),
    ) {
        let engine = TransactionEngine::new(EngineConfig::default()).unwrap();
        let mut reversed = pool.clone();
        reversed.reverse();

        let forward = engine.build(&request, &pool);
        let backward = engine.build(&request, &reversed);
        if let (Ok(a), Ok(b)) = (forward, backward) {
            let payments_a: Vec<_> = a.plan().outputs().iter()
                .filter(|o| o.kind != OutputKind::Change)
                .cloned()
                .collect();
            let payments_b: Vec<_> = b.plan().outputs().iter()
                .filter(|o| o.kind != OutputKind::Change)
                .cloned()
                .collect();
            prop_assert_eq!(payments_a, payments_b);
        }
    }

    #[test]
    fn fee_estimate_is_monotonic(inputs in 0usize..50, outputs in 0usize..50, meta in 0usize..224) {
        let params = slp_builder::FeeParameters::new(Decimal::new(101, 2), slp_script::Network::Mainnet).unwrap();
        let base = fee::estimate(inputs, outputs, meta, &params);
        prop_assert_eq!(base, fee::estimate(inputs, outputs, meta, &params));
        prop_assert!(fee::estimate(inputs + 1, outputs, meta, &params) > base);
        prop_assert!(fee::estimate(inputs, outputs + 1, meta, &params) > base);
    }
}
