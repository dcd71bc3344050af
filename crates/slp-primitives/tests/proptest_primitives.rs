use proptest::prelude::*;

use slp_primitives::ec::PrivateKey;
use slp_primitives::hash::sha256;
use slp_primitives::util::{ByteReader, ByteWriter, VarInt};
use slp_primitives::TxId;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn wif_round_trip(seed in prop::array::uniform32(any::<u8>())) {
        // Not every 32-byte array is a valid scalar.
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let back = PrivateKey::from_wif(&pk.to_wif()).unwrap();
            prop_assert_eq!(pk.to_hex(), back.to_hex());
        }
    }

    #[test]
    fn signatures_verify_and_are_low_s(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let sig = pk.sign(&digest).unwrap();
            prop_assert!(sig.is_low_s());
            prop_assert!(pk.pub_key().verify(&digest, &sig));
        }
    }

    #[test]
    fn txid_display_parses_back(bytes in prop::array::uniform32(any::<u8>())) {
        let id = TxId::new(bytes);
        let parsed: TxId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    #[test]
    fn varint_reader_consumes_exact_length(value in any::<u64>(), tail in prop::collection::vec(any::<u8>(), 0..8)) {
        let mut writer = ByteWriter::new();
        writer.write_varint(VarInt(value));
        writer.write_bytes(&tail);
        let data = writer.into_bytes();

        let mut reader = ByteReader::new(&data);
        prop_assert_eq!(reader.read_varint().unwrap(), VarInt(value));
        prop_assert_eq!(reader.remaining(), tail.len());
    }
}
