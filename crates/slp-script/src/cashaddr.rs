//! CashAddr encoding for P2PKH hashes.
//!
//! `prefix:payload` where the payload is base32 over a version byte and the
//! hash, followed by a 40-bit BCH-code checksum that also covers the prefix.

use crate::address::Network;
use crate::ScriptError;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Version byte for a P2PKH (type 0) 160-bit hash.
const P2PKH_VERSION: u8 = 0x00;

const CHECKSUM_LEN: usize = 8;

/// Human-readable prefixes this crate understands.
///
/// The SLP prefixes encode the same hashes as the plain BCH ones; wallets
/// use them to keep token addresses visually distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CashAddrPrefix {
    BitcoinCash,
    BchTest,
    SimpleLedger,
    SlpTest,
}

impl CashAddrPrefix {
    pub const ALL: [CashAddrPrefix; 4] = [
        CashAddrPrefix::BitcoinCash,
        CashAddrPrefix::BchTest,
        CashAddrPrefix::SimpleLedger,
        CashAddrPrefix::SlpTest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CashAddrPrefix::BitcoinCash => "bitcoincash",
            CashAddrPrefix::BchTest => "bchtest",
            CashAddrPrefix::SimpleLedger => "simpleledger",
            CashAddrPrefix::SlpTest => "slptest",
        }
    }

    pub fn network(&self) -> Network {
        match self {
            CashAddrPrefix::BitcoinCash | CashAddrPrefix::SimpleLedger => Network::Mainnet,
            CashAddrPrefix::BchTest | CashAddrPrefix::SlpTest => Network::Testnet,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        CashAddrPrefix::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

fn polymod(values: impl IntoIterator<Item = u8>) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];
    let mut c: u64 = 1;
    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ d as u64;
        for (i, g) in GENERATORS.iter().enumerate() {
            if c0 & (1 << i) != 0 {
                c ^= g;
            }
        }
    }
    c ^ 1
}

fn prefix_values(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(std::iter::once(0))
}

/// Regroup bits; `pad` controls whether a trailing partial group is emitted.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max = (1u32 << to) - 1;
    let max_acc = (1u32 << (from + to - 1)) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for &value in data {
        if (value as u32) >> from != 0 {
            return None;
        }
        acc = ((acc << from) | value as u32) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max) != 0 {
        return None;
    }
    Some(out)
}

/// Encode a P2PKH hash under the given prefix.
pub fn encode(prefix: CashAddrPrefix, public_key_hash: &[u8; 20]) -> String {
    let mut raw = Vec::with_capacity(21);
    raw.push(P2PKH_VERSION);
    raw.extend_from_slice(public_key_hash);
    // 8-bit to 5-bit with padding cannot fail.
    let mut payload = convert_bits(&raw, 8, 5, true).unwrap_or_default();

    let checksum = polymod(
        prefix_values(prefix.as_str())
            .chain(payload.iter().copied())
            .chain([0u8; CHECKSUM_LEN]),
    );
    payload.extend((0..CHECKSUM_LEN).map(|i| ((checksum >> (5 * (7 - i))) & 0x1f) as u8));

    let mut out = String::with_capacity(prefix.as_str().len() + 1 + payload.len());
    out.push_str(prefix.as_str());
    out.push(':');
    out.extend(payload.iter().map(|&v| CHARSET[v as usize] as char));
    out
}

/// Decode a CashAddr P2PKH address.
///
/// The prefix may be omitted, in which case each known prefix is tried in
/// turn and the first with a valid checksum wins. Mixed case is rejected.
///
/// # Arguments
/// * `addr` - The address, with or without `prefix:`.
///
/// # Returns
/// The prefix that validated and the 20-byte hash.
pub fn decode(addr: &str) -> Result<(CashAddrPrefix, [u8; 20]), ScriptError> {
    let invalid = |reason: &str| ScriptError::InvalidCashAddr(format!("{}: {}", addr, reason));

    let has_lower = addr.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = addr.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(invalid("mixed case"));
    }
    let lowered = addr.to_ascii_lowercase();

    let (candidates, payload_str): (Vec<CashAddrPrefix>, &str) = match lowered.split_once(':') {
        Some((prefix, payload)) => {
            let prefix = CashAddrPrefix::parse(prefix).ok_or_else(|| invalid("unknown prefix"))?;
            (vec![prefix], payload)
        }
        None => (CashAddrPrefix::ALL.to_vec(), lowered.as_str()),
    };

    let payload = payload_str
        .bytes()
        .map(|c| {
            CHARSET
                .iter()
                .position(|&x| x == c)
                .map(|p| p as u8)
        })
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| invalid("character outside base32 alphabet"))?;
    if payload.len() <= CHECKSUM_LEN {
        return Err(invalid("too short"));
    }

    let prefix = candidates
        .into_iter()
        .find(|p| polymod(prefix_values(p.as_str()).chain(payload.iter().copied())) == 0)
        .ok_or(ScriptError::EncodingChecksumFailed)?;

    let data = convert_bits(&payload[..payload.len() - CHECKSUM_LEN], 5, 8, false)
        .ok_or_else(|| invalid("non-zero padding"))?;
    let (&version, hash) = data
        .split_first()
        .ok_or_else(|| invalid("empty payload"))?;
    if version != P2PKH_VERSION {
        return Err(ScriptError::UnsupportedAddress(addr.to_string()));
    }
    let hash: [u8; 20] = hash
        .try_into()
        .map_err(|_| ScriptError::InvalidAddressLength(addr.to_string()))?;
    Ok((prefix, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkh(hex_str: &str) -> [u8; 20] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_reference_vector() {
        let hash = pkh("f5bf48b397dae70be82b3cca4793f8eb2b6cdac9");
        let addr = "bitcoincash:qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2";
        assert_eq!(encode(CashAddrPrefix::BitcoinCash, &hash), addr);
        assert_eq!(decode(addr).unwrap(), (CashAddrPrefix::BitcoinCash, hash));
    }

    #[test]
    fn test_prefix_is_optional_and_case_insensitive() {
        let hash = pkh("f5bf48b397dae70be82b3cca4793f8eb2b6cdac9");
        assert_eq!(
            decode("qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2").unwrap(),
            (CashAddrPrefix::BitcoinCash, hash)
        );
        assert_eq!(
            decode("BITCOINCASH:QR6M7J9NJLDWWZLG9V7V53UNLR4JKMX6EYLEP8EKG2").unwrap(),
            (CashAddrPrefix::BitcoinCash, hash)
        );
        assert!(decode("bitcoincash:Qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2").is_err());
    }

    #[test]
    fn test_slp_prefixes_round_trip() {
        let hash = pkh("751e76e8199196d454941c45d1b3a323f1433bd6");
        for prefix in CashAddrPrefix::ALL {
            let addr = encode(prefix, &hash);
            assert!(addr.starts_with(prefix.as_str()));
            assert_eq!(decode(&addr).unwrap(), (prefix, hash));

            // Without the prefix the checksum still pins down which one it was.
            let bare = addr.split_once(':').unwrap().1;
            assert_eq!(decode(bare).unwrap(), (prefix, hash));
        }
        assert_eq!(CashAddrPrefix::SlpTest.network(), Network::Testnet);
        assert_eq!(CashAddrPrefix::SimpleLedger.network(), Network::Mainnet);
    }

    #[test]
    fn test_rejects_bad_checksum_and_p2sh() {
        assert!(matches!(
            decode("bitcoincash:qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg3"),
            Err(ScriptError::EncodingChecksumFailed)
        ));
        // Valid checksum, but a script-hash (type 1) payload.
        assert!(matches!(
            decode("bchtest:pr6m7j9njldwwzlg9v7v53unlr4jkmx6eyvwc0uz5t"),
            Err(ScriptError::UnsupportedAddress(_))
        ));
        assert!(decode("bitcoincash:qr6m7j9b").is_err());
        assert!(decode("dogecoin:qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2").is_err());
    }
}
