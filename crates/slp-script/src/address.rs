//! P2PKH addresses in legacy Base58Check and CashAddr form.
//!
//! Both encodings carry the same 20-byte public key hash; an `Address`
//! remembers which form it was parsed from so it can be echoed back to the
//! caller unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use slp_primitives::ec::PublicKey;
use slp_primitives::hash::sha256d;

use crate::cashaddr::{self, CashAddrPrefix};
use crate::{Script, ScriptError};

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;

/// Network an address (and a whole engine instance) belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

/// The textual encoding an address was parsed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressFormat {
    Legacy,
    CashAddr(CashAddrPrefix),
}

/// A P2PKH address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The address as given or generated.
    pub address_string: String,
    /// RIPEMD-160(SHA-256(pubkey)).
    pub public_key_hash: [u8; 20],
    pub network: Network,
    pub format: AddressFormat,
}

impl Address {
    /// Parse either a legacy or a CashAddr P2PKH address.
    ///
    /// Strings containing `:` are always treated as CashAddr. Otherwise
    /// Base58Check is tried first and CashAddr (with an implied prefix)
    /// second; the legacy error is reported if both fail.
    ///
    /// # Arguments
    /// * `addr` - The address string.
    ///
    /// # Returns
    /// The parsed `Address`, or the decoding error.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        if addr.contains(':') {
            return Self::from_cashaddr(addr);
        }
        Self::from_legacy(addr).or_else(|legacy_err| Self::from_cashaddr(addr).map_err(|_| legacy_err))
    }

    /// Parse a Base58Check P2PKH address (version 0x00 or 0x6f).
    pub fn from_legacy(addr: &str) -> Result<Self, ScriptError> {
        let decoded = bs58::decode(addr)
            .into_vec()
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != 25 {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        let checksum = sha256d(&decoded[..21]);
        if decoded[21..25] != checksum[..4] {
            return Err(ScriptError::EncodingChecksumFailed);
        }

        let network = match decoded[0] {
            MAINNET_P2PKH => Network::Mainnet,
            TESTNET_P2PKH => Network::Testnet,
            _ => return Err(ScriptError::UnsupportedAddress(addr.to_string())),
        };

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&decoded[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network,
            format: AddressFormat::Legacy,
        })
    }

    /// Parse a CashAddr P2PKH address, `simpleledger:`/`slptest:` included.
    pub fn from_cashaddr(addr: &str) -> Result<Self, ScriptError> {
        let (prefix, pkh) = cashaddr::decode(addr)?;
        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network: prefix.network(),
            format: AddressFormat::CashAddr(prefix),
        })
    }

    /// Legacy address for a public key hash.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        Address {
            address_string: encode_legacy(hash, network),
            public_key_hash: *hash,
            network,
            format: AddressFormat::Legacy,
        }
    }

    /// Legacy address of a compressed public key.
    pub fn from_public_key(pub_key: &PublicKey, network: Network) -> Self {
        Self::from_public_key_hash(&pub_key.hash160(), network)
    }

    pub fn to_legacy_string(&self) -> String {
        encode_legacy(&self.public_key_hash, self.network)
    }

    /// CashAddr form under the given prefix.
    pub fn to_cashaddr_string(&self, prefix: CashAddrPrefix) -> String {
        cashaddr::encode(prefix, &self.public_key_hash)
    }

    /// The P2PKH locking script paying this address.
    pub fn locking_script(&self) -> Script {
        Script::p2pkh(&self.public_key_hash)
    }
}

fn encode_legacy(hash: &[u8; 20], network: Network) -> String {
    let version = match network {
        Network::Mainnet => MAINNET_P2PKH,
        Network::Testnet => TESTNET_P2PKH,
    };
    let mut payload = Vec::with_capacity(25);
    payload.push(version);
    payload.extend_from_slice(hash);
    let checksum = sha256d(&payload);
    payload.extend_from_slice(&checksum[..4]);
    bs58::encode(&payload).into_string()
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

impl std::str::FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}
