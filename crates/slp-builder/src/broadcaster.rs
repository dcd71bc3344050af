//! Broadcast boundary.
//!
//! The engine never talks to the network. Callers hand the signed hex to
//! whatever implements these traits (a REST client, a node RPC, a test
//! double) and handle retries themselves.

use std::fmt;
use std::future::Future;

use crate::signer::SignedTransaction;

/// Accepted by the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastSuccess {
    /// Txid reported by the remote side.
    pub txid: String,
    pub message: String,
}

/// Rejected by the network, or never reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastFailure {
    /// Machine-readable code from the remote side.
    pub code: String,
    pub description: String,
}

impl fmt::Display for BroadcastFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

impl std::error::Error for BroadcastFailure {}

pub trait Broadcaster {
    fn broadcast(&self, raw_tx_hex: &str) -> Result<BroadcastSuccess, BroadcastFailure>;
}

pub trait AsyncBroadcaster {
    fn broadcast(
        &self,
        raw_tx_hex: &str,
    ) -> impl Future<Output = Result<BroadcastSuccess, BroadcastFailure>> + Send;
}

impl SignedTransaction {
    /// Send the serialized transaction through `broadcaster`.
    pub fn broadcast_with<B: Broadcaster + ?Sized>(
        &self,
        broadcaster: &B,
    ) -> Result<BroadcastSuccess, BroadcastFailure> {
        broadcaster.broadcast(&self.to_hex())
    }

    pub async fn broadcast_with_async<B: AsyncBroadcaster>(
        &self,
        broadcaster: &B,
    ) -> Result<BroadcastSuccess, BroadcastFailure> {
        broadcaster.broadcast(&self.to_hex()).await
    }
}
