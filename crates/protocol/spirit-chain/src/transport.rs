//! The JSON-RPC seam.

use alloy::primitives::{Bytes, Log};
use async_trait::async_trait;
use spirit_types::{Address, B256, U256};

use crate::error::ChainResult;

/// A contract call or transaction, already ABI-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Sender. Set for simulations and sends, `None` for plain reads.
    pub from: Option<Address>,
    /// Target contract
    pub to: Address,
    /// Calldata
    pub input: Bytes,
    /// Native value attached
    pub value: U256,
}

impl CallRequest {
    /// A read call with no sender and no value.
    pub fn new(to: Address, input: impl Into<Bytes>) -> Self {
        Self {
            from: None,
            to,
            input: input.into(),
            value: U256::ZERO,
        }
    }

    /// Set the sender.
    pub fn with_sender(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Attach native value.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// Mined transaction receipt, reduced to what the client reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction hash
    pub tx_hash: B256,
    /// Block the transaction was included in
    pub block_number: Option<u64>,
    /// Execution status
    pub success: bool,
    /// Emitted logs, in order
    pub logs: Vec<Log>,
}

/// Access to an EVM node.
///
/// Implemented by [`RpcTransport`](crate::RpcTransport) for real endpoints and
/// by an in-memory mock for tests.
#[async_trait]
pub trait ChainTransport: Send + Sync {
    /// Address of the configured signer, if any.
    fn signer(&self) -> Option<Address>;

    /// Execute a call without creating a transaction (`eth_call`).
    ///
    /// A revert surfaces as an error carrying the node's message.
    async fn call(&self, request: &CallRequest) -> ChainResult<Bytes>;

    /// Sign and submit a transaction. Returns its hash as soon as the node
    /// accepts it.
    async fn send_transaction(&self, request: &CallRequest) -> ChainResult<B256>;

    /// Wait until the transaction is mined.
    async fn wait_for_receipt(&self, tx_hash: B256) -> ChainResult<TxReceipt>;

    /// Native balance of an address, in wei.
    async fn get_balance(&self, address: Address) -> ChainResult<U256>;
}
