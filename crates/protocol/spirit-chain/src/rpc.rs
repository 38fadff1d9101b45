//! JSON-RPC transport over HTTP.

use std::time::Duration;

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Bytes, Log};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use spirit_types::{Address, B256, U256};
use tracing::{debug, trace};

use crate::error::{ChainError, ChainResult};
use crate::transport::{CallRequest, ChainTransport, TxReceipt};

/// Default interval between receipt polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// [`ChainTransport`] backed by an alloy HTTP provider with an optional local signer.
pub struct RpcTransport {
    provider: DynProvider,
    signer: Option<Address>,
    poll_interval: Duration,
}

impl RpcTransport {
    /// Connect to `rpc_url`. With a private key, transactions are signed locally.
    ///
    /// No request is made here; an unreachable endpoint surfaces on first use.
    pub fn connect(rpc_url: &str, private_key: Option<&str>) -> ChainResult<Self> {
        let url: Url = rpc_url
            .parse()
            .map_err(|e| ChainError::config(format!("invalid RPC URL {}: {}", rpc_url, e)))?;

        let (provider, signer) = match private_key {
            Some(key) => {
                let signer: PrivateKeySigner = key
                    .trim()
                    .parse()
                    .map_err(|e| ChainError::config(format!("invalid private key: {}", e)))?;
                let address = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect_http(url)
                    .erased();
                (provider, Some(address))
            }
            None => (ProviderBuilder::new().connect_http(url).erased(), None),
        };

        debug!(rpc_url = %rpc_url, signer = ?signer, "RPC transport ready");
        Ok(Self {
            provider,
            signer,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the receipt polling interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn tx_request(request: &CallRequest) -> TransactionRequest {
        let mut tx = TransactionRequest::default()
            .with_to(request.to)
            .with_input(request.input.clone());
        if !request.value.is_zero() {
            tx = tx.with_value(request.value);
        }
        if let Some(from) = request.from {
            tx = tx.with_from(from);
        }
        tx
    }
}

impl std::fmt::Debug for RpcTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcTransport")
            .field("signer", &self.signer)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChainTransport for RpcTransport {
    fn signer(&self) -> Option<Address> {
        self.signer
    }

    async fn call(&self, request: &CallRequest) -> ChainResult<Bytes> {
        trace!(to = %request.to, "eth_call");
        self.provider
            .call(Self::tx_request(request))
            .await
            .map_err(ChainError::rpc)
    }

    async fn send_transaction(&self, request: &CallRequest) -> ChainResult<B256> {
        if self.signer.is_none() {
            return Err(ChainError::NoWallet);
        }
        let pending = self
            .provider
            .send_transaction(Self::tx_request(request))
            .await
            .map_err(ChainError::rpc)?;
        let tx_hash = *pending.tx_hash();
        debug!(tx_hash = %tx_hash, to = %request.to, "transaction submitted");
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> ChainResult<TxReceipt> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(ChainError::rpc)?;

            if let Some(receipt) = receipt {
                let success = ReceiptResponse::status(&receipt);
                let logs: Vec<Log> = receipt
                    .inner
                    .logs()
                    .iter()
                    .map(|log| log.inner.clone())
                    .collect();
                debug!(
                    tx_hash = %tx_hash,
                    block = ?receipt.block_number,
                    success,
                    logs = logs.len(),
                    "transaction mined"
                );
                return Ok(TxReceipt {
                    tx_hash: receipt.transaction_hash,
                    block_number: receipt.block_number,
                    success,
                    logs,
                });
            }

            trace!(tx_hash = %tx_hash, "receipt not available yet");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn get_balance(&self, address: Address) -> ChainResult<U256> {
        self.provider
            .get_balance(address)
            .await
            .map_err(ChainError::rpc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known anvil/hardhat development key #0.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_connect_read_only() {
        let transport = RpcTransport::connect("https://sepolia.base.org", None).unwrap();
        assert!(transport.signer().is_none());
        assert_eq!(transport.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_connect_with_signer() {
        let transport = RpcTransport::connect("http://localhost:8545", Some(DEV_KEY))
            .unwrap()
            .with_poll_interval(Duration::from_millis(50));
        assert_eq!(
            transport.signer().unwrap().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(transport.poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_url() {
        let err = RpcTransport::connect("not a url", None).unwrap_err();
        assert!(matches!(err, ChainError::Config(_)));
    }

    #[test]
    fn test_invalid_private_key() {
        let err = RpcTransport::connect("http://localhost:8545", Some("0x1234")).unwrap_err();
        assert!(matches!(err, ChainError::Config(_)));
    }

    #[test]
    fn test_tx_request_carries_value_and_sender() {
        let request = CallRequest::new(Address::repeat_byte(1), vec![1u8, 2, 3])
            .with_sender(Address::repeat_byte(2))
            .with_value(U256::from(5));
        let tx = RpcTransport::tx_request(&request);
        assert_eq!(tx.from, Some(Address::repeat_byte(2)));
        assert_eq!(tx.value, Some(U256::from(5)));
    }
}
