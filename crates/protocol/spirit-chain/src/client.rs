//! High-level client for the registry and royalty router.

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::Log;
use alloy::sol_types::{SolCall, SolEvent};
use spirit_types::{
    Address, AgentRecord, AgentStatus, BalanceInfo, ContractAddresses, Recipients,
    RegisterAgentParams, RegisterAgentResult, RevenueEvent, RouteRevenueNativeParams,
    RouteRevenueParams, SpiritChain, B256, U256,
};
use tracing::{debug, info, instrument};

use crate::abi::{self, IRoyaltyRouter, ISpiritRegistry};
use crate::config::SpiritConfig;
use crate::error::{ChainError, ChainResult};
use crate::rpc::RpcTransport;
use crate::transport::{CallRequest, ChainTransport, TxReceipt};

/// Client for Spirit Protocol.
///
/// Holds only immutable configuration (chain, contract addresses, transport).
/// Every method is an independent round trip; the client can be shared
/// across tasks behind an `Arc`.
#[derive(Clone)]
pub struct SpiritClient {
    chain: SpiritChain,
    addresses: ContractAddresses,
    transport: Arc<dyn ChainTransport>,
}

impl SpiritClient {
    /// Build a client that talks JSON-RPC to the configured endpoint.
    pub fn new(config: &SpiritConfig) -> ChainResult<Self> {
        let rpc_url = config.resolved_rpc_url()?;
        let transport = RpcTransport::connect(&rpc_url, config.private_key.as_deref())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build a client over a caller-provided transport.
    pub fn with_transport(
        config: &SpiritConfig,
        transport: Arc<dyn ChainTransport>,
    ) -> ChainResult<Self> {
        config.validate()?;
        let chain = config.chain()?;
        let addresses = config.addresses()?;
        info!(
            chain = %chain,
            registry = %addresses.spirit_registry,
            router = %addresses.royalty_router,
            wallet = transport.signer().is_some(),
            "Spirit client initialized"
        );
        Ok(Self {
            chain,
            addresses,
            transport,
        })
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Configured chain.
    pub fn chain(&self) -> SpiritChain {
        self.chain
    }

    /// Configured chain id.
    pub fn chain_id(&self) -> u64 {
        self.chain.id()
    }

    /// Contract addresses in use.
    pub fn addresses(&self) -> &ContractAddresses {
        &self.addresses
    }

    /// Address of the signing wallet, if configured.
    pub fn wallet_address(&self) -> Option<Address> {
        self.transport.signer()
    }

    /// Whether write operations are available.
    pub fn has_wallet(&self) -> bool {
        self.wallet_address().is_some()
    }

    /// Block explorer link for a transaction.
    pub fn explorer_url(&self, tx_hash: impl fmt::Display) -> String {
        self.chain.tx_url(tx_hash)
    }

    // =========================================================================
    // Registry Reads
    // =========================================================================

    /// Look up an agent. Returns `None` if the registry has no record.
    ///
    /// Transport and decode failures are returned as errors, never as `None`.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_agent(&self, spirit_id: &str) -> ChainResult<Option<AgentRecord>> {
        require_spirit_id(spirit_id)?;
        let agent = self
            .read(
                self.addresses.spirit_registry,
                ISpiritRegistry::getAgentCall {
                    spiritId: spirit_id.to_string(),
                },
            )
            .await?;
        let record = abi::agent_record(agent)?;
        debug!(found = record.is_some(), "agent lookup");
        Ok(record)
    }

    /// Whether the registry has a record for `spirit_id`.
    pub async fn is_registered(&self, spirit_id: &str) -> ChainResult<bool> {
        Ok(self.get_agent(spirit_id).await?.is_some())
    }

    /// Recipients and split of a registered agent. Reverts for unknown ids.
    pub async fn get_recipients(&self, spirit_id: &str) -> ChainResult<Recipients> {
        require_spirit_id(spirit_id)?;
        let ret = self
            .read(
                self.addresses.spirit_registry,
                ISpiritRegistry::getRecipientsCall {
                    spiritId: spirit_id.to_string(),
                },
            )
            .await?;
        Ok(ret.into())
    }

    /// Canonical on-chain key of a spirit id, as computed by the registry.
    pub async fn resolve_key(&self, spirit_id: &str) -> ChainResult<B256> {
        require_spirit_id(spirit_id)?;
        self.read(
            self.addresses.spirit_registry,
            ISpiritRegistry::resolveKeyCall {
                spiritId: spirit_id.to_string(),
            },
        )
        .await
    }

    /// Token id the next registration will receive.
    pub async fn get_next_token_id(&self) -> ChainResult<U256> {
        self.read(
            self.addresses.spirit_registry,
            ISpiritRegistry::nextTokenIdCall {},
        )
        .await
    }

    // =========================================================================
    // Registry Writes
    // =========================================================================

    /// Register a new agent and wait for the `AgentRegistered` event.
    #[instrument(skip(self, params), fields(spirit_id = %params.spirit_id), level = "debug")]
    pub async fn register_agent(
        &self,
        params: &RegisterAgentParams,
    ) -> ChainResult<RegisterAgentResult> {
        let call = ISpiritRegistry::registerAgentCall {
            spiritId: params.spirit_id.clone(),
            trainer: params.trainer,
            platform: params.platform,
            treasury: params.treasury,
            metadataURI: params.metadata_uri.clone(),
            split: params.split.into(),
        };
        let tx_hash = self
            .submit(&params.spirit_id, self.addresses.spirit_registry, &call, U256::ZERO)
            .await?;
        let receipt = self.confirm(tx_hash).await?;
        let event: ISpiritRegistry::AgentRegistered = find_event(&receipt.logs)?;

        info!(
            spirit_id = %params.spirit_id,
            spirit_key = %event.spiritKey,
            token_id = %event.registryTokenId,
            tx_hash = %tx_hash,
            "agent registered"
        );
        Ok(RegisterAgentResult {
            spirit_key: event.spiritKey,
            registry_token_id: event.registryTokenId,
            tx_hash,
        })
    }

    /// Point an agent at a new metadata URI. Returns once submitted.
    pub async fn update_metadata(&self, spirit_id: &str, metadata_uri: &str) -> ChainResult<B256> {
        let call = ISpiritRegistry::updateMetadataCall {
            spiritId: spirit_id.to_string(),
            metadataURI: metadata_uri.to_string(),
        };
        self.submit(spirit_id, self.addresses.spirit_registry, &call, U256::ZERO)
            .await
    }

    /// Change an agent's status. Returns once submitted.
    pub async fn update_status(&self, spirit_id: &str, status: AgentStatus) -> ChainResult<B256> {
        let call = ISpiritRegistry::updateStatusCall {
            spiritId: spirit_id.to_string(),
            status: status.code(),
        };
        self.submit(spirit_id, self.addresses.spirit_registry, &call, U256::ZERO)
            .await
    }

    /// Record a provenance event. Returns once submitted.
    pub async fn record_event(
        &self,
        spirit_id: &str,
        event_type: B256,
        content_hash: B256,
    ) -> ChainResult<B256> {
        let call = ISpiritRegistry::recordEventCall {
            spiritId: spirit_id.to_string(),
            eventType: event_type,
            contentHash: content_hash,
        };
        self.submit(spirit_id, self.addresses.spirit_registry, &call, U256::ZERO)
            .await
    }

    // =========================================================================
    // Revenue Routing
    // =========================================================================

    /// Route ERC-20 revenue through the split.
    ///
    /// The wallet must already have approved the router for `params.amount`.
    #[instrument(skip(self, params), fields(spirit_id = %params.spirit_id), level = "debug")]
    pub async fn route_revenue(&self, params: &RouteRevenueParams) -> ChainResult<RevenueEvent> {
        let call = IRoyaltyRouter::routeRevenueCall {
            spiritId: params.spirit_id.clone(),
            currency: params.currency,
            amount: params.amount,
            metadataHash: params.metadata_hash,
        };
        let tx_hash = self
            .submit(&params.spirit_id, self.addresses.royalty_router, &call, U256::ZERO)
            .await?;
        self.revenue_from_receipt(tx_hash).await
    }

    /// Route native-token revenue through the split. `params.amount` is sent as value.
    #[instrument(skip(self, params), fields(spirit_id = %params.spirit_id), level = "debug")]
    pub async fn route_revenue_native(
        &self,
        params: &RouteRevenueNativeParams,
    ) -> ChainResult<RevenueEvent> {
        let call = IRoyaltyRouter::routeRevenueNativeCall {
            spiritId: params.spirit_id.clone(),
            metadataHash: params.metadata_hash,
        };
        let tx_hash = self
            .submit(&params.spirit_id, self.addresses.royalty_router, &call, params.amount)
            .await?;
        self.revenue_from_receipt(tx_hash).await
    }

    /// Native balance of an agent's treasury.
    pub async fn get_treasury_balance(&self, spirit_id: &str) -> ChainResult<BalanceInfo> {
        let agent = self
            .get_agent(spirit_id)
            .await?
            .ok_or_else(|| ChainError::agent_not_found(spirit_id))?;
        let native = self.transport.get_balance(agent.treasury).await?;
        debug!(spirit_id = %spirit_id, treasury = %agent.treasury, %native, "treasury balance");
        Ok(BalanceInfo { native })
    }

    // =========================================================================
    // Router Reads
    // =========================================================================

    /// Registry the router resolves agents against.
    pub async fn router_registry(&self) -> ChainResult<Address> {
        self.read(self.addresses.royalty_router, IRoyaltyRouter::registryCall {})
            .await
    }

    /// Protocol treasury configured on the router.
    pub async fn protocol_treasury(&self) -> ChainResult<Address> {
        self.read(
            self.addresses.royalty_router,
            IRoyaltyRouter::protocolTreasuryCall {},
        )
        .await
    }

    /// Whether the router accepts `currency` for ERC-20 routing.
    pub async fn is_accepted_currency(&self, currency: Address) -> ChainResult<bool> {
        self.read(
            self.addresses.royalty_router,
            IRoyaltyRouter::acceptedCurrencyCall { currency },
        )
        .await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn read<C: SolCall>(&self, to: Address, call: C) -> ChainResult<C::Return> {
        let request = CallRequest::new(to, call.abi_encode());
        let data = self.transport.call(&request).await?;
        C::abi_decode_returns(&data)
            .map_err(|e| ChainError::decode(format!("{}: {}", C::SIGNATURE, e)))
    }

    /// Simulate, then sign and send. Fails before any network call when no
    /// wallet is configured or the spirit id is empty.
    async fn submit<C: SolCall>(
        &self,
        spirit_id: &str,
        to: Address,
        call: &C,
        value: U256,
    ) -> ChainResult<B256> {
        let from = self.transport.signer().ok_or(ChainError::NoWallet)?;
        require_spirit_id(spirit_id)?;

        let request = CallRequest::new(to, call.abi_encode())
            .with_sender(from)
            .with_value(value);
        self.transport.call(&request).await?;
        let tx_hash = self.transport.send_transaction(&request).await?;
        debug!(method = C::SIGNATURE, spirit_id = %spirit_id, tx_hash = %tx_hash, "submitted");
        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: B256) -> ChainResult<TxReceipt> {
        let receipt = self.transport.wait_for_receipt(tx_hash).await?;
        if !receipt.success {
            return Err(ChainError::Reverted(tx_hash));
        }
        Ok(receipt)
    }

    async fn revenue_from_receipt(&self, tx_hash: B256) -> ChainResult<RevenueEvent> {
        let receipt = self.confirm(tx_hash).await?;
        let event: IRoyaltyRouter::RevenueRouted = find_event(&receipt.logs)?;
        let revenue = abi::revenue_event(event, tx_hash, now_millis());
        info!(
            spirit_key = %revenue.spirit_key,
            currency = %revenue.currency,
            amount = %revenue.amount,
            tx_hash = %tx_hash,
            "revenue routed"
        );
        Ok(revenue)
    }
}

impl fmt::Debug for SpiritClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpiritClient")
            .field("chain", &self.chain)
            .field("addresses", &self.addresses)
            .field("wallet", &self.wallet_address())
            .finish()
    }
}

fn require_spirit_id(spirit_id: &str) -> ChainResult<()> {
    if spirit_id.is_empty() {
        return Err(ChainError::invalid_argument("spiritId must not be empty"));
    }
    Ok(())
}

/// First log in the receipt that decodes as `E`.
fn find_event<E: SolEvent>(logs: &[Log]) -> ChainResult<E> {
    logs.iter()
        .filter(|log| log.topics().first() == Some(&E::SIGNATURE_HASH))
        .find_map(|log| E::decode_log_data(&log.data).ok())
        .ok_or_else(|| ChainError::event_not_found(event_name::<E>()))
}

fn event_name<E: SolEvent>() -> &'static str {
    E::SIGNATURE.split('(').next().unwrap_or(E::SIGNATURE)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::LogData;

    fn status_log(status: u8) -> Log {
        let event = ISpiritRegistry::StatusUpdated {
            spiritKey: B256::repeat_byte(7),
            status,
        };
        Log {
            address: Address::repeat_byte(1),
            data: event.encode_log_data(),
        }
    }

    #[test]
    fn test_find_event_skips_foreign_logs() {
        let foreign = Log {
            address: Address::repeat_byte(2),
            data: LogData::new_unchecked(vec![B256::repeat_byte(0xff)], Default::default()),
        };
        let event: ISpiritRegistry::StatusUpdated =
            find_event(&[foreign, status_log(2)]).unwrap();
        assert_eq!(event.status, 2);
    }

    #[test]
    fn test_find_event_missing() {
        let result = find_event::<IRoyaltyRouter::RevenueRouted>(&[status_log(1)]);
        assert!(matches!(
            result,
            Err(ChainError::EventNotFound {
                event: "RevenueRouted"
            })
        ));
    }

    #[test]
    fn test_event_name() {
        assert_eq!(event_name::<ISpiritRegistry::AgentRegistered>(), "AgentRegistered");
        assert_eq!(event_name::<IRoyaltyRouter::RevenueRouted>(), "RevenueRouted");
    }

    #[test]
    fn test_require_spirit_id() {
        assert!(require_spirit_id("abraham").is_ok());
        assert!(matches!(
            require_spirit_id(""),
            Err(ChainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_now_millis_is_wall_clock() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000);
    }
}
