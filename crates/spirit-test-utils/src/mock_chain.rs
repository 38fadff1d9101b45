//! Mock implementation of the `ChainTransport` trait for testing.
//!
//! Emulates the `SpiritRegistry` and `RoyaltyRouter` contracts in memory at
//! the ABI level: calldata is decoded with the same static ABI the client
//! encodes with, return data is ABI-encoded, and mined transactions carry
//! real event logs.

use alloy::primitives::{keccak256, Bytes, Log};
use alloy::sol_types::{sol_data, SolEvent, SolInterface, SolType};
use async_trait::async_trait;
use spirit_chain::abi::{
    Agent, Economics, IRoyaltyRouter::IRoyaltyRouterCalls, IRoyaltyRouter::RevenueRouted,
    ISpiritRegistry::AgentRegistered, ISpiritRegistry::ISpiritRegistryCalls,
    ISpiritRegistry::ProvenanceRecorded, ISpiritRegistry::StatusUpdated, SplitConfig,
};
use spirit_chain::{CallRequest, ChainError, ChainResult, ChainTransport, TxReceipt};
use spirit_types::{
    Address, ContractAddresses, RegisterAgentParams, B256, BPS_DENOMINATOR, TESTNET_ADDRESSES,
    U256,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Signer address used by [`MockChain::new`].
pub const MOCK_SIGNER: Address = Address::new([0xA1; 20]);

/// Canonical key of a spirit id (keccak256 of its UTF-8 bytes).
pub fn spirit_key(spirit_id: &str) -> B256 {
    keccak256(spirit_id.as_bytes())
}

/// Contract state. Cloned for simulations so `eth_call` never mutates.
#[derive(Clone)]
struct ContractState {
    registry: Address,
    router: Address,
    protocol_treasury: Address,
    /// spirit_key -> record
    agents: HashMap<B256, Agent>,
    next_token_id: U256,
    /// Native balances.
    balances: HashMap<Address, U256>,
    accepted_currencies: HashSet<Address>,
}

/// Result of executing one call against the contracts.
struct Execution {
    output: Vec<u8>,
    logs: Vec<Log>,
}

impl Execution {
    fn output(output: Vec<u8>) -> Self {
        Self {
            output,
            logs: Vec::new(),
        }
    }
}

struct MockChainInner {
    state: ContractState,
    signer: Option<Address>,
    /// tx_hash -> receipt
    receipts: HashMap<B256, TxReceipt>,
    /// Every transaction sent, in order.
    sent: Vec<CallRequest>,
    /// Number of transport calls of any kind.
    request_count: usize,
    /// When true, every transport call fails with an RPC error.
    should_fail: bool,
    /// When false, receipts carry no logs.
    emit_events: bool,
    /// When true, transactions are mined with a failed status and no effects.
    revert_receipts: bool,
    tx_counter: u64,
}

/// A mock implementation of the `ChainTransport` trait for testing.
///
/// Uses `Arc<RwLock<...>>` internally, so it is cheap to clone and all
/// clones share the same state.
#[derive(Clone)]
pub struct MockChain {
    inner: Arc<RwLock<MockChainInner>>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// Create a mock at the Base Sepolia addresses with [`MOCK_SIGNER`] as wallet.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockChainInner {
                state: ContractState {
                    registry: TESTNET_ADDRESSES.spirit_registry,
                    router: TESTNET_ADDRESSES.royalty_router,
                    protocol_treasury: TESTNET_ADDRESSES.protocol_treasury,
                    agents: HashMap::new(),
                    next_token_id: U256::from(1),
                    balances: HashMap::new(),
                    accepted_currencies: HashSet::new(),
                },
                signer: Some(MOCK_SIGNER),
                receipts: HashMap::new(),
                sent: Vec::new(),
                request_count: 0,
                should_fail: false,
                emit_events: true,
                revert_receipts: false,
                tx_counter: 0,
            })),
        }
    }

    /// Remove the wallet; writes then fail before reaching the mock.
    pub fn read_only(self) -> Self {
        self.inner.write().unwrap().signer = None;
        self
    }

    /// Use a specific wallet address.
    pub fn with_signer(self, signer: Address) -> Self {
        self.inner.write().unwrap().signer = Some(signer);
        self
    }

    /// Serve the contracts at a different address book.
    pub fn with_addresses(self, addresses: &ContractAddresses) -> Self {
        {
            let mut inner = self.inner.write().unwrap();
            inner.state.registry = addresses.spirit_registry;
            inner.state.router = addresses.royalty_router;
            inner.state.protocol_treasury = addresses.protocol_treasury;
        }
        self
    }

    /// Seed a registered agent.
    pub fn with_agent(self, params: &RegisterAgentParams) -> Self {
        {
            let mut inner = self.inner.write().unwrap();
            let token_id = inner.state.next_token_id;
            inner.state.next_token_id += U256::from(1);
            inner
                .state
                .agents
                .insert(spirit_key(&params.spirit_id), new_agent(params, token_id));
        }
        self
    }

    /// Set the native balance of an address.
    pub fn with_balance(self, address: Address, wei: U256) -> Self {
        self.inner.write().unwrap().state.balances.insert(address, wei);
        self
    }

    /// Allow an ERC-20 currency on the router.
    pub fn accept_currency(self, currency: Address) -> Self {
        self.inner
            .write()
            .unwrap()
            .state
            .accepted_currencies
            .insert(currency);
        self
    }

    /// Configure the mock to fail every transport call.
    pub fn with_failure(self) -> Self {
        self.inner.write().unwrap().should_fail = true;
        self
    }

    /// Set the failure mode at runtime.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.inner.write().unwrap().should_fail = should_fail;
    }

    /// Mine transactions without logs (simulates an ABI mismatch).
    pub fn without_events(self) -> Self {
        self.inner.write().unwrap().emit_events = false;
        self
    }

    /// Mine transactions with a failed status.
    pub fn with_reverted_receipts(self) -> Self {
        self.inner.write().unwrap().revert_receipts = true;
        self
    }

    /// Overwrite an agent's raw status code, bypassing validation.
    pub fn set_raw_status(&self, spirit_id: &str, status: u8) {
        let mut inner = self.inner.write().unwrap();
        if let Some(agent) = inner.state.agents.get_mut(&spirit_key(spirit_id)) {
            agent.status = status;
        }
    }

    // =========================================================================
    // Assertion Helpers
    // =========================================================================

    /// Number of transport calls made (reads, simulations, sends, receipts, balances).
    pub fn request_count(&self) -> usize {
        self.inner.read().unwrap().request_count
    }

    /// Transactions sent, in order.
    pub fn sent_transactions(&self) -> Vec<CallRequest> {
        self.inner.read().unwrap().sent.clone()
    }

    /// Number of registered agents.
    pub fn agent_count(&self) -> usize {
        self.inner.read().unwrap().state.agents.len()
    }

    /// Raw status code of an agent.
    pub fn agent_status(&self, spirit_id: &str) -> Option<u8> {
        self.inner
            .read()
            .unwrap()
            .state
            .agents
            .get(&spirit_key(spirit_id))
            .map(|agent| agent.status)
    }

    /// Metadata URI of an agent.
    pub fn agent_metadata_uri(&self, spirit_id: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap()
            .state
            .agents
            .get(&spirit_key(spirit_id))
            .map(|agent| agent.metadataURI.clone())
    }

    /// Native balance of an address.
    pub fn balance_of(&self, address: Address) -> U256 {
        self.inner
            .read()
            .unwrap()
            .state
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default()
    }

    /// Receipt of a mined transaction.
    pub fn receipt(&self, tx_hash: B256) -> Option<TxReceipt> {
        self.inner.read().unwrap().receipts.get(&tx_hash).cloned()
    }

    /// Generate the next transaction hash.
    fn next_tx_hash(inner: &mut MockChainInner) -> B256 {
        inner.tx_counter += 1;
        keccak256(format!("mock-tx-{}", inner.tx_counter))
    }

    /// Count the request and apply the failure knob.
    fn begin(inner: &mut MockChainInner) -> ChainResult<()> {
        inner.request_count += 1;
        if inner.should_fail {
            return Err(ChainError::rpc("mock: configured to fail"));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainTransport for MockChain {
    fn signer(&self) -> Option<Address> {
        self.inner.read().unwrap().signer
    }

    async fn call(&self, request: &CallRequest) -> ChainResult<Bytes> {
        let mut inner = self.inner.write().unwrap();
        Self::begin(&mut inner)?;
        let mut scratch = inner.state.clone();
        let execution = execute(&mut scratch, request)?;
        Ok(execution.output.into())
    }

    async fn send_transaction(&self, request: &CallRequest) -> ChainResult<B256> {
        let mut inner = self.inner.write().unwrap();
        Self::begin(&mut inner)?;
        if inner.signer.is_none() {
            return Err(ChainError::NoWallet);
        }

        let tx_hash = Self::next_tx_hash(&mut inner);
        inner.sent.push(request.clone());

        let receipt = if inner.revert_receipts {
            TxReceipt {
                tx_hash,
                block_number: Some(inner.tx_counter),
                success: false,
                logs: Vec::new(),
            }
        } else {
            let execution = execute(&mut inner.state, request)?;
            TxReceipt {
                tx_hash,
                block_number: Some(inner.tx_counter),
                success: true,
                logs: if inner.emit_events {
                    execution.logs
                } else {
                    Vec::new()
                },
            }
        };
        inner.receipts.insert(tx_hash, receipt);
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> ChainResult<TxReceipt> {
        let mut inner = self.inner.write().unwrap();
        Self::begin(&mut inner)?;
        inner
            .receipts
            .get(&tx_hash)
            .cloned()
            .ok_or_else(|| ChainError::rpc(format!("mock: unknown transaction {}", tx_hash)))
    }

    async fn get_balance(&self, address: Address) -> ChainResult<U256> {
        let mut inner = self.inner.write().unwrap();
        Self::begin(&mut inner)?;
        Ok(inner
            .state
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default())
    }
}

// =============================================================================
// Contract Emulation
// =============================================================================

fn revert(reason: &str) -> ChainError {
    ChainError::rpc(format!("execution reverted: {}", reason))
}

fn new_agent(params: &RegisterAgentParams, token_id: U256) -> Agent {
    Agent {
        spiritId: params.spirit_id.clone(),
        registryTokenId: token_id,
        trainer: params.trainer,
        platform: params.platform,
        treasury: params.treasury,
        metadataURI: params.metadata_uri.clone(),
        split: params.split.into(),
        economics: empty_economics(),
        status: 0,
    }
}

fn empty_economics() -> Economics {
    Economics {
        childToken: Address::ZERO,
        stakingPool: Address::ZERO,
        router: Address::ZERO,
    }
}

/// What the registry returns for an unknown id: an all-zero record.
fn empty_agent() -> Agent {
    Agent {
        spiritId: String::new(),
        registryTokenId: U256::ZERO,
        trainer: Address::ZERO,
        platform: Address::ZERO,
        treasury: Address::ZERO,
        metadataURI: String::new(),
        split: SplitConfig {
            artistBps: 0,
            agentBps: 0,
            platformBps: 0,
            protocolBps: 0,
        },
        economics: empty_economics(),
        status: 0,
    }
}

fn split_total(split: &SplitConfig) -> u32 {
    u32::from(split.artistBps)
        + u32::from(split.agentBps)
        + u32::from(split.platformBps)
        + u32::from(split.protocolBps)
}

fn registered<'a>(state: &'a mut ContractState, spirit_id: &str) -> ChainResult<&'a mut Agent> {
    state
        .agents
        .get_mut(&spirit_key(spirit_id))
        .ok_or_else(|| revert("AgentNotRegistered"))
}

fn execute(state: &mut ContractState, request: &CallRequest) -> ChainResult<Execution> {
    if request.to == state.registry {
        let call = ISpiritRegistryCalls::abi_decode(&request.input)
            .map_err(|e| revert(&format!("registry: {}", e)))?;
        execute_registry(state, request, call)
    } else if request.to == state.router {
        let call = IRoyaltyRouterCalls::abi_decode(&request.input)
            .map_err(|e| revert(&format!("router: {}", e)))?;
        execute_router(state, request, call)
    } else {
        Err(ChainError::rpc(format!("mock: no contract at {}", request.to)))
    }
}

fn execute_registry(
    state: &mut ContractState,
    request: &CallRequest,
    call: ISpiritRegistryCalls,
) -> ChainResult<Execution> {
    let registry = state.registry;
    match call {
        ISpiritRegistryCalls::getAgent(c) => {
            let agent = state
                .agents
                .get(&spirit_key(&c.spiritId))
                .cloned()
                .unwrap_or_else(empty_agent);
            Ok(Execution::output(<(Agent,)>::abi_encode_params(&(agent,))))
        }
        ISpiritRegistryCalls::getRecipients(c) => {
            let agent = registered(state, &c.spiritId)?;
            let ret = (agent.trainer, agent.platform, agent.treasury, agent.split.clone());
            Ok(Execution::output(
                <(sol_data::Address, sol_data::Address, sol_data::Address, SplitConfig)>::abi_encode_params(&ret),
            ))
        }
        ISpiritRegistryCalls::resolveKey(c) => Ok(Execution::output(
            <(sol_data::FixedBytes<32>,)>::abi_encode_params(&(spirit_key(&c.spiritId),)),
        )),
        ISpiritRegistryCalls::nextTokenId(_) => Ok(Execution::output(
            <(sol_data::Uint<256>,)>::abi_encode_params(&(state.next_token_id,)),
        )),
        ISpiritRegistryCalls::registerAgent(c) => {
            if request.from.is_none() {
                return Err(revert("missing sender"));
            }
            if c.spiritId.is_empty() {
                return Err(revert("EmptySpiritId"));
            }
            let key = spirit_key(&c.spiritId);
            if state.agents.contains_key(&key) {
                return Err(revert("AgentAlreadyRegistered"));
            }
            if split_total(&c.split) != u32::from(BPS_DENOMINATOR) {
                return Err(revert("InvalidSplit"));
            }

            let token_id = state.next_token_id;
            state.next_token_id += U256::from(1);
            state.agents.insert(
                key,
                Agent {
                    spiritId: c.spiritId.clone(),
                    registryTokenId: token_id,
                    trainer: c.trainer,
                    platform: c.platform,
                    treasury: c.treasury,
                    metadataURI: c.metadataURI.clone(),
                    split: c.split.clone(),
                    economics: empty_economics(),
                    status: 0,
                },
            );

            let event = AgentRegistered {
                spiritKey: key,
                spiritId: c.spiritId,
                registryTokenId: token_id,
                trainer: c.trainer,
                platform: c.platform,
                treasury: c.treasury,
                split: c.split,
                metadataURI: c.metadataURI,
            };
            Ok(Execution {
                output: <(sol_data::FixedBytes<32>, sol_data::Uint<256>)>::abi_encode_params(&(
                    key, token_id,
                )),
                logs: vec![Log {
                    address: registry,
                    data: event.encode_log_data(),
                }],
            })
        }
        ISpiritRegistryCalls::updateMetadata(c) => {
            let agent = registered(state, &c.spiritId)?;
            agent.metadataURI = c.metadataURI;
            Ok(Execution::output(Vec::new()))
        }
        ISpiritRegistryCalls::updateStatus(c) => {
            if c.status > 2 {
                return Err(revert("InvalidStatus"));
            }
            let agent = registered(state, &c.spiritId)?;
            agent.status = c.status;
            let event = StatusUpdated {
                spiritKey: spirit_key(&c.spiritId),
                status: c.status,
            };
            Ok(Execution {
                output: Vec::new(),
                logs: vec![Log {
                    address: registry,
                    data: event.encode_log_data(),
                }],
            })
        }
        ISpiritRegistryCalls::recordEvent(c) => {
            registered(state, &c.spiritId)?;
            let event = ProvenanceRecorded {
                spiritKey: spirit_key(&c.spiritId),
                eventType: c.eventType,
                contentHash: c.contentHash,
            };
            Ok(Execution {
                output: Vec::new(),
                logs: vec![Log {
                    address: registry,
                    data: event.encode_log_data(),
                }],
            })
        }
    }
}

fn execute_router(
    state: &mut ContractState,
    request: &CallRequest,
    call: IRoyaltyRouterCalls,
) -> ChainResult<Execution> {
    match call {
        IRoyaltyRouterCalls::registry(_) => Ok(Execution::output(
            <(sol_data::Address,)>::abi_encode_params(&(state.registry,)),
        )),
        IRoyaltyRouterCalls::protocolTreasury(_) => Ok(Execution::output(
            <(sol_data::Address,)>::abi_encode_params(&(state.protocol_treasury,)),
        )),
        IRoyaltyRouterCalls::acceptedCurrency(c) => Ok(Execution::output(
            <(sol_data::Bool,)>::abi_encode_params(&(state
                .accepted_currencies
                .contains(&c.currency),)),
        )),
        IRoyaltyRouterCalls::routeRevenue(c) => {
            if !state.accepted_currencies.contains(&c.currency) {
                return Err(revert("CurrencyNotAccepted"));
            }
            route(state, &c.spiritId, c.currency, c.amount, c.metadataHash, false)
        }
        IRoyaltyRouterCalls::routeRevenueNative(c) => {
            route(state, &c.spiritId, Address::ZERO, request.value, c.metadataHash, true)
        }
    }
}

/// Split `amount` by the agent's basis points. The protocol share takes the
/// rounding remainder.
fn route(
    state: &mut ContractState,
    spirit_id: &str,
    currency: Address,
    amount: U256,
    metadata_hash: B256,
    native: bool,
) -> ChainResult<Execution> {
    if amount.is_zero() {
        return Err(revert("ZeroAmount"));
    }
    let router = state.router;
    let protocol_treasury = state.protocol_treasury;
    let agent = registered(state, spirit_id)?.clone();

    let denominator = U256::from(BPS_DENOMINATOR);
    let share = |bps: u16| amount * U256::from(bps) / denominator;
    let artist_amount = share(agent.split.artistBps);
    let agent_amount = share(agent.split.agentBps);
    let platform_amount = share(agent.split.platformBps);
    let protocol_amount = amount - artist_amount - agent_amount - platform_amount;

    if native {
        for (to, value) in [
            (agent.trainer, artist_amount),
            (agent.treasury, agent_amount),
            (agent.platform, platform_amount),
            (protocol_treasury, protocol_amount),
        ] {
            *state.balances.entry(to).or_default() += value;
        }
    }

    let event = RevenueRouted {
        spiritKey: spirit_key(spirit_id),
        currency,
        amount,
        artistAmount: artist_amount,
        agentAmount: agent_amount,
        platformAmount: platform_amount,
        protocolAmount: protocol_amount,
        metadataHash: metadata_hash,
    };
    Ok(Execution {
        output: Vec::new(),
        logs: vec![Log {
            address: router,
            data: event.encode_log_data(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolCall;
    use spirit_chain::abi::ISpiritRegistry;

    fn params(spirit_id: &str) -> RegisterAgentParams {
        RegisterAgentParams::new(
            spirit_id,
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
            format!("ipfs://{}", spirit_id),
        )
    }

    fn registry_request(input: Vec<u8>) -> CallRequest {
        CallRequest::new(TESTNET_ADDRESSES.spirit_registry, input).with_sender(MOCK_SIGNER)
    }

    #[tokio::test]
    async fn test_simulation_does_not_mutate() {
        let mock = MockChain::new();
        let call = ISpiritRegistry::registerAgentCall {
            spiritId: "abraham".to_string(),
            trainer: Address::repeat_byte(1),
            platform: Address::repeat_byte(2),
            treasury: Address::repeat_byte(3),
            metadataURI: "ipfs://abraham".to_string(),
            split: spirit_types::SplitConfig::EQUAL.into(),
        };
        mock.call(&registry_request(call.abi_encode())).await.unwrap();
        assert_eq!(mock.agent_count(), 0);

        mock.send_transaction(&registry_request(call.abi_encode()))
            .await
            .unwrap();
        assert_eq!(mock.agent_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_contract() {
        let mock = MockChain::new();
        let request = CallRequest::new(Address::repeat_byte(0x99), vec![0u8; 4]);
        assert!(mock.call(&request).await.is_err());
    }

    #[tokio::test]
    async fn test_seeded_agent_token_ids() {
        let mock = MockChain::new()
            .with_agent(&params("abraham"))
            .with_agent(&params("solienne"));
        assert_eq!(mock.agent_count(), 2);
        assert_eq!(mock.agent_status("solienne"), Some(0));

        let input = ISpiritRegistry::nextTokenIdCall {}.abi_encode();
        let data = mock.call(&registry_request(input)).await.unwrap();
        let next = ISpiritRegistry::nextTokenIdCall::abi_decode_returns(&data).unwrap();
        assert_eq!(next, U256::from(3));
    }

    #[tokio::test]
    async fn test_failure_knob() {
        let mock = MockChain::new().with_failure();
        assert!(mock.get_balance(Address::ZERO).await.is_err());
        mock.set_should_fail(false);
        assert_eq!(mock.get_balance(Address::ZERO).await.unwrap(), U256::ZERO);
        assert_eq!(mock.request_count(), 2);
    }

    #[test]
    fn test_spirit_key_is_keccak() {
        assert_eq!(spirit_key("abraham"), keccak256(b"abraham"));
        assert_ne!(spirit_key("abraham"), spirit_key("solienne"));
    }
}
