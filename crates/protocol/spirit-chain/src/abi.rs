//! Static ABI of the Spirit Protocol contracts.
//!
//! Function selectors, tuple layouts and event topics must byte-match the
//! deployed `SpiritRegistry` and `RoyaltyRouter` contracts.

use alloy::sol;
use spirit_types::{AgentEconomics, AgentRecord, AgentStatus, Recipients, RevenueEvent, B256};

use crate::error::{ChainError, ChainResult};

sol! {
    /// Four-way revenue split in basis points.
    struct SplitConfig {
        uint16 artistBps;
        uint16 agentBps;
        uint16 platformBps;
        uint16 protocolBps;
    }

    /// Per-agent economic contracts.
    struct Economics {
        address childToken;
        address stakingPool;
        address router;
    }

    /// Registry record as returned by `getAgent`.
    struct Agent {
        string spiritId;
        uint256 registryTokenId;
        address trainer;
        address platform;
        address treasury;
        string metadataURI;
        SplitConfig split;
        Economics economics;
        uint8 status;
    }

    interface ISpiritRegistry {
        function getAgent(string calldata spiritId) external view returns (Agent memory);
        function getRecipients(string calldata spiritId)
            external
            view
            returns (address trainer, address platform, address treasury, SplitConfig memory split);
        function resolveKey(string calldata spiritId) external pure returns (bytes32);
        function nextTokenId() external view returns (uint256);

        function registerAgent(
            string calldata spiritId,
            address trainer,
            address platform,
            address treasury,
            string calldata metadataURI,
            SplitConfig calldata split
        ) external returns (bytes32 spiritKey, uint256 registryTokenId);
        function updateMetadata(string calldata spiritId, string calldata metadataURI) external;
        function updateStatus(string calldata spiritId, uint8 status) external;
        function recordEvent(string calldata spiritId, bytes32 eventType, bytes32 contentHash) external;

        event AgentRegistered(
            bytes32 indexed spiritKey,
            string spiritId,
            uint256 registryTokenId,
            address trainer,
            address platform,
            address treasury,
            SplitConfig split,
            string metadataURI
        );
        event StatusUpdated(bytes32 indexed spiritKey, uint8 status);
        event ProvenanceRecorded(bytes32 indexed spiritKey, bytes32 indexed eventType, bytes32 contentHash);
    }

    interface IRoyaltyRouter {
        function registry() external view returns (address);
        function protocolTreasury() external view returns (address);
        function acceptedCurrency(address currency) external view returns (bool);

        function routeRevenue(string calldata spiritId, address currency, uint256 amount, bytes32 metadataHash) external;
        function routeRevenueNative(string calldata spiritId, bytes32 metadataHash) external payable;

        event RevenueRouted(
            bytes32 indexed spiritKey,
            address indexed currency,
            uint256 amount,
            uint256 artistAmount,
            uint256 agentAmount,
            uint256 platformAmount,
            uint256 protocolAmount,
            bytes32 metadataHash
        );
    }
}

impl From<SplitConfig> for spirit_types::SplitConfig {
    fn from(split: SplitConfig) -> Self {
        Self::new(
            split.artistBps,
            split.agentBps,
            split.platformBps,
            split.protocolBps,
        )
    }
}

impl From<spirit_types::SplitConfig> for SplitConfig {
    fn from(split: spirit_types::SplitConfig) -> Self {
        Self {
            artistBps: split.artist_bps,
            agentBps: split.agent_bps,
            platformBps: split.platform_bps,
            protocolBps: split.protocol_bps,
        }
    }
}

impl From<Economics> for AgentEconomics {
    fn from(economics: Economics) -> Self {
        Self {
            child_token: economics.childToken,
            staking_pool: economics.stakingPool,
            router: economics.router,
        }
    }
}

/// Project a raw registry record.
///
/// Returns `None` when `registryTokenId` is zero, which is how the registry
/// reports an unknown spirit id.
pub fn agent_record(agent: Agent) -> ChainResult<Option<AgentRecord>> {
    if agent.registryTokenId.is_zero() {
        return Ok(None);
    }
    let status = AgentStatus::try_from(agent.status)
        .map_err(|e| ChainError::decode(format!("agent {}: {}", agent.spiritId, e)))?;
    Ok(Some(AgentRecord {
        spirit_id: agent.spiritId,
        registry_token_id: agent.registryTokenId,
        trainer: agent.trainer,
        platform: agent.platform,
        treasury: agent.treasury,
        metadata_uri: agent.metadataURI,
        split: agent.split.into(),
        economics: agent.economics.into(),
        status,
    }))
}

impl From<ISpiritRegistry::getRecipientsReturn> for Recipients {
    fn from(ret: ISpiritRegistry::getRecipientsReturn) -> Self {
        Self {
            trainer: ret.trainer,
            platform: ret.platform,
            treasury: ret.treasury,
            split: ret.split.into(),
        }
    }
}

/// Build a [`RevenueEvent`] from a decoded `RevenueRouted` log.
pub fn revenue_event(event: IRoyaltyRouter::RevenueRouted, tx_hash: B256, timestamp: u64) -> RevenueEvent {
    RevenueEvent {
        spirit_key: event.spiritKey,
        currency: event.currency,
        amount: event.amount,
        artist_amount: event.artistAmount,
        agent_amount: event.agentAmount,
        platform_amount: event.platformAmount,
        protocol_amount: event.protocolAmount,
        metadata_hash: event.metadataHash,
        tx_hash,
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{keccak256, Address, U256};
    use alloy::sol_types::{SolCall, SolEvent};

    fn raw_agent(token_id: u64, status: u8) -> Agent {
        Agent {
            spiritId: "abraham".to_string(),
            registryTokenId: U256::from(token_id),
            trainer: Address::repeat_byte(1),
            platform: Address::repeat_byte(2),
            treasury: Address::repeat_byte(3),
            metadataURI: "ipfs://abraham".to_string(),
            split: spirit_types::SplitConfig::EQUAL.into(),
            economics: Economics {
                childToken: Address::ZERO,
                stakingPool: Address::ZERO,
                router: Address::ZERO,
            },
            status,
        }
    }

    #[test]
    fn test_function_signatures() {
        assert_eq!(
            ISpiritRegistry::getAgentCall::SIGNATURE,
            "getAgent(string)"
        );
        assert_eq!(
            ISpiritRegistry::registerAgentCall::SIGNATURE,
            "registerAgent(string,address,address,address,string,(uint16,uint16,uint16,uint16))"
        );
        assert_eq!(
            IRoyaltyRouter::routeRevenueCall::SIGNATURE,
            "routeRevenue(string,address,uint256,bytes32)"
        );
    }

    #[test]
    fn test_event_signatures() {
        assert_eq!(
            IRoyaltyRouter::RevenueRouted::SIGNATURE,
            "RevenueRouted(bytes32,address,uint256,uint256,uint256,uint256,uint256,bytes32)"
        );
        assert_eq!(
            ISpiritRegistry::StatusUpdated::SIGNATURE_HASH,
            keccak256("StatusUpdated(bytes32,uint8)")
        );
    }

    #[test]
    fn test_zero_token_id_is_absent() {
        assert!(agent_record(raw_agent(0, 0)).unwrap().is_none());
    }

    #[test]
    fn test_agent_record_projection() {
        let record = agent_record(raw_agent(4, 1)).unwrap().unwrap();
        assert_eq!(record.registry_token_id, U256::from(4));
        assert_eq!(record.status, AgentStatus::Paused);
        assert_eq!(record.metadata_uri, "ipfs://abraham");
        assert!(record.split.is_complete());
    }

    #[test]
    fn test_unknown_status_is_decode_error() {
        let err = agent_record(raw_agent(4, 9)).unwrap_err();
        assert!(matches!(err, ChainError::Decode(_)));
    }
}
