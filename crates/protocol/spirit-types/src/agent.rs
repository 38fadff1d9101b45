//! Agent registry types.
//!
//! These mirror the records held by the `SpiritRegistry` contract. The SDK
//! never creates or mutates them locally; it only projects what the contract
//! returns.

use std::fmt;

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::constants::{BPS_DENOMINATOR, DEFAULT_SHARE_BPS};
use crate::error::{TypesError, TypesResult};

/// Agent status (mirrors `SpiritRegistry.Status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum AgentStatus {
    /// Agent is live and routing revenue.
    #[default]
    Active = 0,
    /// Agent is temporarily paused.
    Paused = 1,
    /// Agent has graduated to full autonomy.
    Graduated = 2,
}

impl AgentStatus {
    /// All statuses in on-chain code order.
    pub const ALL: [AgentStatus; 3] = [Self::Active, Self::Paused, Self::Graduated];

    /// On-chain status code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Paused => "Paused",
            Self::Graduated => "Graduated",
        }
    }

    /// Parse a status code coming from JSON or the wire.
    pub fn from_code(code: u64) -> TypesResult<Self> {
        match code {
            0 => Ok(Self::Active),
            1 => Ok(Self::Paused),
            2 => Ok(Self::Graduated),
            other => Err(TypesError::InvalidStatus(other)),
        }
    }
}

impl TryFrom<u8> for AgentStatus {
    type Error = TypesError;

    fn try_from(code: u8) -> TypesResult<Self> {
        Self::from_code(u64::from(code))
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Revenue split configuration in basis points.
///
/// The registry contract enforces that the four shares sum to
/// [`BPS_DENOMINATOR`]; the SDK does not re-check it before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitConfig {
    /// Artist/creator share.
    pub artist_bps: u16,
    /// Agent treasury share.
    pub agent_bps: u16,
    /// Platform share.
    pub platform_bps: u16,
    /// Protocol treasury share.
    pub protocol_bps: u16,
}

impl SplitConfig {
    /// The equal 25/25/25/25 split.
    pub const EQUAL: Self = Self {
        artist_bps: DEFAULT_SHARE_BPS,
        agent_bps: DEFAULT_SHARE_BPS,
        platform_bps: DEFAULT_SHARE_BPS,
        protocol_bps: DEFAULT_SHARE_BPS,
    };

    /// Create a split from four basis-point shares.
    pub const fn new(artist_bps: u16, agent_bps: u16, platform_bps: u16, protocol_bps: u16) -> Self {
        Self {
            artist_bps,
            agent_bps,
            platform_bps,
            protocol_bps,
        }
    }

    /// Sum of the four shares.
    pub fn total_bps(&self) -> u32 {
        u32::from(self.artist_bps)
            + u32::from(self.agent_bps)
            + u32::from(self.platform_bps)
            + u32::from(self.protocol_bps)
    }

    /// Whether the shares add up to exactly 100%.
    pub fn is_complete(&self) -> bool {
        self.total_bps() == u32::from(BPS_DENOMINATOR)
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::EQUAL
    }
}

/// Render basis points as a percentage string: 2500 → `"25%"`, 1250 → `"12.5%"`.
pub fn bps_to_percent(bps: u16) -> String {
    let whole = bps / 100;
    let frac = bps % 100;
    if frac == 0 {
        format!("{}%", whole)
    } else if frac % 10 == 0 {
        format!("{}.{}%", whole, frac / 10)
    } else {
        format!("{}.{:02}%", whole, frac)
    }
}

/// Addresses of the per-agent economic contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEconomics {
    /// Agent-specific child token.
    pub child_token: Address,
    /// Staking pool.
    pub staking_pool: Address,
    /// Royalty router.
    pub router: Address,
}

/// Full agent record from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    /// Human-readable identifier.
    pub spirit_id: String,
    /// Registry NFT id. Zero means the agent is not registered.
    pub registry_token_id: U256,
    /// Trainer/creator wallet.
    pub trainer: Address,
    /// Platform wallet.
    pub platform: Address,
    /// Agent treasury (typically a Safe).
    pub treasury: Address,
    /// Metadata URI (IPFS or HTTPS).
    #[serde(rename = "metadataURI")]
    pub metadata_uri: String,
    /// Revenue split.
    pub split: SplitConfig,
    /// Economic contracts.
    pub economics: AgentEconomics,
    /// Current status.
    pub status: AgentStatus,
}

/// Parameters for registering a new agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAgentParams {
    /// Unique agent identifier.
    pub spirit_id: String,
    /// Trainer/creator wallet.
    pub trainer: Address,
    /// Platform wallet.
    pub platform: Address,
    /// Agent treasury.
    pub treasury: Address,
    /// Metadata URI.
    pub metadata_uri: String,
    /// Revenue split. Defaults to [`SplitConfig::EQUAL`].
    pub split: SplitConfig,
}

impl RegisterAgentParams {
    /// Create registration parameters with the default equal split.
    pub fn new(
        spirit_id: impl Into<String>,
        trainer: Address,
        platform: Address,
        treasury: Address,
        metadata_uri: impl Into<String>,
    ) -> Self {
        Self {
            spirit_id: spirit_id.into(),
            trainer,
            platform,
            treasury,
            metadata_uri: metadata_uri.into(),
            split: SplitConfig::default(),
        }
    }

    /// Override the revenue split.
    pub fn with_split(mut self, split: SplitConfig) -> Self {
        self.split = split;
        self
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterAgentResult {
    /// Canonical on-chain key (keccak256 of the spirit id).
    pub spirit_key: B256,
    /// Registry NFT id.
    pub registry_token_id: U256,
    /// Registration transaction.
    pub tx_hash: B256,
}

/// Recipients and split of a registered agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipients {
    /// Trainer/creator wallet.
    pub trainer: Address,
    /// Platform wallet.
    pub platform: Address,
    /// Agent treasury.
    pub treasury: Address,
    /// Revenue split.
    pub split: SplitConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        for status in AgentStatus::ALL {
            assert_eq!(AgentStatus::try_from(status.code()).unwrap(), status);
        }
        assert_eq!(AgentStatus::Paused.label(), "Paused");
        assert_eq!(AgentStatus::Graduated.to_string(), "Graduated");
        assert_eq!(
            AgentStatus::from_code(3),
            Err(TypesError::InvalidStatus(3))
        );
    }

    #[test]
    fn test_default_split_sums_to_denominator() {
        let split = SplitConfig::default();
        assert_eq!(split, SplitConfig::new(2500, 2500, 2500, 2500));
        assert_eq!(split.total_bps(), 10_000);
        assert!(split.is_complete());
    }

    #[test]
    fn test_incomplete_split() {
        let split = SplitConfig::new(5000, 2500, 2500, 100);
        assert_eq!(split.total_bps(), 10_100);
        assert!(!split.is_complete());
    }

    #[test]
    fn test_bps_to_percent() {
        assert_eq!(bps_to_percent(2500), "25%");
        assert_eq!(bps_to_percent(1250), "12.5%");
        assert_eq!(bps_to_percent(3333), "33.33%");
        assert_eq!(bps_to_percent(5), "0.05%");
        assert_eq!(bps_to_percent(0), "0%");
        assert_eq!(bps_to_percent(10_000), "100%");
    }

    #[test]
    fn test_register_params_default_split() {
        let params = RegisterAgentParams::new(
            "abraham",
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
            "ipfs://abraham",
        );
        assert_eq!(params.split, SplitConfig::EQUAL);

        let custom = params.with_split(SplitConfig::new(4000, 3000, 2000, 1000));
        assert_eq!(custom.split.artist_bps, 4000);
    }

    #[test]
    fn test_split_json_shape() {
        let json = serde_json::to_value(SplitConfig::EQUAL).unwrap();
        assert_eq!(json["artistBps"], 2500);
        assert_eq!(json["protocolBps"], 2500);
    }
}
