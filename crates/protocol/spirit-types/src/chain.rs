//! Supported chains and their deployed contract addresses.

use std::fmt;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};

/// Native currency of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCurrency {
    /// Currency name.
    pub name: &'static str,
    /// Ticker symbol.
    pub symbol: &'static str,
    /// Decimals.
    pub decimals: u8,
}

const ETHER: NativeCurrency = NativeCurrency {
    name: "Ether",
    symbol: "ETH",
    decimals: 18,
};

/// Chains on which Spirit Protocol is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpiritChain {
    /// Base mainnet (8453).
    Base,
    /// Base Sepolia testnet (84532).
    BaseSepolia,
}

impl SpiritChain {
    /// Base mainnet chain id.
    pub const BASE_ID: u64 = 8453;
    /// Base Sepolia chain id.
    pub const BASE_SEPOLIA_ID: u64 = 84532;

    /// Resolve a chain id. Unknown ids are rejected.
    pub fn from_id(chain_id: u64) -> TypesResult<Self> {
        match chain_id {
            Self::BASE_ID => Ok(Self::Base),
            Self::BASE_SEPOLIA_ID => Ok(Self::BaseSepolia),
            other => Err(TypesError::UnsupportedChain(other)),
        }
    }

    /// Numeric chain id.
    pub const fn id(self) -> u64 {
        match self {
            Self::Base => Self::BASE_ID,
            Self::BaseSepolia => Self::BASE_SEPOLIA_ID,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::BaseSepolia => "Base Sepolia",
        }
    }

    /// Public RPC endpoint used when no override is configured.
    pub const fn default_rpc_url(self) -> &'static str {
        match self {
            Self::Base => "https://mainnet.base.org",
            Self::BaseSepolia => "https://sepolia.base.org",
        }
    }

    /// Block explorer base URL (no trailing slash).
    pub const fn explorer_url(self) -> &'static str {
        match self {
            Self::Base => "https://basescan.org",
            Self::BaseSepolia => "https://sepolia.basescan.org",
        }
    }

    /// Native currency.
    pub const fn native_currency(self) -> NativeCurrency {
        ETHER
    }

    /// Whether this is a test network.
    pub const fn is_testnet(self) -> bool {
        matches!(self, Self::BaseSepolia)
    }

    /// Explorer link for a transaction.
    pub fn tx_url(self, tx_hash: impl fmt::Display) -> String {
        format!("{}/tx/{}", self.explorer_url(), tx_hash)
    }

    /// Contract addresses deployed on this chain.
    pub const fn default_addresses(self) -> ContractAddresses {
        match self {
            Self::Base => MAINNET_ADDRESSES,
            Self::BaseSepolia => TESTNET_ADDRESSES,
        }
    }
}

impl TryFrom<u64> for SpiritChain {
    type Error = TypesError;

    fn try_from(chain_id: u64) -> TypesResult<Self> {
        Self::from_id(chain_id)
    }
}

impl fmt::Display for SpiritChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

/// Address book of the Spirit Protocol contracts on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContractAddresses {
    /// Agent registry.
    pub spirit_registry: Address,
    /// Royalty router.
    pub royalty_router: Address,
    /// SPIRIT token.
    pub spirit_token: Address,
    /// Agent factory.
    pub spirit_factory: Address,
    /// Staking pool.
    pub staking_pool: Address,
    /// Reward controller.
    pub reward_controller: Address,
    /// Protocol treasury (receives the protocol share).
    pub protocol_treasury: Address,
}

/// Base Sepolia deployment.
pub const TESTNET_ADDRESSES: ContractAddresses = ContractAddresses {
    spirit_registry: address!("0x4a0e642e9aec25c5856987e95c0410ae10e8de5e"),
    royalty_router: address!("0x271bf11777ff7cbb9d938d2122d01493f6e9fc21"),
    spirit_token: address!("0xC3FD6880fC602d999f64C4a38dF51BEB6e1b654B"),
    spirit_factory: address!("0x53B9db3DCF3a69a0F62c44b19a6c37149b7fB93b"),
    staking_pool: address!("0xBBC3C7dc9151FFDc97e04E84Ad0fE91aF91D9DeE"),
    reward_controller: address!("0xD91CCC7eeA5c0aD0f6e5E2c6E5c08bdF5C1cA1b0"),
    protocol_treasury: address!("0xe4951bEE6FA86B809655922f610FF74C0E33416C"),
};

// TODO: fill in once the contracts are deployed to Base mainnet.
/// Base mainnet deployment.
pub const MAINNET_ADDRESSES: ContractAddresses = ContractAddresses {
    spirit_registry: Address::ZERO,
    royalty_router: Address::ZERO,
    spirit_token: Address::ZERO,
    spirit_factory: Address::ZERO,
    staking_pool: Address::ZERO,
    reward_controller: Address::ZERO,
    protocol_treasury: Address::ZERO,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_ids() {
        assert_eq!(SpiritChain::from_id(8453).unwrap(), SpiritChain::Base);
        assert_eq!(SpiritChain::from_id(84532).unwrap(), SpiritChain::BaseSepolia);
        assert_eq!(SpiritChain::Base.id(), 8453);
        assert_eq!(
            SpiritChain::try_from(1u64),
            Err(TypesError::UnsupportedChain(1))
        );
    }

    #[test]
    fn test_chain_metadata() {
        assert_eq!(SpiritChain::Base.default_rpc_url(), "https://mainnet.base.org");
        assert_eq!(SpiritChain::BaseSepolia.name(), "Base Sepolia");
        assert!(SpiritChain::BaseSepolia.is_testnet());
        assert!(!SpiritChain::Base.is_testnet());
        assert_eq!(SpiritChain::Base.native_currency().decimals, 18);
        assert_eq!(SpiritChain::BaseSepolia.to_string(), "Base Sepolia (84532)");
    }

    #[test]
    fn test_tx_url() {
        assert_eq!(
            SpiritChain::BaseSepolia.tx_url("0xabc"),
            "https://sepolia.basescan.org/tx/0xabc"
        );
        assert_eq!(
            SpiritChain::Base.tx_url("0xdef"),
            "https://basescan.org/tx/0xdef"
        );
    }

    #[test]
    fn test_default_addresses() {
        let testnet = SpiritChain::BaseSepolia.default_addresses();
        assert_eq!(
            testnet.spirit_registry,
            address!("0x4a0e642e9aec25c5856987e95c0410ae10e8de5e")
        );
        assert!(!testnet.protocol_treasury.is_zero());

        let mainnet = SpiritChain::Base.default_addresses();
        assert!(mainnet.spirit_registry.is_zero());
    }
}
