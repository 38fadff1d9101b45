//! Client configuration.

use serde::{Deserialize, Serialize};
use spirit_types::{Address, ContractAddresses, SpiritChain};

use crate::error::ChainResult;

/// Optional per-contract address overrides.
///
/// Any field left `None` falls back to the chain's deployed address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractOverrides {
    /// SpiritRegistry address
    pub registry: Option<Address>,
    /// RoyaltyRouter address
    pub router: Option<Address>,
    /// SPIRIT token address
    pub spirit_token: Option<Address>,
    /// StakingPool address
    pub staking_pool: Option<Address>,
    /// SpiritFactory address
    pub factory: Option<Address>,
}

impl ContractOverrides {
    /// Apply the overrides on top of a chain's address book.
    pub fn apply(&self, mut addresses: ContractAddresses) -> ContractAddresses {
        if let Some(registry) = self.registry {
            addresses.spirit_registry = registry;
        }
        if let Some(router) = self.router {
            addresses.royalty_router = router;
        }
        if let Some(token) = self.spirit_token {
            addresses.spirit_token = token;
        }
        if let Some(pool) = self.staking_pool {
            addresses.staking_pool = pool;
        }
        if let Some(factory) = self.factory {
            addresses.spirit_factory = factory;
        }
        addresses
    }
}

/// Configuration for [`SpiritClient`](crate::SpiritClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritConfig {
    /// Chain id (8453 or 84532)
    pub chain_id: u64,

    /// RPC endpoint. Defaults to the chain's public endpoint.
    pub rpc_url: Option<String>,

    /// Hex-encoded private key. Required for write operations only.
    #[serde(skip_serializing)]
    pub private_key: Option<String>,

    /// Contract address overrides
    #[serde(default)]
    pub contracts: ContractOverrides,
}

impl SpiritConfig {
    /// Create a configuration for a chain id, read-only, with default endpoints.
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            rpc_url: None,
            private_key: None,
            contracts: ContractOverrides::default(),
        }
    }

    /// Configuration for Base Sepolia.
    pub fn testnet() -> Self {
        Self::new(SpiritChain::BASE_SEPOLIA_ID)
    }

    /// Configuration for Base mainnet.
    pub fn mainnet() -> Self {
        Self::new(SpiritChain::BASE_ID)
    }

    /// Set the signing key.
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Set the RPC endpoint.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Set contract address overrides.
    pub fn with_contracts(mut self, contracts: ContractOverrides) -> Self {
        self.contracts = contracts;
        self
    }

    /// Resolve the chain. Unsupported chain ids are a configuration error.
    pub fn chain(&self) -> ChainResult<SpiritChain> {
        Ok(SpiritChain::from_id(self.chain_id)?)
    }

    /// RPC endpoint to connect to.
    pub fn resolved_rpc_url(&self) -> ChainResult<String> {
        match &self.rpc_url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.chain()?.default_rpc_url().to_string()),
        }
    }

    /// Contract addresses after applying overrides.
    pub fn addresses(&self) -> ChainResult<ContractAddresses> {
        Ok(self.contracts.apply(self.chain()?.default_addresses()))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ChainResult<()> {
        self.chain()?;
        Ok(())
    }
}

impl Default for SpiritConfig {
    fn default() -> Self {
        Self::testnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainError;

    #[test]
    fn test_testnet_defaults() {
        let config = SpiritConfig::testnet();
        assert_eq!(config.chain_id, 84532);
        assert_eq!(config.resolved_rpc_url().unwrap(), "https://sepolia.base.org");
        assert_eq!(
            config.addresses().unwrap(),
            SpiritChain::BaseSepolia.default_addresses()
        );
        assert!(config.private_key.is_none());
    }

    #[test]
    fn test_rpc_override() {
        let config = SpiritConfig::mainnet().with_rpc_url("http://localhost:8545");
        assert_eq!(config.resolved_rpc_url().unwrap(), "http://localhost:8545");
    }

    #[test]
    fn test_contract_overrides() {
        let registry = Address::repeat_byte(0x11);
        let config = SpiritConfig::testnet().with_contracts(ContractOverrides {
            registry: Some(registry),
            ..Default::default()
        });
        let addresses = config.addresses().unwrap();
        assert_eq!(addresses.spirit_registry, registry);
        assert_eq!(
            addresses.royalty_router,
            SpiritChain::BaseSepolia.default_addresses().royalty_router
        );
    }

    #[test]
    fn test_unsupported_chain_rejected() {
        let config = SpiritConfig::new(1);
        assert!(matches!(config.validate(), Err(ChainError::Config(_))));
        assert!(config.resolved_rpc_url().is_err());
    }

    #[test]
    fn test_private_key_not_serialized() {
        let config = SpiritConfig::testnet().with_private_key("0x01");
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("privateKey").is_none());
        assert_eq!(json["chainId"], 84532);
    }
}
