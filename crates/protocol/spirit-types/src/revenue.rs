//! Revenue routing types.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::constants::{ZERO_ADDRESS, ZERO_HASH};

/// One revenue routing transaction, as reported by the `RevenueRouted` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueEvent {
    /// Spirit key of the agent.
    pub spirit_key: B256,
    /// Currency routed. [`ZERO_ADDRESS`] for the native token.
    pub currency: Address,
    /// Total amount routed.
    pub amount: U256,
    /// Amount sent to the artist/creator.
    pub artist_amount: U256,
    /// Amount sent to the agent treasury.
    pub agent_amount: U256,
    /// Amount sent to the platform.
    pub platform_amount: U256,
    /// Amount sent to the protocol treasury.
    pub protocol_amount: U256,
    /// Metadata hash attached to the routing call.
    pub metadata_hash: B256,
    /// Routing transaction.
    pub tx_hash: B256,
    /// Client wall-clock time (ms since the Unix epoch) when the receipt was read.
    pub timestamp: u64,
}

impl RevenueEvent {
    /// Whether the revenue was paid in the native token.
    pub fn is_native(&self) -> bool {
        self.currency == ZERO_ADDRESS
    }

    /// The four per-party amounts in artist, agent, platform, protocol order.
    pub fn shares(&self) -> [U256; 4] {
        [
            self.artist_amount,
            self.agent_amount,
            self.platform_amount,
            self.protocol_amount,
        ]
    }
}

/// Parameters for routing ERC-20 revenue.
///
/// The caller must have approved the royalty router to spend `amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRevenueParams {
    /// Agent identifier.
    pub spirit_id: String,
    /// ERC-20 token address.
    pub currency: Address,
    /// Amount in the token's smallest unit.
    pub amount: U256,
    /// Metadata hash. Defaults to [`ZERO_HASH`].
    pub metadata_hash: B256,
}

impl RouteRevenueParams {
    /// Create routing parameters with a zero metadata hash.
    pub fn new(spirit_id: impl Into<String>, currency: Address, amount: U256) -> Self {
        Self {
            spirit_id: spirit_id.into(),
            currency,
            amount,
            metadata_hash: ZERO_HASH,
        }
    }

    /// Attach a metadata hash.
    pub fn with_metadata_hash(mut self, metadata_hash: B256) -> Self {
        self.metadata_hash = metadata_hash;
        self
    }
}

/// Parameters for routing native-token revenue (sent as transaction value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRevenueNativeParams {
    /// Agent identifier.
    pub spirit_id: String,
    /// Amount in wei.
    pub amount: U256,
    /// Metadata hash. Defaults to [`ZERO_HASH`].
    pub metadata_hash: B256,
}

impl RouteRevenueNativeParams {
    /// Create native routing parameters with a zero metadata hash.
    pub fn new(spirit_id: impl Into<String>, amount: U256) -> Self {
        Self {
            spirit_id: spirit_id.into(),
            amount,
            metadata_hash: ZERO_HASH,
        }
    }

    /// Attach a metadata hash.
    pub fn with_metadata_hash(mut self, metadata_hash: B256) -> Self {
        self.metadata_hash = metadata_hash;
        self
    }
}

/// Treasury balance of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceInfo {
    /// Native token balance in wei.
    pub native: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_default_metadata_hash() {
        let params = RouteRevenueParams::new("abraham", Address::repeat_byte(0xaa), U256::from(100));
        assert_eq!(params.metadata_hash, ZERO_HASH);

        let native = RouteRevenueNativeParams::new("abraham", U256::from(100))
            .with_metadata_hash(B256::repeat_byte(1));
        assert_eq!(native.metadata_hash, B256::repeat_byte(1));
    }

    #[test]
    fn test_revenue_event_native_flag() {
        let event = RevenueEvent {
            spirit_key: B256::ZERO,
            currency: ZERO_ADDRESS,
            amount: U256::from(400),
            artist_amount: U256::from(100),
            agent_amount: U256::from(100),
            platform_amount: U256::from(100),
            protocol_amount: U256::from(100),
            metadata_hash: ZERO_HASH,
            tx_hash: B256::repeat_byte(9),
            timestamp: 0,
        };
        assert!(event.is_native());
        let total = event.shares().iter().fold(U256::ZERO, |acc, s| acc + *s);
        assert_eq!(total, event.amount);
    }
}
