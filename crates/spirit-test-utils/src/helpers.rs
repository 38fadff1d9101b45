//! Helper functions for creating test fixtures.

use std::sync::Arc;

use spirit_chain::{SpiritClient, SpiritConfig};
use spirit_types::{Address, RegisterAgentParams};

use crate::MockChain;

/// Trainer address used by [`register_params`].
pub const TRAINER: Address = Address::new([0x11; 20]);
/// Platform address used by [`register_params`].
pub const PLATFORM: Address = Address::new([0x22; 20]);
/// Treasury address used by [`register_params`].
pub const TREASURY: Address = Address::new([0x33; 20]);

/// Registration params with fixed trainer/platform/treasury and the default split.
pub fn register_params(spirit_id: &str) -> RegisterAgentParams {
    RegisterAgentParams::new(
        spirit_id,
        TRAINER,
        PLATFORM,
        TREASURY,
        format!("ipfs://{}", spirit_id),
    )
}

/// A Base Sepolia client backed by the given mock.
pub fn mock_client(mock: &MockChain) -> SpiritClient {
    SpiritClient::with_transport(&SpiritConfig::testnet(), Arc::new(mock.clone()))
        .expect("testnet config is valid")
}
