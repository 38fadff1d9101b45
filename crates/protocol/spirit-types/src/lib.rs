//! Data structures for Spirit Protocol.
//!
//! This crate holds the records returned by the `SpiritRegistry` and
//! `RoyaltyRouter` contracts, the supported chain table with its contract
//! address book, and amount formatting helpers. It performs no I/O.
//!
//! # Module Organization
//!
//! - [`agent`] - Agent records, split configuration, registration params
//! - [`revenue`] - Revenue routing params and events
//! - [`chain`] - Supported chains and contract addresses
//! - [`units`] - Amount parsing and fixed-point formatting
//! - [`constants`] - Protocol constants
//! - [`error`] - Conversion errors
//!
//! # Example
//!
//! ```
//! use spirit_types::{Address, RegisterAgentParams, SplitConfig, SpiritChain};
//!
//! let params = RegisterAgentParams::new(
//!     "abraham",
//!     Address::repeat_byte(1),
//!     Address::repeat_byte(2),
//!     Address::repeat_byte(3),
//!     "ipfs://abraham",
//! );
//! assert!(params.split.is_complete());
//! assert_eq!(params.split, SplitConfig::EQUAL);
//!
//! let chain = SpiritChain::from_id(84532).unwrap();
//! assert_eq!(chain.tx_url("0xabc"), "https://sepolia.basescan.org/tx/0xabc");
//! ```

pub mod agent;
pub mod chain;
pub mod constants;
pub mod error;
pub mod revenue;
pub mod units;

pub use alloy_primitives::{Address, B256, U256};

pub use agent::{
    bps_to_percent, AgentEconomics, AgentRecord, AgentStatus, Recipients, RegisterAgentParams,
    RegisterAgentResult, SplitConfig,
};
pub use chain::{ContractAddresses, NativeCurrency, SpiritChain, MAINNET_ADDRESSES, TESTNET_ADDRESSES};
pub use constants::*;
pub use error::{TypesError, TypesResult};
pub use revenue::{BalanceInfo, RevenueEvent, RouteRevenueNativeParams, RouteRevenueParams};
pub use units::{format_ether, format_fixed, format_units, parse_amount, validate_decimals};
