//! Chain client for Spirit Protocol.
//!
//! Typed access to the `SpiritRegistry` and `RoyaltyRouter` contracts on
//! Base. All business rules (split arithmetic, ownership, validation) live
//! in the contracts; this crate marshals calls, waits for receipts and
//! decodes events.
//!
//! # Architecture
//!
//! ```text
//! spirit-mcp                    spirit-chain
//! ┌──────────────┐             ┌──────────────────────────┐
//! │ tool handler │ ──────────► │ SpiritClient             │
//! └──────────────┘             │   └─ ChainTransport      │
//!                              │        ├─ RpcTransport   │
//!                              │        └─ (mock, tests)  │
//!                              └────────────┬─────────────┘
//!                                           │ JSON-RPC
//!                                           ▼
//!                              ┌──────────────────────────┐
//!                              │ Base / Base Sepolia node │
//!                              └──────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use spirit_chain::{SpiritClient, SpiritConfig};
//!
//! # async fn example() -> spirit_chain::ChainResult<()> {
//! let client = SpiritClient::new(&SpiritConfig::testnet())?;
//! if let Some(agent) = client.get_agent("abraham").await? {
//!     println!("{} -> {}", agent.spirit_id, agent.treasury);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Write Operations
//!
//! Writes need a private key in [`SpiritConfig`]. Each write is simulated
//! with `eth_call` first so reverts surface before a transaction is sent.
//! `register_agent` and the two routing methods then wait for the receipt
//! and decode the emitted event; the other writes return the transaction
//! hash as soon as it is accepted.

pub mod abi;
mod client;
mod config;
mod error;
mod rpc;
mod transport;

pub use client::SpiritClient;
pub use config::{ContractOverrides, SpiritConfig};
pub use error::{ChainError, ChainResult};
pub use rpc::{RpcTransport, DEFAULT_POLL_INTERVAL};
pub use transport::{CallRequest, ChainTransport, TxReceipt};
