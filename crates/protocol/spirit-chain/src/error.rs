//! Error types for chain operations.

use spirit_types::{TypesError, B256};
use thiserror::Error;

/// Result type alias for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors that can occur while talking to the Spirit Protocol contracts.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Write operation attempted without a signing key.
    #[error("Wallet not configured. Provide privateKey in SpiritConfig for write operations.")]
    NoWallet,

    /// Transaction was mined but the expected event is missing from the receipt.
    #[error("{event} event not found in receipt")]
    EventNotFound {
        /// Event name
        event: &'static str,
    },

    /// The registry has no record for this spirit id.
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Transaction was mined with a failed status.
    #[error("transaction reverted: {0}")]
    Reverted(B256),

    /// JSON-RPC, transport or contract revert error. The node's message is kept verbatim.
    #[error("{0}")]
    Rpc(String),

    /// Returned data did not match the expected ABI.
    #[error("decode error: {0}")]
    Decode(String),

    /// Caller-supplied argument rejected before any network call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ChainError {
    /// Create a new EventNotFound error.
    pub fn event_not_found(event: &'static str) -> Self {
        Self::EventNotFound { event }
    }

    /// Create a new AgentNotFound error.
    pub fn agent_not_found(spirit_id: impl Into<String>) -> Self {
        Self::AgentNotFound(spirit_id.into())
    }

    /// Create a new Rpc error.
    pub fn rpc(msg: impl ToString) -> Self {
        Self::Rpc(msg.to_string())
    }

    /// Create a new Decode error.
    pub fn decode(msg: impl ToString) -> Self {
        Self::Decode(msg.to_string())
    }

    /// Create a new InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from the remote side (node or contract).
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Rpc(_) | Self::Reverted(_))
    }
}

impl From<TypesError> for ChainError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::UnsupportedChain(_) => Self::Config(err.to_string()),
            other => Self::InvalidArgument(other.to_string()),
        }
    }
}
