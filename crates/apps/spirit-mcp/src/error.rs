//! Error types for the MCP server.
//!
//! Every variant is reported to the client as a tool result with
//! `isError: true` and the text `Error: <message>`. None of them abort
//! the server.

use spirit_chain::ChainError;
use spirit_types::TypesError;
use thiserror::Error;

/// Result type for MCP operations.
pub type McpResult<T> = Result<T, McpError>;

/// Error types for MCP server operations.
#[derive(Debug, Error)]
pub enum McpError {
    /// Tool name outside the six Spirit tools.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments object missing a field or carrying the wrong type.
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// Tool the arguments were meant for.
        tool: &'static str,
        /// Deserializer message.
        reason: String,
    },

    /// A field that should hold a 20-byte hex address does not.
    #[error("invalid address for {field}: {value}")]
    InvalidAddress {
        /// Argument name.
        field: &'static str,
        /// Value as received.
        value: String,
    },

    /// Amount, status or decimals rejected by the type layer.
    #[error(transparent)]
    Types(#[from] TypesError),

    /// Write tool invoked without a signing key.
    #[error("Wallet not configured. Provide privateKey in config for write operations.")]
    WalletNotConfigured,

    /// Chain client error, passed through with its own message.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl McpError {
    /// Create an invalid-address error.
    pub fn invalid_address(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAddress {
            field,
            value: value.into(),
        }
    }

    /// Text placed in the error envelope.
    pub fn envelope_text(&self) -> String {
        format!("Error: {}", self)
    }

    /// True for errors caused by the caller's input rather than the chain.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool(_)
                | Self::InvalidArguments { .. }
                | Self::InvalidAddress { .. }
                | Self::Types(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_text() {
        assert_eq!(
            McpError::UnknownTool("spirit_mint".into()).envelope_text(),
            "Error: Unknown tool: spirit_mint"
        );
        assert_eq!(
            McpError::WalletNotConfigured.envelope_text(),
            "Error: Wallet not configured. Provide privateKey in config for write operations."
        );
    }

    #[test]
    fn test_chain_errors_keep_their_message() {
        let err = McpError::from(ChainError::agent_not_found("ghost"));
        assert_eq!(err.envelope_text(), "Error: Agent not found: ghost");
        assert!(!err.is_argument_error());
    }

    #[test]
    fn test_type_errors_are_argument_errors() {
        let err = McpError::from(TypesError::InvalidStatus(3));
        assert!(err.is_argument_error());
        assert!(err.envelope_text().starts_with("Error: invalid agent status: 3"));
    }
}
