//! MCP server for Spirit Protocol.
//!
//! Exposes six tools to AI assistants over stdio:
//!
//! - `spirit_get_agent` - registry lookup by spirit id
//! - `spirit_register` - register a new agent (wallet required)
//! - `spirit_balance` - native balance of an agent's treasury
//! - `spirit_route_revenue` - route native or ERC-20 revenue through the split (wallet required)
//! - `spirit_evaluate` - offline self-assessment for unregistered agents
//! - `spirit_update_status` - set Active/Paused/Graduated (wallet required)
//!
//! Every call produces one result. Failures are reported as tool results
//! with `isError: true` and the text `Error: <message>`; the server keeps
//! running.
//!
//! # Usage
//!
//! ```bash
//! SPIRIT_PRIVATE_KEY=0x... spirit-mcp --chain-id 84532
//! ```

pub mod cli;
pub mod error;
pub mod evaluate;
pub mod server;
pub mod tools;

pub use error::{McpError, McpResult};
pub use evaluate::{evaluate_agent, Evaluation, Recommendation};
pub use server::{run_server, SpiritMcpServer, SERVER_NAME};
pub use tools::SpiritTool;
