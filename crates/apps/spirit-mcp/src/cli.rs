//! CLI argument definitions using clap.

use clap::Parser;
use spirit_chain::{ContractOverrides, SpiritConfig};
use spirit_types::{Address, SpiritChain};

/// Spirit Protocol MCP server.
#[derive(Parser, Debug)]
#[command(name = "spirit-mcp")]
#[command(version)]
#[command(about = "MCP server for Spirit Protocol agent registration and revenue routing")]
#[command(
    long_about = "Serves the Spirit Protocol tools over stdio for AI assistants.\n\nWithout a private key only the read tools and spirit_evaluate succeed."
)]
pub struct Cli {
    /// Chain id (8453 = Base, 84532 = Base Sepolia).
    #[arg(long, env = "SPIRIT_CHAIN_ID", default_value_t = SpiritChain::BASE_SEPOLIA_ID)]
    pub chain_id: u64,

    /// Hex private key used to sign write transactions.
    #[arg(long, env = "SPIRIT_PRIVATE_KEY", hide = true, hide_env_values = true)]
    pub private_key: Option<String>,

    /// JSON-RPC endpoint. Defaults to the chain's public endpoint.
    #[arg(long, env = "SPIRIT_RPC_URL")]
    pub rpc_url: Option<String>,

    /// SpiritRegistry address override.
    #[arg(long, env = "SPIRIT_REGISTRY")]
    pub registry: Option<Address>,

    /// RoyaltyRouter address override.
    #[arg(long, env = "SPIRIT_ROUTER")]
    pub router: Option<Address>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Client configuration described by these arguments.
    pub fn into_config(self) -> SpiritConfig {
        let mut config = SpiritConfig::new(self.chain_id).with_contracts(ContractOverrides {
            registry: self.registry,
            router: self.router,
            ..ContractOverrides::default()
        });
        if let Some(key) = self.private_key.filter(|k| !k.trim().is_empty()) {
            config = config.with_private_key(key);
        }
        if let Some(url) = self.rpc_url.filter(|u| !u.trim().is_empty()) {
            config = config.with_rpc_url(url);
        }
        config
    }
}
