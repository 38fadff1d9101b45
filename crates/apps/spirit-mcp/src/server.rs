//! MCP server implementation.
//!
//! [`SpiritMcpServer`] wraps a [`SpiritClient`] and answers `tools/list` and
//! `tools/call` over stdio. Every call resolves to exactly one
//! [`CallToolResult`]: a pretty-printed JSON (or plain text) success payload,
//! or an `isError` envelope reading `Error: <message>`. Nothing raised by the
//! client or by argument parsing escapes the dispatcher.

use std::future::Future;

use rmcp::{
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData as McpError, ServerHandler,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use spirit_chain::SpiritClient;
use spirit_types::{
    format_ether, parse_amount, validate_decimals, Address, AgentStatus, RegisterAgentParams,
    RouteRevenueNativeParams, RouteRevenueParams, DEFAULT_TOKEN_DECIMALS, NATIVE_DECIMALS,
};

use crate::error::{McpError as SpiritMcpError, McpResult};
use crate::evaluate::evaluate_agent;
use crate::tools::{
    agent_not_found_text, parse_arguments, AgentOutput, BalanceInput, BalanceOutput,
    EvaluateInput, GetAgentInput, NativeBalance, RegisterInput, RegisterOutput,
    RouteRevenueInput, RouteRevenueOutput, SpiritTool, SplitAmounts, TransactionOutput,
    TreasuryBalance, UpdateStatusInput,
};

/// Server name reported in `initialize`.
pub const SERVER_NAME: &str = "spirit-protocol";

/// Currency label used for native-value routing.
const NATIVE_SYMBOL: &str = "ETH";

/// Create an error result for a tool call.
fn tool_error(error: &SpiritMcpError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(error.envelope_text())])
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn json_result<T: Serialize>(output: &T) -> McpResult<CallToolResult> {
    Ok(text_result(serde_json::to_string_pretty(output)?))
}

fn parse_address(field: &'static str, value: &str) -> McpResult<Address> {
    value
        .trim()
        .parse()
        .map_err(|_| SpiritMcpError::invalid_address(field, value))
}

/// MCP server exposing the Spirit Protocol tools.
#[derive(Clone, Debug)]
pub struct SpiritMcpServer {
    client: SpiritClient,
}

impl SpiritMcpServer {
    /// Create a server over a configured client.
    pub fn new(client: SpiritClient) -> Self {
        Self { client }
    }

    /// The underlying chain client.
    pub fn client(&self) -> &SpiritClient {
        &self.client
    }

    /// Definitions of all six tools.
    pub fn tools(&self) -> Vec<Tool> {
        SpiritTool::ALL
            .into_iter()
            .map(SpiritTool::definition)
            .collect()
    }

    /// Run one tool call to completion.
    ///
    /// Unknown names, malformed arguments, a missing wallet and chain
    /// failures all come back as error envelopes.
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> CallToolResult {
        let result = match name.parse::<SpiritTool>() {
            Ok(tool) => self.dispatch(tool, arguments).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(output) => output,
            Err(e) => {
                if e.is_argument_error() {
                    debug!(tool = %name, error = %e, "rejected tool call");
                } else {
                    warn!(tool = %name, error = %e, "tool call failed");
                }
                tool_error(&e)
            }
        }
    }

    async fn dispatch(
        &self,
        tool: SpiritTool,
        arguments: Option<JsonObject>,
    ) -> McpResult<CallToolResult> {
        debug!(tool = %tool, "Processing tool call");

        if tool.requires_wallet() && !self.client.has_wallet() {
            return Err(SpiritMcpError::WalletNotConfigured);
        }

        match tool {
            SpiritTool::GetAgent => self.get_agent(parse_arguments(tool, arguments)?).await,
            SpiritTool::Register => self.register(parse_arguments(tool, arguments)?).await,
            SpiritTool::Balance => self.balance(parse_arguments(tool, arguments)?).await,
            SpiritTool::RouteRevenue => {
                self.route_revenue(parse_arguments(tool, arguments)?).await
            }
            SpiritTool::Evaluate => {
                let input: EvaluateInput = parse_arguments(tool, arguments)?;
                json_result(&evaluate_agent(&input))
            }
            SpiritTool::UpdateStatus => {
                self.update_status(parse_arguments(tool, arguments)?).await
            }
        }
    }

    // =========================================================================
    // Tool handlers
    // =========================================================================

    async fn get_agent(&self, input: GetAgentInput) -> McpResult<CallToolResult> {
        match self.client.get_agent(&input.spirit_id).await? {
            Some(agent) => json_result(&AgentOutput::from(&agent)),
            None => Ok(text_result(agent_not_found_text(&input.spirit_id))),
        }
    }

    async fn register(&self, input: RegisterInput) -> McpResult<CallToolResult> {
        let params = RegisterAgentParams::new(
            input.spirit_id.as_str(),
            parse_address("trainer", &input.trainer)?,
            parse_address("platform", &input.platform)?,
            parse_address("treasury", &input.treasury)?,
            input.metadata_uri.as_str(),
        );

        let result = self.client.register_agent(&params).await?;
        info!(
            spirit_id = %input.spirit_id,
            token_id = %result.registry_token_id,
            "registered via MCP"
        );

        let explorer_url = self.client.explorer_url(result.tx_hash);
        json_result(&RegisterOutput::new(&input.spirit_id, &result, explorer_url))
    }

    async fn balance(&self, input: BalanceInput) -> McpResult<CallToolResult> {
        let balance = self.client.get_treasury_balance(&input.spirit_id).await?;
        json_result(&BalanceOutput {
            spirit_id: input.spirit_id,
            treasury: TreasuryBalance {
                native: NativeBalance {
                    wei: balance.native.to_string(),
                    eth: format_ether(balance.native),
                },
            },
        })
    }

    async fn route_revenue(&self, input: RouteRevenueInput) -> McpResult<CallToolResult> {
        let amount = parse_amount(&input.amount)?;
        let native = input.is_native();
        let default_decimals = if native {
            NATIVE_DECIMALS
        } else {
            DEFAULT_TOKEN_DECIMALS
        };
        let decimals = validate_decimals(input.decimals.unwrap_or(default_decimals))?;

        let (event, currency) = if native {
            let params = RouteRevenueNativeParams::new(input.spirit_id.as_str(), amount);
            let event = self.client.route_revenue_native(&params).await?;
            (event, NATIVE_SYMBOL.to_string())
        } else {
            let token = parse_address("currency", input.currency.as_deref().unwrap_or_default())?;
            let params = RouteRevenueParams::new(input.spirit_id.as_str(), token, amount);
            let event = self.client.route_revenue(&params).await?;
            (event, token.to_string())
        };

        info!(
            spirit_id = %input.spirit_id,
            currency = %currency,
            amount = %event.amount,
            tx_hash = %event.tx_hash,
            "revenue routed via MCP"
        );

        json_result(&RouteRevenueOutput {
            success: true,
            message: format!("Revenue routed for \"{}\"", input.spirit_id),
            currency,
            decimals,
            amounts: SplitAmounts::formatted(&event, decimals),
            amounts_raw: SplitAmounts::raw(&event),
            transaction_hash: event.tx_hash.to_string(),
            explorer_url: self.client.explorer_url(event.tx_hash),
        })
    }

    async fn update_status(&self, input: UpdateStatusInput) -> McpResult<CallToolResult> {
        let status = AgentStatus::from_code(input.status)?;
        let tx_hash = self.client.update_status(&input.spirit_id, status).await?;

        json_result(&TransactionOutput {
            success: true,
            message: format!(
                "Status updated for \"{}\" to {}",
                input.spirit_id,
                status.label()
            ),
            transaction_hash: tx_hash.to_string(),
            explorer_url: self.client.explorer_url(tx_hash),
        })
    }
}

impl ServerHandler for SpiritMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(
                "Spirit Protocol MCP Server - Look up registered agents with `spirit_get_agent` \
                 and their treasury balance with `spirit_balance`. Unregistered agents can run \
                 `spirit_evaluate` before calling `spirit_register`. Revenue sent through \
                 `spirit_route_revenue` is split onchain between trainer, agent, platform and \
                 protocol. Write tools need a configured private key."
                    .into(),
            ),
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            Ok(ListToolsResult {
                tools: self.tools(),
                next_cursor: None,
            })
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { Ok(self.handle_tool_call(&request.name, request.arguments).await) }
    }
}

/// Serve the tools on stdio until the client disconnects.
pub async fn run_server(
    client: SpiritClient,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use rmcp::{transport::stdio, ServiceExt};

    info!(
        chain = %client.chain(),
        wallet = ?client.wallet_address(),
        "Starting Spirit Protocol MCP server"
    );

    let server = SpiritMcpServer::new(client);
    eprintln!("Spirit Protocol MCP server running on stdio");

    // A transport that fails during setup (stdin already closed) is a clean exit.
    let service = match server.serve(stdio()).await {
        Ok(s) => s,
        Err(e) => {
            info!("MCP transport closed during setup: {}", e);
            return Ok(());
        }
    };

    if let Err(e) = service.waiting().await {
        info!("MCP transport closed: {}", e);
    }

    info!("MCP server stopped");
    Ok(())
}
