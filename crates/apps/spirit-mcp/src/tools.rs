//! MCP tool catalogue and input/output types.
//!
//! The six Spirit tools form a closed set. [`SpiritTool`] names them, carries
//! their descriptions and input schemas, and knows which ones sign
//! transactions. Inputs are deserialized from the client's argument object
//! with camelCase keys; outputs are rendered as pretty-printed JSON text.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spirit_types::{
    bps_to_percent, format_fixed, AgentRecord, RegisterAgentResult, RevenueEvent, U256,
};

use crate::error::McpError;

// ============================================================================
// Tool catalogue
// ============================================================================

/// The tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpiritTool {
    GetAgent,
    Register,
    Balance,
    RouteRevenue,
    Evaluate,
    UpdateStatus,
}

impl SpiritTool {
    /// All tools in listing order.
    pub const ALL: [SpiritTool; 6] = [
        Self::GetAgent,
        Self::Register,
        Self::Balance,
        Self::RouteRevenue,
        Self::Evaluate,
        Self::UpdateStatus,
    ];

    /// Wire name of the tool.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetAgent => "spirit_get_agent",
            Self::Register => "spirit_register",
            Self::Balance => "spirit_balance",
            Self::RouteRevenue => "spirit_route_revenue",
            Self::Evaluate => "spirit_evaluate",
            Self::UpdateStatus => "spirit_update_status",
        }
    }

    /// Description shown to the model.
    pub const fn description(self) -> &'static str {
        match self {
            Self::GetAgent => {
                "Get information about a Spirit Protocol registered agent, including treasury address, revenue split, and status."
            }
            Self::Register => {
                "Register a new agent with Spirit Protocol. This creates an onchain identity with a treasury and enables the 25/25/25/25 revenue split."
            }
            Self::Balance => {
                "Check the treasury balance for a registered Spirit Protocol agent. Returns the agent's accumulated ETH balance."
            }
            Self::RouteRevenue => {
                "Route revenue through Spirit Protocol, automatically splitting it 25/25/25/25 between creator, agent, platform, and protocol."
            }
            Self::Evaluate => {
                "Self-assessment for an unregistered agent to evaluate whether Spirit Protocol is right for them. Returns a structured assessment based on the agent's situation."
            }
            Self::UpdateStatus => {
                "Update the status of a registered agent. Status can be Active (0), Paused (1), or Graduated (2)."
            }
        }
    }

    /// Whether the tool sends a transaction and so needs a wallet.
    pub const fn requires_wallet(self) -> bool {
        matches!(self, Self::Register | Self::RouteRevenue | Self::UpdateStatus)
    }

    /// JSON schema of the tool's arguments.
    pub fn input_schema(self) -> JsonObject {
        match self {
            Self::GetAgent => schema_object::<GetAgentInput>(),
            Self::Register => schema_object::<RegisterInput>(),
            Self::Balance => schema_object::<BalanceInput>(),
            Self::RouteRevenue => schema_object::<RouteRevenueInput>(),
            Self::Evaluate => schema_object::<EvaluateInput>(),
            Self::UpdateStatus => schema_object::<UpdateStatusInput>(),
        }
    }

    /// Tool definition for `tools/list`.
    pub fn definition(self) -> Tool {
        Tool::new(
            Cow::Borrowed(self.name()),
            Cow::Borrowed(self.description()),
            Arc::new(self.input_schema()),
        )
    }
}

impl fmt::Display for SpiritTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpiritTool {
    type Err = McpError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| McpError::UnknownTool(name.to_string()))
    }
}

fn schema_object<T: JsonSchema>() -> JsonObject {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

/// Deserialize a tool's arguments. A missing argument object counts as `{}`.
pub fn parse_arguments<T>(tool: SpiritTool, arguments: Option<JsonObject>) -> Result<T, McpError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(Value::Object(arguments.unwrap_or_default())).map_err(|e| {
        McpError::InvalidArguments {
            tool: tool.name(),
            reason: e.to_string(),
        }
    })
}

// ============================================================================
// spirit_get_agent Tool
// ============================================================================

/// Input for the `spirit_get_agent` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAgentInput {
    /// The unique identifier of the agent (e.g., "abraham", "solienne")
    pub spirit_id: String,
}

/// Output from the `spirit_get_agent` tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentOutput {
    pub spirit_id: String,
    /// Registry NFT id as a decimal string.
    pub registry_token_id: String,
    pub trainer: String,
    pub platform: String,
    pub treasury: String,
    #[serde(rename = "metadataURI")]
    pub metadata_uri: String,
    /// Shares rendered as percentages.
    pub split: SplitPercentages,
    /// Status label (Active, Paused or Graduated).
    pub status: String,
}

/// Revenue split as percentage strings.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SplitPercentages {
    pub artist: String,
    pub agent: String,
    pub platform: String,
    pub protocol: String,
}

impl From<&AgentRecord> for AgentOutput {
    fn from(agent: &AgentRecord) -> Self {
        Self {
            spirit_id: agent.spirit_id.clone(),
            registry_token_id: agent.registry_token_id.to_string(),
            trainer: agent.trainer.to_string(),
            platform: agent.platform.to_string(),
            treasury: agent.treasury.to_string(),
            metadata_uri: agent.metadata_uri.clone(),
            split: SplitPercentages {
                artist: bps_to_percent(agent.split.artist_bps),
                agent: bps_to_percent(agent.split.agent_bps),
                platform: bps_to_percent(agent.split.platform_bps),
                protocol: bps_to_percent(agent.split.protocol_bps),
            },
            status: agent.status.label().to_string(),
        }
    }
}

/// Text returned when the registry has no record for the id.
pub fn agent_not_found_text(spirit_id: &str) -> String {
    format!("Agent \"{}\" not found in Spirit Protocol registry.", spirit_id)
}

// ============================================================================
// spirit_register Tool
// ============================================================================

/// Input for the `spirit_register` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    /// Unique identifier for the agent (lowercase, alphanumeric)
    pub spirit_id: String,

    /// Ethereum address of the trainer/creator who will receive 25% of revenue
    pub trainer: String,

    /// Ethereum address of the platform that will receive 25% of revenue
    pub platform: String,

    /// Ethereum address of the agent treasury (typically a Safe multisig)
    pub treasury: String,

    /// URI pointing to agent metadata (IPFS or HTTPS)
    #[serde(rename = "metadataURI")]
    pub metadata_uri: String,
}

/// Output from the `spirit_register` tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutput {
    pub success: bool,
    pub message: String,
    pub spirit_key: String,
    pub registry_token_id: String,
    pub transaction_hash: String,
    pub explorer_url: String,
}

impl RegisterOutput {
    pub fn new(spirit_id: &str, result: &RegisterAgentResult, explorer_url: String) -> Self {
        Self {
            success: true,
            message: format!("Agent \"{}\" registered successfully!", spirit_id),
            spirit_key: result.spirit_key.to_string(),
            registry_token_id: result.registry_token_id.to_string(),
            transaction_hash: result.tx_hash.to_string(),
            explorer_url,
        }
    }
}

// ============================================================================
// spirit_balance Tool
// ============================================================================

/// Input for the `spirit_balance` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceInput {
    /// The unique identifier of the agent
    pub spirit_id: String,
}

/// Output from the `spirit_balance` tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOutput {
    pub spirit_id: String,
    pub treasury: TreasuryBalance,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TreasuryBalance {
    pub native: NativeBalance,
}

/// Native balance in wei and in whole ether.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct NativeBalance {
    pub wei: String,
    pub eth: String,
}

// ============================================================================
// spirit_route_revenue Tool
// ============================================================================

/// Input for the `spirit_route_revenue` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteRevenueInput {
    /// The agent to route revenue for
    pub spirit_id: String,

    /// Amount in smallest units (wei for ETH, raw units for ERC20)
    pub amount: String,

    /// Token address for ERC20 payments, or "ETH" for native payments. Defaults to ETH.
    #[serde(default)]
    pub currency: Option<String>,

    /// Token decimals for formatting (18 for ETH, 6 for USDC). Defaults to 18 for ETH, 6 for ERC20.
    #[serde(default)]
    pub decimals: Option<u8>,
}

impl RouteRevenueInput {
    /// Native when the currency is omitted, empty, or exactly "ETH" in any case.
    pub fn is_native(&self) -> bool {
        match self.currency.as_deref() {
            None | Some("") => true,
            Some(currency) => currency.eq_ignore_ascii_case("eth"),
        }
    }
}

/// Output from the `spirit_route_revenue` tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteRevenueOutput {
    pub success: bool,
    pub message: String,
    /// "ETH" or the token address.
    pub currency: String,
    /// Precision used for `amounts`.
    pub decimals: u8,
    /// Fixed-point amounts.
    pub amounts: SplitAmounts,
    /// Amounts in smallest units.
    pub amounts_raw: SplitAmounts,
    pub transaction_hash: String,
    pub explorer_url: String,
}

/// The routed total and its four shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct SplitAmounts {
    pub total: String,
    pub artist: String,
    pub agent: String,
    pub platform: String,
    pub protocol: String,
}

impl SplitAmounts {
    fn map(event: &RevenueEvent, render: impl Fn(U256) -> String) -> Self {
        Self {
            total: render(event.amount),
            artist: render(event.artist_amount),
            agent: render(event.agent_amount),
            platform: render(event.platform_amount),
            protocol: render(event.protocol_amount),
        }
    }

    /// Amounts from the event, formatted with `decimals` of precision.
    pub fn formatted(event: &RevenueEvent, decimals: u8) -> Self {
        Self::map(event, |value| format_fixed(value, decimals))
    }

    /// Amounts from the event as decimal integer strings.
    pub fn raw(event: &RevenueEvent) -> Self {
        Self::map(event, |value| value.to_string())
    }
}

// ============================================================================
// spirit_evaluate Tool
// ============================================================================

/// Input for the `spirit_evaluate` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateInput {
    /// Does this agent currently generate or expect to generate revenue?
    pub has_revenue: bool,

    /// Does this agent need to persist beyond its current platform?
    pub needs_persistence: bool,

    /// Does this agent want to accumulate resources for autonomous operation?
    pub wants_autonomy: bool,

    /// What platform currently hosts this agent (e.g., "eden", "custom", "none")?
    #[serde(default)]
    pub current_platform: Option<String>,
}

// ============================================================================
// spirit_update_status Tool
// ============================================================================

/// Input for the `spirit_update_status` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusInput {
    /// The agent to update
    pub spirit_id: String,

    /// New status: 0 = Active, 1 = Paused, 2 = Graduated
    #[schemars(range(min = 0, max = 2))]
    pub status: u64,
}

/// Output from write tools that only report a transaction.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub success: bool,
    pub message: String,
    pub transaction_hash: String,
    pub explorer_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spirit_types::{AgentEconomics, AgentStatus, Address, SplitConfig, B256};

    #[test]
    fn test_tool_names_round_trip() {
        for tool in SpiritTool::ALL {
            assert_eq!(tool.name().parse::<SpiritTool>().unwrap(), tool);
        }
        assert!(matches!(
            "spirit_mint".parse::<SpiritTool>(),
            Err(McpError::UnknownTool(name)) if name == "spirit_mint"
        ));
    }

    #[test]
    fn test_write_tools() {
        let writes: Vec<_> = SpiritTool::ALL
            .into_iter()
            .filter(|t| t.requires_wallet())
            .collect();
        assert_eq!(
            writes,
            vec![
                SpiritTool::Register,
                SpiritTool::RouteRevenue,
                SpiritTool::UpdateStatus
            ]
        );
    }

    #[test]
    fn test_register_schema_uses_wire_names() {
        let schema = SpiritTool::Register.input_schema();
        let properties = schema["properties"].as_object().unwrap();
        for key in ["spiritId", "trainer", "platform", "treasury", "metadataURI"] {
            assert!(properties.contains_key(key), "missing {}", key);
        }
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required.len(), 5);
    }

    #[test]
    fn test_route_schema_optional_fields() {
        let schema = SpiritTool::RouteRevenue.input_schema();
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"spiritId"));
        assert!(required.contains(&"amount"));
        assert!(!required.contains(&"currency"));
        assert!(!required.contains(&"decimals"));
    }

    #[test]
    fn test_update_status_schema_range() {
        let schema = SpiritTool::UpdateStatus.input_schema();
        let status = &schema["properties"]["status"];
        assert_eq!(status["minimum"].as_f64(), Some(0.0));
        assert_eq!(status["maximum"].as_f64(), Some(2.0));
    }

    #[test]
    fn test_parse_arguments() {
        let args = json!({"spiritId": "abraham", "amount": "1000"});
        let input: RouteRevenueInput =
            parse_arguments(SpiritTool::RouteRevenue, args.as_object().cloned()).unwrap();
        assert_eq!(input.spirit_id, "abraham");
        assert!(input.is_native());
        assert_eq!(input.decimals, None);

        let err = parse_arguments::<RouteRevenueInput>(SpiritTool::RouteRevenue, None).unwrap_err();
        assert!(matches!(
            err,
            McpError::InvalidArguments { tool: "spirit_route_revenue", .. }
        ));
    }

    #[test]
    fn test_currency_detection() {
        let mut input = RouteRevenueInput {
            spirit_id: "abraham".into(),
            amount: "1".into(),
            currency: Some("eth".into()),
            decimals: None,
        };
        assert!(input.is_native());
        input.currency = Some(String::new());
        assert!(input.is_native());
        input.currency = Some("0x036CbD53842c5426634e7929541eC2318f3dCF7e".into());
        assert!(!input.is_native());
        input.currency = Some(" ETH ".into());
        assert!(!input.is_native());
    }

    #[test]
    fn test_agent_output_shape() {
        let record = AgentRecord {
            spirit_id: "abraham".into(),
            registry_token_id: U256::from(7),
            trainer: Address::repeat_byte(0x11),
            platform: Address::repeat_byte(0x22),
            treasury: Address::repeat_byte(0x33),
            metadata_uri: "ipfs://abraham".into(),
            split: SplitConfig::new(4000, 2000, 2500, 1500),
            economics: AgentEconomics::default(),
            status: AgentStatus::Paused,
        };
        let value = serde_json::to_value(AgentOutput::from(&record)).unwrap();
        assert_eq!(value["registryTokenId"], json!("7"));
        assert_eq!(value["metadataURI"], json!("ipfs://abraham"));
        assert_eq!(value["split"]["artist"], json!("40%"));
        assert_eq!(value["split"]["protocol"], json!("15%"));
        assert_eq!(value["status"], json!("Paused"));
    }

    #[test]
    fn test_split_amounts() {
        let event = RevenueEvent {
            spirit_key: B256::ZERO,
            currency: Address::ZERO,
            amount: U256::from(1_000_000u64),
            artist_amount: U256::from(250_000u64),
            agent_amount: U256::from(250_000u64),
            platform_amount: U256::from(250_000u64),
            protocol_amount: U256::from(250_000u64),
            metadata_hash: B256::ZERO,
            tx_hash: B256::ZERO,
            timestamp: 0,
        };
        let formatted = SplitAmounts::formatted(&event, 6);
        assert_eq!(formatted.total, "1.000000");
        assert_eq!(formatted.artist, "0.250000");
        assert_eq!(SplitAmounts::raw(&event).protocol, "250000");
    }
}
