//! Protocol constants.
//!
//! Revenue split parameters, sentinel values, and display defaults shared by
//! the client and the MCP adapter.

use alloy_primitives::{Address, B256};

// =============================================================================
// Revenue Split
// =============================================================================

/// Basis points denominator (10000 = 100%).
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Share of each of the four parties in the default split (25%).
pub const DEFAULT_SHARE_BPS: u16 = 2_500;

// =============================================================================
// Sentinels
// =============================================================================

/// Zero address. Used as the currency of native-token revenue events.
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Zero hash. Default metadata hash for revenue routing.
pub const ZERO_HASH: B256 = B256::ZERO;

// =============================================================================
// Amount Formatting
// =============================================================================

/// Decimals of the native token (ETH on Base).
pub const NATIVE_DECIMALS: u8 = 18;

/// Default decimals assumed for ERC-20 currencies (USDC).
pub const DEFAULT_TOKEN_DECIMALS: u8 = 6;

/// Largest precision whose power of ten still fits in a `U256`.
pub const MAX_UNIT_DECIMALS: u8 = 77;

/// Fractional digits kept when displaying routed revenue amounts.
pub const DISPLAY_FRACTION_DIGITS: usize = 6;
