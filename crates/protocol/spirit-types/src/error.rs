//! Error types for Spirit Protocol data conversions.

use thiserror::Error;

/// Result type alias for type-level conversions.
pub type TypesResult<T> = Result<T, TypesError>;

/// Errors raised while converting raw values into typed records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Chain id outside the supported set (8453, 84532).
    #[error("unsupported chain id: {0}")]
    UnsupportedChain(u64),

    /// Agent status code outside 0..=2.
    #[error("invalid agent status: {0} (expected 0 = Active, 1 = Paused, 2 = Graduated)")]
    InvalidStatus(u64),

    /// Amount string that is not an unsigned 256-bit integer.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Decimal precision whose power of ten does not fit in 256 bits.
    #[error("invalid decimals: {0} (maximum is {max})", max = crate::constants::MAX_UNIT_DECIMALS)]
    InvalidDecimals(u8),
}
