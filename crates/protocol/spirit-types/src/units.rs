//! Integer amount parsing and fixed-point formatting.
//!
//! All amounts are carried as `U256` in the token's smallest unit. The
//! formatting here works on the decimal digit string directly so any
//! precision up to [`MAX_UNIT_DECIMALS`] is exact.

use alloy_primitives::U256;

use crate::constants::{DISPLAY_FRACTION_DIGITS, MAX_UNIT_DECIMALS, NATIVE_DECIMALS};
use crate::error::{TypesError, TypesResult};

/// Parse an arbitrary-precision unsigned integer amount.
///
/// Accepts decimal digits (and `0x`-prefixed hex). Surrounding whitespace
/// is ignored; an empty string is rejected.
pub fn parse_amount(input: &str) -> TypesResult<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TypesError::InvalidAmount(input.to_string()));
    }
    trimmed
        .parse::<U256>()
        .map_err(|_| TypesError::InvalidAmount(input.to_string()))
}

/// Reject precisions whose power of ten does not fit in a `U256`.
pub fn validate_decimals(decimals: u8) -> TypesResult<u8> {
    if decimals > MAX_UNIT_DECIMALS {
        return Err(TypesError::InvalidDecimals(decimals));
    }
    Ok(decimals)
}

/// Split `value` into integer and fractional digit strings at `decimals`.
///
/// The fractional part is left-padded with zeros to exactly `decimals` digits.
fn split_digits(value: U256, decimals: usize) -> (String, String) {
    let digits = value.to_string();
    if decimals == 0 {
        return (digits, String::new());
    }
    let padded = if digits.len() <= decimals {
        format!("{:0>width$}", digits, width = decimals + 1)
    } else {
        digits
    };
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    (whole.to_string(), frac.to_string())
}

/// Full-precision decimal rendering with trailing zeros stripped.
///
/// `format_units(1_500_000, 6) == "1.5"`, `format_units(0, 18) == "0"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let (whole, frac) = split_digits(value, usize::from(decimals));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, frac)
    }
}

/// [`format_units`] at 18 decimals.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, NATIVE_DECIMALS)
}

/// Display rendering used for routed amounts: always `whole.frac`, with the
/// fraction truncated (not rounded) to six digits and never stripped.
///
/// With zero decimals the fraction is `"0"`.
pub fn format_fixed(value: U256, decimals: u8) -> String {
    let (whole, frac) = split_digits(value, usize::from(decimals));
    if frac.is_empty() {
        return format!("{}.0", whole);
    }
    let shown = &frac[..frac.len().min(DISPLAY_FRACTION_DIGITS)];
    format!("{}.{}", whole, shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(s: &str) -> U256 {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000").unwrap(), U256::from(1000));
        assert_eq!(parse_amount(" 42 ").unwrap(), U256::from(42));
        assert_eq!(
            parse_amount("1000000000000000000").unwrap(),
            wei("1000000000000000000")
        );
        assert!(matches!(
            parse_amount("abc"),
            Err(TypesError::InvalidAmount(_))
        ));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("1.5").is_err());
    }

    #[test]
    fn test_validate_decimals() {
        assert_eq!(validate_decimals(18).unwrap(), 18);
        assert_eq!(validate_decimals(77).unwrap(), 77);
        assert_eq!(validate_decimals(78), Err(TypesError::InvalidDecimals(78)));
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(wei("1000000000000000000")), "1");
        assert_eq!(format_ether(wei("500000000000000000")), "0.5");
        assert_eq!(format_ether(U256::ZERO), "0");
        assert_eq!(format_ether(U256::from(1)), "0.000000000000000001");
        assert_eq!(format_ether(wei("12340000000000000000")), "12.34");
    }

    #[test]
    fn test_format_units_small_precision() {
        assert_eq!(format_units(U256::from(1_500_000), 6), "1.5");
        assert_eq!(format_units(U256::from(7), 0), "7");
    }

    #[test]
    fn test_format_fixed_truncates() {
        assert_eq!(format_fixed(wei("1000000000000000000"), 18), "1.000000");
        assert_eq!(format_fixed(wei("250000000000000000"), 18), "0.250000");
        assert_eq!(format_fixed(wei("123456789"), 18), "0.000000");
        assert_eq!(format_fixed(wei("1999999999999999999"), 18), "1.999999");
    }

    #[test]
    fn test_format_fixed_short_precision() {
        assert_eq!(format_fixed(U256::from(2_500_000), 6), "2.500000");
        assert_eq!(format_fixed(U256::from(5), 2), "0.05");
        assert_eq!(format_fixed(U256::from(25), 0), "25.0");
    }
}
