//! Conversion between human decimal strings and integer base units.
//!
//! The arithmetic is alloy's; this module adds the payment rules on top: no negative
//! amounts, no fractional digits beyond what the asset can represent, and display
//! strings without trailing zeros.

use alloy::primitives::utils::{self, Unit};
use alloy::primitives::U256;
use rust_decimal::Decimal;
use thiserror::Error;

/// Native assets on every supported network use 18 decimals.
pub const NATIVE_DECIMALS: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is not a decimal number: {0}")]
    Malformed(String),
    #[error("negative amounts are not allowed")]
    Negative,
    #[error("too many decimal places: {given} given, asset supports {decimals}")]
    TooPrecise { given: usize, decimals: u8 },
    #[error("amount does not fit in 256 bits")]
    Overflow,
    #[error("unsupported decimals: {0}")]
    UnsupportedDecimals(u8),
}

/// Parses `"12.345"` into `12345000` for a 6-decimal asset.
///
/// Extra fractional digits are accepted only when they are zeros, so `"1.50"` is valid
/// for a 1-decimal asset but `"1.55"` is not. alloy would silently truncate them.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    if decimals > Unit::MAX.get() {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }
    let literal = normalize(amount, decimals)?;
    // The literal is plain digits by now, so the only remaining failure is size.
    utils::parse_units(&literal, decimals)
        .map(|parsed| parsed.get_absolute())
        .map_err(|_| AmountError::Overflow)
}

/// Formats base units as a plain decimal string with trailing zeros removed.
pub fn format_units(value: U256, decimals: u8) -> Result<String, AmountError> {
    let formatted = utils::format_units(value, decimals)
        .map_err(|_| AmountError::UnsupportedDecimals(decimals))?;
    Ok(trim_fraction(&formatted).to_owned())
}

/// Exact decimal view of a base-unit amount, for pricing. `None` when it exceeds
/// `Decimal`'s 96-bit mantissa.
pub fn to_decimal(value: U256, decimals: u8) -> Option<Decimal> {
    let mantissa = i128::try_from(u128::try_from(value).ok()?).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, u32::from(decimals))
        .ok()
        .map(|d| d.normalize())
}

/// Validates the shape and precision of `amount` and rewrites it as
/// `<int>[.<frac>]` with trailing fractional zeros dropped.
fn normalize(amount: &str, decimals: u8) -> Result<String, AmountError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative);
    }

    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part)
        || !all_digits(frac_part)
        || (int_part.is_empty() && frac_part.is_empty())
        || (trimmed.contains('.') && frac_part.is_empty())
    {
        return Err(AmountError::Malformed(trimmed.to_owned()));
    }

    let significant = frac_part.trim_end_matches('0');
    if significant.len() > usize::from(decimals) {
        return Err(AmountError::TooPrecise {
            given: frac_part.len(),
            decimals,
        });
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    Ok(if significant.is_empty() {
        int_part.to_owned()
    } else {
        format!("{int_part}.{significant}")
    })
}

fn trim_fraction(formatted: &str) -> &str {
    if !formatted.contains('.') {
        return formatted;
    }
    formatted.trim_end_matches('0').trim_end_matches('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_units("1", 18).unwrap(), U256::from(10u64.pow(18)));
        assert_eq!(parse_units("0.01", 18).unwrap(), U256::from(10u64.pow(16)));
        assert_eq!(parse_units(".5", 1).unwrap(), U256::from(5u64));
        assert_eq!(parse_units("000", 6).unwrap(), U256::ZERO);
    }

    #[test]
    fn rejects_float_syntax() {
        assert!(matches!(parse_units("1e18", 18), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("1.", 18), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("1.2.3", 18), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("+1", 18), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn formats_below_one() {
        assert_eq!(format_units(U256::from(5u64), 3).unwrap(), "0.005");
        assert_eq!(format_units(U256::ZERO, 18).unwrap(), "0");
        assert_eq!(format_units(U256::from(42u64), 0).unwrap(), "42");
        assert_eq!(format_units(U256::from(1200u64), 2).unwrap(), "12");
    }

    #[test]
    fn decimal_view_keeps_exact_fraction() {
        let base = parse_units(".3333", 18).unwrap();
        assert_eq!(to_decimal(base, 18), Some(Decimal::new(3333, 4)));
        assert_eq!(to_decimal(U256::MAX, 18), None);
    }
}
