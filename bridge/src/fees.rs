//! Fixed-point helpers for amounts, fees and slippage.
//!
//! Amounts typed by the user are decimal strings; everything sent on chain is
//! an integer in the token's base units. Conversions here are exact, no
//! floating point is involved except the slippage percentage itself.

use crate::error::{BridgeError, Result};
use alloy::primitives::U256;

/// 6 basis points (0.06%).
pub const PROTOCOL_FEE_BPS: u64 = 6;
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Decimals used for amounts whose token is not known yet.
pub const DEFAULT_DECIMALS: u8 = 18;
pub const NATIVE_DECIMALS: u8 = 18;

fn pow10(exp: u8) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Parses a decimal string into base units. Fractional digits beyond
/// `decimals` are dropped (floor).
pub fn parse_decimal(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();
    let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(BridgeError::InvalidAmount(format!("'{}' is not a number", amount)));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BridgeError::InvalidAmount(format!("'{}' is not a number", amount)));
    }

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(whole);
    digits.extend(frac.chars().take(decimals as usize));
    for _ in frac.len().min(decimals as usize)..decimals as usize {
        digits.push('0');
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    digits
        .parse::<U256>()
        .map_err(|e| BridgeError::InvalidAmount(format!("'{}': {}", amount, e)))
}

/// `floor(amount * 10^decimals)` as an integer string.
pub fn format_amount(amount: &str, decimals: u8) -> Result<String> {
    parse_decimal(amount, decimals).map(|v| v.to_string())
}

/// Renders `value` (in units of `10^-decimals`) with exactly `places`
/// fractional digits, rounding half up.
pub fn format_fixed(value: U256, decimals: u8, places: u8) -> String {
    let (scaled, pad) = if places < decimals {
        let divisor = pow10(decimals - places);
        let (quotient, remainder) = value.div_rem(divisor);
        // quotient <= MAX / 10, so the round-up cannot overflow
        if remainder >= divisor - remainder {
            (quotient + U256::from(1u64), 0)
        } else {
            (quotient, 0)
        }
    } else {
        (value, (places - decimals) as usize)
    };

    let shown = places.min(decimals);
    let mut out = if shown == 0 {
        scaled.to_string()
    } else {
        let (whole, frac) = scaled.div_rem(pow10(shown));
        format!("{}.{:0>width$}", whole, frac.to_string(), width = shown as usize)
    };

    if pad > 0 {
        if shown == 0 {
            out.push('.');
        }
        out.extend(std::iter::repeat('0').take(pad));
    }
    out
}

/// Parses an integer base-unit string as returned by the API.
pub fn parse_base_units(raw: &str) -> Result<U256> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BridgeError::InvalidAmount(format!(
            "'{}' is not an integer amount",
            raw
        )));
    }
    raw.parse::<U256>()
        .map_err(|e| BridgeError::InvalidAmount(format!("'{}': {}", raw, e)))
}

/// Formats an integer base-unit string returned by the API for display.
pub fn format_base_units(raw: &str, decimals: u8, places: u8) -> Result<String> {
    let value = parse_base_units(raw)?;
    Ok(format_fixed(value, decimals, places))
}

/// `floor(value * numerator / denominator)` for `numerator <= denominator`,
/// without the intermediate product leaving `U256`.
fn scale_down(value: U256, numerator: u64, denominator: u64) -> Result<U256> {
    let (numerator, denominator) = (U256::from(numerator), U256::from(denominator));
    let (quotient, remainder) = value.div_rem(denominator);
    let whole = quotient.checked_mul(numerator);
    let part = remainder.checked_mul(numerator).map(|r| r / denominator);
    whole
        .zip(part)
        .and_then(|(whole, part)| whole.checked_add(part))
        .ok_or_else(|| BridgeError::InvalidAmount(format!("{} is too large", value)))
}

/// Stargate protocol fee for a user-entered amount, with 6 fractional digits.
pub fn calculate_protocol_fee(amount: &str) -> Result<String> {
    let units = parse_decimal(amount, DEFAULT_DECIMALS)?;
    let fee = scale_down(units, PROTOCOL_FEE_BPS, BPS_DENOMINATOR)?;
    Ok(format_fixed(fee, DEFAULT_DECIMALS, 6))
}

pub fn slippage_bps(slippage_percent: f64) -> Result<u64> {
    if !slippage_percent.is_finite() || !(0.0..100.0).contains(&slippage_percent) {
        return Err(BridgeError::InvalidParams(format!(
            "slippage must be in [0, 100), got {}",
            slippage_percent
        )));
    }
    Ok((slippage_percent * 100.0).round() as u64)
}

/// Smallest amount the destination must deliver for the given slippage.
pub fn min_amount_after_slippage(amount: U256, slippage_percent: f64) -> Result<U256> {
    let bps = slippage_bps(slippage_percent)?;
    scale_down(amount, BPS_DENOMINATOR - bps, BPS_DENOMINATOR)
}

/// Native messaging fee (wei) in whole native units, 4 fractional digits.
pub fn format_native_fee(native_fee_wei: &str) -> Result<String> {
    format_base_units(native_fee_wei, NATIVE_DECIMALS, 4)
}
