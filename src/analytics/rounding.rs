//! Fixed-point rounding shared by aggregates (2 decimals) and energy totals
//! (3 decimals).
//!
//! The float is lifted into a `Decimal` that keeps its binary value, so a
//! tie is only a tie when the stored double really sits on the midpoint.
//! `0.015` is stored below the midpoint and rounds to `0.01`, while `0.125`
//! is exact and goes away from zero to `0.13`.

use rust_decimal::{Decimal, RoundingStrategy};

pub const AGGREGATE_DECIMALS: u32 = 2;
pub const ENERGY_DECIMALS: u32 = 3;

/// Rounds `value` half-away-from-zero to `decimals` places. Returns `None`
/// for NaN and infinities.
pub fn round_fixed(value: f64, decimals: u32) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }

    // beyond Decimal's range a double has no fractional digits left
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return Some(value);
    };

    let rounded = exact
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse::<f64>()
        .unwrap_or(value);

    // no "-0" on the wire
    Some(if rounded == 0.0 { 0.0 } else { rounded })
}

/// Coerces a store-supplied aggregate (number or numeric text) to a rounded
/// value. Anything that does not parse as a finite number becomes `None`.
pub fn coerce_aggregate(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|v| round_fixed(v, AGGREGATE_DECIMALS))
}
