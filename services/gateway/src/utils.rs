//! Display formatting for exchange decimals and timestamps

use chrono::{Local, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to `dp` places and render with exactly `dp` decimals
///
/// Rounding happens on the exchange's decimal value, not on a binary float,
/// so `100.005` becomes `100.01`.
#[must_use]
pub fn to_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Render epoch milliseconds in the server's local timezone, e.g. `3/14/2025, 9:05:07 PM`
#[must_use]
pub fn to_local_string(epoch_ms: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map_or_else(
            || "Invalid Date".to_string(),
            |time| time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        )
}
