use std::collections::BTreeMap;

use crate::analytics::rounding::{round_fixed, ENERGY_DECIMALS};
use crate::models::PowerSample;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Outcome of integrating one or more power series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Integration {
    pub total_wh: f64,
    pub segments_used: usize,
    pub segments_skipped: usize,
}

/// Estimates energy in Wh from power samples (W) using the trapezoidal rule.
///
/// Each entity's series is sorted by timestamp (stable) and walked pairwise.
/// A pair is skipped when either power is negative or non-finite, or when
/// the second timestamp does not come strictly after the first. Entities
/// never mix: a pair is always two samples of the same entity.
pub fn integrate(series_by_entity: &BTreeMap<i64, Vec<PowerSample>>) -> Integration {
    let mut total_wh = 0.0;
    let mut segments_used = 0;
    let mut segments_skipped = 0;

    for samples in series_by_entity.values() {
        if samples.len() < 2 {
            continue;
        }

        let mut sorted = samples.clone();
        sorted.sort_by_key(|s| s.ts);

        for pair in sorted.windows(2) {
            match segment_wh(&pair[0], &pair[1]) {
                Some(wh) => {
                    total_wh += wh;
                    segments_used += 1;
                }
                None => segments_skipped += 1,
            }
        }
    }

    Integration {
        total_wh: round_fixed(total_wh, ENERGY_DECIMALS).unwrap_or(0.0),
        segments_used,
        segments_skipped,
    }
}

pub fn integrate_energy_wh(series_by_entity: &BTreeMap<i64, Vec<PowerSample>>) -> f64 {
    integrate(series_by_entity).total_wh
}

fn segment_wh(a: &PowerSample, b: &PowerSample) -> Option<f64> {
    if !usable_power(a.power_w) || !usable_power(b.power_w) {
        return None;
    }

    let elapsed_ms = (b.ts - a.ts).num_milliseconds();
    if elapsed_ms <= 0 {
        return None;
    }

    let hours = elapsed_ms as f64 / MILLIS_PER_HOUR;
    Some((a.power_w + b.power_w) / 2.0 * hours)
}

fn usable_power(power_w: f64) -> bool {
    power_w.is_finite() && power_w >= 0.0
}
