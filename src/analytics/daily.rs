use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analytics::rounding::{coerce_aggregate, round_fixed, AGGREGATE_DECIMALS};
use crate::models::{Aggregation, DailyAggregateEntry, Metric, RawDailyAggregate, RawValue, Reading};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Groups readings by UTC calendar day and reduces each day with `op`.
///
/// Readings without a value for `metric` are dropped before grouping, and a
/// day left with nothing is omitted rather than reported as zero. Output is
/// ascending by day, one entry per day.
pub fn aggregate_by_day(
    readings: &[Reading],
    metric: Metric,
    op: Aggregation,
) -> Vec<DailyAggregateEntry> {
    let mut groups: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();

    for reading in readings {
        let Some(value) = reading.value(metric) else {
            continue;
        };
        groups
            .entry(reading.ts.date_naive())
            .or_default()
            .push(value);
    }

    groups
        .into_iter()
        .filter_map(|(day, acc)| {
            let reduced = acc.reduce(op)?;
            Some(DailyAggregateEntry {
                day: day.format(DAY_FORMAT).to_string(),
                value: round_fixed(reduced, AGGREGATE_DECIMALS),
            })
        })
        .collect()
}

/// Normalises per-day rows computed by a store. Values are coerced and
/// rounded; rows are sorted by day.
pub fn normalize_store_aggregates(rows: Vec<RawDailyAggregate>) -> Vec<DailyAggregateEntry> {
    let mut entries: Vec<DailyAggregateEntry> = rows
        .into_iter()
        .map(|row| DailyAggregateEntry {
            day: row.day,
            value: match row.value {
                RawValue::Null => None,
                RawValue::Number(v) => round_fixed(v, AGGREGATE_DECIMALS),
                RawValue::Text(text) => coerce_aggregate(&text),
            },
        })
        .collect();

    entries.sort_by(|a, b| a.day.cmp(&b.day));
    entries
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    sum: f64,
    max: Option<f64>,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.max = Some(match self.max {
            Some(current) if current >= value => current,
            _ => value,
        });
    }

    fn reduce(&self, op: Aggregation) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        match op {
            Aggregation::Max => self.max,
            Aggregation::Avg => Some(self.sum / self.count as f64),
        }
    }
}
