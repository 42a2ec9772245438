use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped sample from an inverter. Readings are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub inverter_id: i64,
    pub ts: DateTime<Utc>,
    pub active_power: Option<f64>,
    pub temperature: Option<f64>,
}

impl Reading {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::ActivePower => self.active_power,
            Metric::Temperature => self.temperature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    ActivePower,
    Temperature,
}

impl Metric {
    pub fn column(self) -> &'static str {
        match self {
            Metric::ActivePower => "active_power",
            Metric::Temperature => "temperature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    Max,
    Avg,
}

impl Aggregation {
    pub fn sql_function(self) -> &'static str {
        match self {
            Aggregation::Max => "MAX",
            Aggregation::Avg => "AVG",
        }
    }
}

/// A (timestamp, power in watts) point fed to energy integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    pub ts: DateTime<Utc>,
    pub power_w: f64,
}
