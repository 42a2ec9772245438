use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::EntityType;

/// Raw date bounds as supplied by the caller. Both are required; the
/// service turns them into a [`DateRange`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeParams {
    #[serde(default, alias = "data_inicio", alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, alias = "data_fim", alias = "endDate")]
    pub end_date: Option<String>,
}

impl DateRangeParams {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
        }
    }
}

/// Validated caller bounds plus the inclusive end-of-day used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

impl DateRange {
    pub fn parse(params: &DateRangeParams) -> Result<Self> {
        let start = required_instant("start_date", params.start_date.as_deref())?;
        let end = required_instant("end_date", params.end_date.as_deref())?;
        Self::new(start, end)
    }

    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AppError::InvalidRange(
                "End date must be after or the same as start date".to_string(),
            ));
        }

        Ok(Self {
            start,
            end,
            window_end: end_of_day(end)?,
        })
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start,
            end: self.window_end,
        }
    }
}

/// Closed interval `[start, end]` applied to reading timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

fn required_instant(name: &str, raw: Option<&str>) -> Result<DateTime<Utc>> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidRange(format!("{} is required", name)))?;

    parse_instant(raw).ok_or_else(|| {
        AppError::InvalidRange(format!("{} must be a valid ISO 8601 date: {}", name, raw))
    })
}

/// Accepts RFC 3339 instants, naive date-times (taken as UTC) and bare dates
/// (midnight UTC).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn end_of_day(ts: DateTime<Utc>) -> Result<DateTime<Utc>> {
    ts.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::InvalidRange(format!("cannot compute end of day for {}", ts)))
}

/// One calendar day of an aggregated metric. `day` is `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregateEntry {
    pub day: String,
    pub value: Option<f64>,
}

/// A per-day aggregate as handed back by a store that groups on its side.
/// Numeric results may arrive as text and are coerced by the core.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDailyAggregate {
    pub day: String,
    pub value: RawValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Number(f64),
    Text(String),
}

impl From<Option<String>> for RawValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawValue::Null, RawValue::Text)
    }
}

impl From<Option<f64>> for RawValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(RawValue::Null, RawValue::Number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMaxPowerEntry {
    pub day: String,
    pub max_active_power: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAverageTemperatureEntry {
    pub day: String,
    pub average_temperature: Option<f64>,
}

impl From<DailyAggregateEntry> for DailyMaxPowerEntry {
    fn from(entry: DailyAggregateEntry) -> Self {
        Self {
            day: entry.day,
            max_active_power: entry.value,
        }
    }
}

impl From<DailyAggregateEntry> for DailyAverageTemperatureEntry {
    fn from(entry: DailyAggregateEntry) -> Self {
        Self {
            day: entry.day,
            average_temperature: entry.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyResult {
    pub total_wh: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub entity_id: i64,
    pub entity_type: EntityType,
}
