//! Service definition types.
//!
//! These mirror the per-service JSON documents. A `ServiceDefinition` is one
//! scheduled route between two stops; its `segments` describe when buses run
//! and are gated by a `SegmentCondition` each.

use serde::{Deserialize, Deserializer};

use crate::domain::StopId;

/// One endpoint of a service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRef {
    pub stop_id: StopId,
    /// Informational only; the stop directory owns the authoritative name.
    #[serde(default)]
    pub display_name: String,
}

/// Direction of travel relative to the campus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// A calendar window with optional bounds, as `YYYY-MM-DD` strings.
///
/// A missing or empty bound is unbounded on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidityPeriod {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub to: Option<String>,
}

impl ValidityPeriod {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }
}

/// Calendar rule gating a single segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCondition")]
pub enum SegmentCondition {
    /// A day name (`monday`..`sunday`), or `weekday` for Monday to Friday.
    DayType(String),
    /// Exactly one date.
    SpecificDate(String),
    /// An inclusive date range.
    SpecificPeriod(ValidityPeriod),
    /// Old documents carry a bare `value` without a `type`; it names a day type.
    Untyped(String),
    /// No type and no value.
    #[default]
    Unrestricted,
    /// A `type` this server does not know.
    Unrecognized(String),
}

/// Wire form of a condition before it is classified.
#[derive(Debug, Default, Deserialize)]
struct RawCondition {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    from: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    to: Option<String>,
}

impl From<RawCondition> for SegmentCondition {
    fn from(raw: RawCondition) -> Self {
        let value = raw.value.unwrap_or_default();
        match raw.kind.as_deref() {
            Some("dayType") => SegmentCondition::DayType(value),
            Some("specificDate") => SegmentCondition::SpecificDate(value),
            Some("specificPeriod") => SegmentCondition::SpecificPeriod(ValidityPeriod {
                from: raw.from,
                to: raw.to,
            }),
            None | Some("") if !value.is_empty() => SegmentCondition::Untyped(value),
            None | Some("") => SegmentCondition::Unrestricted,
            Some(other) => SegmentCondition::Unrecognized(other.to_string()),
        }
    }
}

/// A departure/arrival pair, kept exactly as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimePair {
    pub departure: String,
    pub arrival: String,
}

/// Bounds on the minutes between shuttle departures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IntervalRange {
    pub min: u32,
    pub max: u32,
}

/// A segment with a fixed list of departures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixedSegment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition: SegmentCondition,
    /// Absent or `null` reads as no departures.
    #[serde(default, deserialize_with = "null_as_default")]
    pub times: Vec<TimePair>,
}

/// A segment where buses shuttle continuously during a window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuttleSegment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition: SegmentCondition,
    /// Validated when the segment is resolved into a row.
    pub start_time: String,
    pub end_time: String,
    pub interval_range: IntervalRange,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub note: Option<String>,
}

/// One schedule rule within a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Fixed(FixedSegment),
    Shuttle(ShuttleSegment),
}

impl Segment {
    pub fn condition(&self) -> &SegmentCondition {
        match self {
            Segment::Fixed(s) => &s.condition,
            Segment::Shuttle(s) => &s.condition,
        }
    }

    /// The `segmentType` discriminator, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Fixed(_) => "fixed",
            Segment::Shuttle(_) => "shuttle",
        }
    }
}

/// A scheduled route between two stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub id: String,
    pub name: String,
    pub from: StopRef,
    pub to: StopRef,
    pub direction: Direction,
    /// Empty means the service runs on every date.
    pub validity_periods: Vec<ValidityPeriod>,
    /// Never empty.
    pub segments: Vec<Segment>,
}

/// A `null` condition or time list reads as the default: unrestricted, or empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
