//! Timetable output types.

use chrono::NaiveDate;

use crate::catalog::{IntervalRange, TimePair};
use crate::domain::{BusStop, ClockTime, GroupId, StopId};

/// Where a timetable row goes, taken from the stop directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub stop_id: StopId,
    pub name: String,
    pub lat: Option<f32>,
    pub lng: Option<f32>,
}

impl Destination {
    pub fn from_stop(stop: &BusStop) -> Self {
        Self {
            stop_id: stop.id,
            name: stop.name.clone(),
            lat: stop.lat,
            lng: stop.lng,
        }
    }
}

/// Fixed departures towards one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRow {
    pub destination: Destination,
    /// In document order, unmodified.
    pub times: Vec<TimePair>,
}

/// A shuttle window towards one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct ShuttleRow {
    pub destination: Destination,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub interval_range: IntervalRange,
    pub note: Option<String>,
}

/// One date-applicable segment, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum TimetableRow {
    Fixed(FixedRow),
    Shuttle(ShuttleRow),
}

impl TimetableRow {
    pub fn destination(&self) -> &Destination {
        match self {
            TimetableRow::Fixed(row) => &row.destination,
            TimetableRow::Shuttle(row) => &row.destination,
        }
    }
}

/// What a timetable is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimetableTarget {
    Stop(StopId),
    Group(GroupId),
}

/// Position of a stop. Missing directory coordinates are reported as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f32,
    pub lon: f32,
}

/// All rows departing from a stop or group on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Timetable {
    pub target: TimetableTarget,
    pub name: String,
    /// Present for stop timetables only.
    pub coordinates: Option<Coordinates>,
    pub date: NaiveDate,
    pub segments: Vec<TimetableRow>,
}

impl Timetable {
    /// Numeric id of the stop or group.
    pub fn id(&self) -> i32 {
        match self.target {
            TimetableTarget::Stop(id) => id.0,
            TimetableTarget::Group(id) => id.0,
        }
    }
}
