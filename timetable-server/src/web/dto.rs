//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::calendar::iso_date;
use crate::domain::{BusStop, StopGroup};
use crate::timetable::{Coordinates, Destination, Timetable, TimetableRow};

/// Query for listing bus stops.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusStopsQuery {
    /// Only list the stops of this group
    pub group_id: Option<i32>,
}

/// Query for timetable endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct TimetableQuery {
    /// Date in YYYY-MM-DD format (defaults to today)
    pub date: Option<String>,
}

/// A bus stop.
#[derive(Debug, Serialize)]
pub struct BusStopResult {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f32>,
}

/// A bus stop group with its member stops.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusStopGroupResult {
    pub id: i32,
    pub name: String,
    pub bus_stops: Vec<BusStopResult>,
}

/// Destination of a timetable row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRefResult {
    pub stop_id: i32,
    pub stop_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f32>,
}

/// A timetable row.
#[derive(Debug, Serialize)]
#[serde(tag = "segmentType", rename_all = "lowercase")]
pub enum SegmentResult {
    Fixed(FixedSegmentResult),
    Shuttle(ShuttleSegmentResult),
}

/// Fixed departures.
#[derive(Debug, Serialize)]
pub struct FixedSegmentResult {
    pub destination: StopRefResult,
    pub times: Vec<TimePairResult>,
}

#[derive(Debug, Serialize)]
pub struct TimePairResult {
    pub departure: String,
    pub arrival: String,
}

/// A shuttle window.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuttleSegmentResult {
    pub destination: StopRefResult,

    /// Window start, HH:MM
    pub start_time: String,

    /// Window end, HH:MM
    pub end_time: String,

    /// Minutes between departures
    pub interval_range: IntervalRangeResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IntervalRangeResult {
    pub min: u32,
    pub max: u32,
}

/// Timetable for a single stop.
#[derive(Debug, Serialize)]
pub struct StopTimetableResponse {
    pub id: i32,
    pub name: String,
    pub lat: f32,
    pub lon: f32,

    /// YYYY-MM-DD
    pub date: String,

    pub segments: Vec<SegmentResult>,
}

/// Timetable for a stop group.
#[derive(Debug, Serialize)]
pub struct GroupTimetableResponse {
    pub id: i32,
    pub name: String,

    /// YYYY-MM-DD
    pub date: String,

    pub segments: Vec<SegmentResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error category, e.g. "NotFound"
    pub code: String,

    /// Machine-readable reason, e.g. "BusStopNotFound"
    pub message: String,

    /// Human-readable explanation
    pub detail: String,
}

// Conversion implementations

impl BusStopResult {
    pub fn from_stop(stop: &BusStop) -> Self {
        Self {
            id: stop.id.0,
            name: stop.name.clone(),
            lat: stop.lat,
            lng: stop.lng,
        }
    }
}

impl BusStopGroupResult {
    pub fn from_group(group: &StopGroup) -> Self {
        Self {
            id: group.id.0,
            name: group.name.clone(),
            bus_stops: group.bus_stops.iter().map(BusStopResult::from_stop).collect(),
        }
    }
}

impl StopRefResult {
    fn from_destination(destination: &Destination) -> Self {
        Self {
            stop_id: destination.stop_id.0,
            stop_name: destination.name.clone(),
            lat: destination.lat,
            lng: destination.lng,
        }
    }
}

impl SegmentResult {
    pub fn from_row(row: &TimetableRow) -> Self {
        match row {
            TimetableRow::Fixed(fixed) => SegmentResult::Fixed(FixedSegmentResult {
                destination: StopRefResult::from_destination(&fixed.destination),
                times: fixed
                    .times
                    .iter()
                    .map(|t| TimePairResult {
                        departure: t.departure.clone(),
                        arrival: t.arrival.clone(),
                    })
                    .collect(),
            }),
            TimetableRow::Shuttle(shuttle) => SegmentResult::Shuttle(ShuttleSegmentResult {
                destination: StopRefResult::from_destination(&shuttle.destination),
                start_time: shuttle.start_time.to_string(),
                end_time: shuttle.end_time.to_string(),
                interval_range: IntervalRangeResult {
                    min: shuttle.interval_range.min,
                    max: shuttle.interval_range.max,
                },
                note: shuttle.note.clone(),
            }),
        }
    }
}

fn segment_results(timetable: &Timetable) -> Vec<SegmentResult> {
    timetable.segments.iter().map(SegmentResult::from_row).collect()
}

impl StopTimetableResponse {
    pub fn from_timetable(timetable: &Timetable) -> Self {
        let Coordinates { lat, lon } = timetable
            .coordinates
            .unwrap_or(Coordinates { lat: 0.0, lon: 0.0 });

        Self {
            id: timetable.id(),
            name: timetable.name.clone(),
            lat,
            lon,
            date: iso_date(timetable.date),
            segments: segment_results(timetable),
        }
    }
}

impl GroupTimetableResponse {
    pub fn from_timetable(timetable: &Timetable) -> Self {
        Self {
            id: timetable.id(),
            name: timetable.name.clone(),
            date: iso_date(timetable.date),
            segments: segment_results(timetable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{IntervalRange, TimePair};
    use crate::domain::{ClockTime, GroupId, StopId};
    use crate::timetable::{FixedRow, ShuttleRow, TimetableTarget};
    use chrono::NaiveDate;
    use serde_json::json;

    fn destination() -> Destination {
        Destination {
            stop_id: StopId(2),
            name: "Campus".to_string(),
            lat: Some(35.5),
            lng: None,
        }
    }

    fn rows() -> Vec<TimetableRow> {
        vec![
            TimetableRow::Fixed(FixedRow {
                destination: destination(),
                times: vec![TimePair {
                    departure: "08:00".to_string(),
                    arrival: "08:20".to_string(),
                }],
            }),
            TimetableRow::Shuttle(ShuttleRow {
                destination: destination(),
                start_time: ClockTime::from_hm(7, 30).unwrap(),
                end_time: ClockTime::from_hm(9, 0).unwrap(),
                interval_range: IntervalRange { min: 10, max: 15 },
                note: None,
            }),
        ]
    }

    #[test]
    fn stop_timetable_json_shape() {
        let timetable = Timetable {
            target: TimetableTarget::Stop(StopId(1)),
            name: "Station".to_string(),
            coordinates: Some(Coordinates { lat: 1.5, lon: 2.5 }),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            segments: rows(),
        };

        let value = serde_json::to_value(StopTimetableResponse::from_timetable(&timetable)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Station",
                "lat": 1.5,
                "lon": 2.5,
                "date": "2024-06-10",
                "segments": [
                    {
                        "segmentType": "fixed",
                        "destination": {"stopId": 2, "stopName": "Campus", "lat": 35.5},
                        "times": [{"departure": "08:00", "arrival": "08:20"}]
                    },
                    {
                        "segmentType": "shuttle",
                        "destination": {"stopId": 2, "stopName": "Campus", "lat": 35.5},
                        "startTime": "07:30",
                        "endTime": "09:00",
                        "intervalRange": {"min": 10, "max": 15}
                    }
                ]
            })
        );
    }

    #[test]
    fn group_timetable_has_no_coordinates() {
        let timetable = Timetable {
            target: TimetableTarget::Group(GroupId(10)),
            name: "Station".to_string(),
            coordinates: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            segments: Vec::new(),
        };

        let value = serde_json::to_value(GroupTimetableResponse::from_timetable(&timetable)).unwrap();
        assert_eq!(
            value,
            json!({"id": 10, "name": "Station", "date": "2024-06-10", "segments": []})
        );
    }

    #[test]
    fn group_result_uses_camel_case() {
        let group = StopGroup {
            id: GroupId(3),
            name: "Campus".to_string(),
            bus_stops: vec![BusStop {
                id: StopId(2),
                name: "Campus".to_string(),
                lat: None,
                lng: None,
            }],
        };

        let value = serde_json::to_value(BusStopGroupResult::from_group(&group)).unwrap();
        assert_eq!(
            value,
            json!({"id": 3, "name": "Campus", "busStops": [{"id": 2, "name": "Campus"}]})
        );
    }

    #[test]
    fn shuttle_note_is_serialized_when_present() {
        let mut row = rows().remove(1);
        if let TimetableRow::Shuttle(shuttle) = &mut row {
            shuttle.note = Some("exam period".to_string());
        }

        let value = serde_json::to_value(SegmentResult::from_row(&row)).unwrap();
        assert_eq!(value["note"], "exam period");
    }
}
