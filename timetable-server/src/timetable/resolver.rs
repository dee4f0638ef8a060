//! Segment resolution.
//!
//! Projects the segments of services departing from a stop into timetable
//! rows for one date. A service contributes rows only when both the service
//! validity and the segment condition hold. Rows that cannot be resolved
//! (unknown destination, bad shuttle times) are skipped and logged; they
//! never fail the request.

use chrono::NaiveDate;
use tracing::warn;

use crate::calendar::{segment_condition_matches, service_valid_on_date};
use crate::catalog::{Segment, ServiceCatalog, ShuttleSegment};
use crate::domain::{ClockTime, StopId, TimeError};

use super::lookup::StopLookup;
use super::row::{Destination, FixedRow, ShuttleRow, TimetableRow};

/// Rows for services departing `origin` on `date`.
///
/// Order is service declaration order, then segment order within a
/// service, so repeated calls give identical output.
pub fn resolve_origin_segments<S>(
    catalog: &ServiceCatalog,
    origin: StopId,
    date: NaiveDate,
    stops: &S,
) -> Vec<TimetableRow>
where
    S: StopLookup + ?Sized,
{
    let mut rows = Vec::new();

    for service in catalog
        .entries_from(origin)
        .filter(|s| service_valid_on_date(s, date))
    {
        let mut matching = service
            .segments
            .iter()
            .filter(|segment| segment_condition_matches(segment.condition(), date))
            .peekable();
        if matching.peek().is_none() {
            continue;
        }

        let Some(stop) = stops.stop_by_id(service.to.stop_id) else {
            warn!(
                service = %service.id,
                destination = %service.to.stop_id,
                "destination stop unresolved; skipping service segments"
            );
            continue;
        };
        let destination = Destination::from_stop(stop);

        for segment in matching {
            match segment {
                Segment::Fixed(fixed) => rows.push(TimetableRow::Fixed(FixedRow {
                    destination: destination.clone(),
                    times: fixed.times.clone(),
                })),
                Segment::Shuttle(shuttle) => match shuttle_window(shuttle) {
                    Ok((start_time, end_time)) => rows.push(TimetableRow::Shuttle(ShuttleRow {
                        destination: destination.clone(),
                        start_time,
                        end_time,
                        interval_range: shuttle.interval_range,
                        note: shuttle.note.clone(),
                    })),
                    Err(e) => warn!(
                        service = %service.id,
                        start_time = %shuttle.start_time,
                        end_time = %shuttle.end_time,
                        error = %e,
                        "invalid shuttle window; skipping segment"
                    ),
                },
            }
        }
    }

    rows
}

fn shuttle_window(shuttle: &ShuttleSegment) -> Result<(ClockTime, ClockTime), TimeError> {
    let start = ClockTime::parse_hhmm(&shuttle.start_time)?;
    let end = ClockTime::parse_hhmm(&shuttle.end_time)?;
    Ok((start, end))
}
