//! Stop and group timetable assembly.

use chrono::NaiveDate;
use thiserror::Error;

use crate::catalog::ServiceCatalog;
use crate::domain::{GroupId, StopId};

use super::lookup::{GroupLookup, StopLookup};
use super::resolver::resolve_origin_segments;
use super::row::{Coordinates, Timetable, TimetableTarget};

/// Errors that can occur when building a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    #[error("bus stop {0} not found")]
    StopNotFound(StopId),

    #[error("bus stop group {0} not found")]
    GroupNotFound(GroupId),
}

/// Builds timetables from a catalog and stop/group lookups.
pub struct TimetableBuilder<'a, S, G> {
    catalog: &'a ServiceCatalog,
    stops: &'a S,
    groups: &'a G,
}

impl<'a, S, G> TimetableBuilder<'a, S, G>
where
    S: StopLookup,
    G: GroupLookup,
{
    pub fn new(catalog: &'a ServiceCatalog, stops: &'a S, groups: &'a G) -> Self {
        Self {
            catalog,
            stops,
            groups,
        }
    }

    /// Timetable of all services departing `stop_id` on `date`.
    pub fn stop_timetable(&self, stop_id: StopId, date: NaiveDate) -> Result<Timetable, TimetableError> {
        let stop = self
            .stops
            .stop_by_id(stop_id)
            .ok_or(TimetableError::StopNotFound(stop_id))?;

        let segments = resolve_origin_segments(self.catalog, stop_id, date, self.stops);

        Ok(Timetable {
            target: TimetableTarget::Stop(stop_id),
            name: stop.name.clone(),
            coordinates: Some(Coordinates {
                lat: stop.lat.unwrap_or_default(),
                lon: stop.lng.unwrap_or_default(),
            }),
            date,
            segments,
        })
    }

    /// Timetable of all services departing any member of a group.
    ///
    /// Rows are concatenated in member order. A service reachable from
    /// several members appears once per member.
    pub fn group_timetable(&self, group_id: GroupId, date: NaiveDate) -> Result<Timetable, TimetableError> {
        let group = self
            .groups
            .group_by_id(group_id)
            .ok_or(TimetableError::GroupNotFound(group_id))?;

        let segments = group
            .member_stop_ids()
            .flat_map(|member| resolve_origin_segments(self.catalog, member, date, self.stops))
            .collect();

        Ok(Timetable {
            target: TimetableTarget::Group(group_id),
            name: group.name.clone(),
            coordinates: None,
            date,
            segments,
        })
    }

    pub fn build(&self, target: TimetableTarget, date: NaiveDate) -> Result<Timetable, TimetableError> {
        match target {
            TimetableTarget::Stop(id) => self.stop_timetable(id, date),
            TimetableTarget::Group(id) => self.group_timetable(id, date),
        }
    }
}
