//! Lookup capabilities consumed by the timetable builder.
//!
//! These abstractions allow the builder to be tested with in-memory stops.

use crate::domain::{BusStop, GroupId, StopGroup, StopId};

/// Resolves stop ids to stops.
pub trait StopLookup {
    fn stop_by_id(&self, id: StopId) -> Option<&BusStop>;
}

/// Resolves group ids to stop groups.
pub trait GroupLookup {
    fn group_by_id(&self, id: GroupId) -> Option<&StopGroup>;
}
