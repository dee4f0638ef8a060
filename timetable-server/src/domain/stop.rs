//! Bus stop and stop group types.

use std::fmt;

use serde::Deserialize;

/// Numeric identifier of a bus stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub i32);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of a bus stop group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bus stop as listed in the stop directory.
///
/// This is the authoritative source for a stop's name; service documents
/// only carry a display name for readability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusStop {
    pub id: StopId,
    pub name: String,
    #[serde(default)]
    pub lat: Option<f32>,
    #[serde(default)]
    pub lng: Option<f32>,
}

/// A named, ordered set of stops shown together (e.g. both sides of a road).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub bus_stops: Vec<BusStop>,
}

impl StopGroup {
    /// Member stop ids in declared order.
    pub fn member_stop_ids(&self) -> impl Iterator<Item = StopId> + '_ {
        self.bus_stops.iter().map(|s| s.id)
    }
}
