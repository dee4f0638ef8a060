//! In-memory stop directory.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::{BusStop, GroupId, StopGroup, StopId};
use crate::timetable::{GroupLookup, StopLookup};

use super::error::DirectoryError;

/// Stops and stop groups, in file order, with id indexes.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    stops: Vec<BusStop>,
    groups: Vec<StopGroup>,
    stop_index: HashMap<StopId, usize>,
    group_index: HashMap<GroupId, usize>,
}

impl StopDirectory {
    /// Create a directory from stops and groups.
    ///
    /// If an id appears more than once, the first entry wins.
    pub fn new(stops: Vec<BusStop>, groups: Vec<StopGroup>) -> Self {
        let mut stop_index = HashMap::new();
        for (i, stop) in stops.iter().enumerate() {
            stop_index.entry(stop.id).or_insert(i);
        }
        let mut group_index = HashMap::new();
        for (i, group) in groups.iter().enumerate() {
            group_index.entry(group.id).or_insert(i);
        }

        Self {
            stops,
            groups,
            stop_index,
            group_index,
        }
    }

    /// Load stops and groups from their JSON files.
    pub fn load(stops_path: &Path, groups_path: &Path) -> Result<Self, DirectoryError> {
        let stops: Vec<BusStop> = load_json_array(stops_path)?;
        let groups: Vec<StopGroup> = load_json_array(groups_path)?;
        Ok(Self::new(stops, groups))
    }

    /// All stops, in file order.
    pub fn stops(&self) -> &[BusStop] {
        &self.stops
    }

    /// All groups, in file order.
    pub fn groups(&self) -> &[StopGroup] {
        &self.groups
    }

    /// Member stops of a group, or `None` if the group does not exist.
    pub fn stops_in_group(&self, id: GroupId) -> Option<&[BusStop]> {
        self.group_by_id(id).map(|g| g.bus_stops.as_slice())
    }
}

impl StopLookup for StopDirectory {
    fn stop_by_id(&self, id: StopId) -> Option<&BusStop> {
        self.stop_index.get(&id).map(|&i| &self.stops[i])
    }
}

impl GroupLookup for StopDirectory {
    fn group_by_id(&self, id: GroupId) -> Option<&StopGroup> {
        self.group_index.get(&id).map(|&i| &self.groups[i])
    }
}

fn load_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DirectoryError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DirectoryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DirectoryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
